//! Start-up settings, read from the environment.
use std::str::FromStr;

use anyhow::{bail, Context, Result};

pub struct Settings {
    /// Round clock ticks per second
    pub tick_rate: f64,
    /// Fixed seed for the computer's moves
    pub seed: Option<u64>,
    pub volume: f32,
    pub windowed: bool,
}
impl Default for Settings {
    fn default() -> Self {
        Self { tick_rate: 15.0, seed: None, volume: 0.8, windowed: false }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Settings::default();
        let settings = Self {
            tick_rate: parse(&lookup, "HAND_CRICKET_TICK_HZ")?.unwrap_or(defaults.tick_rate),
            seed: parse(&lookup, "HAND_CRICKET_SEED")?,
            volume: parse(&lookup, "HAND_CRICKET_VOLUME")?.unwrap_or(defaults.volume),
            windowed: parse(&lookup, "HAND_CRICKET_WINDOWED")?.unwrap_or(defaults.windowed),
        };
        if !(settings.tick_rate.is_finite() && settings.tick_rate > 0.0) {
            bail!("HAND_CRICKET_TICK_HZ must be positive, got {}", settings.tick_rate);
        }
        if !(0.0..=1.0).contains(&settings.volume) {
            bail!("HAND_CRICKET_VOLUME must be within 0.0 and 1.0, got {}", settings.volume);
        }
        Ok(settings)
    }
}

fn parse<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|value| value.trim().parse().with_context(|| format!("invalid {key}: {value:?}")))
        .transpose()
}
