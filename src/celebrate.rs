//! End of match overlay, a pulsing banner shown over the HUD.
use std::f32::consts::TAU;

use bevy::prelude::{Plugin as BevyPlugin, *};
use bevy_ui_build_macros::{size, style, unit};

use crate::{
    game_ui::HudAssets,
    umpire::{Celebration, SoundCue},
};

const SHOW_SECONDS: f64 = 4.0;
const PULSE_PERIOD: f32 = 1.2;

impl Celebration {
    fn banner(self) -> (&'static str, Color) {
        match self {
            Celebration::Victory => ("VICTORY!", Color::GOLD),
            Celebration::GameOver => ("GAME OVER", Color::CRIMSON),
        }
    }
}

/// Root of a shown overlay, despawned once `until` is past.
#[derive(Component)]
struct Overlay {
    until: f64,
}

#[derive(Component)]
struct Pulse;

fn show_overlay(
    mut cmds: Commands,
    mut events: EventReader<Celebration>,
    shown: Query<Entity, With<Overlay>>,
    hud: Res<HudAssets>,
    time: Res<Time>,
) {
    let celebration = match events.iter().last() {
        Some(celebration) => *celebration,
        None => return,
    };
    shown.iter().for_each(|entity| cmds.entity(entity).despawn_recursive());
    let (message, color) = celebration.banner();
    cmds.spawn_bundle(NodeBundle {
        color: Color::rgba(0.0, 0.0, 0.0, 0.5).into(),
        style: style! {
            position_type: PositionType::Absolute,
            size: size!(100 pct, 100 pct),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
        },
        ..Default::default()
    })
    .insert_bundle((
        Overlay { until: time.seconds_since_startup() + SHOW_SECONDS },
        Name::new("Celebration"),
    ))
    .with_children(|overlay| {
        overlay.spawn_bundle(hud.text(message, 160.0, color)).insert(Pulse);
    });
}

fn pulse(time: Res<Time>, mut texts: Query<&mut Text, With<Pulse>>) {
    let t = time.seconds_since_startup() as f32 / PULSE_PERIOD;
    let alpha = 0.65 + 0.35 * (t * TAU).sin();
    for mut text in texts.iter_mut() {
        if let Some(section) = text.sections.first_mut() {
            section.style.color.set_a(alpha);
        }
    }
}

/// Clears the overlay when its time is up or the match restarts.
fn hide_overlay(
    mut cmds: Commands,
    mut sounds: EventReader<SoundCue>,
    overlays: Query<(Entity, &Overlay)>,
    time: Res<Time>,
) {
    let restarted = sounds.iter().any(|cue| *cue == SoundCue::StopAll);
    let now = time.seconds_since_startup();
    for (entity, overlay) in overlays.iter() {
        if restarted || overlay.until <= now {
            cmds.entity(entity).despawn_recursive();
        }
    }
}

pub struct Plugin;
impl BevyPlugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_system(show_overlay)
            .add_system(pulse)
            .add_system(hide_overlay);
    }
}
