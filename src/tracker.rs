//! Latest hand seen by the detector.
//!
//! Camera capture and landmark detection live outside this crate. A detector
//! integration writes the [`HandTracker`] resource every frame. Without one,
//! the keyboard stands in: holding a digit key shows a hand with that many
//! runs (`0` for a fist, `1`-`4` fingers, `6` thumb).
use bevy::prelude::{Plugin as BevyPlugin, *};
use bevy_debug_text_overlay::screen_print;

use crate::hand::{synthetic_landmarks, Detection};

/// Hand detected in the most recent frame, if any.
#[derive(Default)]
pub struct HandTracker(pub Option<Detection>);

/// Stand-in detector reading held digit keys.
fn keyboard_hand(keys: Res<Input<KeyCode>>, mut tracker: ResMut<HandTracker>) {
    use KeyCode::*;
    const DIGITS: [(KeyCode, u8); 6] = [(Key0, 0), (Key1, 1), (Key2, 2), (Key3, 3), (Key4, 4), (Key6, 6)];
    let held = DIGITS.iter().find(|(key, _)| keys.pressed(*key));
    tracker.0 = held.and_then(|(_, runs)| {
        let points = synthetic_landmarks(*runs);
        match Detection::from_raw(&points, "Right") {
            Ok(detection) => Some(detection),
            Err(err) => {
                warn!("dropping hand: {err}");
                None
            }
        }
    });
    if let Some(detection) = &tracker.0 {
        screen_print!("hand shows {}", detection.runs());
    }
}

pub struct Plugin;
impl BevyPlugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HandTracker>()
            .add_system_to_stage(CoreStage::PreUpdate, keyboard_hand);
    }
}
