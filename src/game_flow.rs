//! Game flow driver, steps the [`Umpire`] on a fixed tick and dispatches its
//! cues.
//!
//! # Architecture
//!
//! Every tick [`step_match`]:
//! * takes the [`PendingCommand`] left by the controls, if any,
//! * reads the [`HandTracker`] for this frame's hand,
//! * steps the umpire with the [`RandomBowler`],
//! * forwards [`Cue::Sound`] as [`SoundCue`] events (see [`crate::audio`]),
//!   [`Cue::Celebrate`] as [`Celebration`] events (see [`crate::celebrate`])
//!   and [`Cue::Exit`] as [`AppExit`],
//! * publishes the [`Scoreboard`] resource read by [`crate::game_ui`].
//!
//! The tick rate is fixed from [`crate::settings::Settings`], so the clock
//! windows of [`crate::state::Phase`] map to real time.
use bevy::app::AppExit;
use bevy::core::FixedTimestep;
use bevy::prelude::{Plugin as BevyPlugin, *};
use bevy_debug_text_overlay::screen_print;

use crate::{
    bowler::RandomBowler,
    controls::PendingCommand,
    tracker::HandTracker,
    umpire::{Celebration, Cue, Scoreboard, SoundCue, Umpire},
};

/// Log the clock and score every this many ticks.
const TRACE_EVERY: u32 = 30;

#[allow(clippy::too_many_arguments)]
fn step_match(
    mut umpire: ResMut<Umpire>,
    mut board: ResMut<Scoreboard>,
    mut bowler: NonSendMut<RandomBowler>,
    mut pending: ResMut<PendingCommand>,
    mut sounds: EventWriter<SoundCue>,
    mut celebrations: EventWriter<Celebration>,
    mut exit: EventWriter<AppExit>,
    tracker: Res<HandTracker>,
) {
    let cues = umpire.step(pending.take(), tracker.0.as_ref(), &mut *bowler);
    for cue in cues {
        match cue {
            Cue::Sound(sound) => sounds.send(sound),
            Cue::Celebrate(celebration) => celebrations.send(celebration),
            Cue::Exit => exit.send(AppExit),
        }
    }
    *board = umpire.scoreboard();

    screen_print!("clock {} {:?}", board.clock, board.phase);
    let state = &board.state;
    if state.started && board.clock % TRACE_EVERY == 0 {
        debug!(
            "Clock: {}, Text: {}, Score: {}-{}",
            board.clock, board.status, state.player_score, state.computer_score
        );
    }
}

pub struct Plugin {
    pub tick_rate: f64,
    pub seed: Option<u64>,
}
impl BevyPlugin for Plugin {
    fn build(&self, app: &mut App) {
        let tick_rate = self.tick_rate;
        let seeded = self.seed.is_some();
        app.init_resource::<Umpire>()
            .init_resource::<Scoreboard>()
            .insert_non_send_resource(RandomBowler::new(self.seed))
            .add_event::<SoundCue>()
            .add_event::<Celebration>()
            .add_startup_system(move || info!("Round clock at {tick_rate} Hz, seeded: {seeded}"))
            .add_system_set(
                SystemSet::new()
                    .with_run_criteria(FixedTimestep::step(1.0 / tick_rate))
                    .with_system(step_match),
            );
    }
}
