//! Phases of a round, keyed by the round clock.
//!
//! ```text
//!  clock:  0 ... 4 | 5 ... 14 | 15 | 16 ... 24 | 25 | 26+
//!          LeadIn  | Awaiting |Cap.| Resolve   | CP | AutoAdvance
//! ```

/// Clock value at which the gesture and the opponent move are sampled.
pub const CAPTURE_TICK: u32 = 15;
/// Clock value at which innings and match endings are decided.
pub const CHECKPOINT_TICK: u32 = 25;

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Waiting for the start command
    Idle,
    /// Countdown before the batting side is announced
    LeadIn,
    /// Batting side shown, player should raise their hand
    AwaitingGesture,
    /// Moves are sampled on this tick
    Capture,
    /// Outcome of the ball is applied and displayed
    ResolveDisplay,
    /// Innings handover or match result
    Checkpoint,
    /// Round over, next one starts unless the match ended
    AutoAdvance,
}
impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

/// Last clock value (inclusive) of each phase within a round, in order.
const PHASE_TABLE: [(u32, Phase); 5] = [
    (4, Phase::LeadIn),
    (CAPTURE_TICK - 1, Phase::AwaitingGesture),
    (CAPTURE_TICK, Phase::Capture),
    (CHECKPOINT_TICK - 1, Phase::ResolveDisplay),
    (CHECKPOINT_TICK, Phase::Checkpoint),
];

impl Phase {
    /// The phase for `clock`, a pure function of its inputs.
    pub fn of(started: bool, clock: u32) -> Self {
        if !started {
            return Phase::Idle;
        }
        PHASE_TABLE
            .iter()
            .find(|(last, _)| clock <= *last)
            .map_or(Phase::AutoAdvance, |(_, phase)| *phase)
    }
}
