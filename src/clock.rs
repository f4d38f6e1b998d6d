//! Discrete frame clock for a round.

/// Last clock value that still advances once the match is over, so the
/// end-of-match cues have time to play.
pub const GRACE_LIMIT: u32 = 50;

/// Ticks elapsed in the current round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundClock(u32);
impl RoundClock {
    #[cfg(test)]
    pub fn at(value: u32) -> Self {
        Self(value)
    }
    pub fn value(&self) -> u32 {
        self.0
    }
    pub fn reset(&mut self) {
        self.0 = 0;
    }
    /// Move forward one tick if the match allows it.
    ///
    /// The clock runs while a started match is in play, and keeps running
    /// after game over until it passes [`GRACE_LIMIT`].
    pub fn advance(&mut self, started: bool, game_over: bool) {
        let in_play = started && !game_over;
        let in_grace = started && game_over && self.0 <= GRACE_LIMIT;
        if in_play || in_grace {
            self.0 += 1;
        }
    }
}
