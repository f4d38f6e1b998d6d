//! The computer's side of each ball.

/// Values the computer can play. Five is never bowled.
pub const BOWLER_MOVES: [u8; 5] = [1, 2, 3, 4, 6];

/// Source of the computer's moves, sampled once per round.
pub trait Bowler {
    fn bowl(&mut self) -> u8;
}

/// Scripted bowlers, mostly for tests: `|| 4` always plays 4.
impl<F: FnMut() -> u8> Bowler for F {
    fn bowl(&mut self) -> u8 {
        self()
    }
}

/// Uniform pick over [`BOWLER_MOVES`].
pub struct RandomBowler {
    rng: fastrand::Rng,
}
impl RandomBowler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self { rng }
    }
}
impl Bowler for RandomBowler {
    fn bowl(&mut self) -> u8 {
        BOWLER_MOVES[self.rng.usize(..BOWLER_MOVES.len())]
    }
}
