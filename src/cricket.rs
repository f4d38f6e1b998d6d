//! Rules of hand cricket: how a single ball resolves and how a match is
//! decided (rather than when, see [`crate::umpire`] for that).
//!
//! # Rules
//!
//! * Both sides show a number at the same time.
//! * Same number: the batting side is out.
//! * Otherwise the batting side scores the number it showed, the bowling
//!   side's number is ignored.
//! * The player bats first. The computer then chases; it wins as soon as it
//!   passes the player's total.

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum Side {
    Player,
    Computer,
}
impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Side::Player => "You",
            Side::Computer => "Computer",
        }
    }
}

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum Innings {
    First,
    Second,
}
impl Default for Innings {
    fn default() -> Self {
        Innings::First
    }
}
impl Innings {
    pub fn number(self) -> u8 {
        match self {
            Innings::First => 1,
            Innings::Second => 2,
        }
    }
    pub fn batting(self) -> Side {
        match self {
            Innings::First => Side::Player,
            Innings::Second => Side::Computer,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BallOutcome {
    Out,
    Runs(Side, u8),
}

/// Resolve one ball where `player` and `computer` are the shown values.
pub fn bowl(player: u8, computer: u8, batting: Side) -> BallOutcome {
    match batting {
        _ if player == computer => BallOutcome::Out,
        Side::Player => BallOutcome::Runs(Side::Player, player),
        Side::Computer => BallOutcome::Runs(Side::Computer, computer),
    }
}

/// Final result, from the player's point of view.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum MatchResult {
    Win,
    Loss,
    Tie,
}
impl MatchResult {
    pub fn from_scores(player: u32, computer: u32) -> Self {
        use std::cmp::Ordering::*;
        match player.cmp(&computer) {
            Greater => MatchResult::Win,
            Less => MatchResult::Loss,
            Equal => MatchResult::Tie,
        }
    }
}
