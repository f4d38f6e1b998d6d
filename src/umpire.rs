//! Round and match state machine.
//!
//! # Architecture
//!
//! The [`Umpire`] owns the [`MatchState`] and is stepped once per frame with
//! at most one [`MatchCommand`] and at most one detected hand. What happens
//! on a step depends only on the round clock (see [`crate::state::Phase`])
//! and the accumulated state:
//!
//! * [`Phase::Capture`]: read the player's hand and ask the [`Bowler`] for
//!   the computer's move.
//! * [`Phase::ResolveDisplay`]: apply the ball outcome, exactly once per
//!   round thanks to `scored_this_round`.
//! * [`Phase::Checkpoint`]: hand over to the second innings, or settle the
//!   match.
//! * [`Phase::AutoAdvance`]: start the next round unless the match is over.
//!
//! The umpire never plays sounds or draws anything. Each step returns the
//! [`Cue`]s the presentation layer should act on, and [`Umpire::scoreboard`]
//! gives a read-only snapshot for display.
use bevy::log::{debug, info};

use crate::{
    bowler::Bowler,
    clock::RoundClock,
    cricket::{self, BallOutcome, Innings, MatchResult, Side},
    hand::Detection,
    state::Phase,
};

/// Clock window during which the running-between-wickets loop plays.
const RUN_LOOP_START: u32 = 10;
const RUN_LOOP_END: u32 = 30;

const START_PROMPT: &str = "Press 'S' to Start the Game!";
const HAND_MISSING: &str = "Hand not detected! Please show your hand clearly.";
const IDLE_HINT: &str = "Press 'S' to Start | Press 'Q' to Quit";
const PLAY_HINT: &str = "Auto Next Round | Press 'Q' to Quit";
const RESTART_HINT: &str = "Press 'N' to Restart Game | Press 'Q' to Quit";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MatchCommand {
    /// Only honored before the match started
    Start,
    /// Only honored once the match is over
    Restart,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SoundCue {
    Out,
    StartRunLoop,
    StopRunLoop,
    Win,
    Lose,
    Tie,
    StopAll,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Celebration {
    Victory,
    GameOver,
}

/// Instruction for the presentation layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cue {
    Sound(SoundCue),
    Celebrate(Celebration),
    Exit,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MatchState {
    pub clock: RoundClock,
    pub round: u32,
    pub innings: Innings,
    pub player_score: u32,
    pub computer_score: u32,
    /// First innings total, set when the second innings starts.
    pub target: Option<u32>,
    pub is_out: bool,
    pub game_over: bool,
    pub scored_this_round: bool,
    pub player_move: Option<u8>,
    pub computer_move: Option<u8>,
    pub started: bool,
    /// Set once, when the match is decided.
    pub result: Option<MatchResult>,
}
impl MatchState {
    pub fn is_player_batting(&self) -> bool {
        self.innings.batting() == Side::Player
    }
    fn score_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Player => &mut self.player_score,
            Side::Computer => &mut self.computer_score,
        }
    }
}

/// What the presentation layer sees after a step.
#[derive(Clone, Debug, Default)]
pub struct Scoreboard {
    pub state: MatchState,
    /// Clock value the last step was evaluated at.
    pub clock: u32,
    pub phase: Phase,
    pub status: String,
    /// "You: 3  |  Computer: 4" while a ball is on display.
    pub ball_summary: String,
    pub instructions: &'static str,
}

pub struct Umpire {
    state: MatchState,
    status: String,
    ball_summary: String,
    run_loop: bool,
    last_tick: (u32, Phase),
}
impl Default for Umpire {
    fn default() -> Self {
        Self {
            state: MatchState::default(),
            status: START_PROMPT.to_owned(),
            ball_summary: String::new(),
            run_loop: false,
            last_tick: (0, Phase::Idle),
        }
    }
}

impl Umpire {
    #[cfg(test)]
    fn resume(state: MatchState) -> Self {
        Self { state, ..Self::default() }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn scoreboard(&self) -> Scoreboard {
        let instructions = match &self.state {
            MatchState { started: false, .. } => IDLE_HINT,
            MatchState { game_over: true, .. } => RESTART_HINT,
            _ => PLAY_HINT,
        };
        let (clock, phase) = self.last_tick;
        Scoreboard {
            state: self.state.clone(),
            clock,
            phase,
            status: self.status.clone(),
            ball_summary: self.ball_summary.clone(),
            instructions,
        }
    }

    /// Run one frame.
    ///
    /// `command` is handled first, then the phase for the current clock
    /// value, then the clock moves on.
    pub fn step<B: Bowler>(
        &mut self,
        command: Option<MatchCommand>,
        hand: Option<&Detection>,
        bowler: &mut B,
    ) -> Vec<Cue> {
        let mut cues = Vec::new();
        match command {
            Some(MatchCommand::Quit) => {
                info!("Quit requested");
                cues.push(Cue::Exit);
                return cues;
            }
            Some(MatchCommand::Start) if !self.state.started => self.start(),
            Some(MatchCommand::Restart) if self.state.game_over => self.restart(&mut cues),
            Some(ignored) => debug!("Ignoring {ignored:?}"),
            None => {}
        }
        self.update_run_loop(&mut cues);

        let clock = self.state.clock.value();
        let phase = Phase::of(self.state.started, clock);
        self.last_tick = (clock, phase);
        match phase {
            Phase::Idle => self.status = START_PROMPT.to_owned(),
            Phase::LeadIn => self.status = "Get Ready...".to_owned(),
            Phase::AwaitingGesture => {
                let batter = self.state.innings.batting().name();
                self.status = format!("{batter} batting - Show your hand!");
            }
            Phase::Capture => self.capture(hand, bowler),
            Phase::ResolveDisplay => self.resolve(&mut cues),
            Phase::Checkpoint => self.checkpoint(&mut cues),
            Phase::AutoAdvance if !self.state.game_over => {
                self.begin_round();
                return cues;
            }
            Phase::AutoAdvance => {}
        }
        self.state.clock.advance(self.state.started, self.state.game_over);
        cues
    }

    fn start(&mut self) {
        info!("Match started");
        self.state.started = true;
        self.begin_round();
    }

    fn restart(&mut self, cues: &mut Vec<Cue>) {
        info!("Match restarted");
        *self = Self::default();
        cues.push(Cue::Sound(SoundCue::StopAll));
    }

    fn begin_round(&mut self) {
        let state = &mut self.state;
        state.clock.reset();
        state.round += 1;
        state.scored_this_round = false;
        state.player_move = None;
        state.computer_move = None;
        self.status.clear();
        self.ball_summary.clear();
    }

    fn update_run_loop(&mut self, cues: &mut Vec<Cue>) {
        let clock = self.state.clock.value();
        let in_window = (RUN_LOOP_START..=RUN_LOOP_END).contains(&clock);
        let MatchState { started, game_over, is_out, .. } = self.state;
        if started && in_window && !game_over && !is_out && !self.run_loop {
            self.run_loop = true;
            cues.push(Cue::Sound(SoundCue::StartRunLoop));
        } else if !in_window || game_over {
            self.stop_run_loop(cues);
        }
    }

    fn stop_run_loop(&mut self, cues: &mut Vec<Cue>) {
        if self.run_loop {
            self.run_loop = false;
            cues.push(Cue::Sound(SoundCue::StopRunLoop));
        }
    }

    fn capture<B: Bowler>(&mut self, hand: Option<&Detection>, bowler: &mut B) {
        match hand {
            Some(detection) => {
                let player = detection.runs();
                let computer = bowler.bowl();
                debug!("Round {}: player {player}, computer {computer}", self.state.round);
                self.state.player_move = Some(player);
                self.state.computer_move = Some(computer);
            }
            None => debug!("Round {}: no hand at capture", self.state.round),
        }
    }

    fn resolve(&mut self, cues: &mut Vec<Cue>) {
        let (player, computer) = match (self.state.player_move, self.state.computer_move) {
            (Some(player), Some(computer)) => (player, computer),
            _ => {
                self.status = HAND_MISSING.to_owned();
                return;
            }
        };
        self.ball_summary = format!("You: {player}  |  Computer: {computer}");
        if self.state.scored_this_round {
            return;
        }
        self.state.scored_this_round = true;

        let batting = self.state.innings.batting();
        match cricket::bowl(player, computer, batting) {
            BallOutcome::Out => {
                info!("{} out, both showed {player}", batting.name());
                self.status = format!("OUT! Both showed {player}!");
                self.state.is_out = true;
                self.state.game_over = self.state.innings == Innings::Second;
                self.stop_run_loop(cues);
                cues.push(Cue::Sound(SoundCue::Out));
            }
            BallOutcome::Runs(side, runs) => {
                *self.state.score_mut(side) += u32::from(runs);
                self.status = format!("{} scored {runs} run(s)!", side.name());
                let chased = self.state.computer_score > self.state.player_score;
                if side == Side::Computer && self.state.innings == Innings::Second && chased {
                    let target = self.state.player_score + 1;
                    self.status = format!("Computer Won! They chased the target of {target}!");
                    self.state.is_out = true;
                    self.finish(MatchResult::Loss, cues);
                }
            }
        }
    }

    fn checkpoint(&mut self, cues: &mut Vec<Cue>) {
        if !self.state.is_out {
            return;
        }
        match self.state.innings {
            Innings::First => self.hand_over(),
            Innings::Second if self.state.result.is_none() => {
                let state = &self.state;
                let result = MatchResult::from_scores(state.player_score, state.computer_score);
                let text = match result {
                    MatchResult::Win => "You Won the Game! Press 'N' to restart",
                    MatchResult::Loss => "You Lost the Game! Press 'N' to restart",
                    MatchResult::Tie => "It's a Tie! Press 'N' to restart",
                };
                self.status = text.to_owned();
                self.finish(result, cues);
            }
            // Already settled by a successful chase
            Innings::Second => {}
        }
    }

    fn hand_over(&mut self) {
        let state = &mut self.state;
        let target = state.player_score;
        info!("Innings over, computer needs {}", target + 1);
        state.target = Some(target);
        state.is_out = false;
        state.innings = Innings::Second;
        state.game_over = false;
        self.status = format!("Innings Over! Computer needs {} to win.", target + 1);
    }

    fn finish(&mut self, result: MatchResult, cues: &mut Vec<Cue>) {
        let state = &mut self.state;
        info!("Match over: {result:?} ({} - {})", state.player_score, state.computer_score);
        state.game_over = true;
        state.result = Some(result);
        self.stop_run_loop(cues);
        match result {
            MatchResult::Win => {
                cues.push(Cue::Sound(SoundCue::Win));
                cues.push(Cue::Celebrate(Celebration::Victory));
            }
            MatchResult::Loss => {
                cues.push(Cue::Sound(SoundCue::Lose));
                cues.push(Cue::Celebrate(Celebration::GameOver));
            }
            MatchResult::Tie => cues.push(Cue::Sound(SoundCue::Tie)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::GRACE_LIMIT, hand::synthetic_landmarks, state::CHECKPOINT_TICK};

    fn showing(runs: u8) -> Detection {
        Detection::from_raw(&synthetic_landmarks(runs), "Right").unwrap()
    }

    /// Step without commands until the next step evaluates `clock`.
    fn play_until(
        umpire: &mut Umpire,
        clock: u32,
        hand: Option<&Detection>,
        bowler: &mut impl Bowler,
    ) -> Vec<Cue> {
        let mut cues = Vec::new();
        for _ in 0..1000 {
            if umpire.state().clock.value() == clock {
                return cues;
            }
            cues.extend(umpire.step(None, hand, bowler));
        }
        panic!("clock never reached {clock}");
    }

    fn started() -> Umpire {
        let mut umpire = Umpire::default();
        umpire.step(Some(MatchCommand::Start), None, &mut || 1);
        umpire
    }

    fn second_innings(player: u32, computer: u32, clock: u32) -> MatchState {
        MatchState {
            clock: RoundClock::at(clock),
            round: 7,
            innings: Innings::Second,
            player_score: player,
            computer_score: computer,
            target: Some(player),
            started: true,
            ..MatchState::default()
        }
    }

    fn sounds(cues: &[Cue]) -> Vec<SoundCue> {
        cues.iter()
            .filter_map(|cue| match cue {
                Cue::Sound(sound) => Some(*sound),
                _ => None,
            })
            .collect()
    }

    fn celebrations(cues: &[Cue]) -> Vec<Celebration> {
        cues.iter()
            .filter_map(|cue| match cue {
                Cue::Celebrate(celebration) => Some(*celebration),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn idle_until_started() {
        let mut umpire = Umpire::default();
        for _ in 0..10 {
            umpire.step(None, Some(&showing(3)), &mut || 3);
        }
        assert_eq!(umpire.state(), &MatchState::default());
        assert_eq!(umpire.scoreboard().phase, Phase::Idle);
        assert_eq!(umpire.scoreboard().status, START_PROMPT);
        assert_eq!(umpire.scoreboard().instructions, IDLE_HINT);
    }

    #[test]
    fn start_opens_first_round() {
        let umpire = started();
        let state = umpire.state();
        assert!(state.started);
        assert_eq!(state.round, 1);
        assert_eq!(state.clock.value(), 1);
        assert!(state.is_player_batting());
        let board = umpire.scoreboard();
        assert_eq!(board.clock, 0);
        assert_eq!(board.phase, Phase::LeadIn);
        assert_eq!(board.status, "Get Ready...");
        assert_eq!(board.instructions, PLAY_HINT);
    }

    #[test]
    fn invalid_commands_are_ignored() {
        let mut umpire = started();
        let before = umpire.state().clone();
        umpire.step(Some(MatchCommand::Start), None, &mut || 1);
        umpire.step(Some(MatchCommand::Restart), None, &mut || 1);
        assert_eq!(umpire.state().round, before.round);
        assert_eq!(umpire.state().clock.value(), before.clock.value() + 2);
        assert!(umpire.state().started);
    }

    #[test]
    fn quit_exits_without_stepping() {
        let mut umpire = started();
        let before = umpire.state().clone();
        let cues = umpire.step(Some(MatchCommand::Quit), None, &mut || 1);
        assert_eq!(cues, vec![Cue::Exit]);
        assert_eq!(umpire.state(), &before);
    }

    #[test]
    fn awaiting_announces_batter() {
        let mut umpire = started();
        play_until(&mut umpire, 6, None, &mut || 1);
        assert_eq!(umpire.scoreboard().status, "You batting - Show your hand!");
    }

    #[test]
    fn first_innings_dismissal_hands_over_at_checkpoint() {
        let mut umpire = started();
        let (hand, mut bowler) = (showing(4), || 4);
        play_until(&mut umpire, 16, Some(&hand), &mut bowler);
        assert_eq!(umpire.state().player_move, Some(4));
        assert_eq!(umpire.state().computer_move, Some(4));

        let cues = umpire.step(None, Some(&hand), &mut bowler);
        assert!(sounds(&cues).contains(&SoundCue::Out));
        let state = umpire.state();
        assert!(state.is_out);
        assert!(!state.game_over);
        assert_eq!(state.innings, Innings::First);
        assert_eq!(umpire.scoreboard().status, "OUT! Both showed 4!");

        play_until(&mut umpire, CHECKPOINT_TICK, Some(&hand), &mut bowler);
        assert_eq!(umpire.state().target, None);
        umpire.step(None, Some(&hand), &mut bowler);
        let state = umpire.state();
        assert_eq!(state.innings, Innings::Second);
        assert_eq!(state.target, Some(0));
        assert!(!state.is_out);
        assert!(!state.game_over);
        assert!(!state.is_player_batting());
        assert_eq!(umpire.scoreboard().status, "Innings Over! Computer needs 1 to win.");
    }

    #[test]
    fn successful_chase_ends_immediately() {
        let mut umpire = Umpire::resume(second_innings(8, 3, 15));
        let (hand, mut bowler) = (showing(2), || 6);
        umpire.step(None, Some(&hand), &mut bowler);
        let cues = umpire.step(None, Some(&hand), &mut bowler);

        let state = umpire.state();
        assert_eq!(state.computer_score, 9);
        assert!(state.game_over);
        assert_eq!(state.result, Some(MatchResult::Loss));
        assert_eq!(sounds(&cues), vec![SoundCue::StopRunLoop, SoundCue::Lose]);
        assert_eq!(celebrations(&cues), vec![Celebration::GameOver]);
        assert_eq!(umpire.scoreboard().status, "Computer Won! They chased the target of 9!");

        let cues = play_until(&mut umpire, CHECKPOINT_TICK + 1, Some(&hand), &mut bowler);
        assert!(celebrations(&cues).is_empty());
        assert!(!sounds(&cues).contains(&SoundCue::Lose));
        assert_eq!(umpire.state().result, Some(MatchResult::Loss));
        assert_eq!(umpire.state().computer_score, 9);
    }

    #[test]
    fn short_chase_keeps_playing() {
        let mut umpire = Umpire::resume(second_innings(10, 3, 15));
        let (hand, mut bowler) = (showing(2), || 6);
        umpire.step(None, Some(&hand), &mut bowler);
        umpire.step(None, Some(&hand), &mut bowler);
        assert_eq!(umpire.state().computer_score, 9);
        assert!(!umpire.state().game_over);
        assert_eq!(umpire.scoreboard().status, "Computer scored 6 run(s)!");
    }

    #[test]
    fn missing_hand_leaves_round_unresolved() {
        let mut umpire = started();
        let mut bowler = || -> u8 { panic!("bowled without a hand") };
        play_until(&mut umpire, 16, None, &mut bowler);
        assert_eq!(umpire.state().player_move, None);
        assert_eq!(umpire.state().computer_move, None);

        umpire.step(None, None, &mut bowler);
        assert_eq!(umpire.scoreboard().status, HAND_MISSING);
        assert!(!umpire.state().scored_this_round);

        play_until(&mut umpire, CHECKPOINT_TICK + 1, None, &mut bowler);
        umpire.step(None, None, &mut bowler);
        let state = umpire.state();
        assert_eq!((state.player_score, state.computer_score), (0, 0));
        assert_eq!(state.round, 2);
        assert_eq!(state.clock.value(), 0);
    }

    #[test]
    fn round_auto_advances() {
        let mut umpire = started();
        let (hand, mut bowler) = (showing(2), || 3);
        play_until(&mut umpire, CHECKPOINT_TICK + 1, Some(&hand), &mut bowler);
        assert!(umpire.state().scored_this_round);
        assert_eq!(umpire.state().player_score, 2);

        umpire.step(None, Some(&hand), &mut bowler);
        let state = umpire.state();
        assert_eq!(state.clock.value(), 0);
        assert_eq!(state.round, 2);
        assert!(!state.scored_this_round);
        assert_eq!(state.player_move, None);
        assert_eq!(state.computer_move, None);
        assert!(umpire.scoreboard().ball_summary.is_empty());
    }

    #[test]
    fn ball_is_scored_once_per_round() {
        let mut umpire = started();
        let (hand, mut bowler) = (showing(3), || 1);
        play_until(&mut umpire, 16, Some(&hand), &mut bowler);
        let mut applied = 0;
        for _ in 16..CHECKPOINT_TICK {
            let was_scored = umpire.state().scored_this_round;
            umpire.step(None, Some(&hand), &mut bowler);
            if !was_scored && umpire.state().scored_this_round {
                applied += 1;
            }
        }
        assert_eq!(applied, 1);
        assert_eq!(umpire.state().player_score, 3);
        assert_eq!(umpire.scoreboard().ball_summary, "You: 3  |  Computer: 1");
    }

    #[test]
    fn second_innings_dismissal_settles_at_checkpoint() {
        let mut umpire = Umpire::resume(second_innings(10, 4, 15));
        let (hand, mut bowler) = (showing(3), || 3);
        umpire.step(None, Some(&hand), &mut bowler);
        umpire.step(None, Some(&hand), &mut bowler);
        assert!(umpire.state().game_over);
        assert_eq!(umpire.state().result, None);

        let cues = play_until(&mut umpire, CHECKPOINT_TICK + 1, Some(&hand), &mut bowler);
        assert_eq!(umpire.state().result, Some(MatchResult::Win));
        assert_eq!(sounds(&cues), vec![SoundCue::Win]);
        assert_eq!(celebrations(&cues), vec![Celebration::Victory]);
        assert_eq!(umpire.scoreboard().status, "You Won the Game! Press 'N' to restart");
        assert_eq!(umpire.scoreboard().instructions, RESTART_HINT);

        play_until(&mut umpire, GRACE_LIMIT + 1, Some(&hand), &mut bowler);
        for _ in 0..10 {
            umpire.step(None, Some(&hand), &mut bowler);
        }
        assert_eq!(umpire.state().clock.value(), GRACE_LIMIT + 1);
        assert_eq!(umpire.state().round, 7);
    }

    #[test]
    fn level_scores_tie() {
        let mut umpire = Umpire::resume(second_innings(5, 5, 15));
        let (hand, mut bowler) = (showing(2), || 2);
        let cues = play_until(&mut umpire, CHECKPOINT_TICK + 1, Some(&hand), &mut bowler);
        assert_eq!(umpire.state().result, Some(MatchResult::Tie));
        assert!(sounds(&cues).contains(&SoundCue::Tie));
        assert!(celebrations(&cues).is_empty());
    }

    #[test]
    fn run_loop_follows_clock() {
        let mut umpire = started();
        let (hand, mut bowler) = (showing(2), || 1);
        let cues = play_until(&mut umpire, 11, Some(&hand), &mut bowler);
        assert_eq!(sounds(&cues), vec![SoundCue::StartRunLoop]);
        let cues = play_until(&mut umpire, 1, Some(&hand), &mut bowler);
        assert_eq!(sounds(&cues), vec![SoundCue::StopRunLoop]);
    }

    #[test]
    fn dismissal_stops_run_loop() {
        let mut umpire = started();
        let (hand, mut bowler) = (showing(6), || 6);
        play_until(&mut umpire, 16, Some(&hand), &mut bowler);
        let cues = umpire.step(None, Some(&hand), &mut bowler);
        assert_eq!(sounds(&cues), vec![SoundCue::StopRunLoop, SoundCue::Out]);
    }

    #[test]
    fn restart_resets_everything() {
        let mut umpire = Umpire::resume(second_innings(5, 9, 40));
        umpire.state.game_over = true;
        umpire.state.is_out = true;
        umpire.state.result = Some(MatchResult::Loss);
        umpire.state.player_move = Some(3);

        let cues = umpire.step(Some(MatchCommand::Restart), None, &mut || 1);
        assert_eq!(sounds(&cues), vec![SoundCue::StopAll]);
        assert_eq!(umpire.state(), &MatchState::default());
        assert_eq!(umpire.scoreboard().status, START_PROMPT);
    }

    #[test]
    fn target_only_in_second_innings() {
        let mut script = [1u8, 4, 2, 6, 3, 3, 2, 1, 4].into_iter().cycle();
        let mut bowler = move || script.next().unwrap_or(1);
        let hands: Vec<Detection> = [2, 3, 4, 1, 6].into_iter().map(showing).collect();
        let mut umpire = started();
        for tick in 0..2000 {
            let hand = &hands[tick / 27 % hands.len()];
            umpire.step(None, Some(hand), &mut bowler);
            let state = umpire.state();
            assert_eq!(state.target.is_some(), state.innings == Innings::Second);
            assert_eq!(state.is_player_batting(), state.innings == Innings::First);
            if state.game_over && state.result.is_some() {
                return;
            }
        }
        panic!("scripted match never ended");
    }
}
