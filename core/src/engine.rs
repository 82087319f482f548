use core::fmt::Debug;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - NotStarted -> Won
/// - NotStarted -> Lost
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a single action did to a puzzle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    NoChange,
    /// Annotation only (flags), does not start the game or count as a move
    Marked,
    Advanced,
    Won,
    Lost,
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        use ActionOutcome::*;
        match self {
            NoChange => false,
            Marked => true,
            Advanced => true,
            Won => true,
            Lost => true,
        }
    }

    const fn counts_as_move(self) -> bool {
        matches!(self, Self::Advanced | Self::Won | Self::Lost)
    }
}

/// Game-specific rules driven by a [`Session`].
pub trait PuzzleRules {
    type Action: Copy + Debug;

    fn apply(&mut self, action: Self::Action) -> Result<ActionOutcome>;
}

/// Owns one game instance from start to finish: state machine, move counter, and elapsed time.
#[derive(Clone, Debug, PartialEq)]
pub struct Session<P> {
    puzzle: P,
    state: EngineState,
    moves: u32,
    elapsed_secs: u32,
}

impl<P: PuzzleRules> Session<P> {
    pub fn new(puzzle: P) -> Self {
        Self {
            puzzle,
            state: Default::default(),
            moves: 0,
            elapsed_secs: 0,
        }
    }

    pub fn puzzle(&self) -> &P {
        &self.puzzle
    }

    pub fn into_puzzle(self) -> P {
        self.puzzle
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Applies a player action. Once the game is over every action is a silent no-op.
    pub fn act(&mut self, action: P::Action) -> Result<ActionOutcome> {
        if self.state.is_finished() {
            log::trace!("Ignoring {:?}, game already ended", action);
            return Ok(ActionOutcome::NoChange);
        }

        let outcome = self.puzzle.apply(action)?;
        if outcome.counts_as_move() {
            self.moves += 1;
        }

        match outcome {
            ActionOutcome::NoChange | ActionOutcome::Marked => {}
            ActionOutcome::Advanced => self.mark_started(),
            ActionOutcome::Won => self.mark_ended(true),
            ActionOutcome::Lost => self.mark_ended(false),
        }
        Ok(outcome)
    }

    /// One tick of the host's one-second interval. Returns whether the interval should keep running, `false` means it
    /// can be released.
    pub fn tick(&mut self) -> bool {
        if matches!(self.state, EngineState::InProgress) {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Whether the host should currently hold a running interval.
    pub fn is_clock_running(&self) -> bool {
        matches!(self.state, EngineState::InProgress)
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            log::debug!("Game started");
            self.state = EngineState::InProgress;
        }
    }

    fn mark_ended(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        log::debug!(
            "Game ended as {:?} after {} moves and {}s",
            self.state,
            self.moves,
            self.elapsed_secs
        );
    }
}
