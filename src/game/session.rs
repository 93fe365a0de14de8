//! A whole game: turns in a loop until someone wins.

use log::{debug, info};
use serde::Serialize;

use crate::error::SessionError;
use crate::game::invariants::assert_invariants;
use crate::game::{DecisionProvider, DiceRoller, GameState, PlayerId, TurnSummary, take_turn};
use crate::record::{PlayerSnapshot, RecordSink, TurnRecord, snapshot};

/// Game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of seats.
    pub num_players: usize,
    /// Coins every player starts with.
    pub starting_coins: u32,
    /// Turn limit; reaching it ends the game without a winner.
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 2,
            starting_coins: 0,
            max_turns: 10_000,
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    /// Game identifier.
    pub game_id: u64,
    /// First player to own every landmark, `None` at the turn limit.
    pub winner: Option<PlayerId>,
    /// Turns played.
    pub turns: u32,
    /// Every player at the end.
    pub players: Vec<PlayerSnapshot>,
}

/// Owns one game and drives it to completion.
#[derive(Debug)]
pub struct GameSession<D, S> {
    game_id: u64,
    max_turns: u32,
    state: GameState,
    dice: DiceRoller,
    decisions: D,
    sink: S,
}

impl<D: DecisionProvider, S: RecordSink> GameSession<D, S> {
    /// Set up a game. `seed` drives every die roll.
    pub fn new(game_id: u64, seed: u64, config: &GameConfig, decisions: D, sink: S) -> Self {
        Self {
            game_id,
            max_turns: config.max_turns,
            state: GameState::new(config.num_players, config.starting_coins),
            dice: DiceRoller::new(seed),
            decisions,
            sink,
        }
    }

    /// Current state, read-only.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The record sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Take back the decision provider and sink.
    pub fn into_parts(self) -> (D, S) {
        (self.decisions, self.sink)
    }

    /// Whether the game has a winner or hit the turn limit.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.is_game_over() || self.state.turn >= self.max_turns
    }

    /// Play and record one turn.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if the turn could not be completed, or
    /// the sink's I/O error.
    pub fn step(&mut self) -> Result<TurnSummary, SessionError> {
        let summary = take_turn(&mut self.state, &mut self.dice, &mut self.decisions)?;
        assert_invariants(&self.state);
        self.sink
            .record_turn(&TurnRecord::new(self.game_id, &summary, &self.state))?;
        Ok(summary)
    }

    /// Play until someone wins or the turn limit is reached.
    ///
    /// # Errors
    ///
    /// See [`GameSession::step`]; the sink's `finish` error as well.
    pub fn run(&mut self) -> Result<GameOutcome, SessionError> {
        debug!(
            "game {}: {} players, turn limit {}",
            self.game_id,
            self.state.num_players(),
            self.max_turns
        );
        while !self.is_finished() {
            self.step()?;
        }

        let outcome = self.outcome();
        match outcome.winner {
            Some(winner) => info!(
                "game {}: player {winner} won in {} turns",
                self.game_id, outcome.turns
            ),
            None => info!(
                "game {}: no winner after {} turns",
                self.game_id, outcome.turns
            ),
        }
        self.sink.finish(&outcome)?;
        Ok(outcome)
    }

    /// Outcome as of now.
    #[must_use]
    pub fn outcome(&self) -> GameOutcome {
        GameOutcome {
            game_id: self.game_id,
            winner: self.state.winner(),
            turns: self.state.turn,
            players: snapshot(&self.state),
        }
    }
}
