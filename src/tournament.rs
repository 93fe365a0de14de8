//! Tournament runner for Machi games.
//!
//! Provides a pure function interface: `(seed, seats) -> GameResult`
//!
//! The tournament runner handles:
//! - Validating the seat count
//! - Seeding each seat's policy from the game seed
//! - Running many games in parallel with rayon, counting games that fail
//!   or panic instead of aborting the batch
//! - Aggregating per-seat statistics

// Averages are reported as floats
#![allow(clippy::cast_precision_loss)]

use std::panic::{self, AssertUnwindSafe};

use log::warn;
use rayon::prelude::*;

use crate::error::SessionError;
use crate::game::{DecisionProvider, GameConfig, GameSession, MAX_PLAYERS, PlayerId};
use crate::policy::{PolicyKind, Seats};
use crate::record::{PlayerSnapshot, RecordSink};

/// Minimum number of seats.
pub const MIN_PLAYERS: usize = 2;

/// Configuration for a batch of games.
#[derive(Debug, Clone, Copy)]
pub struct TournamentConfig {
    /// Per-game settings; `num_players` is taken from the seats.
    pub game: GameConfig,
    /// Number of games to run.
    pub games: u64,
    /// Seed of the first game; game `i` uses `base_seed + i`.
    pub base_seed: u64,
    /// Worker threads, `None` for rayon's default.
    pub threads: Option<usize>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            games: 1000,
            base_seed: 0,
            threads: None,
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// The winning player (None at the turn limit).
    pub winner: Option<PlayerId>,
    /// Total turns played.
    pub turns_played: u32,
    /// Every player at the end.
    pub players: Vec<PlayerSnapshot>,
}

/// Error type for tournament operations.
#[derive(Debug)]
pub enum TournamentError {
    /// Not enough players (minimum 2).
    TooFewPlayers(usize),
    /// Too many players (maximum 8).
    TooManyPlayers(usize),
    /// A game stopped with an error.
    Session(SessionError),
    /// The worker pool could not be built.
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewPlayers(n) => write!(f, "Too few players: {n} (minimum {MIN_PLAYERS})"),
            Self::TooManyPlayers(n) => write!(f, "Too many players: {n} (maximum {MAX_PLAYERS})"),
            Self::Session(e) => write!(f, "Game failed: {e}"),
            Self::ThreadPool(e) => write!(f, "Failed to start worker threads: {e}"),
        }
    }
}

impl std::error::Error for TournamentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(e) => Some(e),
            Self::ThreadPool(e) => Some(e),
            Self::TooFewPlayers(_) | Self::TooManyPlayers(_) => None,
        }
    }
}

impl From<SessionError> for TournamentError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

fn check_seats(num_players: usize) -> Result<(), TournamentError> {
    if num_players < MIN_PLAYERS {
        return Err(TournamentError::TooFewPlayers(num_players));
    }
    if num_players > MAX_PLAYERS {
        return Err(TournamentError::TooManyPlayers(num_players));
    }
    Ok(())
}

/// Run a complete game with the given seed and seats.
///
/// # Determinism
///
/// Given the same seed, seats and config, this function always produces
/// the same `GameResult`.
///
/// # Errors
///
/// Returns an error if the number of seats is outside 2-8, or the game
/// stops with an engine error.
pub fn run_game(
    seed: u64,
    seats: &[PolicyKind],
    config: &GameConfig,
) -> Result<GameResult, TournamentError> {
    run_game_recorded(seed, seed, seats, config, ())
}

/// Run a complete game, sending every turn to `sink`.
///
/// # Errors
///
/// As [`run_game`], plus any error writing the record.
pub fn run_game_recorded<S: RecordSink>(
    game_id: u64,
    seed: u64,
    seats: &[PolicyKind],
    config: &GameConfig,
    sink: S,
) -> Result<GameResult, TournamentError> {
    check_seats(seats.len())?;
    let config = GameConfig {
        num_players: seats.len(),
        ..*config
    };
    play(game_id, seed, &config, Seats::from_kinds(seats, seed), sink)
}

fn play<D: DecisionProvider, S: RecordSink>(
    game_id: u64,
    seed: u64,
    config: &GameConfig,
    decisions: D,
    sink: S,
) -> Result<GameResult, TournamentError> {
    let mut session = GameSession::new(game_id, seed, config, decisions, sink);
    let outcome = session.run()?;
    Ok(GameResult {
        seed,
        winner: outcome.winner,
        turns_played: outcome.turns,
        players: outcome.players,
    })
}

/// Aggregated results over many games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TournamentStats {
    /// Total games played to completion or the turn limit.
    pub games_played: u64,
    /// Win count per seat.
    pub wins: Vec<u64>,
    /// Games that hit the turn limit.
    pub unfinished: u64,
    /// Games that stopped with an error.
    pub failed: u64,
    /// Total turns across all games.
    total_turns: u64,
    /// Landmarks owned at the end, summed per seat.
    total_landmarks: Vec<u64>,
}

impl TournamentStats {
    /// Create new stats for n players.
    #[must_use]
    pub fn new(num_players: usize) -> Self {
        Self {
            wins: vec![0; num_players],
            total_landmarks: vec![0; num_players],
            ..Self::default()
        }
    }

    /// Add a game result to the stats.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);

        match result.winner {
            Some(winner) => {
                if let Some(wins) = self.wins.get_mut(usize::from(winner)) {
                    *wins += 1;
                }
            }
            None => self.unfinished += 1,
        }

        for (total, player) in self.total_landmarks.iter_mut().zip(&result.players) {
            *total += player.buildings.keys().filter(|b| b.is_landmark()).count() as u64;
        }
    }

    /// Merge stats gathered on another thread.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.unfinished += other.unfinished;
        self.failed += other.failed;
        self.total_turns += other.total_turns;
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.total_landmarks.iter_mut().zip(&other.total_landmarks) {
            *a += b;
        }
    }

    /// Get win rate for a seat (0.0-1.0).
    #[must_use]
    pub fn win_rate(&self, seat: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins.get(seat).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Get average landmarks owned at the end for a seat.
    #[must_use]
    pub fn avg_landmarks(&self, seat: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_landmarks.get(seat).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Get average game length.
    #[must_use]
    pub fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }
}

/// Run `config.games` games in parallel.
///
/// # Errors
///
/// Returns an error if the number of seats is outside 2-8 or the worker
/// pool cannot be built. Individual game failures are counted in
/// `TournamentStats::failed` and logged.
pub fn run_tournament(
    seats: &[PolicyKind],
    config: &TournamentConfig,
) -> Result<TournamentStats, TournamentError> {
    run_tournament_with(seats, config, |_| {})
}

/// Like [`run_tournament`], calling `on_game` after every finished game.
///
/// # Errors
///
/// See [`run_tournament`].
pub fn run_tournament_with<F>(
    seats: &[PolicyKind],
    config: &TournamentConfig,
    on_game: F,
) -> Result<TournamentStats, TournamentError>
where
    F: Fn(&GameResult) + Sync,
{
    run_tournament_seated(
        seats.len(),
        config,
        |seed| Seats::from_kinds(seats, seed),
        on_game,
    )
}

/// Run `config.games` games in parallel, building each game's seats with
/// `seats_for(seed)`.
///
/// A game that returns an error or panics is counted in
/// `TournamentStats::failed`; the rest of the batch carries on.
///
/// # Errors
///
/// Returns an error if `num_players` is outside 2-8 or the worker pool
/// cannot be built.
pub fn run_tournament_seated<G, F>(
    num_players: usize,
    config: &TournamentConfig,
    seats_for: G,
    on_game: F,
) -> Result<TournamentStats, TournamentError>
where
    G: Fn(u64) -> Seats + Sync,
    F: Fn(&GameResult) + Sync,
{
    check_seats(num_players)?;
    let game = GameConfig {
        num_players,
        ..config.game
    };

    // Each thread accumulates into its own TournamentStats, then we merge at the end
    let run = || {
        (0..config.games)
            .into_par_iter()
            .fold(
                || TournamentStats::new(num_players),
                |mut local, i| {
                    let seed = config.base_seed.wrapping_add(i);
                    // Every game owns its state, so nothing outlives a panic.
                    let played = panic::catch_unwind(AssertUnwindSafe(|| {
                        play(seed, seed, &game, seats_for(seed), ())
                    }));
                    match played {
                        Ok(Ok(result)) => {
                            local.add_result(&result);
                            on_game(&result);
                        }
                        Ok(Err(e)) => {
                            warn!("game with seed {seed} failed: {e}");
                            local.failed += 1;
                        }
                        Err(_) => {
                            warn!("game with seed {seed} panicked");
                            local.failed += 1;
                        }
                    }
                    local
                },
            )
            .reduce(
                || TournamentStats::new(num_players),
                |mut a, b| {
                    a.merge(&b);
                    a
                },
            )
    };

    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(TournamentError::ThreadPool)?;
            Ok(pool.install(run))
        }
        None => Ok(run()),
    }
}
