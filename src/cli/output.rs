//! Output formatting utilities for CLI.

use std::fmt::Write;

use machi::game::Building;
use machi::policy::PolicyKind;
use machi::tournament::{GameResult, TournamentStats};
use serde::Serialize;

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Random seed used.
    pub(super) seed: u64,
    /// Winner seat (null at the turn limit).
    pub(super) winner: Option<u8>,
    /// Total turns played.
    pub(super) turns_played: u32,
    /// Per-player results.
    pub(super) players: Vec<JsonPlayerResult>,
}

/// JSON-serializable player result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerResult {
    /// Seat (0-based).
    pub(super) id: u8,
    /// Policy name.
    pub(super) policy: String,
    /// Final coins.
    pub(super) coins: u32,
    /// Landmarks owned.
    pub(super) landmarks: Vec<Building>,
    /// Total buildings owned.
    pub(super) buildings: u32,
}

impl JsonGameResult {
    /// Create from a GameResult.
    pub(super) fn from_game_result(result: &GameResult, seats: &[PolicyKind]) -> Self {
        Self {
            seed: result.seed,
            winner: result.winner,
            turns_played: result.turns_played,
            players: result
                .players
                .iter()
                .map(|p| JsonPlayerResult {
                    id: p.id,
                    policy: seats
                        .get(usize::from(p.id))
                        .map_or_else(String::new, ToString::to_string),
                    coins: p.coins,
                    landmarks: p.buildings.keys().copied().filter(|b| b.is_landmark()).collect(),
                    buildings: p.buildings.values().sum(),
                })
                .collect(),
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult, seats: &[PolicyKind]) -> String {
    let mut output = String::new();
    let name = |id: u8| seats.get(usize::from(id)).map_or_else(|| "unknown".to_string(), ToString::to_string);

    let _ = writeln!(output, "Game Result (seed: {})", result.seed);
    match result.winner {
        Some(winner) => {
            let _ = writeln!(output, "  Winner: Player {winner} ({})", name(winner));
        }
        None => output.push_str("  Winner: none (turn limit)\n"),
    }
    let _ = writeln!(output, "  Turns: {}\n", result.turns_played);

    for player in &result.players {
        let landmarks = player.buildings.keys().filter(|b| b.is_landmark()).count();
        let _ = writeln!(
            output,
            "  Player {}: {} coins, {landmarks}/{} landmarks ({})",
            player.id,
            player.coins,
            Building::LANDMARKS.len(),
            name(player.id)
        );
    }

    output
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total games played.
    games_played: u64,
    /// Per-seat statistics.
    players: Vec<JsonTournamentPlayer>,
    /// Games that hit the turn limit.
    unfinished: u64,
    /// Games that stopped with an error.
    failed: u64,
    /// Average game length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-seat tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentPlayer {
    /// Seat (0-based).
    player: usize,
    /// Policy name.
    policy: String,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average landmarks at the end.
    avg_landmarks: f64,
}

impl JsonTournamentResult {
    /// Create from stats and seats.
    pub(super) fn from_stats(stats: &TournamentStats, seats: &[PolicyKind]) -> Self {
        let players = seats
            .iter()
            .enumerate()
            .map(|(i, kind)| JsonTournamentPlayer {
                player: i,
                policy: kind.to_string(),
                wins: stats.wins.get(i).copied().unwrap_or(0),
                win_rate: stats.win_rate(i),
                avg_landmarks: stats.avg_landmarks(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            players,
            unfinished: stats.unfinished,
            failed: stats.failed,
            avg_turns: stats.avg_turns(),
        }
    }
}

/// Format tournament stats as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_tournament_text(stats: &TournamentStats, seats: &[PolicyKind]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Tournament Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, kind) in seats.iter().enumerate() {
        let wins = stats.wins.get(i).copied().unwrap_or(0);
        let rate = stats.win_rate(i) * 100.0;
        let _ = writeln!(output, "  Player {i} ({kind}): {rate:.1}% ({wins} wins)");
    }
    let unfinished_rate = if stats.games_played == 0 {
        0.0
    } else {
        stats.unfinished as f64 / stats.games_played as f64 * 100.0
    };
    let _ = writeln!(
        output,
        "  Unfinished: {} ({unfinished_rate:.1}%)\n",
        stats.unfinished
    );

    output.push_str("Average Landmarks:\n");
    for (i, kind) in seats.iter().enumerate() {
        let _ = writeln!(output, "  Player {i} ({kind}): {:.2}", stats.avg_landmarks(i));
    }

    let _ = writeln!(output, "\nAverage Game Length: {:.0} turns", stats.avg_turns());
    if stats.failed > 0 {
        let _ = writeln!(output, "Failed games: {}", stats.failed);
    }

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats, seats: &[PolicyKind]) -> String {
    let mut output = String::new();

    // Header
    output.push_str("player,policy,wins,win_rate,avg_landmarks\n");

    // Data rows
    for (i, kind) in seats.iter().enumerate() {
        let _ = writeln!(
            output,
            "{i},{kind},{},{:.4},{:.2}",
            stats.wins.get(i).copied().unwrap_or(0),
            stats.win_rate(i),
            stats.avg_landmarks(i)
        );
    }

    output
}
