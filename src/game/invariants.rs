//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger in a correctly implemented game. Checks run
//! between turns, when the owned maps are canonical.

use crate::game::player::STARTING_BUILDINGS;
use crate::game::{Building, GameState};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Copies of `building` in circulation at the start of a game.
fn circulating(state: &GameState, building: Building) -> u64 {
    let seats = state.num_players() as u64;
    let starting: u64 = STARTING_BUILDINGS
        .iter()
        .filter(|(b, _)| *b == building)
        .map(|(_, n)| u64::from(*n) * seats)
        .sum();
    u64::from(state.market.initial(building)) + starting
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if usize::from(state.current) >= state.num_players() {
        violations.push(InvariantViolation {
            message: format!(
                "Current player {} out of range for {} players",
                state.current,
                state.num_players()
            ),
        });
    }

    for (index, player) in state.players.iter().enumerate() {
        if usize::from(player.id) != index {
            violations.push(InvariantViolation {
                message: format!("Player at seat {index} has id {}", player.id),
            });
        }

        for (&building, &count) in &player.owned {
            if count == 0 {
                violations.push(InvariantViolation {
                    message: format!("Player {} keeps a zero entry for {building}", player.id),
                });
            }
            if count > building.ownership_cap() {
                violations.push(InvariantViolation {
                    message: format!(
                        "Player {} owns {count} {building} > cap {}",
                        player.id,
                        building.ownership_cap()
                    ),
                });
            }
        }
    }

    // Buildings only change hands; none are created or destroyed.
    for building in Building::ALL {
        let owned: u64 = state
            .players
            .iter()
            .map(|p| u64::from(p.count(building)))
            .sum();
        let total = owned + u64::from(state.market.remaining(building));
        let expected = circulating(state, building);
        if total != expected {
            violations.push(InvariantViolation {
                message: format!(
                    "{building}: {owned} owned + {} in market != {expected} in circulation",
                    state.market.remaining(building)
                ),
            });
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
