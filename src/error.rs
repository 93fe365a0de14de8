//! Error types for the game engine.
//!
//! Nothing here is recoverable at runtime. Dice are the only source of
//! nondeterminism and the core does no I/O, so every error is a broken
//! contract: a decision outside its legal set, or a purchase the engine
//! should have filtered out.

use std::fmt;
use std::io;

use crate::game::{DecisionKind, PlayerId, PurchaseError};

/// A turn could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A decision provider answered outside the legal options.
    IllegalChoice {
        /// Turn during which the choice was made.
        turn: u32,
        /// Player the choice was made for.
        player: PlayerId,
        /// Which decision it was.
        decision: DecisionKind,
        /// What was wrong with it.
        reason: String,
    },
    /// A purchase failed after eligibility filtering.
    Purchase {
        /// Turn of the purchase.
        turn: u32,
        /// Buyer.
        player: PlayerId,
        /// Failed precondition.
        error: PurchaseError,
    },
}

impl GameError {
    /// Build an `IllegalChoice`.
    pub fn illegal(
        turn: u32,
        player: PlayerId,
        decision: DecisionKind,
        reason: impl Into<String>,
    ) -> Self {
        Self::IllegalChoice {
            turn,
            player,
            decision,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalChoice {
                turn,
                player,
                decision,
                reason,
            } => write!(
                f,
                "illegal {decision} choice for player {player} on turn {turn}: {reason}"
            ),
            Self::Purchase {
                turn,
                player,
                error,
            } => write!(f, "purchase by player {player} on turn {turn} failed: {error}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Purchase { error, .. } => Some(error),
            Self::IllegalChoice { .. } => None,
        }
    }
}

/// A session stopped before producing an outcome.
#[derive(Debug)]
pub enum SessionError {
    /// The engine rejected a turn.
    Game(GameError),
    /// The record sink failed.
    Record(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Game(e) => write!(f, "{e}"),
            Self::Record(e) => write!(f, "failed to write game record: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Game(e) => Some(e),
            Self::Record(e) => Some(e),
        }
    }
}

impl From<GameError> for SessionError {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        Self::Record(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Building;

    #[test]
    fn test_illegal_choice_names_turn_player_and_decision() {
        let err = GameError::illegal(12, 3, DecisionKind::Purchase, "mine is not eligible");
        let text = err.to_string();
        assert!(text.contains("purchase"));
        assert!(text.contains("player 3"));
        assert!(text.contains("turn 12"));
        assert!(text.contains("mine is not eligible"));
    }

    #[test]
    fn test_purchase_error_display() {
        let err = GameError::Purchase {
            turn: 4,
            player: 1,
            error: PurchaseError::SoldOut(Building::Cafe),
        };
        assert!(err.to_string().contains("cafe is sold out"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_session_error_from_io() {
        let err: SessionError = io::Error::other("disk full").into();
        assert!(err.to_string().contains("disk full"));
    }
}
