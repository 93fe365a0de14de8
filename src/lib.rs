// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Machi: a deterministic simulation engine for a city-building dice game.
//!
//! Players earn coins from buildings that pay out when the dice land on
//! their activation numbers, spend coins on new buildings from a shared
//! market, and win by completing every landmark. Given a seed and a
//! deterministic set of decision providers, a game is exactly
//! reproducible.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Tournament Runner (rayon)         │
//! ├─────────────────────────────────────┤
//! │   Game Session  ──►  Record Sinks   │
//! ├─────────────────────────────────────┤
//! │   Turn Engine  ◄──  Policies        │
//! ├─────────────────────────────────────┤
//! │   Activation / Market / Catalog     │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod game;
pub mod policy;
pub mod record;
pub mod tournament;

pub use error::{GameError, SessionError};

// Re-export key game types at crate root for convenience
pub use game::{
    Building, DecisionProvider, GameConfig, GameOutcome, GameSession, GameState, PlayerId,
};
