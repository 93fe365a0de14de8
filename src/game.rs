//! Game layer for Machi.
//!
//! Implements the rules of the city-building dice game:
//! - Building catalog with costs, activation rolls and payouts
//! - Players with coins and owned buildings
//! - Shared market of purchasable copies
//! - Four-phase card activation
//! - Turn state machine and whole-game sessions

mod activation;
mod catalog;
mod decision;
mod dice;
pub mod invariants;
mod market;
mod player;
mod session;
mod state;
mod turn;

pub use activation::{ActivationPhase, ActivationReport, Payer, Transfer, activate};
pub use catalog::{
    Building, BuildingInfo, Category, Commodity, ESTABLISHMENT_CAP, ESTABLISHMENT_SUPPLY, Goods,
    Payout, SINGLE_COPY_CAP, SpecialEffect, UnknownBuilding,
};
pub use decision::{
    BusinessCenterSwap, DecisionKind, DecisionProvider, SwapOptions, SwapTarget,
};
pub use dice::{DiceCount, DiceRoller, Roll};
pub use market::{Market, PurchaseError};
pub use player::{PlayerId, PlayerState, STARTING_BUILDINGS};
pub use session::{GameConfig, GameOutcome, GameSession};
pub use state::{GameState, GameView, MAX_PLAYERS};
pub use turn::{AIRPORT_BONUS, CITY_HALL_MINIMUM, TurnPhase, TurnSummary, take_turn};
