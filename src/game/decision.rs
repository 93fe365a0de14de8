//! The seam between the engine and whatever makes choices for players.
//!
//! The engine computes the legal options for each call site and passes
//! them along with a read-only `GameView`. Whatever comes back is checked
//! against those options; anything outside them is an `IllegalChoice`.

use std::fmt;

use crate::game::{Building, DiceCount, GameView, PlayerId, Roll};

/// Call sites at which the engine consults a decision provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    /// One or two dice.
    DiceCount,
    /// Keep or reroll.
    Reroll,
    /// Which building to buy.
    Purchase,
    /// Whom the TV station takes from.
    TvStationTarget,
    /// What the business center swaps.
    BusinessCenterSwap,
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DiceCount => "dice count",
            Self::Reroll => "reroll",
            Self::Purchase => "purchase",
            Self::TvStationTarget => "tv station target",
            Self::BusinessCenterSwap => "business center swap",
        };
        f.write_str(name)
    }
}

/// Legal business center swaps.
///
/// A receiving side must stay within its ownership cap, so what may be
/// given depends on whom it goes to. Each target therefore carries both
/// directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOptions {
    /// Opponents that allow at least one legal exchange.
    pub targets: Vec<SwapTarget>,
}

/// Legal exchanges with one opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapTarget {
    /// The opponent.
    pub player: PlayerId,
    /// Buildings the opponent holds that the active player has room for.
    pub theirs: Vec<Building>,
    /// Buildings the active player holds that the opponent has room for.
    pub ours: Vec<Building>,
}

impl SwapOptions {
    /// Whether there is nothing to choose from.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Options for one opponent.
    #[must_use]
    pub fn target(&self, player: PlayerId) -> Option<&SwapTarget> {
        self.targets.iter().find(|t| t.player == player)
    }

    /// Whether `swap` is one of the options.
    #[must_use]
    pub fn allows(&self, swap: &BusinessCenterSwap) -> bool {
        self.target(swap.target)
            .is_some_and(|t| t.theirs.contains(&swap.theirs) && t.ours.contains(&swap.ours))
    }
}

/// A one-for-one exchange chosen for the business center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCenterSwap {
    /// Opponent to swap with.
    pub target: PlayerId,
    /// Building taken from the opponent.
    pub theirs: Building,
    /// Building given to the opponent.
    pub ours: Building,
}

/// Makes every choice the rules leave to a player.
///
/// All calls are synchronous; the engine waits for each answer before
/// resolving anything else.
pub trait DecisionProvider {
    /// How many dice to throw. Only asked when the train station is owned.
    fn choose_dice_count(&mut self, view: &GameView<'_>) -> DiceCount;

    /// Whether to throw again. Only asked when the radio tower is owned.
    fn choose_reroll(&mut self, view: &GameView<'_>, roll: Roll) -> bool;

    /// Which building to buy. `eligible` is never empty; the answer must
    /// be one of its members.
    fn choose_purchase(&mut self, view: &GameView<'_>, eligible: &[Building]) -> Building;

    /// Which opponent the TV station takes from.
    fn choose_tv_station_target(&mut self, view: &GameView<'_>, opponents: &[PlayerId]) -> PlayerId;

    /// What the business center exchanges.
    fn choose_business_center_swap(
        &mut self,
        view: &GameView<'_>,
        options: &SwapOptions,
    ) -> BusinessCenterSwap;
}

impl<P: DecisionProvider + ?Sized> DecisionProvider for Box<P> {
    fn choose_dice_count(&mut self, view: &GameView<'_>) -> DiceCount {
        (**self).choose_dice_count(view)
    }

    fn choose_reroll(&mut self, view: &GameView<'_>, roll: Roll) -> bool {
        (**self).choose_reroll(view, roll)
    }

    fn choose_purchase(&mut self, view: &GameView<'_>, eligible: &[Building]) -> Building {
        (**self).choose_purchase(view, eligible)
    }

    fn choose_tv_station_target(&mut self, view: &GameView<'_>, opponents: &[PlayerId]) -> PlayerId {
        (**self).choose_tv_station_target(view, opponents)
    }

    fn choose_business_center_swap(
        &mut self,
        view: &GameView<'_>,
        options: &SwapOptions,
    ) -> BusinessCenterSwap {
        (**self).choose_business_center_swap(view, options)
    }
}
