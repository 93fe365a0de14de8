//! Concrete decision providers.
//!
//! The engine only ever sees the [`DecisionProvider`] trait. This module
//! supplies a few players to put behind it, plus [`Seats`], which routes
//! each call to whichever provider sits in the active seat.

mod greedy;
mod random;
mod scripted;

pub use greedy::GreedyPolicy;
pub use random::RandomPolicy;
pub use scripted::ScriptedPolicy;

use std::fmt;
use std::str::FromStr;

use crate::game::{
    Building, BusinessCenterSwap, DecisionProvider, DiceCount, GameView, PlayerId, Roll,
    SwapOptions,
};

/// Selectable built-in policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Uniformly random choices.
    Random,
    /// Buys the most expensive thing it can.
    Greedy,
}

impl PolicyKind {
    /// Instantiate for one seat. `seed` only matters to random policies.
    #[must_use]
    pub fn build(self, seed: u64) -> Box<dyn DecisionProvider + Send> {
        match self {
            Self::Random => Box::new(RandomPolicy::new(seed)),
            Self::Greedy => Box::new(GreedyPolicy),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Random => "random",
            Self::Greedy => "greedy",
        })
    }
}

/// Error parsing a policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown policy '{}' (expected random or greedy)", self.0)
    }
}

impl std::error::Error for UnknownPolicy {}

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "greedy" => Ok(Self::Greedy),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Seed for one seat's policy, derived from the game seed.
#[must_use]
pub fn seat_seed(game_seed: u64, seat: usize) -> u64 {
    let seat = u64::try_from(seat).unwrap_or(u64::MAX);
    game_seed ^ seat.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// One provider per seat; each call goes to the active player's.
pub struct Seats {
    seats: Vec<Box<dyn DecisionProvider + Send>>,
}

impl Seats {
    /// Seat the given providers in order.
    #[must_use]
    pub fn new(seats: Vec<Box<dyn DecisionProvider + Send>>) -> Self {
        Self { seats }
    }

    /// Build every seat from a policy kind, seeding each from `game_seed`.
    #[must_use]
    pub fn from_kinds(kinds: &[PolicyKind], game_seed: u64) -> Self {
        Self::new(
            kinds
                .iter()
                .enumerate()
                .map(|(seat, kind)| kind.build(seat_seed(game_seed, seat)))
                .collect(),
        )
    }

    /// Number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether there are no seats.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    fn seat(&mut self, id: PlayerId) -> Option<&mut Box<dyn DecisionProvider + Send>> {
        self.seats.get_mut(usize::from(id))
    }
}

impl fmt::Debug for Seats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seats").field("seats", &self.seats.len()).finish()
    }
}

// An empty seat answers with the first legal option, like a script with
// nothing queued.
impl DecisionProvider for Seats {
    fn choose_dice_count(&mut self, view: &GameView<'_>) -> DiceCount {
        match self.seat(view.active) {
            Some(seat) => seat.choose_dice_count(view),
            None => ScriptedPolicy::new().choose_dice_count(view),
        }
    }

    fn choose_reroll(&mut self, view: &GameView<'_>, roll: Roll) -> bool {
        match self.seat(view.active) {
            Some(seat) => seat.choose_reroll(view, roll),
            None => false,
        }
    }

    fn choose_purchase(&mut self, view: &GameView<'_>, eligible: &[Building]) -> Building {
        match self.seat(view.active) {
            Some(seat) => seat.choose_purchase(view, eligible),
            None => ScriptedPolicy::new().choose_purchase(view, eligible),
        }
    }

    fn choose_tv_station_target(&mut self, view: &GameView<'_>, opponents: &[PlayerId]) -> PlayerId {
        match self.seat(view.active) {
            Some(seat) => seat.choose_tv_station_target(view, opponents),
            None => ScriptedPolicy::new().choose_tv_station_target(view, opponents),
        }
    }

    fn choose_business_center_swap(
        &mut self,
        view: &GameView<'_>,
        options: &SwapOptions,
    ) -> BusinessCenterSwap {
        match self.seat(view.active) {
            Some(seat) => seat.choose_business_center_swap(view, options),
            None => ScriptedPolicy::new().choose_business_center_swap(view, options),
        }
    }
}
