//! Player state management.

use std::collections::BTreeMap;

use crate::game::Building;

/// Index of a player in turn order (0-based).
pub type PlayerId = u8;

/// Establishments every player starts with.
pub const STARTING_BUILDINGS: [(Building, u32); 2] =
    [(Building::WheatField, 1), (Building::Bakery, 1)];

/// State for a single player.
///
/// `owned` never holds a zero entry once the engine has finished a phase;
/// absence means zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    /// Position in turn order.
    pub id: PlayerId,
    /// Coin balance.
    pub coins: u32,
    /// Owned copies per building.
    pub owned: BTreeMap<Building, u32>,
    /// Whether the player has yet to take a turn.
    pub is_first_turn: bool,
}

impl PlayerState {
    /// Create a player with the starting establishments.
    #[must_use]
    pub fn new(id: PlayerId, coins: u32) -> Self {
        Self {
            id,
            coins,
            owned: STARTING_BUILDINGS.into_iter().collect(),
            is_first_turn: true,
        }
    }

    /// Copies of `building` owned.
    #[must_use]
    pub fn count(&self, building: Building) -> u32 {
        self.owned.get(&building).copied().unwrap_or(0)
    }

    /// Whether at least one copy of `building` is owned.
    #[must_use]
    pub fn owns(&self, building: Building) -> bool {
        self.count(building) > 0
    }

    /// Sum of owned copies over a set of buildings.
    #[must_use]
    pub fn count_where(&self, mut pred: impl FnMut(Building) -> bool) -> u32 {
        self.owned
            .iter()
            .filter(|&(&b, _)| pred(b))
            .map(|(_, &n)| n)
            .sum()
    }

    /// Number of distinct landmarks owned.
    #[must_use]
    pub fn landmark_count(&self) -> usize {
        Building::LANDMARKS.iter().filter(|&&b| self.owns(b)).count()
    }

    /// Whether every landmark is owned.
    #[must_use]
    pub fn has_won(&self) -> bool {
        Building::LANDMARKS.iter().all(|&b| self.owns(b))
    }

    /// Add one copy of `building`.
    pub fn gain(&mut self, building: Building) {
        *self.owned.entry(building).or_insert(0) += 1;
    }

    /// Remove one copy of `building`, dropping the entry at zero.
    ///
    /// Returns `false` if none was owned.
    pub fn lose(&mut self, building: Building) -> bool {
        let Some(count) = self.owned.get_mut(&building) else {
            return false;
        };
        if *count == 0 {
            self.owned.remove(&building);
            return false;
        }
        *count -= 1;
        if *count == 0 {
            self.owned.remove(&building);
        }
        true
    }

    /// Take up to `amount` coins, never more than the balance.
    ///
    /// Returns the amount actually taken.
    pub fn pay(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.coins);
        self.coins -= taken;
        taken
    }

    /// Credit coins.
    pub fn earn(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Drop zero-count entries.
    pub fn prune(&mut self) {
        self.owned.retain(|_, n| *n > 0);
    }
}
