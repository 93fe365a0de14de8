//! Shared pool of purchasable building copies.

use std::collections::BTreeMap;
use std::fmt;

use crate::game::catalog::ESTABLISHMENT_SUPPLY;
use crate::game::{Building, PlayerState};

/// Why a purchase was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    /// The buyer cannot afford the building.
    InsufficientFunds {
        /// Building requested.
        building: Building,
        /// Its cost.
        cost: u32,
        /// The buyer's balance.
        coins: u32,
    },
    /// No copies remain in the market.
    SoldOut(Building),
    /// The buyer already owns the maximum number of copies.
    CapReached(Building),
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientFunds {
                building,
                cost,
                coins,
            } => write!(f, "cannot afford {building}: costs {cost}, has {coins}"),
            Self::SoldOut(building) => write!(f, "{building} is sold out"),
            Self::CapReached(building) => write!(f, "already owns the maximum of {building}"),
        }
    }
}

impl std::error::Error for PurchaseError {}

/// Remaining copies per building. Never replenished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    remaining: BTreeMap<Building, u32>,
    initial: BTreeMap<Building, u32>,
}

impl Market {
    /// Stock a market for `num_players` players.
    ///
    /// Landmarks and major establishments get one copy per player; every
    /// other building gets a fixed supply.
    #[must_use]
    pub fn new(num_players: usize) -> Self {
        let per_player = u32::try_from(num_players).unwrap_or(u32::MAX);
        let initial: BTreeMap<Building, u32> = Building::ALL
            .into_iter()
            .map(|b| {
                let copies = if b.is_landmark() || b.is_major() {
                    per_player
                } else {
                    ESTABLISHMENT_SUPPLY
                };
                (b, copies)
            })
            .collect();

        Self {
            remaining: initial.clone(),
            initial,
        }
    }

    /// Copies of `building` still for sale.
    #[must_use]
    pub fn remaining(&self, building: Building) -> u32 {
        self.remaining.get(&building).copied().unwrap_or(0)
    }

    /// Copies of `building` the market was stocked with.
    #[must_use]
    pub fn initial(&self, building: Building) -> u32 {
        self.initial.get(&building).copied().unwrap_or(0)
    }

    /// Iterate `(building, remaining)` in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Building, u32)> + '_ {
        self.remaining.iter().map(|(&b, &n)| (b, n))
    }

    /// Check every purchase precondition without changing anything.
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition.
    pub fn check(&self, player: &PlayerState, building: Building) -> Result<(), PurchaseError> {
        if self.remaining(building) == 0 {
            return Err(PurchaseError::SoldOut(building));
        }
        if player.count(building) >= building.ownership_cap() {
            return Err(PurchaseError::CapReached(building));
        }
        if player.coins < building.cost() {
            return Err(PurchaseError::InsufficientFunds {
                building,
                cost: building.cost(),
                coins: player.coins,
            });
        }
        Ok(())
    }

    /// Buildings `player` may buy right now, in catalog order.
    #[must_use]
    pub fn eligible(&self, player: &PlayerState) -> Vec<Building> {
        Building::ALL
            .into_iter()
            .filter(|&b| self.check(player, b).is_ok())
            .collect()
    }

    /// Sell one copy of `building` to `player`.
    ///
    /// On success the market loses a copy, the player pays the cost and
    /// gains the copy. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `SoldOut`, `CapReached` or `InsufficientFunds`.
    pub fn purchase(
        &mut self,
        player: &mut PlayerState,
        building: Building,
    ) -> Result<(), PurchaseError> {
        self.check(player, building)?;
        if let Some(left) = self.remaining.get_mut(&building) {
            *left -= 1;
        }
        player.coins -= building.cost();
        player.gain(building);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stock() {
        let market = Market::new(3);
        assert_eq!(market.remaining(Building::Airport), 3);
        assert_eq!(market.remaining(Building::Stadium), 3);
        assert_eq!(market.remaining(Building::WheatField), 6);
        assert_eq!(market.remaining(Building::SushiBar), 6);
        assert_eq!(market.iter().count(), Building::ALL.len());
    }

    #[test]
    fn test_purchase_success() {
        let mut market = Market::new(2);
        let mut player = PlayerState::new(0, 5);

        market.purchase(&mut player, Building::Cafe).unwrap();
        assert_eq!(player.coins, 3);
        assert_eq!(player.count(Building::Cafe), 1);
        assert_eq!(market.remaining(Building::Cafe), 5);
        assert_eq!(market.initial(Building::Cafe), 6);
    }

    #[test]
    fn test_purchase_insufficient_funds() {
        let mut market = Market::new(2);
        let mut player = PlayerState::new(0, 1);
        let before = market.clone();

        let err = market.purchase(&mut player, Building::Mine).unwrap_err();
        assert_eq!(
            err,
            PurchaseError::InsufficientFunds {
                building: Building::Mine,
                cost: 6,
                coins: 1
            }
        );
        assert_eq!(market, before);
        assert_eq!(player.coins, 1);
    }

    #[test]
    fn test_purchase_sold_out() {
        let mut market = Market::new(2);
        let mut a = PlayerState::new(0, 100);
        let mut b = PlayerState::new(1, 100);
        let mut c = PlayerState::new(1, 100);

        market.purchase(&mut a, Building::TrainStation).unwrap();
        market.purchase(&mut b, Building::TrainStation).unwrap();
        assert_eq!(
            market.purchase(&mut c, Building::TrainStation),
            Err(PurchaseError::SoldOut(Building::TrainStation))
        );
    }

    #[test]
    fn test_purchase_cap_reached() {
        let mut market = Market::new(4);
        let mut player = PlayerState::new(0, 100);

        market.purchase(&mut player, Building::Harbor).unwrap();
        assert_eq!(
            market.purchase(&mut player, Building::Harbor),
            Err(PurchaseError::CapReached(Building::Harbor))
        );
    }

    #[test]
    fn test_eligible_filters_all_preconditions() {
        let market = Market::new(2);
        let mut player = PlayerState::new(0, 1);
        let eligible = market.eligible(&player);
        assert_eq!(
            eligible,
            vec![
                Building::WheatField,
                Building::Ranch,
                Building::Bakery,
                Building::FlowerShop,
                Building::PizzaJoint,
                Building::HamburgerStand,
            ]
        );

        player.coins = 0;
        assert!(market.eligible(&player).is_empty());
    }
}
