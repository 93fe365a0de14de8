//! Deterministic big-spender.

use std::cmp::Ordering;

use crate::game::{
    Building, BusinessCenterSwap, DecisionProvider, DiceCount, GameView, PlayerId, Roll,
    SwapOptions,
};

/// Always throws two dice when it may, rerolls rolls that pay it nothing,
/// buys the most expensive landmark it can afford (else the most expensive
/// building), and aims every steal at the richest opponent.
///
/// Ties go to the building earlier in catalog order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

/// Higher cost first, then catalog order.
fn by_price(a: &Building, b: &Building) -> Ordering {
    a.cost().cmp(&b.cost()).then_with(|| b.cmp(a))
}

fn priciest(buildings: impl Iterator<Item = Building>) -> Option<Building> {
    buildings.max_by(by_price)
}

fn cheapest(buildings: impl Iterator<Item = Building>) -> Option<Building> {
    buildings.min_by(|a, b| a.cost().cmp(&b.cost()).then_with(|| a.cmp(b)))
}

impl DecisionProvider for GreedyPolicy {
    fn choose_dice_count(&mut self, _view: &GameView<'_>) -> DiceCount {
        DiceCount::Two
    }

    fn choose_reroll(&mut self, view: &GameView<'_>, roll: Roll) -> bool {
        let total = roll.total();
        view.me().is_some_and(|me| {
            !me.owned
                .keys()
                .any(|b| !b.is_restaurant() && b.activates_on(total))
        })
    }

    fn choose_purchase(&mut self, _view: &GameView<'_>, eligible: &[Building]) -> Building {
        priciest(eligible.iter().copied().filter(|b| b.is_landmark()))
            .or_else(|| priciest(eligible.iter().copied()))
            .unwrap_or(Building::WheatField)
    }

    fn choose_tv_station_target(&mut self, view: &GameView<'_>, opponents: &[PlayerId]) -> PlayerId {
        view.richest(opponents).unwrap_or(view.active)
    }

    fn choose_business_center_swap(
        &mut self,
        view: &GameView<'_>,
        options: &SwapOptions,
    ) -> BusinessCenterSwap {
        let targets: Vec<PlayerId> = options.targets.iter().map(|t| t.player).collect();
        let chosen = view.richest(&targets).and_then(|id| options.target(id));
        let target = chosen.map(|t| t.player);
        let theirs = chosen.and_then(|t| priciest(t.theirs.iter().copied()));
        let ours = chosen.and_then(|t| cheapest(t.ours.iter().copied()));

        match (target, theirs, ours) {
            (Some(target), Some(theirs), Some(ours)) => BusinessCenterSwap {
                target,
                theirs,
                ours,
            },
            _ => BusinessCenterSwap {
                target: view.active,
                theirs: Building::WheatField,
                ours: Building::WheatField,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, SwapTarget};

    #[test]
    fn test_prefers_landmarks() {
        let state = GameState::new(2, 0);
        let eligible = [Building::Mine, Building::TrainStation, Building::Harbor];
        assert_eq!(
            GreedyPolicy.choose_purchase(&state.view(), &eligible),
            Building::TrainStation
        );
    }

    #[test]
    fn test_most_expensive_then_catalog_order() {
        let state = GameState::new(2, 0);
        let eligible = [Building::Cafe, Building::ConvenienceStore, Building::FlowerGarden];
        // All cost 2; convenience store comes first in the catalog.
        assert_eq!(
            GreedyPolicy.choose_purchase(&state.view(), &eligible),
            Building::ConvenienceStore
        );
        let eligible = [Building::Cafe, Building::Mine];
        assert_eq!(GreedyPolicy.choose_purchase(&state.view(), &eligible), Building::Mine);
    }

    #[test]
    fn test_rerolls_only_useless_rolls() {
        let state = GameState::new(2, 0);
        let view = state.view();
        // Starting holdings: wheat field (1) and bakery (2, 3).
        assert!(!GreedyPolicy.choose_reroll(&view, Roll::new(1, None)));
        assert!(!GreedyPolicy.choose_reroll(&view, Roll::new(1, Some(2))));
        assert!(GreedyPolicy.choose_reroll(&view, Roll::new(5, None)));
    }

    #[test]
    fn test_swap_takes_priciest_from_richest() {
        let mut state = GameState::new(3, 0);
        state.players[2].coins = 9;
        let options = SwapOptions {
            targets: vec![
                SwapTarget {
                    player: 1,
                    theirs: vec![Building::Mine],
                    ours: vec![Building::WheatField, Building::Forest],
                },
                SwapTarget {
                    player: 2,
                    theirs: vec![Building::Cafe, Building::CheeseFactory],
                    ours: vec![Building::WheatField, Building::Forest],
                },
            ],
        };
        let swap = GreedyPolicy.choose_business_center_swap(&state.view(), &options);
        assert_eq!(
            swap,
            BusinessCenterSwap {
                target: 2,
                theirs: Building::CheeseFactory,
                ours: Building::WheatField,
            }
        );
        assert!(options.allows(&swap));
    }
}
