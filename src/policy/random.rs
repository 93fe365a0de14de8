//! Uniformly random player.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::game::{
    Building, BusinessCenterSwap, DecisionProvider, DiceCount, GameView, PlayerId, Roll,
    SwapOptions,
};

/// Picks uniformly among the legal options, except for the TV station,
/// which always targets the richest opponent.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Create a policy; the same seed always makes the same choices.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DecisionProvider for RandomPolicy {
    fn choose_dice_count(&mut self, _view: &GameView<'_>) -> DiceCount {
        if self.rng.random_bool(0.5) {
            DiceCount::Two
        } else {
            DiceCount::One
        }
    }

    fn choose_reroll(&mut self, _view: &GameView<'_>, _roll: Roll) -> bool {
        self.rng.random_bool(0.5)
    }

    fn choose_purchase(&mut self, _view: &GameView<'_>, eligible: &[Building]) -> Building {
        eligible
            .choose(&mut self.rng)
            .copied()
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
        let pick = options.targets.choose(&mut self.rng).and_then(|t| {
            let theirs = *t.theirs.choose(&mut self.rng)?;
            let ours = *t.ours.choose(&mut self.rng)?;
            Some((t.player, theirs, ours))
        });

        match pick {
            Some((target, theirs, ours)) => BusinessCenterSwap {
                target,
                theirs,
                ours,
            },
            // Nothing legal; the engine rejects this.
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
    fn test_purchase_is_always_eligible() {
        let state = GameState::new(2, 0);
        let mut policy = RandomPolicy::new(5);
        let eligible = [Building::Cafe, Building::Mine, Building::Harbor];
        for _ in 0..100 {
            let choice = policy.choose_purchase(&state.view(), &eligible);
            assert!(eligible.contains(&choice));
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let state = GameState::new(2, 0);
        let eligible = Building::ALL;
        let mut a = RandomPolicy::new(77);
        let mut b = RandomPolicy::new(77);
        for _ in 0..50 {
            assert_eq!(
                a.choose_purchase(&state.view(), &eligible),
                b.choose_purchase(&state.view(), &eligible)
            );
            assert_eq!(
                a.choose_dice_count(&state.view()),
                b.choose_dice_count(&state.view())
            );
        }
    }

    #[test]
    fn test_tv_station_targets_richest() {
        let mut state = GameState::new(3, 0);
        state.players[1].coins = 4;
        state.players[2].coins = 4;
        let mut policy = RandomPolicy::new(0);
        assert_eq!(policy.choose_tv_station_target(&state.view(), &[1, 2]), 1);
    }

    #[test]
    fn test_swap_is_legal() {
        let state = GameState::new(3, 0);
        let options = SwapOptions {
            targets: vec![
                SwapTarget {
                    player: 1,
                    theirs: vec![Building::Cafe],
                    ours: vec![Building::WheatField],
                },
                SwapTarget {
                    player: 2,
                    theirs: vec![Building::Mine, Building::Forest],
                    ours: vec![Building::WheatField, Building::Bakery],
                },
            ],
        };
        let mut policy = RandomPolicy::new(9);
        for _ in 0..50 {
            let swap = policy.choose_business_center_swap(&state.view(), &options);
            assert!(options.allows(&swap));
        }
    }
}
