//! Replays queued answers.

use std::collections::VecDeque;

use crate::game::{
    Building, BusinessCenterSwap, DecisionProvider, DiceCount, GameView, PlayerId, Roll,
    SwapOptions,
};

/// Answers each decision from its queue, front first. Once a queue is
/// empty it falls back to the first legal option (one die, no reroll).
///
/// Queued answers are returned as-is, legal or not, so a script can also
/// drive the engine into its error paths.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    /// Dice counts.
    pub dice: VecDeque<DiceCount>,
    /// Reroll answers.
    pub rerolls: VecDeque<bool>,
    /// Purchases.
    pub purchases: VecDeque<Building>,
    /// TV station targets.
    pub tv_targets: VecDeque<PlayerId>,
    /// Business center swaps.
    pub swaps: VecDeque<BusinessCenterSwap>,
}

impl ScriptedPolicy {
    /// Empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DecisionProvider for ScriptedPolicy {
    fn choose_dice_count(&mut self, _view: &GameView<'_>) -> DiceCount {
        self.dice.pop_front().unwrap_or(DiceCount::One)
    }

    fn choose_reroll(&mut self, _view: &GameView<'_>, _roll: Roll) -> bool {
        self.rerolls.pop_front().unwrap_or(false)
    }

    fn choose_purchase(&mut self, _view: &GameView<'_>, eligible: &[Building]) -> Building {
        self.purchases
            .pop_front()
            .or_else(|| eligible.first().copied())
            .unwrap_or(Building::WheatField)
    }

    fn choose_tv_station_target(&mut self, view: &GameView<'_>, opponents: &[PlayerId]) -> PlayerId {
        self.tv_targets
            .pop_front()
            .or_else(|| opponents.first().copied())
            .unwrap_or(view.active)
    }

    fn choose_business_center_swap(
        &mut self,
        view: &GameView<'_>,
        options: &SwapOptions,
    ) -> BusinessCenterSwap {
        if let Some(swap) = self.swaps.pop_front() {
            return swap;
        }
        options
            .targets
            .first()
            .and_then(|t| Some((t.player, *t.theirs.first()?, *t.ours.first()?)))
            .map_or(
                BusinessCenterSwap {
                    target: view.active,
                    theirs: Building::WheatField,
                    ours: Building::WheatField,
                },
                |(target, theirs, ours)| BusinessCenterSwap {
                    target,
                    theirs,
                    ours,
                },
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, SwapTarget};

    #[test]
    fn test_queue_then_fallback() {
        let state = GameState::new(2, 0);
        let view = state.view();
        let mut policy = ScriptedPolicy::new();
        policy.purchases.push_back(Building::Mine);
        policy.rerolls.extend([true, true]);

        let eligible = [Building::Cafe, Building::Ranch];
        assert_eq!(policy.choose_purchase(&view, &eligible), Building::Mine);
        assert_eq!(policy.choose_purchase(&view, &eligible), Building::Cafe);

        let roll = Roll::new(3, None);
        assert!(policy.choose_reroll(&view, roll));
        assert!(policy.choose_reroll(&view, roll));
        assert!(!policy.choose_reroll(&view, roll));
        assert_eq!(policy.choose_dice_count(&view), DiceCount::One);
        assert_eq!(policy.choose_tv_station_target(&view, &[1]), 1);
    }

    #[test]
    fn test_fallback_swap_is_first_option() {
        let state = GameState::new(2, 0);
        let options = SwapOptions {
            targets: vec![SwapTarget {
                player: 1,
                theirs: vec![Building::Forest, Building::Mine],
                ours: vec![Building::Bakery],
            }],
        };
        let swap = ScriptedPolicy::new().choose_business_center_swap(&state.view(), &options);
        assert_eq!(swap.target, 1);
        assert_eq!(swap.theirs, Building::Forest);
        assert_eq!(swap.ours, Building::Bakery);
    }
}
