#![no_main]

//! Full game turn fuzzer.
//!
//! Drives whole turns from fuzzer-chosen answers, legal or not. An
//! illegal answer must surface as an error; anything that completes must
//! leave the table consistent.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use machi::game::invariants::check_invariants;
use machi::game::{
    Building, BusinessCenterSwap, DiceCount, DiceRoller, GameState, take_turn,
};
use machi::policy::ScriptedPolicy;

#[derive(Arbitrary, Debug)]
struct FuzzSwap {
    target: u8,
    theirs: u8,
    ours: u8,
}

#[derive(Arbitrary, Debug)]
struct GameTurnInput {
    num_players: u8,
    starting_coins: u8,
    seed: u64,
    num_turns: u8,
    two_dice: Vec<bool>,
    rerolls: Vec<bool>,
    purchases: Vec<u8>,
    tv_targets: Vec<u8>,
    swaps: Vec<FuzzSwap>,
}

fn building(index: u8) -> Building {
    Building::ALL[usize::from(index) % Building::ALL.len()]
}

fuzz_target!(|input: GameTurnInput| {
    let n = usize::from(input.num_players % 7) + 2;
    let mut state = GameState::new(n, u32::from(input.starting_coins));
    let mut dice = DiceRoller::new(input.seed);

    let mut policy = ScriptedPolicy::new();
    policy.dice = input
        .two_dice
        .iter()
        .map(|&two| if two { DiceCount::Two } else { DiceCount::One })
        .collect();
    policy.rerolls = input.rerolls.into_iter().collect();
    policy.purchases = input.purchases.into_iter().map(building).collect();
    policy.tv_targets = input.tv_targets.into_iter().map(|t| t % 10).collect();
    policy.swaps = input
        .swaps
        .iter()
        .map(|s| BusinessCenterSwap {
            target: s.target % 10,
            theirs: building(s.theirs),
            ours: building(s.ours),
        })
        .collect();

    for _ in 0..(input.num_turns % 64) {
        if take_turn(&mut state, &mut dice, &mut policy).is_err() {
            return;
        }
        let violations = check_invariants(&state);
        assert!(violations.is_empty(), "{violations:?}");
        if state.is_game_over() {
            return;
        }
    }
});
