#![no_main]

//! Activation fuzzer.
//!
//! Builds an arbitrary table, resolves one roll against it and checks
//! that coins only move through recorded transfers.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use machi::game::{Building, DiceRoller, GameState, Payer, activate};
use machi::policy::RandomPolicy;

#[derive(Arbitrary, Debug)]
struct Holding {
    building: u8,
    count: u8,
}

#[derive(Arbitrary, Debug)]
struct FuzzPlayer {
    coins: u16,
    holdings: Vec<Holding>,
}

#[derive(Arbitrary, Debug)]
struct ActivationInput {
    players: Vec<FuzzPlayer>,
    active: u8,
    roll: u8,
    seed: u64,
}

fuzz_target!(|input: ActivationInput| {
    let n = input.players.len().clamp(2, 8);
    let mut state = GameState::new(n, 0);
    for (player, fuzz) in state.players.iter_mut().zip(&input.players) {
        player.coins = u32::from(fuzz.coins);
        player.is_first_turn = false;
        for holding in fuzz.holdings.iter().take(40) {
            let building = Building::ALL[usize::from(holding.building) % Building::ALL.len()];
            let count = u32::from(holding.count).min(building.ownership_cap());
            if count == 0 {
                player.owned.remove(&building);
            } else {
                player.owned.insert(building, count);
            }
        }
    }

    let active = input.active % n as u8;
    let roll = input.roll % 15;
    let before = state.clone();
    let mut dice = DiceRoller::new(input.seed);
    let mut policy = RandomPolicy::new(input.seed);

    let Ok(report) = activate(&mut state, active, roll, &mut dice, &mut policy) else {
        return;
    };

    let total = |s: &GameState| s.players.iter().map(|p| u64::from(p.coins)).sum::<u64>();
    assert_eq!(total(&state), total(&before) + report.minted());
    for player in &state.players {
        let delta = i64::from(player.coins) - i64::from(before.players[usize::from(player.id)].coins);
        assert_eq!(delta, report.net(player.id));
        assert!(player.owned.values().all(|&c| c > 0));
    }
    for transfer in &report.transfers {
        assert!(transfer.amount > 0);
        if let Payer::Player(from) = transfer.from {
            assert_ne!(from, transfer.to);
        }
    }
});
