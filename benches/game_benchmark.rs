//! Benchmarks for running complete games.
//!
//! This benchmarks the full game loop and the activation engine.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use machi::game::{Building, DiceRoller, GameConfig, GameState, activate};
use machi::policy::{PolicyKind, RandomPolicy};
use machi::tournament::{TournamentConfig, run_game, run_tournament};

fn bench_single_game(c: &mut Criterion) {
    let seats = [PolicyKind::Random, PolicyKind::Greedy];
    let config = GameConfig::default();

    c.bench_function("single_game_2p", |b| {
        b.iter(|| {
            let result = run_game(black_box(42), black_box(&seats), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_single_game_4p(c: &mut Criterion) {
    let seats = [
        PolicyKind::Random,
        PolicyKind::Greedy,
        PolicyKind::Random,
        PolicyKind::Greedy,
    ];
    let config = GameConfig::default();

    c.bench_function("single_game_4p", |b| {
        b.iter(|| {
            let result = run_game(black_box(42), black_box(&seats), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    // Benchmark running 10 games sequentially (without parallel overhead)
    let seats = [PolicyKind::Random, PolicyKind::Random];
    let config = GameConfig::default();

    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                black_box(run_game(seed, &seats, &config).ok());
            }
        });
    });
}

fn bench_tournament(c: &mut Criterion) {
    let seats = [PolicyKind::Random, PolicyKind::Random];
    let config = TournamentConfig {
        games: 100,
        ..TournamentConfig::default()
    };

    c.bench_function("tournament_100_games", |b| {
        b.iter(|| black_box(run_tournament(&seats, black_box(&config))));
    });
}

fn bench_activation(c: &mut Criterion) {
    // A crowded late-game table
    let mut state = GameState::new(4, 0);
    for player in &mut state.players {
        player.coins = 40;
        for building in Building::ALL {
            player.owned.insert(building, building.ownership_cap());
        }
    }
    let mut dice = DiceRoller::new(1);
    let mut policy = RandomPolicy::new(1);

    c.bench_function("activation_full_table", |b| {
        b.iter(|| {
            let mut table = state.clone();
            for roll in 1..=12 {
                black_box(activate(&mut table, 0, roll, &mut dice, &mut policy).ok());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_single_game,
    bench_single_game_4p,
    bench_game_batch,
    bench_tournament,
    bench_activation
);
criterion_main!(benches);
