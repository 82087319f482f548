use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use puzzlebox_core::*;

fn maze_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("maze_generation");
    for difficulty in Difficulty::ALL {
        let config = MazeConfig::preset(difficulty);
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty.name()),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    BacktrackingMazeGenerator::new(black_box(seed)).generate(config)
                })
            },
        );
    }
    group.finish();
}

fn minefield_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("minefield_generation");
    for difficulty in Difficulty::ALL {
        let config = MinefieldConfig::preset(difficulty);
        let start = (config.size.0 / 2, config.size.1 / 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty.name()),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    RandomMinefieldGenerator::new(black_box(seed)).generate(config, start)
                })
            },
        );
    }
    group.finish();
}

fn first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for difficulty in Difficulty::ALL {
        let config = MinefieldConfig::preset(difficulty);
        let start = (config.size.0 / 2, config.size.1 / 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty.name()),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    let mut session = Session::new(MinesweeperGame::new(config, seed)?);
                    session.act(MinesweeperAction::Reveal(black_box(start)))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, maze_generation, minefield_generation, first_reveal);
criterion_main!(benches);
