//! Benchmarks for board generation.
//!
//! # Benchmarks
//!
//! - **`generator_playable`**: boards that only need one legal match.
//! - **`generator_solvable`**: boards that must also be clearable, which runs
//!   a full analysis on every candidate board.
//!
//! # Test Data
//!
//! Uses three fixed seeds so every run draws the same candidate boards.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use linkmatch_core::CancellationToken;
use linkmatch_generator::{BoardGenerator, BoardSeed, GenerationMode};

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

fn bench_generator(c: &mut Criterion, name: &str, generator: &BoardGenerator) {
    let token = CancellationToken::new();
    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = BoardSeed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new(name, format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(seed, &token),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_generator_playable(c: &mut Criterion) {
    let generator = BoardGenerator::new(8, 12, 16).unwrap();
    bench_generator(c, "generator_playable", &generator);
}

fn bench_generator_solvable(c: &mut Criterion) {
    let generator = BoardGenerator::new(6, 8, 10)
        .unwrap()
        .with_mode(GenerationMode::Solvable);
    bench_generator(c, "generator_solvable", &generator);
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(12));
    targets =
        bench_generator_playable,
        bench_generator_solvable
);
criterion_main!(benches);
