//! Benchmarks for full-board analysis.
//!
//! # Benchmarks
//!
//! - **`analyze`**: runs [`Analyzer::analyze`] on fixed boards, with and
//!   without forced-pair pruning.
//!
//! # Test Data
//!
//! - **`solvable_6x6`**: a mirrored board with eleven kinds
//! - **`shuffled_6x8`**: eight kinds arranged as interleaved Latin squares
//! - **`dead_4x4`**: a board where most pairs block each other
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench analyzer
//! ```

use std::{hint, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use linkmatch_core::{CancellationToken, Grid};
use linkmatch_solver::Analyzer;

const BOARDS: [(&str, &str); 3] = [
    (
        "solvable_6x6",
        "
        0 0 1 1 2 2
        3 4 4 5 5 3
        6 7 8 8 7 6
        6 7 9 9 7 6
        3 4 10 10 4 3
        0 0 1 1 2 2
        ",
    ),
    (
        "shuffled_6x8",
        "
        0 1 2 3 4 5 6 7
        1 0 3 2 5 4 7 6
        2 3 0 1 6 7 4 5
        3 2 1 0 7 6 5 4
        4 5 6 7 0 1 2 3
        5 4 7 6 1 0 3 2
        ",
    ),
    (
        "dead_4x4",
        "
        0 1 2 3
        1 0 3 2
        2 3 0 1
        3 2 1 0
        ",
    ),
];

fn boards() -> Vec<(&'static str, Grid)> {
    BOARDS
        .into_iter()
        .map(|(name, text)| (name, text.parse().unwrap()))
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let token = CancellationToken::new();
    let analyzers = [
        ("plain", Analyzer::new()),
        ("pruned", Analyzer::new().with_forced_pair_pruning(true)),
    ];

    for (analyzer_name, analyzer) in analyzers {
        for (name, grid) in boards() {
            c.bench_with_input(
                BenchmarkId::new(format!("analyze_{analyzer_name}"), name),
                &grid,
                |b, grid| {
                    b.iter_batched_ref(
                        || hint::black_box(grid.clone()),
                        |grid| hint::black_box(analyzer.analyze(grid, &token)),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(8));
    targets = bench_analyze
);
criterion_main!(benches);
