//! Generates tile-matching boards and optionally analyses them.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! ```
//!
//! Choose the board size and number of kinds:
//!
//! ```sh
//! cargo run --example generate_board -- --rows 6 --columns 8 --kinds 10
//! ```
//!
//! Reproduce a board from its seed and print a clearing order:
//!
//! ```sh
//! cargo run --example generate_board -- --seed c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1 --solve
//! ```
//!
//! Sample many boards in parallel and report how many can be cleared, giving
//! up after a time limit:
//!
//! ```sh
//! cargo run --example generate_board -- --count 1000 --timeout 10
//! ```
//!
//! Set `RUST_LOG=debug` to see rejected attempts.

use std::{process, thread, time::Duration};

use clap::{Parser, ValueEnum};
use linkmatch_core::{CancellationToken, Connector, TurnLimit};
use linkmatch_generator::{BoardGenerator, BoardSeed, GeneratedBoard, GenerationMode};
use linkmatch_solver::{AnalysisResult, Analyzer, FailedReason};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Turns {
    Zero,
    One,
    Two,
}

impl From<Turns> for TurnLimit {
    fn from(turns: Turns) -> Self {
        match turns {
            Turns::Zero => Self::Straight,
            Turns::One => Self::OneTurn,
            Turns::Two => Self::TwoTurns,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of rows.
    #[arg(long, value_name = "ROWS", default_value_t = 8)]
    rows: usize,

    /// Number of columns.
    #[arg(long, value_name = "COLUMNS", default_value_t = 12)]
    columns: usize,

    /// Number of tile kinds.
    #[arg(long, value_name = "KINDS", default_value_t = 16)]
    kinds: usize,

    /// Maximum number of turns a connecting path may take.
    #[arg(long, value_name = "TURNS", default_value = "two")]
    turns: Turns,

    /// Only accept boards that can be cleared completely.
    #[arg(long)]
    solvable: bool,

    /// Take the last two tiles of a kind without trying alternatives.
    #[arg(long)]
    prune: bool,

    /// Seed to generate from (64 hex digits).
    #[arg(long, value_name = "SEED", conflicts_with = "count")]
    seed: Option<BoardSeed>,

    /// Print the clearing order of the generated board.
    #[arg(long)]
    solve: bool,

    /// Number of boards to sample in parallel.
    #[arg(long, value_name = "COUNT")]
    count: Option<usize>,

    /// Cancel generation and analysis after this many seconds.
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let connector = Connector::with_turn_limit(args.turns.into());
    let analyzer = Analyzer::new()
        .with_connector(connector)
        .with_forced_pair_pruning(args.prune);
    let mode = if args.solvable {
        GenerationMode::Solvable
    } else {
        GenerationMode::Playable
    };
    let generator = match BoardGenerator::new(args.rows, args.columns, args.kinds) {
        Ok(generator) => generator
            .with_mode(mode)
            .with_connector(connector)
            .with_analyzer(analyzer),
        Err(err) => {
            eprintln!("Invalid board settings: {err}");
            process::exit(2);
        }
    };

    let token = CancellationToken::new();
    if let Some(seconds) = args.timeout {
        let token = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(seconds));
            log::info!("time limit reached, cancelling");
            token.cancel();
        });
    }

    if let Some(count) = args.count {
        sample(&generator, &analyzer, &token, count);
        return;
    }

    let seed = args.seed.unwrap_or_else(BoardSeed::random);
    let Some(board) = generator.generate_with_seed(seed, &token) else {
        eprintln!("Generation was cancelled.");
        process::exit(1);
    };
    print_board(&board);

    if args.solve {
        let result = analyzer.analyze(&board.grid, &token);
        println!();
        print_analysis(&result);
    }
}

fn sample(
    generator: &BoardGenerator,
    analyzer: &Analyzer,
    token: &CancellationToken,
    count: usize,
) {
    let results = (0..count)
        .into_par_iter()
        .filter_map(|_| {
            let board = generator.generate(token)?;
            let result = analyzer.analyze(&board.grid, token);
            Some((board.attempts, result.failed_reason()))
        })
        .collect::<Vec<_>>();

    let generated = results.len();
    let attempts = results.iter().map(|(attempts, _)| attempts).sum::<usize>();
    let count_reason = |reason: Option<FailedReason>| {
        results
            .iter()
            .filter(|(_, failed)| *failed == reason)
            .count()
    };

    println!("Boards:");
    println!("  requested: {count}");
    println!("  generated: {generated}");
    println!("  attempts: {attempts}");
    println!();
    println!("Analysis:");
    println!("  solved: {}", count_reason(None));
    for reason in [
        FailedReason::NoInitialMatch,
        FailedReason::DeadEnd,
        FailedReason::Cancelled,
        FailedReason::Faulted,
    ] {
        println!("  {reason}: {}", count_reason(Some(reason)));
    }
}

fn print_board(board: &GeneratedBoard) {
    println!("Seed:");
    println!("  {}", board.seed);
    println!();
    println!("Attempts:");
    println!("  {}", board.attempts);
    println!();
    println!("Board:");
    for line in board.grid.to_string().lines() {
        println!("  {line}");
    }
}

fn print_analysis(result: &AnalysisResult) {
    let stats = result.stats();
    println!("{result}");
    println!();
    println!("Stats:");
    println!("  nodes: {}", stats.nodes());
    println!("  backtracks: {}", stats.backtracks());
    println!("  memo hits: {}", stats.memo_hits());
    println!("  dead states: {}", stats.dead_states());
}
