//! Random board generation for tile-matching puzzles.
//!
//! [`BoardGenerator`] draws fully paired boards from a seeded random stream
//! until one passes its acceptance check: by default the board must offer at
//! least one legal match, and in [`GenerationMode::Solvable`] it must also be
//! clearable by the [`Analyzer`](linkmatch_solver::Analyzer).
//!
//! # Examples
//!
//! ```
//! use linkmatch_core::{CancellationToken, Connector};
//! use linkmatch_generator::{BoardGenerator, GenerationMode};
//!
//! let generator = BoardGenerator::new(4, 6, 6)?.with_mode(GenerationMode::Solvable);
//! let board = generator.generate(&CancellationToken::new()).unwrap();
//!
//! println!("seed: {}", board.seed);
//! println!("{}", board.grid);
//! assert!(Connector::new().first_match(&board.grid).is_some());
//! # Ok::<(), linkmatch_generator::GeneratorError>(())
//! ```

pub use self::{error::*, generator::*, seed::*};

mod error;
mod generator;
mod seed;
