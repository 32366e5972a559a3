//! Full-board solver for tile-matching puzzles.
//!
//! [`Analyzer`] decides whether a [`Grid`](linkmatch_core::Grid) can be
//! cleared completely and, if so, produces the clearing order. Removing a
//! pair only ever turns occupied cells into empty ones, so an existing match
//! never becomes illegal; the order still matters because several tiles of
//! one kind can be paired in different ways and a bad pairing can strand the
//! rest. The analyzer therefore runs a depth-first backtracking search with
//! memoised dead states.
//!
//! # Examples
//!
//! ```
//! use linkmatch_core::{CancellationToken, Coordinate};
//! use linkmatch_solver::{Analyzer, FailedReason};
//!
//! let analyzer = Analyzer::new();
//! let token = CancellationToken::new();
//!
//! let result = analyzer.analyze(&"1 1 / . .".parse()?, &token);
//! assert!(result.is_solved());
//! assert_eq!(result.matches()[0].start(), Coordinate::new(0, 0));
//!
//! let result = analyzer.analyze(&"1 2 / 2 1".parse()?, &token);
//! assert_eq!(result.failed_reason(), Some(FailedReason::NoInitialMatch));
//! # Ok::<(), linkmatch_core::GridError>(())
//! ```

pub use self::{analysis_result::*, analyzer::*, error::*};

mod analysis_result;
mod analyzer;
mod error;

#[cfg(test)]
mod testing;
