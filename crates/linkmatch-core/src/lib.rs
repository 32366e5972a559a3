//! Core data structures for tile-matching puzzles.
//!
//! This crate provides the board representation and the path search shared by
//! the solver and the generator.
//!
//! # Overview
//!
//! 1. **Board types**
//!    - [`coordinate`]: `(row, column)` positions, including the implicit
//!      border ring around the board
//!    - [`item`]: tile kinds and the reserved [`ItemIndex::EMPTY`] sentinel
//!    - [`grid`]: the rectangular board itself
//!
//! 2. **Matching**
//!    - [`item_match`]: a validated connection between two equal tiles
//!    - [`connector`]: the turn-bounded path search
//!
//! 3. **Control**
//!    - [`cancel`]: cooperative cancellation for long-running searches
//!
//! # Examples
//!
//! ```
//! use linkmatch_core::{Connector, Coordinate, Grid};
//!
//! let grid: Grid = "
//!     1 2 .
//!     . 2 1
//! "
//! .parse()?;
//!
//! let connector = Connector::new();
//! let found = connector.find_path(&grid, Coordinate::new(0, 1), Coordinate::new(1, 1))?;
//! assert_eq!(found.map(|m| m.turning_count()), Some(0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cancel;
pub mod connector;
pub mod coordinate;
pub mod grid;
pub mod item;
pub mod item_match;

pub use self::{
    cancel::CancellationToken,
    connector::{Connector, TurnLimit},
    coordinate::{Coordinate, Direction},
    error::*,
    grid::{Grid, GridFingerprint},
    item::ItemIndex,
    item_match::ItemMatch,
};

mod error;
