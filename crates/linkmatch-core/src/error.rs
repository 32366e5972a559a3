use crate::{Coordinate, ItemIndex};

/// Errors raised while building or parsing a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// A board needs at least one row and one column.
    #[display("grid dimensions must be positive, got {rows}x{columns}")]
    ZeroDimension {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        columns: usize,
    },
    /// A dimension exceeds [`Grid::MAX_DIMENSION`](crate::Grid::MAX_DIMENSION).
    #[display("grid dimensions must be at most {}, got {rows}x{columns}", crate::Grid::MAX_DIMENSION)]
    TooLarge {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        columns: usize,
    },
    /// The cell buffer does not have `rows * columns` entries.
    #[display("expected {expected} cells, got {actual}")]
    LengthMismatch {
        /// `rows * columns`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A tile kind occurs an odd number of times, so it can never be cleared.
    #[display("item {item} appears {count} times; items must come in pairs")]
    UnpairedItem {
        /// The offending kind.
        item: ItemIndex,
        /// How many cells hold it.
        count: usize,
    },
    /// A token could not be read as a tile kind or an empty marker.
    #[display("invalid cell {token:?} on line {line}")]
    Parse {
        /// One-based line of the grid text.
        line: usize,
        /// The token as written.
        token: String,
    },
    /// A row has a different width from the first row.
    #[display("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        actual: usize,
    },
}

/// Violated preconditions of [`Connector::find_path`](crate::Connector::find_path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PathError {
    /// Both endpoints are the same cell.
    #[display("cannot connect {_0} to itself")]
    SameCell(#[error(not(source))] Coordinate),
    /// An endpoint lies outside the board.
    #[display("{_0} lies outside the board")]
    OutOfBounds(#[error(not(source))] Coordinate),
    /// An endpoint holds no tile.
    #[display("{_0} is empty")]
    EmptyCell(#[error(not(source))] Coordinate),
    /// The endpoints hold different tile kinds.
    #[display("{a} and {b} hold different items")]
    ItemMismatch {
        /// First endpoint.
        a: Coordinate,
        /// Second endpoint.
        b: Coordinate,
    },
}
