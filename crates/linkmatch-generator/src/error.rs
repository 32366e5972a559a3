use linkmatch_core::GridError;

/// Invalid arguments to [`BoardGenerator::new`](crate::BoardGenerator::new).
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum GeneratorError {
    /// A board needs at least one row and one column.
    #[display("board dimensions must be positive, got {rows}x{columns}")]
    ZeroDimension {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        columns: usize,
    },
    /// The board dimensions are rejected by [`Grid`](linkmatch_core::Grid).
    #[display("invalid board dimensions: {_0}")]
    #[from]
    Grid(GridError),
    /// At least one kind is needed to place a pair.
    #[display("at least one item kind is required")]
    NoItemKinds,
    /// Every kind needs at least two cells.
    #[display("{item_kinds} item kinds need {} cells, but the board has {capacity}", item_kinds * 2)]
    TooManyItemKinds {
        /// Requested number of kinds.
        item_kinds: usize,
        /// Number of cells on the board.
        capacity: usize,
    },
    /// More kinds than [`ItemIndex`](linkmatch_core::ItemIndex) can represent.
    #[display(
        "{item_kinds} item kinds exceed the limit of {}",
        linkmatch_core::ItemIndex::MAX_KINDS
    )]
    ItemKindOverflow {
        /// Requested number of kinds.
        item_kinds: usize,
    },
}

/// Errors from parsing a [`BoardSeed`](crate::BoardSeed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    /// The seed must be exactly 64 hex digits.
    #[display("expected 64 hex digits, got {actual}")]
    InvalidLength {
        /// Number of characters supplied.
        actual: usize,
    },
    /// A character is not a hex digit.
    #[display("invalid hex digit at position {position}")]
    InvalidDigit {
        /// Zero-based character offset.
        position: usize,
    },
}
