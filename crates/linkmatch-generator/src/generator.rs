use std::fmt::{self, Display};

use linkmatch_core::{CancellationToken, Connector, Coordinate, Grid, ItemIndex};
use linkmatch_solver::{Analyzer, FailedReason};
use rand::seq::IndexedRandom as _;
use rand_pcg::Pcg64;

use crate::{BoardSeed, GeneratorError};

/// How strict the acceptance check of a generated board is.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant,
)]
pub enum GenerationMode {
    /// The board has at least one legal match.
    #[default]
    #[display("playable")]
    Playable,
    /// The board can be cleared completely.
    #[display("solvable")]
    Solvable,
}

/// A board produced by [`BoardGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBoard {
    /// The accepted board.
    pub grid: Grid,
    /// The seed the board was generated from.
    pub seed: BoardSeed,
    /// How many candidate boards were drawn, including the accepted one.
    pub attempts: usize,
}

/// Produces random paired boards.
///
/// Every attempt fills the board pair by pair in row-major order: the first
/// unfilled cell gets a random kind and is paired with a random unfilled cell
/// after it. With an odd number of cells the last unpaired cell stays empty.
/// An attempt is accepted when every kind appears on the board and the
/// [`GenerationMode`] check passes; otherwise the generator draws again from
/// the same random stream.
///
/// # Examples
///
/// ```
/// use linkmatch_core::CancellationToken;
/// use linkmatch_generator::{BoardGenerator, BoardSeed};
///
/// let generator = BoardGenerator::new(4, 6, 5)?;
/// let token = CancellationToken::new();
///
/// let seed = BoardSeed::from_bytes([1; 32]);
/// let board = generator.generate_with_seed(seed, &token).unwrap();
/// assert_eq!(board.grid.item_positions().len(), 5);
///
/// // The same seed gives the same board.
/// assert_eq!(generator.generate_with_seed(seed, &token), Some(board));
/// # Ok::<(), linkmatch_generator::GeneratorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    template: Grid,
    kinds: Vec<ItemIndex>,
    mode: GenerationMode,
    connector: Connector,
    analyzer: Analyzer,
}

impl BoardGenerator {
    /// Creates a generator for `rows`x`columns` boards using the kinds
    /// `0..item_kinds`.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::ZeroDimension`] if a dimension is zero
    /// - [`GeneratorError::Grid`] if the dimensions are too large
    /// - [`GeneratorError::NoItemKinds`] if `item_kinds` is zero
    /// - [`GeneratorError::ItemKindOverflow`] if `item_kinds` exceeds
    ///   [`ItemIndex::MAX_KINDS`]
    /// - [`GeneratorError::TooManyItemKinds`] if the board cannot hold a pair
    ///   of every kind
    pub fn new(rows: usize, columns: usize, item_kinds: usize) -> Result<Self, GeneratorError> {
        if rows == 0 || columns == 0 {
            return Err(GeneratorError::ZeroDimension { rows, columns });
        }
        let template = Grid::try_new(rows, columns)?;
        if item_kinds == 0 {
            return Err(GeneratorError::NoItemKinds);
        }
        if item_kinds > ItemIndex::MAX_KINDS {
            return Err(GeneratorError::ItemKindOverflow { item_kinds });
        }
        let capacity = template.cell_count();
        if item_kinds * 2 > capacity {
            return Err(GeneratorError::TooManyItemKinds {
                item_kinds,
                capacity,
            });
        }

        let kinds = (0..=u8::MAX)
            .take(item_kinds)
            .map(ItemIndex::new)
            .collect();
        Ok(Self {
            template,
            kinds,
            mode: GenerationMode::default(),
            connector: Connector::new(),
            analyzer: Analyzer::new(),
        })
    }

    /// Sets the acceptance check.
    #[must_use]
    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the connector used for the legal-match check.
    #[must_use]
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = connector;
        self
    }

    /// Sets the analyzer used in [`GenerationMode::Solvable`].
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Returns the number of rows of generated boards.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.template.rows()
    }

    /// Returns the number of columns of generated boards.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.template.columns()
    }

    /// Returns the number of kinds placed on each board.
    #[must_use]
    pub fn item_kinds(&self) -> usize {
        self.kinds.len()
    }

    /// Returns the acceptance check.
    #[must_use]
    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Generates a board from a fresh random seed.
    ///
    /// Returns `None` if `token` is cancelled before a board is accepted.
    #[must_use]
    pub fn generate(&self, token: &CancellationToken) -> Option<GeneratedBoard> {
        self.generate_with_seed(BoardSeed::random(), token)
    }

    /// Generates a board from `seed`.
    ///
    /// `token` is checked before every attempt, so a cancelled token returns
    /// `None` without drawing a board.
    #[must_use]
    pub fn generate_with_seed(
        &self,
        seed: BoardSeed,
        token: &CancellationToken,
    ) -> Option<GeneratedBoard> {
        let mut rng = seed.rng();
        let mut attempts = 0;
        loop {
            if token.is_cancelled() {
                log::debug!("generation cancelled after {attempts} attempts");
                return None;
            }
            attempts += 1;

            let grid = self.fill(&mut rng);
            match self.check(&grid, token) {
                Ok(()) => {
                    log::debug!("accepted attempt {attempts} for seed {seed}");
                    return Some(GeneratedBoard {
                        grid,
                        seed,
                        attempts,
                    });
                }
                Err(Rejection::Cancelled) => {
                    log::debug!("generation cancelled during attempt {attempts}");
                    return None;
                }
                Err(rejection) => log::debug!("rejected attempt {attempts}: {rejection}"),
            }
        }
    }

    fn fill(&self, rng: &mut Pcg64) -> Grid {
        let mut grid = self.template.clone();
        let cells = grid.coordinates().collect::<Vec<Coordinate>>();
        let mut filled = vec![false; cells.len()];
        let mut partners = Vec::with_capacity(cells.len());

        for i in 0..cells.len() {
            if filled[i] {
                continue;
            }
            filled[i] = true;

            let Some(&kind) = self.kinds.choose(rng) else {
                break;
            };
            partners.clear();
            partners.extend((i + 1..cells.len()).filter(|&j| !filled[j]));
            let Some(&partner) = partners.choose(rng) else {
                break;
            };
            filled[partner] = true;
            grid.restore_pair(cells[i], cells[partner], kind);
        }
        grid
    }

    fn check(&self, grid: &Grid, token: &CancellationToken) -> Result<(), Rejection> {
        let present = grid.item_positions().len();
        if present < self.kinds.len() {
            return Err(Rejection::MissingKinds {
                present,
                expected: self.kinds.len(),
            });
        }
        if self.connector.first_match(grid).is_none() {
            return Err(Rejection::NoLegalMatch);
        }
        if self.mode.is_solvable() {
            let result = self.analyzer.analyze(grid, token);
            match result.failed_reason() {
                None => {}
                Some(FailedReason::Cancelled) => return Err(Rejection::Cancelled),
                Some(reason) => return Err(Rejection::Unsolvable(reason)),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingKinds { present: usize, expected: usize },
    NoLegalMatch,
    Unsolvable(FailedReason),
    Cancelled,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKinds { present, expected } => {
                write!(f, "only {present} of {expected} kinds placed")
            }
            Self::NoLegalMatch => write!(f, "no legal match"),
            Self::Unsolvable(reason) => write!(f, "not solvable ({reason})"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use linkmatch_core::{GridError, TurnLimit};
    use proptest::prelude::*;

    use super::*;

    fn seed(byte: u8) -> BoardSeed {
        BoardSeed::from_bytes([byte; 32])
    }

    #[test]
    fn test_argument_errors() {
        assert_eq!(
            BoardGenerator::new(0, 4, 1).unwrap_err(),
            GeneratorError::ZeroDimension {
                rows: 0,
                columns: 4
            }
        );
        assert_eq!(
            BoardGenerator::new(Grid::MAX_DIMENSION + 1, 1, 1).unwrap_err(),
            GeneratorError::Grid(GridError::TooLarge {
                rows: Grid::MAX_DIMENSION + 1,
                columns: 1
            })
        );
        assert_eq!(
            BoardGenerator::new(2, 2, 0).unwrap_err(),
            GeneratorError::NoItemKinds
        );
        assert_eq!(
            BoardGenerator::new(3, 3, 5).unwrap_err(),
            GeneratorError::TooManyItemKinds {
                item_kinds: 5,
                capacity: 9
            }
        );
        assert_eq!(
            BoardGenerator::new(32, 32, 256).unwrap_err(),
            GeneratorError::ItemKindOverflow { item_kinds: 256 }
        );
        assert!(BoardGenerator::new(3, 3, 4).is_ok());
        assert!(BoardGenerator::new(32, 32, ItemIndex::MAX_KINDS).is_ok());
    }

    #[test]
    fn test_grid_errors_convert() {
        let grid_err = GridError::TooLarge {
            rows: 1,
            columns: Grid::MAX_DIMENSION + 1,
        };
        let err = GeneratorError::from(grid_err.clone());
        assert_eq!(err, GeneratorError::Grid(grid_err.clone()));
        assert_eq!(err.to_string(), format!("invalid board dimensions: {grid_err}"));
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string),
            Some(grid_err.to_string())
        );
    }

    #[test]
    fn test_accessors() {
        let generator = BoardGenerator::new(4, 6, 5)
            .unwrap()
            .with_mode(GenerationMode::Solvable);
        assert_eq!(
            (generator.rows(), generator.columns(), generator.item_kinds()),
            (4, 6, 5)
        );
        assert!(generator.mode().is_solvable());
        assert_eq!(GenerationMode::default(), GenerationMode::Playable);
    }

    #[test]
    fn test_cancelled_before_first_attempt() {
        let token = CancellationToken::new();
        token.cancel();
        let generator = BoardGenerator::new(4, 4, 2).unwrap();
        assert_eq!(generator.generate_with_seed(seed(0), &token), None);
        assert_eq!(generator.generate(&token), None);
    }

    #[test]
    fn test_same_seed_same_board() {
        let token = CancellationToken::new();
        let generator = BoardGenerator::new(6, 8, 7).unwrap();
        let first = generator.generate_with_seed(seed(42), &token).unwrap();
        let second = generator.generate_with_seed(seed(42), &token).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.seed, seed(42));
        assert!(first.attempts >= 1);
    }

    #[test]
    fn test_full_board_has_no_gaps() {
        let token = CancellationToken::new();
        let board = BoardGenerator::new(4, 4, 3)
            .unwrap()
            .generate_with_seed(seed(3), &token)
            .unwrap();
        assert_eq!(board.grid.occupied_count(), 16);
    }

    #[test]
    fn test_odd_cell_count_leaves_one_gap() {
        let token = CancellationToken::new();
        for byte in 0..8 {
            let board = BoardGenerator::new(3, 3, 2)
                .unwrap()
                .generate_with_seed(seed(byte), &token)
                .unwrap();
            assert_eq!(board.grid.occupied_count(), 8);
        }
    }

    #[test]
    fn test_single_pair_board() {
        let token = CancellationToken::new();
        let board = BoardGenerator::new(1, 2, 1)
            .unwrap()
            .generate_with_seed(seed(9), &token)
            .unwrap();
        assert_eq!(board.grid, "0 0".parse().unwrap());
        assert_eq!(board.attempts, 1);
    }

    #[test]
    fn test_connector_is_used_for_liveness() {
        let token = CancellationToken::new();
        let generator = BoardGenerator::new(3, 4, 3)
            .unwrap()
            .with_connector(Connector::with_turn_limit(TurnLimit::Straight));
        for byte in 0..8 {
            let board = generator.generate_with_seed(seed(byte), &token).unwrap();
            let straight = Connector::with_turn_limit(TurnLimit::Straight);
            assert!(straight.first_match(&board.grid).is_some());
        }
    }

    #[test]
    fn test_solvable_mode() {
        let token = CancellationToken::new();
        let generator = BoardGenerator::new(4, 4, 3)
            .unwrap()
            .with_mode(GenerationMode::Solvable);
        let analyzer = Analyzer::new();
        for byte in 0..8 {
            let board = generator.generate_with_seed(seed(byte), &token).unwrap();
            assert!(analyzer.analyze(&board.grid, &token).is_solved());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_generated_boards_are_playable(
            (rows, columns, item_kinds) in (1usize..=5, 1usize..=6)
                .prop_filter("room for a pair", |(rows, columns)| rows * columns >= 2)
                .prop_flat_map(|(rows, columns)| {
                    (Just(rows), Just(columns), 1..=(rows * columns / 2).min(3))
                }),
            bytes in any::<[u8; 32]>(),
        ) {
            let token = CancellationToken::new();
            let generator = BoardGenerator::new(rows, columns, item_kinds).unwrap();
            let board = generator
                .generate_with_seed(BoardSeed::from_bytes(bytes), &token)
                .unwrap();

            let positions = board.grid.item_positions();
            prop_assert_eq!(positions.len(), item_kinds);
            for (item, cells) in &positions {
                prop_assert!(usize::from(item.value()) < item_kinds);
                prop_assert!(cells.len() >= 2);
                prop_assert_eq!(cells.len() % 2, 0);
            }
            prop_assert_eq!(board.grid.occupied_count(), rows * columns / 2 * 2);
            prop_assert!(Connector::new().first_match(&board.grid).is_some());
        }
    }
}
