//! The rectangular puzzle board.
//!
//! A [`Grid`] is a row-major array of [`ItemIndex`] values. Every non-empty
//! kind occurs an even number of times because tiles are only ever placed or
//! removed in pairs; constructors reject boards that break this rule.
//!
//! # Text format
//!
//! One board row per line (a `/` also separates rows), cells separated by
//! whitespace, `.` or `_` for an empty cell and a decimal number for a tile
//! kind:
//!
//! ```
//! use linkmatch_core::{Coordinate, Grid, ItemIndex};
//!
//! let grid: Grid = "1 1 / . .".parse()?;
//! assert_eq!(grid.rows(), 2);
//! assert_eq!(grid.item(Coordinate::new(0, 1)), Some(ItemIndex::new(1)));
//! assert_eq!(grid.item(Coordinate::new(1, 0)), None);
//! assert_eq!(grid.to_string(), "1 1\n. .");
//! # Ok::<(), linkmatch_core::GridError>(())
//! ```

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use sha2::{Digest as _, Sha256};

use crate::{Coordinate, GridError, ItemIndex};

/// A rectangular board of tiles.
///
/// The dimensions are fixed for the lifetime of the grid. Paths may leave the
/// board through an implicit one-cell ring of empty space around it; see
/// [`Grid::is_passable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "GridRepr", into = "GridRepr")]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<ItemIndex>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    rows: usize,
    columns: usize,
    cells: Vec<ItemIndex>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        Self::from_cells(repr.rows, repr.columns, repr.cells)
    }
}

impl From<Grid> for GridRepr {
    fn from(grid: Grid) -> Self {
        let Grid {
            rows,
            columns,
            cells,
        } = grid;
        Self {
            rows,
            columns,
            cells,
        }
    }
}

impl Grid {
    /// Largest supported number of rows or columns.
    pub const MAX_DIMENSION: usize = 1 << 12;

    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or larger than
    /// [`MAX_DIMENSION`](Self::MAX_DIMENSION).
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        assert!(
            check_dimensions(rows, columns).is_ok(),
            "invalid grid dimensions: {rows}x{columns}"
        );
        Self {
            rows,
            columns,
            cells: vec![ItemIndex::EMPTY; rows * columns],
        }
    }

    /// Creates an empty grid, reporting invalid dimensions as an error.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] or [`GridError::TooLarge`].
    pub fn try_new(rows: usize, columns: usize) -> Result<Self, GridError> {
        check_dimensions(rows, columns)?;
        Ok(Self::new(rows, columns))
    }

    /// Creates a grid from row-major cell values.
    ///
    /// # Errors
    ///
    /// - [`GridError::ZeroDimension`] / [`GridError::TooLarge`] for bad dimensions
    /// - [`GridError::LengthMismatch`] if `cells.len() != rows * columns`
    /// - [`GridError::UnpairedItem`] if some kind occurs an odd number of times
    ///   (the smallest such kind is reported)
    pub fn from_cells(
        rows: usize,
        columns: usize,
        cells: Vec<ItemIndex>,
    ) -> Result<Self, GridError> {
        check_dimensions(rows, columns)?;
        let expected = rows * columns;
        if cells.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: cells.len(),
            });
        }

        let mut counts = BTreeMap::<ItemIndex, usize>::new();
        for &item in cells.iter().filter(|item| !item.is_empty()) {
            *counts.entry(item).or_default() += 1;
        }
        if let Some((&item, &count)) = counts.iter().find(|(_, count)| **count % 2 != 0) {
            return Err(GridError::UnpairedItem { item, count });
        }

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns `rows * columns`.
    #[must_use]
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[ItemIndex] {
        &self.cells
    }

    /// Returns `true` if `coord` lies on the board.
    #[must_use]
    #[inline]
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.index_of(coord).is_some()
    }

    /// Returns `true` if `coord` lies on the board or on the border ring
    /// around it.
    #[must_use]
    #[inline]
    pub fn in_ring(&self, coord: Coordinate) -> bool {
        let (rows, columns) = self.extent();
        (-1..=rows).contains(&coord.row()) && (-1..=columns).contains(&coord.column())
    }

    /// Returns the tile at `coord`, or `None` for empty, border and
    /// out-of-range cells.
    #[must_use]
    #[inline]
    pub fn item(&self, coord: Coordinate) -> Option<ItemIndex> {
        let item = self.cells[self.index_of(coord)?];
        (!item.is_empty()).then_some(item)
    }

    /// Returns `true` if a path may travel through `coord`.
    ///
    /// Empty board cells and cells of the border ring are passable; occupied
    /// cells and anything beyond the ring are not.
    #[must_use]
    #[inline]
    pub fn is_passable(&self, coord: Coordinate) -> bool {
        match self.index_of(coord) {
            Some(index) => self.cells[index].is_empty(),
            None => self.in_ring(coord),
        }
    }

    /// Returns `true` if every cell is empty.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|item| item.is_empty())
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|item| !item.is_empty()).count()
    }

    /// Iterates over all board coordinates in row-major order.
    pub fn coordinates(&self) -> impl DoubleEndedIterator<Item = Coordinate> + '_ {
        (0..self.cells.len()).map(|index| self.coordinate_of(index))
    }

    /// Groups occupied cells by kind.
    ///
    /// Kinds are ascending and each kind's positions are row-major.
    #[must_use]
    pub fn item_positions(&self) -> BTreeMap<ItemIndex, Vec<Coordinate>> {
        let mut positions = BTreeMap::<ItemIndex, Vec<Coordinate>>::new();
        for (index, &item) in self.cells.iter().enumerate() {
            if !item.is_empty() {
                positions
                    .entry(item)
                    .or_default()
                    .push(self.coordinate_of(index));
            }
        }
        positions
    }

    /// Returns a digest of the dimensions and cell contents.
    ///
    /// Two grids have the same fingerprint exactly when they are equal (up to
    /// SHA-256 collisions).
    #[must_use]
    pub fn fingerprint(&self) -> GridFingerprint {
        let mut hasher = Sha256::new();
        hasher.update((self.rows as u64).to_le_bytes());
        hasher.update((self.columns as u64).to_le_bytes());
        let bytes = self.cells.iter().map(|item| item.value()).collect::<Vec<_>>();
        hasher.update(&bytes);
        GridFingerprint(hasher.finalize().into())
    }

    /// Removes the pair of tiles at `a` and `b`, returning their kind.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`, if either coordinate is off the board, or if the two
    /// cells do not hold the same non-empty kind.
    pub fn remove_pair(&mut self, a: Coordinate, b: Coordinate) -> ItemIndex {
        let (ia, ib) = self.pair_indices(a, b);
        let item = self.cells[ia];
        assert!(
            !item.is_empty() && item == self.cells[ib],
            "{a} and {b} do not hold a removable pair"
        );
        self.cells[ia] = ItemIndex::EMPTY;
        self.cells[ib] = ItemIndex::EMPTY;
        item
    }

    /// Places a pair of `item` tiles on the empty cells `a` and `b`.
    ///
    /// This is the inverse of [`remove_pair`](Self::remove_pair), and also how
    /// boards are filled pair by pair.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`, if either coordinate is off the board, if either
    /// cell is occupied, or if `item` is the empty sentinel.
    pub fn restore_pair(&mut self, a: Coordinate, b: Coordinate, item: ItemIndex) {
        let (ia, ib) = self.pair_indices(a, b);
        assert!(!item.is_empty(), "cannot restore the empty sentinel");
        assert!(
            self.cells[ia].is_empty() && self.cells[ib].is_empty(),
            "{a} and {b} must be empty to restore a pair"
        );
        self.cells[ia] = item;
        self.cells[ib] = item;
    }

    fn pair_indices(&self, a: Coordinate, b: Coordinate) -> (usize, usize) {
        assert_ne!(a, b, "a pair needs two distinct cells");
        let ia = self.index_of(a);
        let ib = self.index_of(b);
        match (ia, ib) {
            (Some(ia), Some(ib)) => (ia, ib),
            _ => panic!("{a} or {b} lies outside the board"),
        }
    }

    #[inline]
    fn index_of(&self, coord: Coordinate) -> Option<usize> {
        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        (row < self.rows && column < self.columns).then_some(row * self.columns + column)
    }

    #[inline]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn coordinate_of(&self, index: usize) -> Coordinate {
        // Dimensions are bounded by `MAX_DIMENSION`, far below `i32::MAX`.
        Coordinate::new((index / self.columns) as i32, (index % self.columns) as i32)
    }

    #[inline]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn extent(&self) -> (i32, i32) {
        (self.rows as i32, self.columns as i32)
    }
}

fn check_dimensions(rows: usize, columns: usize) -> Result<(), GridError> {
    if rows == 0 || columns == 0 {
        return Err(GridError::ZeroDimension { rows, columns });
    }
    if rows > Grid::MAX_DIMENSION || columns > Grid::MAX_DIMENSION {
        return Err(GridError::TooLarge { rows, columns });
    }
    Ok(())
}

impl Index<Coordinate> for Grid {
    type Output = ItemIndex;

    /// Returns the cell at `coord`, which may be [`ItemIndex::EMPTY`].
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the board.
    fn index(&self, coord: Coordinate) -> &Self::Output {
        match self.index_of(coord) {
            Some(index) => &self.cells[index],
            None => panic!("{coord} lies outside the board"),
        }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cells
            .iter()
            .map(|item| item.to_string().len())
            .max()
            .unwrap_or(1);
        for (r, row) in self.cells.chunks(self.columns).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, item) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{item:>width$}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut columns = None;
        let mut rows = 0;
        let mut cells = Vec::new();

        for (line_index, line) in s.split(['\n', '/']).enumerate() {
            let start = cells.len();
            for token in line.split_whitespace() {
                let item = match token {
                    "." | "_" => ItemIndex::EMPTY,
                    _ => token
                        .parse::<u8>()
                        .ok()
                        .and_then(ItemIndex::try_new)
                        .ok_or_else(|| GridError::Parse {
                            line: line_index + 1,
                            token: token.to_owned(),
                        })?,
                };
                cells.push(item);
            }
            let width = cells.len() - start;
            if width == 0 {
                continue;
            }
            let expected = *columns.get_or_insert(width);
            if width != expected {
                return Err(GridError::RaggedRow {
                    row: rows,
                    expected,
                    actual: width,
                });
            }
            rows += 1;
        }

        Self::from_cells(rows, columns.unwrap_or(0), cells)
    }
}

/// A SHA-256 digest of a grid, used to memoise board states.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridFingerprint([u8; 32]);

impl GridFingerprint {
    /// Returns the digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for GridFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GridFingerprint({self})")
    }
}

impl Display for GridFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
