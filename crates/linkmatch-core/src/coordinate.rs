//! Board coordinates and step directions.

use std::fmt::{self, Display};

/// A `(row, column)` position.
///
/// Coordinates are signed so that they can also address the one-cell border
/// ring surrounding the board (row `-1`, row `rows`, column `-1` and column
/// `columns`), which paths are allowed to travel through.
///
/// Ordering is row-major: by row, then by column.
///
/// # Examples
///
/// ```
/// use linkmatch_core::{Coordinate, Direction};
///
/// let c = Coordinate::new(2, 3);
/// assert_eq!(c.step(Direction::Up), Coordinate::new(1, 3));
/// assert_eq!(c.manhattan_distance(Coordinate::new(0, 0)), 5);
/// assert!(Coordinate::new(0, 9) < Coordinate::new(1, 0));
/// ```
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Coordinate {
    row: i32,
    column: i32,
}

impl Coordinate {
    /// Creates a coordinate.
    #[must_use]
    #[inline]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Returns the row.
    #[must_use]
    #[inline]
    pub const fn row(self) -> i32 {
        self.row
    }

    /// Returns the column.
    #[must_use]
    #[inline]
    pub const fn column(self) -> i32 {
        self.column
    }

    /// Returns the Manhattan distance to `other`.
    #[must_use]
    #[inline]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Returns the neighbouring coordinate in `direction`.
    #[must_use]
    #[inline]
    pub const fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.column + dc)
    }

    /// Returns `true` if `self` and `other` share a row or a column.
    #[must_use]
    #[inline]
    pub const fn is_aligned_with(self, other: Self) -> bool {
        self.row == other.row || self.column == other.column
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// One of the four axis-aligned directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row `-1`.
    Up,
    /// Towards row `rows`.
    Down,
    /// Towards column `-1`.
    Left,
    /// Towards column `columns`.
    Right,
}

impl Direction {
    /// All directions, in the order the connector explores them.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns `true` for [`Up`](Self::Up) and [`Down`](Self::Down).
    #[must_use]
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    #[inline]
    const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_one_cell() {
        let c = Coordinate::new(0, 0);
        assert_eq!(c.step(Direction::Up), Coordinate::new(-1, 0));
        assert_eq!(c.step(Direction::Down), Coordinate::new(1, 0));
        assert_eq!(c.step(Direction::Left), Coordinate::new(0, -1));
        assert_eq!(c.step(Direction::Right), Coordinate::new(0, 1));
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut coords = vec![
            Coordinate::new(1, 0),
            Coordinate::new(0, 2),
            Coordinate::new(0, 1),
        ];
        coords.sort();
        assert_eq!(
            coords,
            [
                Coordinate::new(0, 1),
                Coordinate::new(0, 2),
                Coordinate::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new(-1, 4).to_string(), "(-1, 4)");
    }

    #[test]
    fn test_is_aligned_with() {
        let c = Coordinate::new(2, 2);
        assert!(c.is_aligned_with(Coordinate::new(2, 7)));
        assert!(c.is_aligned_with(Coordinate::new(-1, 2)));
        assert!(!c.is_aligned_with(Coordinate::new(3, 3)));
    }
}
