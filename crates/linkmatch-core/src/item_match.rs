//! Validated connections between two equal tiles.

use std::fmt::{self, Display};

use tinyvec::ArrayVec;

use crate::Coordinate;

/// Turning points of a path, in traversal order.
pub type Interims = ArrayVec<[Coordinate; 2]>;

/// A legal connection between two cells holding the same kind.
///
/// The path runs `start → interims… → end` as straight, axis-aligned
/// segments. Each interim is a 90° turn, so [`turning_count`] is the number of
/// interims and never exceeds two.
///
/// Matches are produced by [`Connector`](crate::Connector); building one by
/// hand does not check it against any board (use
/// [`Connector::validate`](crate::Connector::validate) for that).
///
/// [`turning_count`]: Self::turning_count
///
/// # Examples
///
/// ```
/// use linkmatch_core::{Coordinate, ItemMatch};
///
/// let m = ItemMatch::new(
///     Coordinate::new(0, 0),
///     Coordinate::new(2, 3),
///     &[Coordinate::new(0, 3)],
/// );
/// assert_eq!(m.turning_count(), 1);
/// assert_eq!(m.distance(), 5);
/// assert_eq!(m.to_string(), "(0, 0) -> (0, 3) -> (2, 3)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ItemMatch {
    start: Coordinate,
    end: Coordinate,
    interims: Interims,
}

impl ItemMatch {
    /// Creates a match from its endpoints and turning points.
    ///
    /// # Panics
    ///
    /// Panics if more than two interims are given.
    #[must_use]
    pub fn new(start: Coordinate, end: Coordinate, interims: &[Coordinate]) -> Self {
        assert!(
            interims.len() <= 2,
            "a match turns at most twice, got {} interims",
            interims.len()
        );
        Self {
            start,
            end,
            interims: interims.iter().copied().collect(),
        }
    }

    /// Returns the first endpoint.
    #[must_use]
    #[inline]
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Returns the second endpoint.
    #[must_use]
    #[inline]
    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// Returns the turning points in traversal order.
    #[must_use]
    #[inline]
    pub fn interims(&self) -> &[Coordinate] {
        &self.interims
    }

    /// Returns the number of turns along the path.
    #[must_use]
    #[inline]
    pub fn turning_count(&self) -> usize {
        self.interims.len()
    }

    /// Iterates over `start`, the interims and `end`.
    pub fn waypoints(&self) -> impl Iterator<Item = Coordinate> + '_ {
        std::iter::once(self.start)
            .chain(self.interims.iter().copied())
            .chain(std::iter::once(self.end))
    }

    /// Returns the total Manhattan length of the path segments.
    #[must_use]
    pub fn distance(&self) -> u32 {
        let waypoints = self.waypoints().collect::<ArrayVec<[Coordinate; 4]>>();
        waypoints
            .windows(2)
            .map(|w| w[0].manhattan_distance(w[1]))
            .sum()
    }

    /// Returns the same path traversed from `end` to `start`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut interims = self.interims.clone();
        interims.reverse();
        Self {
            start: self.end,
            end: self.start,
            interims,
        }
    }
}

impl Display for ItemMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coord) in self.waypoints().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{coord}")?;
        }
        Ok(())
    }
}
