//! Turn-bounded path search between equal tiles.
//!
//! Two tiles of the same kind match when a path of straight, axis-aligned
//! segments joins them, every cell strictly inside a segment is passable
//! (empty, or part of the border ring around the board), and the path turns
//! at most [`TurnLimit::max_turns`] times.
//!
//! # Search order
//!
//! [`Connector::find_path`] returns the first path found in a fixed order:
//!
//! 1. The endpoints are ordered row-major and the search runs from the
//!    smaller one; a path for reversed arguments is returned reversed, so
//!    `find_path(b, a)` always equals `find_path(a, b)` reversed.
//! 2. A straight line.
//! 3. One turn at `(a.row, b.column)`, then at `(b.row, a.column)`.
//! 4. Two turns: for each [`Direction`] in [`Direction::ALL`] order, walk the
//!    ray from `a` outward; for each passable ray cell `c`, try the corner `d`
//!    on `b`'s line (`(c.row, b.column)` for vertical rays, `(b.row, c.column)`
//!    for horizontal rays). Nearer ray cells win.
//!
//! [`Connector::legal_matches`] lists matches sorted by `(start, end)`.

use crate::{Coordinate, Direction, Grid, ItemMatch, PathError};

/// Maximum number of turns a connecting path may take.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TurnLimit {
    /// Only straight lines.
    Straight,
    /// At most one turn.
    OneTurn,
    /// At most two turns, the standard ruleset.
    #[default]
    TwoTurns,
}

impl TurnLimit {
    /// Returns the limit as a number of turns.
    #[must_use]
    pub const fn max_turns(self) -> usize {
        match self {
            Self::Straight => 0,
            Self::OneTurn => 1,
            Self::TwoTurns => 2,
        }
    }
}

/// Finds connecting paths on a [`Grid`].
///
/// The connector never mutates the grid; it is cheap to copy and can be
/// shared freely between threads.
///
/// # Examples
///
/// ```
/// use linkmatch_core::{Connector, Coordinate, Grid};
///
/// // The 1s can only meet by leaving the board over the top edge.
/// let grid: Grid = "
///     1 2 1
///     2 3 3
/// "
/// .parse()?;
///
/// let m = Connector::new()
///     .find_path(&grid, Coordinate::new(0, 0), Coordinate::new(0, 2))?
///     .expect("the border ring connects the corners");
/// assert_eq!(
///     m.interims(),
///     [Coordinate::new(-1, 0), Coordinate::new(-1, 2)]
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Connector {
    turn_limit: TurnLimit,
}

impl Connector {
    /// Creates a connector with the standard two-turn limit.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_turn_limit(TurnLimit::TwoTurns)
    }

    /// Creates a connector with a custom turn limit.
    #[must_use]
    pub const fn with_turn_limit(turn_limit: TurnLimit) -> Self {
        Self { turn_limit }
    }

    /// Returns the configured turn limit.
    #[must_use]
    pub const fn turn_limit(&self) -> TurnLimit {
        self.turn_limit
    }

    /// Finds a path joining the tiles at `a` and `b`.
    ///
    /// Returns `Ok(None)` when the tiles match in kind but no path exists
    /// under the turn limit.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] if `a == b`, if either endpoint lies off the
    /// board or is empty, or if the two endpoints hold different kinds.
    pub fn find_path(
        &self,
        grid: &Grid,
        a: Coordinate,
        b: Coordinate,
    ) -> Result<Option<ItemMatch>, PathError> {
        check_endpoints(grid, a, b)?;
        if b < a {
            return Ok(self.search(grid, b, a).map(|m| m.reversed()));
        }
        Ok(self.search(grid, a, b))
    }

    /// Returns `true` if [`find_path`](Self::find_path) would find a path.
    ///
    /// # Errors
    ///
    /// Same as [`find_path`](Self::find_path).
    pub fn has_path(&self, grid: &Grid, a: Coordinate, b: Coordinate) -> Result<bool, PathError> {
        Ok(self.find_path(grid, a, b)?.is_some())
    }

    /// Returns every legal match on the board, sorted by `(start, end)`.
    ///
    /// Each match starts at the row-major smaller endpoint.
    #[must_use]
    pub fn legal_matches(&self, grid: &Grid) -> Vec<ItemMatch> {
        candidate_pairs(grid)
            .into_iter()
            .filter_map(|(a, b)| self.search(grid, a, b))
            .collect()
    }

    /// Returns the first legal match in [`legal_matches`](Self::legal_matches)
    /// order, stopping at the first hit.
    #[must_use]
    pub fn first_match(&self, grid: &Grid) -> Option<ItemMatch> {
        candidate_pairs(grid)
            .into_iter()
            .find_map(|(a, b)| self.search(grid, a, b))
    }

    /// Checks that `m` is a legal match on `grid` under this connector's
    /// turn limit.
    ///
    /// The endpoints must hold the same kind, every turning point must be
    /// passable, consecutive segments must be perpendicular and every cell
    /// strictly inside a segment must be passable.
    #[must_use]
    pub fn validate(&self, grid: &Grid, m: &ItemMatch) -> bool {
        if check_endpoints(grid, m.start(), m.end()).is_err() {
            return false;
        }
        if m.turning_count() > self.turn_limit.max_turns() {
            return false;
        }
        if !m.interims().iter().all(|&c| grid.is_passable(c)) {
            return false;
        }

        let waypoints = m.waypoints().collect::<Vec<_>>();
        let mut previous_horizontal = None;
        for segment in waypoints.windows(2) {
            let (p, q) = (segment[0], segment[1]);
            if p == q || !p.is_aligned_with(q) || !is_clear_line(grid, p, q) {
                return false;
            }
            let horizontal = p.row() == q.row();
            if previous_horizontal == Some(horizontal) {
                return false;
            }
            previous_horizontal = Some(horizontal);
        }
        true
    }

    fn search(&self, grid: &Grid, a: Coordinate, b: Coordinate) -> Option<ItemMatch> {
        if a.is_aligned_with(b) && is_clear_line(grid, a, b) {
            return Some(ItemMatch::new(a, b, &[]));
        }
        if self.turn_limit < TurnLimit::OneTurn {
            return None;
        }

        for corner in [
            Coordinate::new(a.row(), b.column()),
            Coordinate::new(b.row(), a.column()),
        ] {
            if corner != a
                && corner != b
                && grid.is_passable(corner)
                && is_clear_line(grid, a, corner)
                && is_clear_line(grid, corner, b)
            {
                return Some(ItemMatch::new(a, b, &[corner]));
            }
        }
        if self.turn_limit < TurnLimit::TwoTurns {
            return None;
        }

        for direction in Direction::ALL {
            let mut c = a.step(direction);
            while grid.is_passable(c) {
                let d = if direction.is_vertical() {
                    Coordinate::new(c.row(), b.column())
                } else {
                    Coordinate::new(b.row(), c.column())
                };
                if d != c
                    && d != b
                    && grid.is_passable(d)
                    && is_clear_line(grid, c, d)
                    && is_clear_line(grid, d, b)
                {
                    return Some(ItemMatch::new(a, b, &[c, d]));
                }
                c = c.step(direction);
            }
        }
        None
    }
}

fn check_endpoints(grid: &Grid, a: Coordinate, b: Coordinate) -> Result<(), PathError> {
    if a == b {
        return Err(PathError::SameCell(a));
    }
    for c in [a, b] {
        if !grid.contains(c) {
            return Err(PathError::OutOfBounds(c));
        }
    }
    let item_a = grid.item(a).ok_or(PathError::EmptyCell(a))?;
    let item_b = grid.item(b).ok_or(PathError::EmptyCell(b))?;
    if item_a != item_b {
        return Err(PathError::ItemMismatch { a, b });
    }
    Ok(())
}

/// Returns `true` if `p` and `q` share a row or a column and every cell
/// strictly between them is passable.
fn is_clear_line(grid: &Grid, p: Coordinate, q: Coordinate) -> bool {
    if p.row() == q.row() {
        let (lo, hi) = min_max(p.column(), q.column());
        ((lo + 1)..hi).all(|column| grid.is_passable(Coordinate::new(p.row(), column)))
    } else if p.column() == q.column() {
        let (lo, hi) = min_max(p.row(), q.row());
        ((lo + 1)..hi).all(|row| grid.is_passable(Coordinate::new(row, p.column())))
    } else {
        false
    }
}

fn min_max(x: i32, y: i32) -> (i32, i32) {
    if x <= y { (x, y) } else { (y, x) }
}

/// Same-kind pairs `(a, b)` with `a < b`, sorted.
fn candidate_pairs(grid: &Grid) -> Vec<(Coordinate, Coordinate)> {
    let mut pairs = Vec::new();
    for positions in grid.item_positions().into_values() {
        for (i, &a) in positions.iter().enumerate() {
            pairs.extend(positions[i + 1..].iter().map(|&b| (a, b)));
        }
    }
    pairs.sort_unstable();
    pairs
}
