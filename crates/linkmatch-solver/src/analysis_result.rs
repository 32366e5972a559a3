use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    time::Duration,
};

use linkmatch_core::{Connector, Grid, ItemMatch};

use crate::{AnalysisError, AnalysisStats, ReplayError};

/// Why an analysis did not clear the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant,
)]
pub enum FailedReason {
    /// The board had no legal match before any step was taken.
    #[display("no initial match")]
    NoInitialMatch,
    /// Every ordering of matches was explored without clearing the board.
    #[display("dead end")]
    DeadEnd,
    /// The caller cancelled the search.
    #[display("cancelled")]
    Cancelled,
    /// The search failed unexpectedly; see [`AnalysisResult::cause`].
    #[display("faulted")]
    Faulted,
}

/// The solved/unsolved part of an [`AnalysisResult`].
#[derive(Debug, Clone, derive_more::IsVariant)]
pub enum AnalysisOutcome {
    /// The board can be cleared.
    Solved {
        /// The clearing order; applying each match in turn empties the board.
        matches: Vec<ItemMatch>,
        /// Wall-clock time spent in the search.
        elapsed: Duration,
    },
    /// The board could not be cleared.
    Failed {
        /// Why the search stopped.
        reason: FailedReason,
        /// The underlying error for [`FailedReason::Faulted`].
        cause: Option<AnalysisError>,
    },
}

/// The outcome of [`Analyzer::analyze`](crate::Analyzer::analyze).
///
/// Two results compare equal when they describe the same grid with the same
/// solved/unsolved outcome; the clearing order, timings and statistics are not
/// part of the identity since one board may have many clearing orders.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    grid: Grid,
    outcome: AnalysisOutcome,
    stats: AnalysisStats,
}

impl AnalysisResult {
    pub(crate) fn new(grid: Grid, outcome: AnalysisOutcome, stats: AnalysisStats) -> Self {
        Self {
            grid,
            outcome,
            stats,
        }
    }

    /// Returns the analysed board, as it was before any step.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the outcome.
    #[must_use]
    pub fn outcome(&self) -> &AnalysisOutcome {
        &self.outcome
    }

    /// Returns search statistics.
    #[must_use]
    pub fn stats(&self) -> &AnalysisStats {
        &self.stats
    }

    /// Returns `true` if the board can be cleared.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.outcome.is_solved()
    }

    /// Returns the clearing order, or an empty slice when unsolved.
    #[must_use]
    pub fn matches(&self) -> &[ItemMatch] {
        match &self.outcome {
            AnalysisOutcome::Solved { matches, .. } => matches,
            AnalysisOutcome::Failed { .. } => &[],
        }
    }

    /// Returns the search time of a solved analysis.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        match &self.outcome {
            AnalysisOutcome::Solved { elapsed, .. } => Some(*elapsed),
            AnalysisOutcome::Failed { .. } => None,
        }
    }

    /// Returns the failure reason of an unsolved analysis.
    #[must_use]
    pub fn failed_reason(&self) -> Option<FailedReason> {
        match &self.outcome {
            AnalysisOutcome::Solved { .. } => None,
            AnalysisOutcome::Failed { reason, .. } => Some(*reason),
        }
    }

    /// Returns the error behind a [`FailedReason::Faulted`] result.
    #[must_use]
    pub fn cause(&self) -> Option<&AnalysisError> {
        match &self.outcome {
            AnalysisOutcome::Solved { .. } => None,
            AnalysisOutcome::Failed { cause, .. } => cause.as_ref(),
        }
    }

    /// Applies the clearing order to the original board, checking every step
    /// against the board state it is applied to.
    ///
    /// Returns the final, empty board.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::NotSolved`] for unsolved results
    /// - [`ReplayError::IllegalStep`] if a step is not legal when applied
    /// - [`ReplayError::NotCleared`] if tiles remain at the end
    pub fn replay(&self, connector: &Connector) -> Result<Grid, ReplayError> {
        let AnalysisOutcome::Solved { matches, .. } = &self.outcome else {
            return Err(ReplayError::NotSolved);
        };
        let mut board = self.grid.clone();
        for (step, item_match) in matches.iter().enumerate() {
            if !connector.validate(&board, item_match) {
                return Err(ReplayError::IllegalStep {
                    step,
                    item_match: item_match.clone(),
                });
            }
            board.remove_pair(item_match.start(), item_match.end());
        }
        match board.occupied_count() {
            0 => Ok(board),
            remaining => Err(ReplayError::NotCleared { remaining }),
        }
    }
}

impl PartialEq for AnalysisResult {
    fn eq(&self, other: &Self) -> bool {
        self.is_solved() == other.is_solved() && self.grid == other.grid
    }
}

impl Eq for AnalysisResult {}

impl Hash for AnalysisResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid.hash(state);
        self.is_solved().hash(state);
    }
}

impl Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Puzzle:")?;
        writeln!(f, "{}", self.grid)?;
        writeln!(f, "---")?;
        match &self.outcome {
            AnalysisOutcome::Solved { matches, elapsed } => {
                writeln!(f, "Steps:")?;
                for item_match in matches {
                    writeln!(f, "{item_match}")?;
                }
                writeln!(f, "---")?;
                writeln!(f, "Puzzle is solved.")?;
                write!(f, "Elapsed time: {elapsed:?}")
            }
            AnalysisOutcome::Failed { reason, cause } => {
                write!(f, "Puzzle isn't solved. Reason: {reason}.")?;
                if let Some(cause) = cause {
                    write!(f, "\nCause: {cause}")?;
                }
                Ok(())
            }
        }
    }
}
