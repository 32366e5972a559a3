use linkmatch_core::{ItemMatch, PathError};

/// Unexpected failure inside a solve attempt.
///
/// Attached to [`FailedReason::Faulted`](crate::FailedReason::Faulted)
/// results so that a batch of analyses can carry on past a bad board.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum AnalysisError {
    /// A path query was rejected by the connector.
    #[display("path query failed: {_0}")]
    #[from]
    Path(PathError),
    /// The search panicked; the payload message is kept for diagnostics.
    #[display("search panicked: {message}")]
    Panicked {
        /// The panic message, or a placeholder for non-string payloads.
        message: String,
    },
}

/// Errors reported by [`AnalysisResult::replay`](crate::AnalysisResult::replay).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ReplayError {
    /// Only solved analyses carry a clearing order.
    #[display("the analysis did not solve the board")]
    NotSolved,
    /// A step is not a legal match on the board it is applied to.
    #[display("step {step} ({item_match}) is not legal at that point")]
    IllegalStep {
        /// Zero-based index of the step.
        step: usize,
        /// The offending match.
        item_match: ItemMatch,
    },
    /// Tiles are left over after the last step.
    #[display("{remaining} cells remain occupied after the last step")]
    NotCleared {
        /// Number of occupied cells left.
        remaining: usize,
    },
}
