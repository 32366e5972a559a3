use std::{
    any::Any,
    collections::HashSet,
    panic::{self, AssertUnwindSafe},
    time::Instant,
    vec,
};

use linkmatch_core::{CancellationToken, Connector, Grid, GridFingerprint, ItemIndex, ItemMatch};

use crate::{AnalysisError, AnalysisOutcome, AnalysisResult, FailedReason};

/// Counters collected during one [`Analyzer::analyze`] run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisStats {
    pub(crate) nodes: usize,
    pub(crate) backtracks: usize,
    pub(crate) memo_hits: usize,
    pub(crate) dead_states: usize,
}

impl AnalysisStats {
    /// Returns the number of board states whose moves were enumerated.
    ///
    /// The starting board counts as one node.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Returns the number of moves taken back.
    #[must_use]
    pub fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Returns how often a move led to a board already known to be dead.
    #[must_use]
    pub fn memo_hits(&self) -> usize {
        self.memo_hits
    }

    /// Returns the number of distinct board states proven unclearable.
    #[must_use]
    pub fn dead_states(&self) -> usize {
        self.dead_states
    }
}

/// Decides whether a board can be cleared completely.
///
/// The search is depth-first over "which match to take next". Moves at every
/// state are tried in [`Connector::legal_matches`] order, so the clearing
/// order reported for a board is deterministic. Boards that turned out to be
/// unclearable are remembered by [`GridFingerprint`] for the rest of the run,
/// since different move orders frequently reach the same board.
///
/// # Examples
///
/// ```
/// use linkmatch_core::CancellationToken;
/// use linkmatch_solver::Analyzer;
///
/// let grid = "
///     1 2 2 1
/// "
/// .parse()?;
///
/// let result = Analyzer::new().analyze(&grid, &CancellationToken::new());
/// assert!(result.is_solved());
/// assert_eq!(result.matches().len(), 2);
/// # Ok::<(), linkmatch_core::GridError>(())
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Analyzer {
    connector: Connector,
    prune_forced_pairs: bool,
}

impl Analyzer {
    /// Creates an analyzer with the two-turn rules and no pruning.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connector: Connector::new(),
            prune_forced_pairs: false,
        }
    }

    /// Uses `connector` to enumerate moves.
    #[must_use]
    pub const fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = connector;
        self
    }

    /// Enables or disables forced-pair pruning.
    ///
    /// When enabled, a legal match between the last two tiles of a kind is
    /// taken without trying its siblings. Clearing a pair only opens paths, so
    /// this never turns a clearable board into a dead one; it can change which
    /// clearing order is reported.
    #[must_use]
    pub const fn with_forced_pair_pruning(mut self, enabled: bool) -> Self {
        self.prune_forced_pairs = enabled;
        self
    }

    /// Returns the connector used to enumerate moves.
    #[must_use]
    pub const fn connector(&self) -> &Connector {
        &self.connector
    }

    /// Returns `true` if forced-pair pruning is enabled.
    #[must_use]
    pub const fn prunes_forced_pairs(&self) -> bool {
        self.prune_forced_pairs
    }

    /// Searches for a complete clearing order of `grid`.
    ///
    /// `token` is checked before the search starts and before every move, so
    /// a token cancelled up front yields [`FailedReason::Cancelled`] even for
    /// an empty board. Failures inside the search are reported as
    /// [`FailedReason::Faulted`] rather than propagated.
    pub fn analyze(&self, grid: &Grid, token: &CancellationToken) -> AnalysisResult {
        analyze_with(grid, |stats| self.search(grid, token, stats))
    }

    fn search(
        &self,
        grid: &Grid,
        token: &CancellationToken,
        stats: &mut AnalysisStats,
    ) -> Result<Vec<ItemMatch>, SearchStop> {
        if token.is_cancelled() {
            return Err(FailedReason::Cancelled.into());
        }
        if grid.is_cleared() {
            return Ok(Vec::new());
        }

        let mut board = grid.clone();
        let initial = self.candidates(&board)?;
        if initial.is_empty() {
            return Err(FailedReason::NoInitialMatch.into());
        }
        stats.nodes = 1;

        let mut dead = HashSet::<GridFingerprint>::new();
        let mut frames: Vec<vec::IntoIter<ItemMatch>> = vec![initial.into_iter()];
        let mut applied: Vec<(ItemMatch, ItemIndex)> = Vec::new();

        while let Some(frame) = frames.last_mut() {
            let Some(next) = frame.next() else {
                frames.pop();
                if dead.insert(board.fingerprint()) {
                    stats.dead_states += 1;
                }
                if let Some(last) = applied.pop() {
                    undo(&mut board, last, stats);
                }
                continue;
            };

            if token.is_cancelled() {
                return Err(FailedReason::Cancelled.into());
            }

            let item = board.remove_pair(next.start(), next.end());
            let step = (next, item);
            if board.is_cleared() {
                applied.push(step);
                return Ok(applied.into_iter().map(|(m, _)| m).collect());
            }

            let fingerprint = board.fingerprint();
            if dead.contains(&fingerprint) {
                stats.memo_hits += 1;
                undo(&mut board, step, stats);
                continue;
            }

            let candidates = self.candidates(&board)?;
            if candidates.is_empty() {
                dead.insert(fingerprint);
                stats.dead_states += 1;
                undo(&mut board, step, stats);
                continue;
            }

            stats.nodes += 1;
            applied.push(step);
            frames.push(candidates.into_iter());
        }

        Err(FailedReason::DeadEnd.into())
    }

    fn candidates(&self, board: &Grid) -> Result<Vec<ItemMatch>, AnalysisError> {
        if self.prune_forced_pairs {
            for positions in board.item_positions().into_values() {
                if let [a, b] = positions[..]
                    && let Some(forced) = self.connector.find_path(board, a, b)?
                {
                    return Ok(vec![forced]);
                }
            }
        }
        Ok(self.connector.legal_matches(board))
    }
}

#[derive(Debug, derive_more::From)]
enum SearchStop {
    Failed(FailedReason),
    Faulted(AnalysisError),
}

fn analyze_with(
    grid: &Grid,
    search: impl FnOnce(&mut AnalysisStats) -> Result<Vec<ItemMatch>, SearchStop>,
) -> AnalysisResult {
    log::debug!(
        "analyzing {}x{} grid with {} occupied cells",
        grid.rows(),
        grid.columns(),
        grid.occupied_count()
    );

    let started = Instant::now();
    let mut stats = AnalysisStats::default();
    let outcome = match run_guarded(|| search(&mut stats)) {
        Ok(Ok(matches)) => AnalysisOutcome::Solved {
            matches,
            elapsed: started.elapsed(),
        },
        Ok(Err(SearchStop::Failed(reason))) => AnalysisOutcome::Failed {
            reason,
            cause: None,
        },
        Ok(Err(SearchStop::Faulted(cause))) | Err(cause) => AnalysisOutcome::Failed {
            reason: FailedReason::Faulted,
            cause: Some(cause),
        },
    };

    match &outcome {
        AnalysisOutcome::Solved { matches, elapsed } => {
            log::debug!("solved in {} matches ({elapsed:?}), {stats:?}", matches.len());
        }
        AnalysisOutcome::Failed { reason, cause } => {
            log::debug!("not solved: {reason} (cause: {cause:?}), {stats:?}");
        }
    }

    AnalysisResult::new(grid.clone(), outcome, stats)
}

fn undo(board: &mut Grid, (m, item): (ItemMatch, ItemIndex), stats: &mut AnalysisStats) {
    log::trace!("backtracking over {m}");
    board.restore_pair(m.start(), m.end(), item);
    stats.backtracks += 1;
}

fn run_guarded<T>(f: impl FnOnce() -> T) -> Result<T, AnalysisError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| AnalysisError::Panicked {
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
