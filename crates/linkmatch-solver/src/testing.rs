//! Test utilities for the analyzer.
//!
//! [`AnalysisTester`] runs an [`Analyzer`] on a board written in the grid text
//! format and offers chained assertions on the result.

use linkmatch_core::{CancellationToken, Coordinate, Grid, ItemIndex};
use proptest::prelude::*;

use crate::{AnalysisResult, AnalysisStats, Analyzer, FailedReason};

/// A test harness around one analysis run.
///
/// All assertion methods return `self` for chaining and use
/// `#[track_caller]` so failures point at the test.
#[derive(Debug)]
pub struct AnalysisTester {
    analyzer: Analyzer,
    result: AnalysisResult,
}

impl AnalysisTester {
    /// Analyses `s` with the default analyzer.
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be parsed as a grid.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        Self::with_analyzer(Analyzer::new(), s)
    }

    /// Analyses `s` with `analyzer`.
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be parsed as a grid, or if the analysis
    /// changed the board it reports.
    #[track_caller]
    pub fn with_analyzer(analyzer: Analyzer, s: &str) -> Self {
        let grid: Grid = s.parse().unwrap();
        let result = analyzer.analyze(&grid, &CancellationToken::new());
        assert_eq!(
            result.grid(),
            &grid,
            "Expected the result to report the analysed board"
        );
        Self { analyzer, result }
    }

    /// Asserts that the board was solved and that the clearing order replays.
    #[track_caller]
    pub fn assert_solved(self) -> Self {
        assert!(
            self.result.is_solved(),
            "Expected the board to be solved, but got:\n{}",
            self.result
        );
        if let Err(err) = self.result.replay(self.analyzer.connector()) {
            panic!("Expected the clearing order to replay, but {err}");
        }
        self
    }

    /// Asserts that the analysis failed for `reason`.
    #[track_caller]
    pub fn assert_failed(self, reason: FailedReason) -> Self {
        assert_eq!(
            self.result.failed_reason(),
            Some(reason),
            "Unexpected outcome:\n{}",
            self.result
        );
        self
    }

    /// Asserts the length of the clearing order.
    #[track_caller]
    pub fn assert_match_count(self, count: usize) -> Self {
        assert_eq!(
            self.result.matches().len(),
            count,
            "Unexpected clearing order: {:?}",
            self.result.matches()
        );
        self
    }

    /// Asserts the `index`-th step of the clearing order.
    #[track_caller]
    pub fn assert_match(
        self,
        index: usize,
        start: Coordinate,
        end: Coordinate,
        interims: &[Coordinate],
    ) -> Self {
        let Some(step) = self.result.matches().get(index) else {
            panic!(
                "Expected step {index}, but the clearing order has {} steps",
                self.result.matches().len()
            );
        };
        assert_eq!(
            (step.start(), step.end(), step.interims()),
            (start, end, interims),
            "Unexpected step {index}: {step}"
        );
        self
    }

    /// Asserts the search statistics.
    #[track_caller]
    pub fn assert_stats(self, expected: AnalysisStats) -> Self {
        assert_eq!(self.result.stats(), &expected);
        self
    }
}

/// Boards of at most 3x3 or 2x4 cells holding up to two kinds.
///
/// Each kind is repaired to an even count by blanking its last occurrence.
pub fn arb_small_grid() -> impl Strategy<Value = Grid> {
    prop_oneof![Just((3usize, 3usize)), Just((2, 4)), Just((2, 3)), Just((1, 4))]
        .prop_flat_map(|(rows, columns)| {
            (
                Just(rows),
                Just(columns),
                prop::collection::vec(0u8..3, rows * columns),
            )
        })
        .prop_map(|(rows, columns, values)| {
            let mut cells = values
                .into_iter()
                .map(|v| if v < 2 { ItemIndex::new(v) } else { ItemIndex::EMPTY })
                .collect::<Vec<_>>();
            for kind in 0..2 {
                let item = ItemIndex::new(kind);
                if cells.iter().filter(|&&c| c == item).count() % 2 != 0
                    && let Some(last) = cells.iter().rposition(|&c| c == item)
                {
                    cells[last] = ItemIndex::EMPTY;
                }
            }
            Grid::from_cells(rows, columns, cells).unwrap()
        })
}
