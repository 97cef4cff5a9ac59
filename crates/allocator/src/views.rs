use crate::constants::{COLS, ROWS};
use crate::distribute::distribute_column;
use crate::error::Result;
use crate::matrix::{FeasibilityMatrix, Matrix, check_cell};
use crate::state::AllocationState;
use crate::types::{AnswerStyle, Difficulty};
use log::{info, warn};
use strum::IntoEnumIterator;

/// Requested vs. delivered total for one distributor run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnOutcome {
    pub difficulty: Difficulty,
    /// `None` when the run covered all rows
    pub style: Option<AnswerStyle>,
    pub requested: u32,
    pub delivered: u32,
}

impl ColumnOutcome {
    pub fn shortfall(&self) -> u32 {
        self.requested - self.delivered
    }
}

/// What a `set_values` call actually delivered.
///
/// Infeasible targets are clamped without an error; this is where a caller
/// can see it happened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistributionReport {
    pub outcomes: Vec<ColumnOutcome>,
}

impl DistributionReport {
    pub fn shortfall(&self) -> u32 {
        self.outcomes.iter().map(ColumnOutcome::shortfall).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.shortfall() == 0
    }

    fn record(
        &mut self,
        difficulty: Difficulty,
        style: Option<AnswerStyle>,
        requested: u32,
        delivered: u32,
    ) {
        let outcome = ColumnOutcome {
            difficulty,
            style,
            requested,
            delivered,
        };
        if outcome.shortfall() > 0 {
            warn!(
                "{} {}: only {} of {} problems available",
                style.map_or("all".to_string(), |s| s.to_string()),
                difficulty,
                delivered,
                requested
            );
        }
        self.outcomes.push(outcome);
    }
}

/// Objective and subjective totals per difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnswerStyleTotals {
    pub objective: [u32; COLS],
    pub subjective: [u32; COLS],
}

/// Raw 8x5 view with single-cell editing
#[derive(Debug)]
pub struct DetailedView<'a> {
    state: &'a mut AllocationState,
    feasible: &'a FeasibilityMatrix,
}

impl DetailedView<'_> {
    pub fn matrix(&self) -> Matrix {
        self.state.get()
    }

    /// Writes one cell, clamped to its inventory cap.
    ///
    /// # Returns
    /// The value actually stored
    ///
    /// # Errors
    /// `QuotaExceeded` if the new grand total would pass the maximum,
    /// `InvalidCell` for coordinates outside the grid
    pub fn set_cell(&mut self, row: usize, col: usize, value: u32) -> Result<u32> {
        check_cell(row, col)?;
        let value = value.min(self.feasible.cap(row, col));
        self.state.set_cell(row, col, value)?;
        Ok(value)
    }
}

/// "normal" view: objective vs. subjective per difficulty
#[derive(Debug)]
pub struct ByAnswerStyleView<'a> {
    state: &'a mut AllocationState,
    feasible: &'a FeasibilityMatrix,
}

impl ByAnswerStyleView<'_> {
    pub fn values(&self) -> AnswerStyleTotals {
        let m = self.state.get();
        AnswerStyleTotals {
            objective: m.column_sums(AnswerStyle::Objective.rows()),
            subjective: m.column_sums(AnswerStyle::Subjective.rows()),
        }
    }

    pub fn set_values(
        &mut self,
        objective: [u32; COLS],
        subjective: [u32; COLS],
    ) -> Result<DistributionReport> {
        let requested = sum_wide(&objective) + sum_wide(&subjective);
        self.state.check_quota(requested)?;

        let mut next = self.state.get();
        let mut report = DistributionReport::default();
        for difficulty in Difficulty::iter() {
            let col = difficulty.column();
            for (style, target) in [
                (AnswerStyle::Objective, objective[col]),
                (AnswerStyle::Subjective, subjective[col]),
            ] {
                let alloc =
                    distribute_column(&mut next, self.feasible, col, style.rows(), target);
                report.record(difficulty, Some(style), target, alloc.delivered());
            }
        }

        self.state.set(next);
        info!(
            "Committed answer-style distribution: {} of {} problems",
            next.total(),
            requested
        );
        Ok(report)
    }
}

/// "simple" view: one total per difficulty
#[derive(Debug)]
pub struct ByDifficultyView<'a> {
    state: &'a mut AllocationState,
    feasible: &'a FeasibilityMatrix,
}

impl ByDifficultyView<'_> {
    pub fn values(&self) -> [u32; COLS] {
        self.state.get().column_sums(0..ROWS)
    }

    pub fn set_values(&mut self, values: [u32; COLS]) -> Result<DistributionReport> {
        let requested = sum_wide(&values);
        self.state.check_quota(requested)?;

        let mut next = self.state.get();
        let mut report = DistributionReport::default();
        for difficulty in Difficulty::iter() {
            let col = difficulty.column();
            let alloc = distribute_column(&mut next, self.feasible, col, 0..ROWS, values[col]);
            report.record(difficulty, None, values[col], alloc.delivered());
        }

        self.state.set(next);
        info!(
            "Committed difficulty distribution: {} of {} problems",
            next.total(),
            requested
        );
        Ok(report)
    }
}

impl AllocationState {
    pub fn detailed<'a>(&'a mut self, feasible: &'a FeasibilityMatrix) -> DetailedView<'a> {
        DetailedView {
            state: self,
            feasible,
        }
    }

    pub fn by_answer_style<'a>(
        &'a mut self,
        feasible: &'a FeasibilityMatrix,
    ) -> ByAnswerStyleView<'a> {
        ByAnswerStyleView {
            state: self,
            feasible,
        }
    }

    pub fn by_difficulty<'a>(
        &'a mut self,
        feasible: &'a FeasibilityMatrix,
    ) -> ByDifficultyView<'a> {
        ByDifficultyView {
            state: self,
            feasible,
        }
    }
}

fn sum_wide(values: &[u32]) -> u64 {
    values.iter().map(|&v| u64::from(v)).sum()
}
