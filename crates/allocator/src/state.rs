use crate::constants::DEFAULT_MAX_TOTAL;
use crate::error::{AllocError, Result};
use crate::matrix::{Matrix, check_cell};

/// Owner of the current allocation for one authoring session.
///
/// Views borrow it mutably to commit their writes, so every view always
/// reads what the last writer left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationState {
    matrix: Matrix,
    max_total: u32,
}

impl Default for AllocationState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOTAL)
    }
}

impl AllocationState {
    pub fn new(max_total: u32) -> Self {
        Self {
            matrix: Matrix::zeros(),
            max_total,
        }
    }

    pub fn max_total(&self) -> u32 {
        self.max_total
    }

    /// Snapshot of the current matrix
    pub fn get(&self) -> Matrix {
        self.matrix
    }

    pub fn set(&mut self, matrix: Matrix) {
        self.matrix = matrix;
    }

    pub fn reset(&mut self) {
        self.matrix = Matrix::zeros();
    }

    /// Writes one cell if the resulting grand total stays within the quota.
    pub fn set_cell(&mut self, row: usize, col: usize, value: u32) -> Result<()> {
        check_cell(row, col)?;
        let current = self.matrix.rows()[row][col];
        let requested = self.matrix.total() - u64::from(current) + u64::from(value);
        self.check_quota(requested)?;
        self.matrix.set(row, col, value)
    }

    pub(crate) fn check_quota(&self, requested: u64) -> Result<()> {
        if requested > u64::from(self.max_total) {
            return Err(AllocError::QuotaExceeded {
                requested,
                max: self.max_total,
            });
        }
        Ok(())
    }
}
