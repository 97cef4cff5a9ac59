use crate::constants::{COLS, ROWS};
use crate::error::{AllocError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 8x5 grid of counts.
///
/// Rows are answer style x cognitive type (see [`crate::types::row_index`]),
/// columns are difficulty bands from highest to lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Matrix([[u32; COLS]; ROWS]);

/// The allocation handed to the paper request builder
pub type AllocationMatrix = Matrix;

impl Matrix {
    pub fn zeros() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: [[u32; COLS]; ROWS]) -> Self {
        Self(rows)
    }

    /// Every cell set to `value`
    pub fn filled(value: u32) -> Self {
        Self([[value; COLS]; ROWS])
    }

    pub fn rows(&self) -> &[[u32; COLS]; ROWS] {
        &self.0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.0.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: u32) -> Result<()> {
        check_cell(row, col)?;
        self.0[row][col] = value;
        Ok(())
    }

    /// Grand total. Widened so a full grid of large caps cannot overflow.
    pub fn total(&self) -> u64 {
        self.0.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    /// Rows of `rows` that lie inside the grid
    fn row_slice(&self, rows: Range<usize>) -> &[[u32; COLS]] {
        self.0.get(rows.start..rows.end.min(ROWS)).unwrap_or(&[])
    }

    /// Cells of one column over `rows`; out-of-grid cells are left out or read as 0
    pub fn column(&self, col: usize, rows: Range<usize>) -> Vec<u32> {
        self.row_slice(rows)
            .iter()
            .map(|r| r.get(col).copied().unwrap_or(0))
            .collect()
    }

    /// Saturates at `u32::MAX` instead of overflowing
    pub fn column_sum(&self, col: usize, rows: Range<usize>) -> u32 {
        self.column(col, rows)
            .into_iter()
            .fold(0u32, |acc, v| acc.saturating_add(v))
    }

    /// Per-difficulty sums over a row range
    pub fn column_sums(&self, rows: Range<usize>) -> [u32; COLS] {
        let mut sums = [0; COLS];
        for (col, sum) in sums.iter_mut().enumerate() {
            *sum = self.column_sum(col, rows.clone());
        }
        sums
    }

    /// Writes `values` downwards starting at `first_row`
    pub(crate) fn write_column(&mut self, col: usize, first_row: usize, values: &[u32]) {
        for (offset, &v) in values.iter().enumerate() {
            if let Some(cell) = self
                .0
                .get_mut(first_row + offset)
                .and_then(|r| r.get_mut(col))
            {
                *cell = v;
            }
        }
    }
}

/// Per-cell caps taken from the problem inventory. Read-only to the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeasibilityMatrix(Matrix);

impl FeasibilityMatrix {
    pub fn new(caps: Matrix) -> Self {
        Self(caps)
    }

    pub fn from_rows(rows: [[u32; COLS]; ROWS]) -> Self {
        Self(Matrix::from_rows(rows))
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.0
    }

    /// Cap for a cell; 0 outside the grid
    pub fn cap(&self, row: usize, col: usize) -> u32 {
        self.0.get(row, col).unwrap_or(0)
    }

    pub fn caps(&self, col: usize, rows: Range<usize>) -> Vec<u32> {
        self.0.column(col, rows)
    }

    /// Adds inventory to a cell
    pub fn add(&mut self, row: usize, col: usize, count: u32) -> Result<()> {
        let current = self.0.get(row, col).ok_or(AllocError::InvalidCell { row, col })?;
        self.0.set(row, col, current.saturating_add(count))
    }
}

pub(crate) fn check_cell(row: usize, col: usize) -> Result<()> {
    if row >= ROWS || col >= COLS {
        return Err(AllocError::InvalidCell { row, col });
    }
    Ok(())
}
