use crate::matrix::{FeasibilityMatrix, Matrix};
use itertools::Itertools;
use log::debug;
use std::ops::Range;

/// Result of spreading one target over a set of capped rows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Allocation {
    /// per-row counts, same order as the caps
    pub assigned: Vec<u32>,
    /// target minus what could actually be assigned
    pub shortfall: u32,
}

impl Allocation {
    pub fn delivered(&self) -> u32 {
        self.assigned.iter().sum()
    }
}

/// Splits `target` over rows in proportion to their caps.
///
/// Each row with a positive cap first gets `floor(target * cap / total)`,
/// clamped to its cap. The leftover is handed out one unit at a time, rows
/// with the larger fractional remainder first and ties in row order, until
/// the target is met or every row is full.
///
/// # Returns
/// Exactly `target` in total when `target <= sum(caps)`. Otherwise every row
/// sits at its cap and the missing amount is reported as `shortfall`.
pub fn distribute(target: u32, caps: &[u32]) -> Allocation {
    let mut assigned = vec![0u32; caps.len()];
    let total_feasible: u64 = caps.iter().map(|&c| u64::from(c)).sum();
    if total_feasible == 0 {
        return Allocation {
            assigned,
            shortfall: target,
        };
    }

    // Remainders are kept as numerators over `total_feasible` so ordering is exact.
    let mut remainders = vec![0u64; caps.len()];
    for (i, &cap) in caps.iter().enumerate() {
        if cap == 0 {
            continue;
        }
        let share = u64::from(target) * u64::from(cap);
        remainders[i] = share % total_feasible;
        assigned[i] = (share / total_feasible).min(u64::from(cap)) as u32;
    }

    let mut leftover = target.saturating_sub(assigned.iter().sum());
    while leftover > 0 {
        let candidates: Vec<usize> = (0..caps.len())
            .filter(|&i| assigned[i] < caps[i])
            .sorted_by(|&a, &b| remainders[b].cmp(&remainders[a]))
            .collect();
        if candidates.is_empty() {
            break;
        }
        for i in candidates {
            if leftover == 0 {
                break;
            }
            assigned[i] += 1;
            leftover -= 1;
        }
    }

    Allocation {
        assigned,
        shortfall: leftover,
    }
}

/// Runs [`distribute`] for one column over `rows` and writes the result into `matrix`.
pub fn distribute_column(
    matrix: &mut Matrix,
    feasible: &FeasibilityMatrix,
    col: usize,
    rows: Range<usize>,
    target: u32,
) -> Allocation {
    let caps = feasible.caps(col, rows.clone());
    let allocation = distribute(target, &caps);
    debug!(
        "col {} rows {:?}: target {} caps {:?} -> {:?}",
        col, rows, target, caps, allocation.assigned
    );
    matrix.write_column(col, rows.start, &allocation.assigned);
    allocation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COLS, ROWS};

    #[test]
    fn test_even_caps_ties_go_to_first_rows() {
        let alloc = distribute(10, &[10; 8]);
        assert_eq!(alloc.assigned, vec![2, 2, 1, 1, 1, 1, 1, 1]);
        assert_eq!(alloc.shortfall, 0);
    }

    #[test]
    fn test_zero_caps_assign_nothing() {
        let alloc = distribute(7, &[0, 0, 0, 0]);
        assert_eq!(alloc.assigned, vec![0, 0, 0, 0]);
        assert_eq!(alloc.shortfall, 7);
    }

    #[test]
    fn test_target_above_total_clamps_to_caps() {
        let alloc = distribute(5, &[1, 1, 1, 1]);
        assert_eq!(alloc.assigned, vec![1, 1, 1, 1]);
        assert_eq!(alloc.shortfall, 1);

        let alloc = distribute(100, &[3, 0, 5, 2]);
        assert_eq!(alloc.assigned, vec![3, 0, 5, 2]);
        assert_eq!(alloc.shortfall, 90);
    }

    #[test]
    fn test_larger_remainder_wins() {
        // raw shares: 0.83, 1.67, 2.5
        let alloc = distribute(5, &[1, 2, 3]);
        assert_eq!(alloc.assigned, vec![1, 2, 2]);
    }

    #[test]
    fn test_zero_cap_rows_never_receive() {
        let alloc = distribute(3, &[0, 4, 0, 4]);
        assert_eq!(alloc.assigned[0], 0);
        assert_eq!(alloc.assigned[2], 0);
        assert_eq!(alloc.assigned, vec![0, 2, 0, 1]);
    }

    #[test]
    fn test_zero_target() {
        let alloc = distribute(0, &[5, 5]);
        assert_eq!(alloc.assigned, vec![0, 0]);
        assert_eq!(alloc.shortfall, 0);
    }

    #[test]
    fn test_sum_and_cap_properties_exhaustive_small() {
        let cap_sets: [&[u32]; 6] = [
            &[1, 2, 3, 4],
            &[0, 7, 0, 1],
            &[5, 5, 5, 5, 5, 5, 5, 5],
            &[9, 1, 0, 3, 2, 0, 8, 4],
            &[1],
            &[13, 0, 2],
        ];
        for caps in cap_sets {
            let total: u32 = caps.iter().sum();
            for target in 0..=total + 3 {
                let alloc = distribute(target, caps);
                for (a, c) in alloc.assigned.iter().zip(caps) {
                    assert!(a <= c, "cap violated for {caps:?} target {target}");
                }
                if target <= total {
                    assert_eq!(alloc.delivered(), target);
                    assert_eq!(alloc.shortfall, 0);
                } else {
                    assert_eq!(alloc.assigned, caps.to_vec());
                    assert_eq!(alloc.shortfall, target - total);
                }
            }
        }
    }

    #[test]
    fn test_distribute_column_outside_grid_is_noop() {
        let feasible = FeasibilityMatrix::new(Matrix::filled(4));
        let mut m = Matrix::filled(1);

        let alloc = distribute_column(&mut m, &feasible, COLS, 0..4, 6);
        assert_eq!(alloc.assigned, vec![0, 0, 0, 0]);
        assert_eq!(alloc.shortfall, 6);

        let alloc = distribute_column(&mut m, &feasible, 0, ROWS..ROWS + 2, 3);
        assert!(alloc.assigned.is_empty());
        assert_eq!(m, Matrix::filled(1));
    }

    #[test]
    fn test_distribute_column_writes_only_range() {
        let feasible = FeasibilityMatrix::new(Matrix::filled(2));
        let mut m = Matrix::filled(9);
        let alloc = distribute_column(&mut m, &feasible, 1, 4..ROWS, 5);

        assert_eq!(alloc.assigned, vec![2, 1, 1, 1]);
        assert_eq!(m.column(1, 4..ROWS), vec![2, 1, 1, 1]);
        assert_eq!(m.column(1, 0..4), vec![9, 9, 9, 9]);
        for col in (0..COLS).filter(|&c| c != 1) {
            assert_eq!(m.column_sum(col, 0..ROWS), 72);
        }
    }
}
