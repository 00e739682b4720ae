//! Minimum-cost assignment on a square matrix of integer costs.
//!
//! ```text
//! minimize  sum_i C(i, π(i))   over bijections π
//! ```
//!
//! [`KuhnMunkres`] hands the problem to `pathfinding`'s Hungarian method
//! (`O(n^3)`); other solvers can be plugged in through
//! [`AssignmentSolver`].

use crate::error::{LabelMatchError, Result};
use nalgebra::DMatrix;
use pathfinding::matrix::Matrix;

/// A bijection `row -> column`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment(Vec<usize>);

impl Assignment {
    pub fn from_columns(columns: Vec<usize>) -> Self {
        Self(columns)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// column assigned to each row
    pub fn columns(&self) -> &[usize] {
        &self.0
    }

    pub fn column_of(&self, row: usize) -> usize {
        self.0[row]
    }

    /// every column used exactly once
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.0.len()];
        for &j in self.0.iter() {
            if j >= seen.len() || seen[j] {
                return false;
            }
            seen[j] = true;
        }
        true
    }

    /// row assigned to each column; only meaningful for a permutation
    pub fn inverse(&self) -> Assignment {
        let mut rows = vec![0; self.0.len()];
        for (i, &j) in self.0.iter().enumerate() {
            rows[j] = i;
        }
        Assignment(rows)
    }

    pub fn total_cost(&self, cost: &DMatrix<i64>) -> i64 {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &j)| cost[(i, j)])
            .sum()
    }
}

/// Anything that solves the linear assignment problem
pub trait AssignmentSolver {
    fn solve(&self, cost: &DMatrix<i64>) -> Result<Assignment>;
}

/// Hungarian method of the `pathfinding` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct KuhnMunkres;

impl AssignmentSolver for KuhnMunkres {
    fn solve(&self, cost: &DMatrix<i64>) -> Result<Assignment> {
        kuhn_munkres_min(cost)
    }
}

/// Minimum-cost perfect matching of rows to columns
pub fn kuhn_munkres_min(cost: &DMatrix<i64>) -> Result<Assignment> {
    let (nrows, ncols) = cost.shape();
    if nrows != ncols {
        return Err(LabelMatchError::NonSquareCost { nrows, ncols });
    }
    if nrows == 0 {
        return Err(LabelMatchError::DegenerateInput("empty cost matrix"));
    }

    // nalgebra is column-major, pathfinding row-major
    let row_major: Vec<i64> = cost.transpose().as_slice().to_vec();
    let weights = Matrix::from_vec(nrows, ncols, row_major)
        .map_err(|_| LabelMatchError::NonSquareCost { nrows, ncols })?;

    let (_, columns) = pathfinding::kuhn_munkres::kuhn_munkres_min(&weights);
    Ok(Assignment(columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_optimal_for_zero_diagonal() {
        let cost = DMatrix::from_row_slice(3, 3, &[0, 1, 1, 1, 0, 1, 1, 1, 0]);
        let assign = kuhn_munkres_min(&cost).unwrap();
        assert_eq!(assign.columns(), &[0, 1, 2]);
        assert_eq!(assign.total_cost(&cost), 0);
    }

    #[test]
    fn classic_example() {
        let cost = DMatrix::from_row_slice(
            4,
            4,
            &[
                82, 83, 69, 92, //
                77, 37, 49, 92, //
                11, 69, 5, 86, //
                8, 9, 98, 23, //
            ],
        );
        let assign = kuhn_munkres_min(&cost).unwrap();
        assert!(assign.is_permutation());
        assert_eq!(assign.total_cost(&cost), 140);
        assert_eq!(assign.columns(), &[2, 1, 0, 3]);
    }

    #[test]
    fn single_cell() {
        let cost = DMatrix::from_element(1, 1, 3_i64);
        let assign = kuhn_munkres_min(&cost).unwrap();
        assert_eq!(assign.columns(), &[0]);
    }

    #[test]
    fn rejects_bad_matrices() {
        let rect = DMatrix::<i64>::zeros(2, 3);
        assert_eq!(
            kuhn_munkres_min(&rect),
            Err(LabelMatchError::NonSquareCost { nrows: 2, ncols: 3 })
        );

        let empty = DMatrix::<i64>::zeros(0, 0);
        assert!(matches!(
            kuhn_munkres_min(&empty),
            Err(LabelMatchError::DegenerateInput(_))
        ));
    }

    #[test]
    fn inverse_round_trip() {
        let assign = Assignment::from_columns(vec![2, 0, 1]);
        let inv = assign.inverse();
        assert_eq!(inv.columns(), &[1, 2, 0]);
        assert_eq!(inv.inverse(), assign);
        assert!(!Assignment::from_columns(vec![0, 0]).is_permutation());
        assert!(!Assignment::from_columns(vec![0, 2]).is_permutation());
    }
}
