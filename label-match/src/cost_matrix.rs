//! Disagreement costs between true and predicted label identifiers.

use crate::error::Result;
use crate::hungarian::Assignment;
use crate::labels::{check_pair, distinct_labels, partition_by_label};
use nalgebra::DMatrix;

/// Square matrix of normalized disagreement costs.
///
/// Entry `(i, j)` is the cost of mapping true label `universe[i]` onto
/// predicted label `universe[j]`:
///
/// ```text
/// C(i,j) = (n - |{s: true(s) = i} ∩ {s: pred(s) = j}|) / n
/// ```
///
/// The numerators are kept as integers for the assignment solver; the
/// common denominator `n` does not change the optimal bijection.
///
/// The label universe is the sorted union of identifiers seen in either
/// labeling, so both sides always index into the same range.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    mismatch: DMatrix<i64>,
    nobs: usize,
    universe: Vec<usize>,
}

impl CostMatrix {
    /// Build the cost matrix for two labelings of the same samples.
    ///
    /// Only the upper triangle (with the diagonal) is visited; every
    /// off-diagonal visit also fills the mirrored cell, which needs
    /// its own intersection since the matrix is not symmetric.
    pub fn build(true_lab: &[usize], pred_lab: &[usize]) -> Result<Self> {
        check_pair(true_lab, pred_lab)?;

        let nobs = true_lab.len();
        let mut universe = distinct_labels(true_lab);
        universe.extend(distinct_labels(pred_lab));
        universe.sort_unstable();
        universe.dedup();

        let nclass = universe.len();
        let true_groups = partition_by_label(true_lab);
        let pred_groups = partition_by_label(pred_lab);
        let empty = vec![];

        let mismatch_count = |t: usize, p: usize| -> i64 {
            let t_idx = true_groups.get(&universe[t]).unwrap_or(&empty);
            let p_idx = pred_groups.get(&universe[p]).unwrap_or(&empty);
            (nobs - intersection_size(t_idx, p_idx)) as i64
        };

        let mut mismatch = DMatrix::<i64>::zeros(nclass, nclass);
        for lab in 0..nclass {
            for plab in lab..nclass {
                mismatch[(lab, plab)] = mismatch_count(lab, plab);
                if lab != plab {
                    mismatch[(plab, lab)] = mismatch_count(plab, lab);
                }
            }
        }

        Ok(Self {
            mismatch,
            nobs,
            universe,
        })
    }

    pub fn size(&self) -> usize {
        self.universe.len()
    }

    /// label identifier represented by each row/column
    pub fn universe(&self) -> &[usize] {
        &self.universe
    }

    /// normalized cost `C(row, col)` in `[0, 1]`
    pub fn cost(&self, row: usize, col: usize) -> f64 {
        self.mismatch[(row, col)] as f64 / self.nobs as f64
    }

    /// unnormalized costs `n - |∩|`
    pub fn mismatch_counts(&self) -> &DMatrix<i64> {
        &self.mismatch
    }

    pub fn total_cost(&self, assignment: &Assignment) -> f64 {
        assignment.total_cost(&self.mismatch) as f64 / self.nobs as f64
    }
}

/// Number of common elements in two ascending index lists
pub fn intersection_size(sorted_a: &[usize], sorted_b: &[usize]) -> usize {
    let (mut i, mut j, mut n) = (0, 0, 0);
    while i < sorted_a.len() && j < sorted_b.len() {
        match sorted_a[i].cmp(&sorted_b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                n += 1;
                i += 1;
                j += 1;
            }
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_intersection() {
        assert_eq!(intersection_size(&[0, 2, 4, 6], &[1, 2, 3, 6, 9]), 2);
        assert_eq!(intersection_size(&[], &[1, 2]), 0);
    }

    #[test]
    fn cost_matches_brute_force() {
        let true_lab = [0, 0, 1, 2, 2, 1, 0];
        let pred_lab = [1, 1, 0, 2, 0, 0, 2];
        let n = true_lab.len() as f64;

        let cost = CostMatrix::build(&true_lab, &pred_lab).unwrap();
        assert_eq!(cost.universe(), &[0, 1, 2]);

        for i in 0..3 {
            for j in 0..3 {
                let both = true_lab
                    .iter()
                    .zip(pred_lab.iter())
                    .filter(|&(&t, &p)| t == i && p == j)
                    .count() as f64;
                assert!((cost.cost(i, j) - (n - both) / n).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn cost_covers_labels_missing_on_one_side() {
        // predicted label 5 never appears in the true labeling
        let cost = CostMatrix::build(&[0, 0, 1, 1], &[0, 5, 1, 1]).unwrap();
        assert_eq!(cost.universe(), &[0, 1, 5]);
        assert_eq!(cost.size(), 3);
        // row 2 (true label 5) is empty: every entry costs 1
        for j in 0..3 {
            assert_eq!(cost.cost(2, j), 1.0);
        }
        assert!((cost.cost(0, 2) - 0.75).abs() < 1e-12);
        assert_eq!(cost.mismatch_counts()[(0, 2)], 3);
    }
}
