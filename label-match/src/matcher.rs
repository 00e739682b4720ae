use crate::cost_matrix::CostMatrix;
use crate::error::{LabelMatchError, Result};
use crate::hungarian::{Assignment, AssignmentSolver, KuhnMunkres};
use crate::labels::disagreement_rate;
use fnv::FnvHashMap as HashMap;
use log::debug;

/// Relabels a predicted partition into the label space of a reference
/// partition, choosing the bijection with the least total disagreement.
#[derive(Debug, Clone, Default)]
pub struct LabelMatcher<S = KuhnMunkres> {
    solver: S,
}

/// Everything computed while matching two labelings
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// predicted labels expressed with the true labeling's identifiers
    pub permuted: Vec<usize>,
    pub cost: CostMatrix,
    /// row (true label index) -> column (predicted label index)
    pub assignment: Assignment,
}

impl MatchOutcome {
    pub fn total_cost(&self) -> f64 {
        self.cost.total_cost(&self.assignment)
    }
}

impl LabelMatcher<KuhnMunkres> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: AssignmentSolver> LabelMatcher<S> {
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// Optimally relabel `pred_lab` against `true_lab`
    /// * `true_lab` - reference labels, e.g., clustering output
    /// * `pred_lab` - labels to permute, e.g., classifier output
    pub fn match_labels(&self, true_lab: &[usize], pred_lab: &[usize]) -> Result<Vec<usize>> {
        Ok(self.match_with_assignment(true_lab, pred_lab)?.permuted)
    }

    pub fn match_with_assignment(
        &self,
        true_lab: &[usize],
        pred_lab: &[usize],
    ) -> Result<MatchOutcome> {
        let cost = CostMatrix::build(true_lab, pred_lab)?;
        let assignment = self.solver.solve(cost.mismatch_counts())?;
        if assignment.len() != cost.size() || !assignment.is_permutation() {
            return Err(LabelMatchError::InvalidAssignment {
                size: cost.size(),
                columns: assignment.columns().to_vec(),
            });
        }

        let universe = cost.universe();
        let index_of: HashMap<usize, usize> =
            universe.iter().enumerate().map(|(i, &k)| (k, i)).collect();

        // predicted label -> true label it was assigned to
        let inverse = assignment.inverse();
        let permuted = pred_lab
            .iter()
            .map(|p| universe[inverse.column_of(index_of[p])])
            .collect();

        let ret = MatchOutcome {
            permuted,
            cost,
            assignment,
        };

        debug!(
            "matched {} samples over {} labels, total cost {:.4}",
            true_lab.len(),
            ret.cost.size(),
            ret.total_cost()
        );

        Ok(ret)
    }

    /// Disagreement rate after optimal relabeling
    pub fn aligned_disagreement(&self, true_lab: &[usize], pred_lab: &[usize]) -> Result<f64> {
        let permuted = self.match_labels(true_lab, pred_lab)?;
        disagreement_rate(true_lab, &permuted)
    }
}

/// [`LabelMatcher::match_labels`] with the Kuhn-Munkres solver
pub fn match_labels(true_lab: &[usize], pred_lab: &[usize]) -> Result<Vec<usize>> {
    LabelMatcher::new().match_labels(true_lab, pred_lab)
}

/// [`LabelMatcher::aligned_disagreement`] with the Kuhn-Munkres solver
pub fn aligned_disagreement(true_lab: &[usize], pred_lab: &[usize]) -> Result<f64> {
    LabelMatcher::new().aligned_disagreement(true_lab, pred_lab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    #[test]
    fn swapped_labels() {
        let permuted = match_labels(&[0, 0, 1, 1], &[1, 1, 0, 0]).unwrap();
        assert_eq!(permuted, vec![0, 0, 1, 1]);
        assert_eq!(aligned_disagreement(&[0, 0, 1, 1], &[1, 1, 0, 0]).unwrap(), 0.0);
    }

    #[test]
    fn uniform_costs_leave_half_disagreement() {
        let outcome = LabelMatcher::new()
            .match_with_assignment(&[0, 1, 0, 1], &[0, 0, 1, 1])
            .unwrap();
        // every label pair shares one of four samples
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(outcome.cost.cost(i, j), 0.75);
            }
        }
        let rate = disagreement_rate(&[0, 1, 0, 1], &outcome.permuted).unwrap();
        assert_eq!(rate, 0.5);
    }

    /// returns a fixed answer whatever the costs
    struct FixedSolver(Vec<usize>);

    impl AssignmentSolver for FixedSolver {
        fn solve(&self, _cost: &DMatrix<i64>) -> Result<Assignment> {
            Ok(Assignment::from_columns(self.0.clone()))
        }
    }

    #[test]
    fn custom_solver_must_return_a_bijection() {
        let short = LabelMatcher::with_solver(FixedSolver(vec![0]));
        assert_eq!(
            short.match_labels(&[0, 0, 1, 1], &[1, 1, 0, 0]),
            Err(LabelMatchError::InvalidAssignment {
                size: 2,
                columns: vec![0],
            })
        );

        let repeated = LabelMatcher::with_solver(FixedSolver(vec![0, 0]));
        assert!(matches!(
            repeated.match_labels(&[0, 0, 1, 1], &[1, 1, 0, 0]),
            Err(LabelMatchError::InvalidAssignment { size: 2, .. })
        ));

        // a valid but suboptimal answer is taken as given
        let identity = LabelMatcher::with_solver(FixedSolver(vec![0, 1]));
        assert_eq!(
            identity.match_labels(&[0, 0, 1, 1], &[1, 1, 0, 0]).unwrap(),
            vec![1, 1, 0, 0]
        );
    }

    #[test]
    fn keeps_true_identifiers() {
        // non-contiguous identifiers on both sides
        let permuted = match_labels(&[4, 4, 9, 9, 2], &[7, 7, 1, 1, 3]).unwrap();
        assert_eq!(permuted, vec![4, 4, 9, 9, 2]);
    }

    #[test]
    fn extra_predicted_label_stays_wrong() {
        let true_lab = [0, 0, 0, 1, 1, 1];
        let pred_lab = [0, 0, 2, 1, 1, 1];
        let permuted = match_labels(&true_lab, &pred_lab).unwrap();
        assert_eq!(&permuted[..2], &[0, 0]);
        assert_eq!(&permuted[3..], &[1, 1, 1]);
        // label 2 has no counterpart in the true labeling
        assert_eq!(permuted[2], 2);
        let rate = disagreement_rate(&true_lab, &permuted).unwrap();
        assert!((rate - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn propagates_shape_errors() {
        assert!(matches!(
            match_labels(&[0, 1, 1], &[0, 1]),
            Err(LabelMatchError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            match_labels(&[], &[]),
            Err(LabelMatchError::DegenerateInput(_))
        ));
    }
}
