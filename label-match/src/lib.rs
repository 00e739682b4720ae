//! Optimal correspondence between two integer labelings of the same samples.
//!
//! Cluster and class identifiers are arbitrary symbols, so two partitions
//! can only be compared after relabeling one into the other's label
//! space. [`LabelMatcher`] builds a disagreement [`CostMatrix`] and picks
//! the bijection of least total cost with the Kuhn-Munkres method.

pub mod cost_matrix;
pub mod error;
pub mod hungarian;
pub mod labels;
pub mod matcher;

pub use cost_matrix::CostMatrix;
pub use error::{LabelMatchError, Result};
pub use hungarian::{kuhn_munkres_min, Assignment, AssignmentSolver, KuhnMunkres};
pub use labels::{disagreement_rate, labels_from_float, labels_from_signed};
pub use matcher::{aligned_disagreement, match_labels, LabelMatcher, MatchOutcome};
