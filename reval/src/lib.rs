//! Relative validation of clustering stability.
//!
//! A classifier learns to imitate a clustering on training data and is
//! asked to reproduce a fresh clustering of held-out data; see
//! [`relative_validation::RelativeValidator`]. Label identifiers of the two
//! partitions are reconciled by [`label_match`].

pub mod best_k;
pub mod common;
pub mod config;
pub mod io;
pub mod methods;
pub mod relative_validation;
pub mod simulate;
pub mod split;
pub mod traits;

pub use relative_validation::{
    RandomLabelOutcome, RelativeValidator, TestOutcome, TrainOutcome, ValidationOutcome,
};
pub use traits::{ClassificationMethod, Classifier, ClusteringMethod};
