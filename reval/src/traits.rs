//! Capabilities the validator is parameterized by.
//!
//! Fitting never mutates the method itself: every call to
//! [`ClassificationMethod::fit`] hands back a fresh model value, so one
//! method can be shared across train/test and random-label rounds.

use crate::common::Mat;

/// Unsupervised partitioning of the rows of a data matrix
pub trait ClusteringMethod {
    /// Fit on `data` and return one label per row
    fn fit_predict(&self, data: &Mat) -> anyhow::Result<Vec<usize>>;

    fn name(&self) -> &str {
        "clustering"
    }
}

/// Supervised learner producing a [`Classifier`]
pub trait ClassificationMethod {
    type Model: Classifier;

    /// * `data` - samples x features
    /// * `labels` - one label per row of `data`
    fn fit(&self, data: &Mat, labels: &[usize]) -> anyhow::Result<Self::Model>;

    fn name(&self) -> &str {
        "classifier"
    }
}

/// A fitted classifier; prediction is read-only
pub trait Classifier {
    fn predict(&self, data: &Mat) -> anyhow::Result<Vec<usize>>;
}

/// Shared precondition of every `fit`
pub fn check_fit_input(data: &Mat, labels: &[usize]) -> anyhow::Result<()> {
    if data.nrows() == 0 {
        anyhow::bail!("no samples to fit");
    }
    if data.nrows() != labels.len() {
        anyhow::bail!(
            "data has {} rows but {} labels were given",
            data.nrows(),
            labels.len()
        );
    }
    Ok(())
}
