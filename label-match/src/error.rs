use thiserror::Error;

/// Failures raised while validating or aligning labelings
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LabelMatchError {
    /// a value could not be read as a non-negative integer label
    #[error("invalid {kind} label at position {position}: {value} (expected a non-negative integer)")]
    InvalidInput {
        kind: &'static str,
        position: usize,
        value: String,
    },

    #[error("labelings differ in length: true = {true_len}, predicted = {pred_len}")]
    ShapeMismatch { true_len: usize, pred_len: usize },

    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),

    #[error("cost matrix must be square, got {nrows} x {ncols}")]
    NonSquareCost { nrows: usize, ncols: usize },

    /// an assignment solver returned something other than a bijection
    #[error("solver returned {columns:?}, not a permutation of {size} labels")]
    InvalidAssignment { size: usize, columns: Vec<usize> },
}

pub type Result<T> = std::result::Result<T, LabelMatchError>;
