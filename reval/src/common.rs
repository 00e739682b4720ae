#![allow(unused)]

pub use log::{debug, info, warn};
pub use rayon::prelude::*;

pub use label_match::{aligned_disagreement, disagreement_rate, LabelMatcher};

/// samples x features
pub type Mat = nalgebra::DMatrix<f32>;
pub type DVec = nalgebra::DVector<f32>;

pub const DEFAULT_NRAND: usize = 100;
pub const DEFAULT_MAX_ITER: usize = 100;
pub const DEFAULT_KNN: usize = 15;
