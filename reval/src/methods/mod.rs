pub mod centroid;
pub mod kmeans;
pub mod knn;

pub use centroid::{CentroidModel, NearestCentroidClassifier};
pub use kmeans::{Kmeans, KmeansArgs, KmeansClustering};
pub use knn::{KnnClassifier, KnnModel};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Classifier used to imitate the clustering
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[clap(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// k-nearest neighbours
    #[default]
    Knn,
    /// nearest class mean
    Centroid,
}
