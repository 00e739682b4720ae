//! K-means clustering of the rows of a data matrix

use crate::common::*;
use crate::traits::ClusteringMethod;
use nalgebra::DMatrix;

/// Arguments for k-means clustering
#[derive(Debug, Clone)]
pub struct KmeansArgs {
    /// Number of clusters
    pub num_clusters: usize,
    /// Maximum number of iterations
    pub max_iter: usize,
}

impl Default for KmeansArgs {
    fn default() -> Self {
        Self {
            num_clusters: 2,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

/// Row-wise k-means on matrices
pub trait Kmeans {
    /// Cluster rows and return membership vector, one per row
    fn kmeans_rows(&self, args: &KmeansArgs) -> Vec<usize>;
}

impl<T> Kmeans for DMatrix<T>
where
    T: nalgebra::Scalar + Copy + Into<f64>,
{
    fn kmeans_rows(&self, args: &KmeansArgs) -> Vec<usize> {
        if args.num_clusters <= 1 || self.nrows() == 0 {
            return vec![0; self.nrows()];
        }

        let data: Vec<Vec<f64>> = self
            .row_iter()
            .map(|x| x.iter().map(|&v| v.into()).collect())
            .collect();

        let clust = clustering::kmeans(args.num_clusters, &data, args.max_iter);
        clust.membership
    }
}

/// [`ClusteringMethod`] backed by k-means
#[derive(Debug, Clone)]
pub struct KmeansClustering {
    args: KmeansArgs,
}

impl KmeansClustering {
    pub fn new(num_clusters: usize, max_iter: usize) -> Self {
        Self {
            args: KmeansArgs {
                num_clusters,
                max_iter,
            },
        }
    }
}

impl ClusteringMethod for KmeansClustering {
    fn fit_predict(&self, data: &Mat) -> anyhow::Result<Vec<usize>> {
        let k = self.args.num_clusters;
        if k == 0 {
            anyhow::bail!("Number of clusters must be > 0");
        }

        let n = data.nrows();
        if k > n {
            anyhow::bail!(
                "Number of clusters ({}) exceeds number of samples ({})",
                k,
                n
            );
        }

        debug!(
            "K-means: {} samples x {} features, k={}, max_iter={}",
            n,
            data.ncols(),
            k,
            self.args.max_iter
        );

        Ok(data.kmeans_rows(&self.args))
    }

    fn name(&self) -> &str {
        "k-means"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cluster_is_all_zeros() {
        let mat = Mat::from_row_slice(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let labels = KmeansClustering::new(1, 10).fit_predict(&mat).unwrap();
        assert_eq!(labels, vec![0; 4]);
    }

    #[test]
    fn two_separated_groups() {
        let mat = Mat::from_row_slice(
            6,
            2,
            &[
                0.0, 0.0, //
                0.1, 0.1, //
                0.0, 0.2, //
                10.0, 10.0, //
                10.1, 10.1, //
                10.2, 10.0, //
            ],
        );

        let labels = KmeansClustering::new(2, 100).fit_predict(&mat).unwrap();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn too_many_clusters() {
        let mat = Mat::zeros(3, 2);
        assert!(KmeansClustering::new(4, 10).fit_predict(&mat).is_err());
        assert!(KmeansClustering::new(0, 10).fit_predict(&mat).is_err());
    }
}
