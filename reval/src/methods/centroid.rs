use crate::common::*;
use crate::traits::{check_fit_input, ClassificationMethod, Classifier};
use label_match::labels::partition_by_label;

/// Assign each sample to the class with the closest mean
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestCentroidClassifier;

/// class label and its mean, sorted by label
pub struct CentroidModel {
    centroids: Vec<(usize, DVec)>,
}

impl CentroidModel {
    pub fn centroids(&self) -> &[(usize, DVec)] {
        &self.centroids
    }
}

impl ClassificationMethod for NearestCentroidClassifier {
    type Model = CentroidModel;

    fn fit(&self, data: &Mat, labels: &[usize]) -> anyhow::Result<CentroidModel> {
        check_fit_input(data, labels)?;

        let mut centroids: Vec<(usize, DVec)> = partition_by_label(labels)
            .into_iter()
            .map(|(lab, rows)| {
                let mut mu = DVec::zeros(data.ncols());
                for &i in rows.iter() {
                    mu += data.row(i).transpose();
                }
                mu /= rows.len() as f32;
                (lab, mu)
            })
            .collect();

        centroids.sort_by_key(|(lab, _)| *lab);

        Ok(CentroidModel { centroids })
    }

    fn name(&self) -> &str {
        "nearest centroid"
    }
}

impl Classifier for CentroidModel {
    fn predict(&self, data: &Mat) -> anyhow::Result<Vec<usize>> {
        let dim = self.centroids.first().map(|(_, mu)| mu.len()).unwrap_or(0);
        if data.ncols() != dim {
            anyhow::bail!(
                "model expects {} features, data has {}",
                dim,
                data.ncols()
            );
        }

        let ret = (0..data.nrows())
            .into_par_iter()
            .map(|i| {
                let x = data.row(i).transpose();
                let mut best = (f32::INFINITY, 0);
                for (lab, mu) in self.centroids.iter() {
                    let d = (&x - mu).norm_squared();
                    if d < best.0 {
                        best = (d, *lab);
                    }
                }
                best.1
            })
            .collect();

        Ok(ret)
    }
}
