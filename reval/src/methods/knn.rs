//! k-nearest-neighbour classification over an HNSW index

use crate::common::*;
use crate::traits::{check_fit_input, ClassificationMethod, Classifier};
use fnv::FnvHashMap as HashMap;
use instant_distance::{Builder, HnswMap, Search};

/// Majority vote among the `knn` closest training rows
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    knn: usize,
    rseed: u64,
}

impl KnnClassifier {
    /// * `knn` - number of neighbours voting; `1` memorizes the training set
    /// * `rseed` - seed for the index construction
    pub fn new(knn: usize, rseed: u64) -> Self {
        Self { knn: knn.max(1), rseed }
    }
}

pub struct KnnModel {
    index: HnswMap<RowPoint, usize>,
    knn: usize,
}

#[derive(Clone, Debug)]
pub struct RowPoint {
    data: Vec<f32>,
}

impl instant_distance::Point for RowPoint {
    fn distance(&self, other: &Self) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt()
    }
}

fn row_points(data: &Mat) -> Vec<RowPoint> {
    data.row_iter()
        .map(|r| RowPoint {
            data: r.iter().copied().collect(),
        })
        .collect()
}

impl ClassificationMethod for KnnClassifier {
    type Model = KnnModel;

    fn fit(&self, data: &Mat, labels: &[usize]) -> anyhow::Result<KnnModel> {
        check_fit_input(data, labels)?;

        let index = Builder::default()
            .seed(self.rseed)
            .build(row_points(data), labels.to_vec());

        Ok(KnnModel {
            index,
            knn: self.knn.min(data.nrows()),
        })
    }

    fn name(&self) -> &str {
        "kNN"
    }
}

impl Classifier for KnnModel {
    fn predict(&self, data: &Mat) -> anyhow::Result<Vec<usize>> {
        let points = row_points(data);

        let ret = points
            .par_iter()
            .map_init(Search::default, |search, query| {
                let mut votes: HashMap<usize, usize> = HashMap::default();
                for item in self.index.search(query, search).take(self.knn) {
                    *votes.entry(*item.value).or_default() += 1;
                }
                majority(&votes)
            })
            .collect::<Option<Vec<usize>>>();

        ret.ok_or_else(|| anyhow::anyhow!("empty neighbourhood in kNN search"))
    }
}

/// most frequent label; ties go to the smallest label
fn majority(votes: &HashMap<usize, usize>) -> Option<usize> {
    votes
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(&lab, _)| lab)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_breaks_ties_low() {
        let mut votes = HashMap::default();
        votes.insert(3, 2);
        votes.insert(1, 2);
        votes.insert(0, 1);
        assert_eq!(majority(&votes), Some(1));
        assert_eq!(majority(&HashMap::default()), None);
    }

    #[test]
    fn separated_groups() -> anyhow::Result<()> {
        let x = Mat::from_row_slice(
            6,
            2,
            &[
                0.0, 0.0, //
                0.2, 0.1, //
                0.1, 0.3, //
                5.0, 5.0, //
                5.1, 4.9, //
                4.8, 5.2, //
            ],
        );
        let y = vec![0, 0, 0, 1, 1, 1];

        let model = KnnClassifier::new(3, 42).fit(&x, &y)?;
        let query = Mat::from_row_slice(2, 2, &[0.1, 0.1, 5.0, 5.1]);
        assert_eq!(model.predict(&query)?, vec![0, 1]);
        Ok(())
    }

    #[test]
    fn rejects_mismatched_labels() {
        let x = Mat::zeros(3, 2);
        assert!(KnnClassifier::new(1, 0).fit(&x, &[0, 1]).is_err());
    }
}
