use crate::common::*;
use crate::methods::ClassifierKind;
use crate::relative_validation::ValidationOutcome;
use serde::{Deserialize, Serialize};

/// Settings of one relative validation run, kept next to its results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub data_file: String,
    pub num_clusters: usize,
    pub classifier: ClassifierKind,
    pub knn: usize,
    pub nrand: usize,
    pub test_fraction: f64,
    pub max_iter: usize,
    pub rseed: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            data_file: String::new(),
            num_clusters: 2,
            classifier: ClassifierKind::default(),
            knn: DEFAULT_KNN,
            nrand: DEFAULT_NRAND,
            test_fraction: 0.5,
            max_iter: DEFAULT_MAX_ITER,
            rseed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub config: ValidationConfig,
    pub num_train: usize,
    pub num_test: usize,
    pub outcome: ValidationOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_reads_back_from_json() -> anyhow::Result<()> {
        let config = ValidationConfig {
            data_file: "x.tsv.gz".into(),
            classifier: ClassifierKind::Centroid,
            ..Default::default()
        };

        let text = serde_json::to_string(&config)?;
        assert!(text.contains("\"classifier\":\"centroid\""));
        assert_eq!(serde_json::from_str::<ValidationConfig>(&text)?, config);
        Ok(())
    }
}
