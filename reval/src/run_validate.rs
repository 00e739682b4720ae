use crate::init_logger;
use clap::Args;
use log::info;
use reval::common::*;
use reval::config::{ValidationConfig, ValidationReport};
use reval::io::*;
use reval::methods::*;
use reval::split::{select_rows, train_test_split};
use reval::{ClassificationMethod, RelativeValidator};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[arg(
        required = true,
        help = "Data matrix file (samples × features)",
        long_help = "Data matrix with one sample per line.\n\
                     Columns separated by tabs, commas or spaces.\n\
                     Lines starting with `#` or `%` are skipped."
    )]
    data_file: Box<str>,

    /// skip the first line of the data file
    #[arg(long, default_value_t = false)]
    header: bool,

    /// number of clusters for k-means
    #[arg(short = 'k', long, required = true)]
    num_clusters: usize,

    #[arg(
        long,
        short = 'c',
        value_enum,
        default_value = "knn",
        help = "Classifier imitating the clustering",
        long_help = "Classifier imitating the clustering:\n\n\
                     - knn: majority vote of nearest neighbours (default)\n\
                     - centroid: nearest cluster mean"
    )]
    classifier: ClassifierKind,

    /// number of neighbours for the kNN classifier
    #[arg(long, default_value_t = DEFAULT_KNN)]
    knn: usize,

    /// number of random-label rounds
    #[arg(long, default_value_t = DEFAULT_NRAND)]
    nrand: usize,

    /// share of samples held out for testing
    #[arg(long, default_value_t = 0.5)]
    test_fraction: f64,

    /// maximum number of k-means iterations
    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// random seed
    #[arg(long, default_value_t = 42)]
    rseed: u64,

    #[arg(
        long,
        short = 'o',
        required = true,
        help = "Output file prefix",
        long_help = "Output file prefix.\n\n\
                     Generates:\n\
                     - {out}.json: settings and misclassification errors\n\
                     - {out}.train_labels.gz: k-means labels of the training split\n\
                     - {out}.test_labels.gz: k-means labels of the test split\n\
                     - {out}.split.gz: 1 for test samples, 0 for training samples"
    )]
    out: Box<str>,

    /// verbosity
    #[arg(long, short, help = "verbosity", long_help = "Enable `RUST_LOG=info`")]
    verbose: bool,
}

impl ValidateArgs {
    fn to_config(&self) -> ValidationConfig {
        ValidationConfig {
            data_file: self.data_file.to_string(),
            num_clusters: self.num_clusters,
            classifier: self.classifier,
            knn: self.knn,
            nrand: self.nrand,
            test_fraction: self.test_fraction,
            max_iter: self.max_iter,
            rseed: self.rseed,
        }
    }
}

pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<()> {
    init_logger(args.verbose);

    let config = args.to_config();
    match config.classifier {
        ClassifierKind::Knn => {
            validate_with(KnnClassifier::new(config.knn, config.rseed), config, &args.out, args.header)
        }
        ClassifierKind::Centroid => {
            validate_with(NearestCentroidClassifier, config, &args.out, args.header)
        }
    }
}

fn validate_with<S>(
    class_method: S,
    config: ValidationConfig,
    out: &str,
    header: bool,
) -> anyhow::Result<()>
where
    S: ClassificationMethod + Sync,
{
    let data = read_matrix(&config.data_file, &['\t', ',', ' '], header)?;

    let (train_idx, test_idx) = train_test_split(data.nrows(), config.test_fraction, config.rseed)?;
    let train_data = select_rows(&data, &train_idx);
    let test_data = select_rows(&data, &test_idx);

    info!(
        "{} training and {} test samples, k = {}",
        train_idx.len(),
        test_idx.len(),
        config.num_clusters
    );

    let validator = RelativeValidator::new(
        class_method,
        KmeansClustering::new(config.num_clusters, config.max_iter),
        config.nrand,
        config.rseed,
    );

    let outcome = validator.validate(&train_data, &test_data)?;

    mkdir(out)?;
    write_labels(&outcome.train_labels, &format!("{}.train_labels.gz", out))?;
    write_labels(&outcome.test_labels, &format!("{}.test_labels.gz", out))?;

    let mut is_test = vec![0; data.nrows()];
    for &i in test_idx.iter() {
        is_test[i] = 1;
    }
    write_labels(&is_test, &format!("{}.split.gz", out))?;

    eprintln!(
        "train error {:.4}, test error {:.4}, random test error {:.4}, normalized stability {:.4}",
        outcome.train_misclass,
        outcome.test_misclass,
        outcome.rnd_test_misclass,
        outcome.normalized_stability
    );

    let report = ValidationReport {
        config,
        num_train: train_idx.len(),
        num_test: test_idx.len(),
        outcome,
    };

    let json_file = format!("{}.json", out);
    write_json(&report, &json_file)?;
    info!("wrote {}", json_file);

    Ok(())
}
