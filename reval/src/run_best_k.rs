use crate::init_logger;
use clap::Args;
use log::info;
use reval::best_k::*;
use reval::common::*;
use reval::io::*;
use reval::methods::*;
use reval::ClassificationMethod;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct BestKCliArgs {
    /// Data matrix file (samples × features)
    #[arg(required = true)]
    data_file: Box<str>,

    /// skip the first line of the data file
    #[arg(long, default_value_t = false)]
    header: bool,

    /// smallest number of clusters to try
    #[arg(long, default_value_t = 2)]
    kmin: usize,

    /// largest number of clusters to try
    #[arg(long, default_value_t = 10)]
    kmax: usize,

    /// random train/test splits per number of clusters
    #[arg(long, default_value_t = 5)]
    nrep: usize,

    /// classifier imitating the clustering
    #[arg(long, short = 'c', value_enum, default_value = "knn")]
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

    /// output file prefix; writes `{out}.json`
    #[arg(long, short = 'o', required = true)]
    out: Box<str>,

    /// verbosity
    #[arg(long, short, help = "verbosity", long_help = "Enable `RUST_LOG=info`")]
    verbose: bool,
}

#[derive(Serialize)]
struct BestKReport<'a> {
    data_file: &'a str,
    classifier: ClassifierKind,
    knn: usize,
    max_iter: usize,
    settings: &'a BestKArgs,
    result: &'a BestKResult,
}

pub fn run_best_k(args: &BestKCliArgs) -> anyhow::Result<()> {
    init_logger(args.verbose);

    let data = read_matrix(&args.data_file, &['\t', ',', ' '], args.header)?;

    let settings = BestKArgs {
        kmin: args.kmin,
        kmax: args.kmax,
        nrep: args.nrep,
        test_fraction: args.test_fraction,
        nrand: args.nrand,
        rseed: args.rseed,
        show_progress: !args.verbose,
    };

    let result = match args.classifier {
        ClassifierKind::Knn => {
            scan(&data, &KnnClassifier::new(args.knn, args.rseed), args, &settings)?
        }
        ClassifierKind::Centroid => scan(&data, &NearestCentroidClassifier, args, &settings)?,
    };

    eprintln!("  k  normalized stability (sd)");
    for s in result.per_k.iter() {
        let mark = if s.k == result.best_k { "*" } else { " " };
        eprintln!(
            "{}{:>3}  {:.4} ({:.4})",
            mark, s.k, s.mean_normalized, s.sd_normalized
        );
    }

    let report = BestKReport {
        data_file: &args.data_file,
        classifier: args.classifier,
        knn: args.knn,
        max_iter: args.max_iter,
        settings: &settings,
        result: &result,
    };

    mkdir(&args.out)?;
    let json_file = format!("{}.json", args.out);
    write_json(&report, &json_file)?;
    info!("wrote {}", json_file);

    Ok(())
}

fn scan<S>(
    data: &Mat,
    class_method: &S,
    args: &BestKCliArgs,
    settings: &BestKArgs,
) -> anyhow::Result<BestKResult>
where
    S: ClassificationMethod + Clone + Sync,
{
    let max_iter = args.max_iter;
    select_num_clusters(
        data,
        class_method,
        |k| KmeansClustering::new(k, max_iter),
        settings,
    )
}
