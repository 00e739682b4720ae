use crate::init_logger;
use clap::Args;
use log::info;
use reval::io::*;
use reval::simulate::{generate_gaussian_blobs, SimArgs};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// number of samples
    #[arg(long, short = 'r', default_value_t = 1000)]
    rows: usize,

    /// number of features
    #[arg(long, short = 'f', default_value_t = 10)]
    cols: usize,

    /// number of clusters
    #[arg(long, short = 'k', default_value_t = 3)]
    clusters: usize,

    /// spread of cluster centres
    #[arg(long, default_value_t = 5.0)]
    centre_sd: f32,

    /// spread of samples around their centre
    #[arg(long, default_value_t = 1.0)]
    noise_sd: f32,

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
                     - {out}.data.tsv.gz: samples x features\n\
                     - {out}.centres.tsv.gz: clusters x features\n\
                     - {out}.labels.gz: true cluster membership"
    )]
    out: Box<str>,

    /// verbosity
    #[arg(long, short, help = "verbosity", long_help = "Enable `RUST_LOG=info`")]
    verbose: bool,
}

pub fn run_simulate(args: &SimulateArgs) -> anyhow::Result<()> {
    init_logger(args.verbose);

    let sim = generate_gaussian_blobs(&SimArgs {
        rows: args.rows,
        cols: args.cols,
        clusters: args.clusters,
        centre_sd: args.centre_sd,
        noise_sd: args.noise_sd,
        rseed: args.rseed,
    })?;

    mkdir(&args.out)?;
    let data_file = format!("{}.data.tsv.gz", args.out);
    write_matrix(&sim.data, &data_file, "\t")?;
    write_matrix(&sim.centres, &format!("{}.centres.tsv.gz", args.out), "\t")?;
    write_labels(&sim.labels, &format!("{}.labels.gz", args.out))?;

    info!("wrote {}", data_file);
    Ok(())
}
