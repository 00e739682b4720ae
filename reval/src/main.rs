mod run_best_k;
mod run_match;
mod run_simulate;
mod run_validate;

use clap::{Parser, Subcommand};
use log::info;
use run_best_k::*;
use run_match::*;
use run_simulate::*;
use run_validate::*;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "REVAL",
    long_about = "Relative validation of clustering stability\n\
                  A classifier trained on the clustering of one half of the data\n\
                  should reproduce the clustering of the other half.\n\
                  Data files: one sample per line, `.gz` is fine.",
    term_width = 80
)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Assess the stability of a k-means clustering",
        long_about = "Relative validation in three stages: \n\
                      (1) Cluster the training split and fit a classifier on it\n\
                      (2) Re-cluster the test split, match labels, and score\n\
                      (3) Repeat the protocol with randomly permuted labels.\n"
    )]
    Validate(ValidateArgs),

    #[command(
        about = "Choose the number of clusters",
        long_about = "Run relative validation for each k over repeated random splits\n\
                      and report the k with the smallest normalized stability\n\
                      (test error divided by the random-label test error).\n"
    )]
    BestK(BestKCliArgs),

    /// Relabel a predicted partition to best agree with a reference
    MatchLabels(MatchLabelsArgs),

    /// Simulate Gaussian blobs with known cluster membership
    Simulate(SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.commands {
        Commands::Validate(args) => {
            run_validate(args)?;
        }
        Commands::BestK(args) => {
            run_best_k(args)?;
        }
        Commands::MatchLabels(args) => {
            run_match_labels(args)?;
        }
        Commands::Simulate(args) => {
            run_simulate(args)?;
        }
    }

    info!("Done");
    Ok(())
}

/// `--verbose` switches on `info` logging unless `RUST_LOG` says otherwise
pub fn init_logger(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
