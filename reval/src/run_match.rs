use crate::init_logger;
use clap::Args;
use label_match::{disagreement_rate, LabelMatcher};
use log::info;
use reval::io::*;

#[derive(Args, Debug)]
pub struct MatchLabelsArgs {
    /// reference labels, one integer per line
    #[arg(required = true)]
    true_file: Box<str>,

    /// labels to be renamed, one integer per line
    #[arg(required = true)]
    pred_file: Box<str>,

    #[arg(
        long,
        short = 'o',
        required = true,
        help = "Output file prefix",
        long_help = "Output file prefix.\n\n\
                     Generates:\n\
                     - {out}.labels.gz: relabeled predictions\n\
                     - {out}.json: assignment cost and disagreement rates"
    )]
    out: Box<str>,

    /// verbosity
    #[arg(long, short, help = "verbosity", long_help = "Enable `RUST_LOG=info`")]
    verbose: bool,
}

#[derive(serde::Serialize)]
struct MatchReport<'a> {
    true_file: &'a str,
    pred_file: &'a str,
    num_samples: usize,
    total_cost: f64,
    raw_disagreement: f64,
    aligned_disagreement: f64,
}

pub fn run_match_labels(args: &MatchLabelsArgs) -> anyhow::Result<()> {
    init_logger(args.verbose);

    let true_lab = read_labels(&args.true_file)?;
    let pred_lab = read_labels(&args.pred_file)?;

    let outcome = LabelMatcher::new().match_with_assignment(&true_lab, &pred_lab)?;

    let raw = disagreement_rate(&true_lab, &pred_lab)?;
    let aligned = disagreement_rate(&true_lab, &outcome.permuted)?;
    info!("disagreement before {:.4}, after relabeling {:.4}", raw, aligned);

    mkdir(&args.out)?;
    write_labels(&outcome.permuted, &format!("{}.labels.gz", args.out))?;

    let report = MatchReport {
        true_file: &args.true_file,
        pred_file: &args.pred_file,
        num_samples: true_lab.len(),
        total_cost: outcome.total_cost(),
        raw_disagreement: raw,
        aligned_disagreement: aligned,
    };
    write_json(&report, &format!("{}.json", args.out))?;

    eprintln!(
        "{} samples: disagreement {:.4} -> {:.4}",
        true_lab.len(),
        raw,
        aligned
    );
    Ok(())
}
