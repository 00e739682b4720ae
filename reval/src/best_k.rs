//! Choosing the number of clusters by relative validation.
//!
//! For every candidate `k` the data are split `nrep` times at random; each
//! split gives a normalized stability (test error over random-label test
//! error). The most stable `k` has the smallest mean.

use crate::common::*;
use crate::relative_validation::{RelativeValidator, ValidationOutcome};
use crate::split::{select_rows, train_test_split};
use crate::traits::{ClassificationMethod, ClusteringMethod};
use indicatif::{ProgressBar, ProgressDrawTarget};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BestKArgs {
    pub kmin: usize,
    pub kmax: usize,
    /// random train/test splits per `k`
    pub nrep: usize,
    pub test_fraction: f64,
    pub nrand: usize,
    pub rseed: u64,
    pub show_progress: bool,
}

/// Summary over the repetitions of one `k`
#[derive(Debug, Clone, Serialize)]
pub struct KStability {
    pub k: usize,
    pub mean_train: f64,
    pub mean_test: f64,
    pub mean_rnd_test: f64,
    pub mean_normalized: f64,
    pub sd_normalized: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BestKResult {
    pub best_k: usize,
    pub per_k: Vec<KStability>,
}

/// Scan `k` in `[kmin, kmax]`
/// * `data` - samples x features
/// * `class_method` - classifier shared by every run
/// * `make_clustering` - clustering method for a given `k`
pub fn select_num_clusters<S, C, F>(
    data: &Mat,
    class_method: &S,
    make_clustering: F,
    args: &BestKArgs,
) -> anyhow::Result<BestKResult>
where
    S: ClassificationMethod + Clone + Sync,
    C: ClusteringMethod,
    F: Fn(usize) -> C,
{
    if args.kmin < 2 || args.kmin > args.kmax {
        anyhow::bail!(
            "invalid range of clusters [{}, {}]; need 2 <= kmin <= kmax",
            args.kmin,
            args.kmax
        );
    }
    if args.nrep == 0 {
        anyhow::bail!("need at least one repetition");
    }

    let splits = (0..args.nrep)
        .map(|r| {
            let rseed = args.rseed.wrapping_add(r as u64);
            train_test_split(data.nrows(), args.test_fraction, rseed)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let smallest = splits
        .iter()
        .map(|(tr, ts)| tr.len().min(ts.len()))
        .min()
        .unwrap_or(0);

    if args.kmax > smallest {
        anyhow::bail!(
            "kmax ({}) exceeds the smallest split size ({})",
            args.kmax,
            smallest
        );
    }

    let njobs = (args.kmax - args.kmin + 1) * args.nrep;
    let pb = ProgressBar::new(njobs as u64);
    if !args.show_progress {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    let mut per_k = Vec::with_capacity(args.kmax - args.kmin + 1);

    for k in args.kmin..=args.kmax {
        let validator =
            RelativeValidator::new(class_method.clone(), make_clustering(k), args.nrand, args.rseed);

        let mut outcomes: Vec<ValidationOutcome> = Vec::with_capacity(args.nrep);
        for (train_idx, test_idx) in splits.iter() {
            let train_data = select_rows(data, train_idx);
            let test_data = select_rows(data, test_idx);
            outcomes.push(validator.validate(&train_data, &test_data)?);
            pb.inc(1);
        }

        let stat = summarize(k, &outcomes);
        info!(
            "k={}: test {:.4}, random {:.4}, normalized stability {:.4} (sd {:.4})",
            k, stat.mean_test, stat.mean_rnd_test, stat.mean_normalized, stat.sd_normalized
        );
        per_k.push(stat);
    }
    pb.finish_and_clear();

    let best_k = pick_best(&per_k).ok_or_else(|| anyhow::anyhow!("no candidate k"))?;
    info!("best number of clusters: {}", best_k);

    Ok(BestKResult { best_k, per_k })
}

fn summarize(k: usize, outcomes: &[ValidationOutcome]) -> KStability {
    let nn = outcomes.len() as f64;
    let mean_normalized = mean_of(outcomes, |o| o.normalized_stability);
    let sd_normalized = if outcomes.len() > 1 {
        let ss = outcomes
            .iter()
            .map(|o| (o.normalized_stability - mean_normalized).powi(2))
            .sum::<f64>();
        (ss / (nn - 1.0)).sqrt()
    } else {
        0.0
    };

    KStability {
        k,
        mean_train: mean_of(outcomes, |o| o.train_misclass),
        mean_test: mean_of(outcomes, |o| o.test_misclass),
        mean_rnd_test: mean_of(outcomes, |o| o.rnd_test_misclass),
        mean_normalized,
        sd_normalized,
    }
}

fn mean_of(outcomes: &[ValidationOutcome], f: impl Fn(&ValidationOutcome) -> f64) -> f64 {
    outcomes.iter().map(f).sum::<f64>() / outcomes.len() as f64
}

/// smallest mean normalized stability; ties go to the smaller `k`
pub fn pick_best(per_k: &[KStability]) -> Option<usize> {
    per_k
        .iter()
        .fold(None, |best: Option<&KStability>, s| match best {
            Some(b) if b.mean_normalized <= s.mean_normalized => Some(b),
            _ => Some(s),
        })
        .map(|s| s.k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(k: usize, mean_normalized: f64) -> KStability {
        KStability {
            k,
            mean_train: 0.0,
            mean_test: 0.0,
            mean_rnd_test: 0.5,
            mean_normalized,
            sd_normalized: 0.0,
        }
    }

    #[test]
    fn best_is_smallest_normalized() {
        let per_k = vec![stat(2, 0.4), stat(3, 0.1), stat(4, 0.1), stat(5, 0.9)];
        assert_eq!(pick_best(&per_k), Some(3));
        assert_eq!(pick_best(&[]), None);
    }
}
