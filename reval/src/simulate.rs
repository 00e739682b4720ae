use crate::common::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

pub struct SimArgs {
    /// number of samples
    pub rows: usize,
    /// number of features
    pub cols: usize,
    /// number of clusters
    pub clusters: usize,
    /// standard deviation of cluster centres around the origin
    pub centre_sd: f32,
    /// standard deviation of samples around their centre
    pub noise_sd: f32,
    pub rseed: u64,
}

pub struct SimOut {
    /// samples x features
    pub data: Mat,
    /// clusters x features
    pub centres: Mat,
    pub labels: Vec<usize>,
}

/// Generate Gaussian blobs
///
/// ```text
/// mu(k,:) ~ N(0, centre_sd^2)
/// x(i,:)  ~ N(mu(z(i),:), noise_sd^2),   z(i) ~ Uniform{0..K-1}
/// ```
///
pub fn generate_gaussian_blobs(args: &SimArgs) -> anyhow::Result<SimOut> {
    if args.rows == 0 || args.cols == 0 {
        anyhow::bail!("need at least one row and one column");
    }
    if args.clusters == 0 || args.clusters > args.rows {
        anyhow::bail!(
            "number of clusters ({}) should be in [1, {}]",
            args.clusters,
            args.rows
        );
    }

    let mut rng = StdRng::seed_from_u64(args.rseed);
    let centre_dist = Normal::new(0_f32, args.centre_sd)?;
    let noise_dist = Normal::new(0_f32, args.noise_sd)?;

    let centres = Mat::from_fn(args.clusters, args.cols, |_, _| centre_dist.sample(&mut rng));

    // every cluster is represented at least once
    let mut labels: Vec<usize> = (0..args.rows)
        .map(|i| {
            if i < args.clusters {
                i
            } else {
                rng.random_range(0..args.clusters)
            }
        })
        .collect();
    labels.shuffle(&mut rng);

    let data = Mat::from_fn(args.rows, args.cols, |i, j| {
        centres[(labels[i], j)] + noise_dist.sample(&mut rng)
    });

    info!(
        "simulated {} samples x {} features in {} clusters",
        args.rows, args.cols, args.clusters
    );

    Ok(SimOut {
        data,
        centres,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(rseed: u64) -> SimArgs {
        SimArgs {
            rows: 50,
            cols: 3,
            clusters: 4,
            centre_sd: 10.0,
            noise_sd: 0.1,
            rseed,
        }
    }

    #[test]
    fn blobs_are_reproducible() -> anyhow::Result<()> {
        let a = generate_gaussian_blobs(&args(9))?;
        let b = generate_gaussian_blobs(&args(9))?;
        assert_eq!(a.data, b.data);
        assert_eq!(a.labels, b.labels);

        assert_eq!(a.data.shape(), (50, 3));
        let mut used = a.labels.clone();
        used.sort_unstable();
        used.dedup();
        assert_eq!(used, vec![0, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn rejects_bad_cluster_counts() {
        let mut bad = args(1);
        bad.clusters = 0;
        assert!(generate_gaussian_blobs(&bad).is_err());
        bad.clusters = 51;
        assert!(generate_gaussian_blobs(&bad).is_err());
    }
}
