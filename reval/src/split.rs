use crate::common::Mat;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Randomly split row indexes into training and test sets
/// * `nrows` - number of samples
/// * `test_fraction` - share of samples held out, in (0, 1)
/// * `rseed` - random seed
/// # Returns
/// `(train, test)` indexes, each sorted
pub fn train_test_split(
    nrows: usize,
    test_fraction: f64,
    rseed: u64,
) -> anyhow::Result<(Vec<usize>, Vec<usize>)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        anyhow::bail!("test fraction should be in (0, 1): {}", test_fraction);
    }

    let ntest = (nrows as f64 * test_fraction).round() as usize;
    if ntest == 0 || ntest >= nrows {
        anyhow::bail!(
            "cannot split {} samples with test fraction {}",
            nrows,
            test_fraction
        );
    }

    let mut rng = StdRng::seed_from_u64(rseed);
    let mut idx: Vec<usize> = (0..nrows).collect();
    idx.shuffle(&mut rng);

    let mut test = idx.split_off(nrows - ntest);
    let mut train = idx;
    train.sort_unstable();
    test.sort_unstable();
    Ok((train, test))
}

/// Take a subset of rows in the given order
pub fn select_rows(data: &Mat, rows: &[usize]) -> Mat {
    data.select_rows(rows.iter())
}
