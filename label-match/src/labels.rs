//! Labelings: one non-negative integer per sample.
//!
//! Numeric containers coming from files or other libraries are checked
//! here once, so the rest of the crate can work on plain `&[usize]`.

use crate::error::{LabelMatchError, Result};
use fnv::FnvHashMap as HashMap;
use num_traits::ToPrimitive;
use std::fmt::Display;

/// Convert signed integers into labels
/// * `values` - one value per sample; negative values are rejected
pub fn labels_from_signed(values: &[i64]) -> Result<Vec<usize>> {
    values
        .iter()
        .enumerate()
        .map(|(position, &x)| {
            usize::try_from(x).map_err(|_| LabelMatchError::InvalidInput {
                kind: "signed integer",
                position,
                value: x.to_string(),
            })
        })
        .collect()
}

/// Convert floating point numbers into labels
///
/// Matrices read from text files store membership as floats, e.g.,
/// `0.0, 1.0, 2.0`. Anything negative, fractional or non-finite fails.
pub fn labels_from_float<T>(values: &[T]) -> Result<Vec<usize>>
where
    T: ToPrimitive + Display + Copy,
{
    values
        .iter()
        .enumerate()
        .map(|(position, x)| {
            let invalid = || LabelMatchError::InvalidInput {
                kind: "floating point",
                position,
                value: x.to_string(),
            };
            let v = x.to_f64().ok_or_else(invalid)?;
            if !v.is_finite() || v < 0.0 || v.fract() != 0.0 {
                return Err(invalid());
            }
            v.to_usize().ok_or_else(invalid)
        })
        .collect()
}

/// Both labelings must describe the same non-empty set of samples
pub fn check_pair(true_lab: &[usize], pred_lab: &[usize]) -> Result<()> {
    if true_lab.is_empty() || pred_lab.is_empty() {
        return Err(LabelMatchError::DegenerateInput("labelings have no samples"));
    }
    if true_lab.len() != pred_lab.len() {
        return Err(LabelMatchError::ShapeMismatch {
            true_len: true_lab.len(),
            pred_len: pred_lab.len(),
        });
    }
    Ok(())
}

/// Fraction of samples where the two labelings disagree (0/1 loss)
pub fn disagreement_rate(lab_a: &[usize], lab_b: &[usize]) -> Result<f64> {
    check_pair(lab_a, lab_b)?;
    let ndiff = lab_a
        .iter()
        .zip(lab_b.iter())
        .filter(|(a, b)| a != b)
        .count();
    Ok(ndiff as f64 / lab_a.len() as f64)
}

/// Sorted distinct label identifiers
pub fn distinct_labels(lab: &[usize]) -> Vec<usize> {
    let mut ret = lab.to_vec();
    ret.sort_unstable();
    ret.dedup();
    ret
}

/// Partition sample indexes by their labels
/// # Returns
/// A hashmap: label -> sorted indexes of the samples carrying it
pub fn partition_by_label(lab: &[usize]) -> HashMap<usize, Vec<usize>> {
    let mut groups: HashMap<usize, Vec<usize>> = HashMap::default();
    for (i, &k) in lab.iter().enumerate() {
        groups.entry(k).or_default().push(i);
    }
    groups
}
