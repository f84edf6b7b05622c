//! Gini impurity.
//!
//! For class frequencies `p_c` the impurity is `1 − Σ p_c²`: zero for a pure set,
//! at most `1 − 1/k` when `k` classes are equally represented.
use crate::data::dataset::WholeNumber;
use crate::error::{Result, TreeError};
use nalgebra::DVector;
use std::collections::HashMap;

/// Gini impurity of a label vector.
///
/// # Errors
///
/// Returns [`TreeError::EmptyPartition`] for an empty vector, which has no class
/// distribution.
pub fn gini_impurity<YT: WholeNumber>(labels: &DVector<YT>) -> Result<f64> {
    if labels.is_empty() {
        return Err(TreeError::EmptyPartition);
    }
    let mut counts: HashMap<YT, usize> = HashMap::new();
    for label in labels.iter() {
        *counts.entry(*label).or_insert(0) += 1;
    }
    let counts = counts.into_values().collect::<Vec<_>>();
    Ok(gini_from_counts(&counts, labels.len()))
}

/// Gini impurity from per-class counts summing to `n`.
///
/// Returns `0.0` when `n == 0`.
pub fn gini_from_counts(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum();
    1.0 - sum_sq
}
