//! Best-split search over every (feature, threshold) candidate.
use super::impurity::gini_from_counts;
use crate::data::dataset::{Dataset, Number, WholeNumber};
use log::trace;
use nalgebra::DMatrix;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A selected split: rows with `x[feature_index] < threshold` go left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split<XT: Number> {
    pub feature_index: usize,
    pub threshold: XT,
    /// Weighted Gini impurity of the two children.
    pub impurity: f64,
}

/// Finds the split minimizing the weighted child impurity, or `None` when no
/// threshold leaves rows on both sides.
///
/// Every distinct value of every column is a candidate threshold. Among equal
/// impurities the lowest feature index wins, then the lowest threshold.
pub fn find_best_split<XT: Number, YT: WholeNumber>(dataset: &Dataset<XT, YT>) -> Option<Split<XT>> {
    let (x, y) = dataset.into_parts();
    if x.nrows() < 2 {
        return None;
    }

    let classes = y.iter().copied().collect::<BTreeSet<_>>().into_iter().collect::<Vec<_>>();
    let class_ids = y
        .iter()
        .map(|label| classes.binary_search(label).unwrap_or_default())
        .collect::<Vec<_>>();

    let per_feature = (0..x.ncols())
        .into_par_iter()
        .map(|feature_index| best_split_for_feature(x, &class_ids, classes.len(), feature_index))
        .collect::<Vec<_>>();

    per_feature
        .into_iter()
        .flatten()
        .fold(None, |best: Option<Split<XT>>, candidate| match best {
            Some(best) if best.impurity <= candidate.impurity => Some(best),
            _ => Some(candidate),
        })
}

fn best_split_for_feature<XT: Number>(
    x: &DMatrix<XT>,
    class_ids: &[usize],
    num_classes: usize,
    feature_index: usize,
) -> Option<Split<XT>> {
    let n = x.nrows();
    let mut order = (0..n).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        x[(a, feature_index)]
            .partial_cmp(&x[(b, feature_index)])
            .unwrap_or(Ordering::Equal)
    });

    let mut total_counts = vec![0usize; num_classes];
    for &class in class_ids {
        total_counts[class] += 1;
    }
    let mut left_counts = vec![0usize; num_classes];
    let mut right_counts = total_counts.clone();

    let mut best: Option<Split<XT>> = None;
    for pos in 1..n {
        let moved = order[pos - 1];
        left_counts[class_ids[moved]] += 1;
        right_counts[class_ids[moved]] -= 1;

        let previous = x[(moved, feature_index)];
        let threshold = x[(order[pos], feature_index)];
        if previous == threshold {
            continue;
        }

        // rows order[..pos] are exactly those below `threshold`
        let left_size = pos;
        let right_size = n - pos;
        let impurity = (left_size as f64 * gini_from_counts(&left_counts, left_size)
            + right_size as f64 * gini_from_counts(&right_counts, right_size))
            / n as f64;

        if best.map_or(true, |best| impurity < best.impurity) {
            trace!(
                "feature {} threshold {} -> weighted gini {:.6}",
                feature_index,
                threshold,
                impurity
            );
            best = Some(Split {
                feature_index,
                threshold,
                impurity,
            });
        }
    }
    best
}
