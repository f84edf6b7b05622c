//! Decision Tree Classifier
use super::{node::TreeNode, params::TreeParams, printer, split::find_best_split};
use crate::{
    data::dataset::{Dataset, Number, WholeNumber},
    error::{Result, TreeError},
    metrics::confusion::ClassificationMetrics,
};
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};
use num_traits::Zero;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

/// Decision Tree Classifier
///
/// Grows a binary tree by repeatedly choosing the (feature, threshold) split with
/// the lowest weighted Gini impurity. A node becomes a leaf when its labels are
/// pure, when it sits at the maximum depth, or when no split leaves rows on both
/// sides. Leaves predict the most frequent class, ties going to the smallest id.
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier<XT: Number, YT: WholeNumber> {
    root: Option<TreeNode<XT, YT>>,
    n_features: Option<usize>,
    tree_params: TreeParams,
}

impl<XT: Number, YT: WholeNumber> Default for DecisionTreeClassifier<XT, YT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<XT: Number, YT: WholeNumber> ClassificationMetrics<YT> for DecisionTreeClassifier<XT, YT> {}

impl<XT: Number, YT: WholeNumber> DecisionTreeClassifier<XT, YT> {
    /// Creates an unfitted classifier with default parameters.
    pub fn new() -> Self {
        Self {
            root: None,
            n_features: None,
            tree_params: TreeParams::new(),
        }
    }

    /// Creates an unfitted classifier whose leaves lie at most `max_depth` levels
    /// below the root.
    pub fn with_params(max_depth: u16) -> Self {
        let mut tree = Self::new();
        tree.set_max_depth(max_depth);
        tree
    }

    /// Sets the maximum depth used by the next call to [`fit`](Self::fit).
    pub fn set_max_depth(&mut self, max_depth: u16) {
        self.tree_params.set_max_depth(max_depth)
    }

    pub fn max_depth(&self) -> u16 {
        self.tree_params.max_depth()
    }

    /// The root of the fitted tree, `None` before the first successful fit.
    pub fn root(&self) -> Option<&TreeNode<XT, YT>> {
        self.root.as_ref()
    }

    /// Number of features seen at fit time.
    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Builds the decision tree from a dataset, replacing any previous tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidInput`] if the number of labels differs from the
    /// number of rows, the dataset has no rows or no columns, a label is negative,
    /// or a feature value is not comparable (NaN). On error the previous tree, if
    /// any, is kept.
    pub fn fit(&mut self, dataset: &Dataset<XT, YT>) -> Result<()> {
        if let Err(err) = Self::validate(dataset) {
            warn!("Refusing to fit decision tree: {}", err);
            return Err(err);
        }

        let root = self.build_tree(dataset, 0)?;
        info!(
            "Fitted decision tree on {} rows x {} features: depth {}, {} leaves.",
            dataset.nrows(),
            dataset.ncols(),
            root.depth(),
            root.n_leaves()
        );
        self.root = Some(root);
        self.n_features = Some(dataset.ncols());
        Ok(())
    }

    /// Predicts the class of a single observation.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidInput`] if the tree wasn't built yet or the
    /// observation length differs from the number of features seen at fit time.
    pub fn predict_one(&self, features: &DVector<XT>) -> Result<YT> {
        let (root, n_features) = self.fitted()?;
        if features.len() != n_features {
            return Err(TreeError::invalid(format!(
                "Observation has {} features, the tree was fitted on {}.",
                features.len(),
                n_features
            )));
        }
        Ok(root.classify(features.as_slice()))
    }

    /// Predicts the class of every row of `features`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidInput`] if the tree wasn't built yet or the
    /// number of columns differs from the number of features seen at fit time.
    pub fn predict(&self, features: &DMatrix<XT>) -> Result<DVector<YT>> {
        let (root, n_features) = self.fitted()?;
        if features.ncols() != n_features {
            return Err(TreeError::invalid(format!(
                "Matrix has {} columns, the tree was fitted on {} features.",
                features.ncols(),
                n_features
            )));
        }

        let predictions = (0..features.nrows())
            .into_par_iter()
            .map(|row| {
                let observation = features.row(row).iter().copied().collect::<Vec<_>>();
                root.classify(&observation)
            })
            .collect::<Vec<_>>();

        Ok(DVector::from_vec(predictions))
    }

    /// Writes the tree to `out`, one node per line, indented by depth.
    ///
    /// `class_names` may omit classes; those are written as their numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidInput`] if the tree wasn't built yet or
    /// `feature_names` doesn't name every feature, and [`TreeError::Io`] if
    /// writing fails.
    pub fn write_tree<W: Write, S: AsRef<str>>(
        &self,
        out: &mut W,
        feature_names: &[S],
        class_names: &HashMap<YT, String>,
    ) -> Result<()> {
        let (root, n_features) = self.fitted()?;
        if feature_names.len() != n_features {
            return Err(TreeError::invalid(format!(
                "Got {} feature names for {} features.",
                feature_names.len(),
                n_features
            )));
        }
        printer::write_node(out, root, 0, feature_names, class_names)
    }

    /// Prints the tree to stdout. See [`write_tree`](Self::write_tree).
    pub fn print_tree<S: AsRef<str>>(
        &self,
        feature_names: &[S],
        class_names: &HashMap<YT, String>,
    ) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_tree(&mut handle, feature_names, class_names)
    }

    fn fitted(&self) -> Result<(&TreeNode<XT, YT>, usize)> {
        match (&self.root, self.n_features) {
            (Some(root), Some(n_features)) => Ok((root, n_features)),
            _ => Err(TreeError::invalid("Tree wasn't built yet.")),
        }
    }

    fn validate(dataset: &Dataset<XT, YT>) -> Result<()> {
        let (x, y) = dataset.into_parts();
        if x.nrows() != y.len() {
            return Err(TreeError::invalid(format!(
                "Feature matrix has {} rows but there are {} labels.",
                x.nrows(),
                y.len()
            )));
        }
        if x.ncols() == 0 {
            return Err(TreeError::invalid("Feature matrix has no columns."));
        }
        if x.nrows() == 0 {
            return Err(TreeError::invalid("Cannot fit a tree on an empty dataset."));
        }
        if y.iter().any(|label| *label < YT::zero()) {
            return Err(TreeError::invalid("Class labels must be non-negative."));
        }
        if x.iter().any(|value| value.partial_cmp(value).is_none()) {
            return Err(TreeError::invalid("Feature matrix contains NaN values."));
        }
        Ok(())
    }

    fn build_tree(&self, dataset: &Dataset<XT, YT>, depth: u16) -> Result<TreeNode<XT, YT>> {
        let y = &dataset.y;
        let majority = majority_class(y)?;

        let is_pure = y.iter().all(|label| *label == y[0]);
        if is_pure || depth >= self.max_depth() {
            debug!(
                "Leaf at depth {} (pure: {}): class {} from {} rows",
                depth,
                is_pure,
                majority,
                y.len()
            );
            return Ok(TreeNode::leaf(majority));
        }

        let Some(split) = find_best_split(dataset) else {
            debug!(
                "Leaf at depth {}: no valid split, class {} from {} rows",
                depth,
                majority,
                y.len()
            );
            return Ok(TreeNode::leaf(majority));
        };

        let (left, right) = dataset.split_on_threshold(split.feature_index, split.threshold);
        debug!(
            "Split at depth {}: feature {} < {} (weighted gini {:.6}), {} left / {} right",
            depth,
            split.feature_index,
            split.threshold,
            split.impurity,
            left.nrows(),
            right.nrows()
        );

        let left_node = self.build_tree(&left, depth + 1)?;
        let right_node = self.build_tree(&right, depth + 1)?;
        Ok(TreeNode::internal(
            split.feature_index,
            split.threshold,
            left_node,
            right_node,
        ))
    }
}

/// Most frequent label; ties go to the smallest class id.
fn majority_class<YT: WholeNumber>(y: &DVector<YT>) -> Result<YT> {
    let mut counts: BTreeMap<YT, usize> = BTreeMap::new();
    for label in y.iter() {
        *counts.entry(*label).or_insert(0) += 1;
    }

    let mut best: Option<(YT, usize)> = None;
    for (class, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((class, count));
        }
    }
    best.map(|(class, _)| class).ok_or(TreeError::EmptyPartition)
}
