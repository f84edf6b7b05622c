use crate::data::dataset::{Number, WholeNumber};

/// Decision tree node.
///
/// Internal nodes send rows with `x[feature_index] < threshold` to `left` and all
/// other rows to `right`.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode<XT: Number, YT: WholeNumber> {
    Leaf {
        class: YT,
    },
    Internal {
        feature_index: usize,
        threshold: XT,
        left: Box<TreeNode<XT, YT>>,
        right: Box<TreeNode<XT, YT>>,
    },
}

impl<XT: Number, YT: WholeNumber> TreeNode<XT, YT> {
    pub fn leaf(class: YT) -> Self {
        TreeNode::Leaf { class }
    }

    pub fn internal(feature_index: usize, threshold: XT, left: Self, right: Self) -> Self {
        TreeNode::Internal {
            feature_index,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Length of the longest root-to-leaf path; a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    /// Follows the splits from this node down to a leaf and returns its class.
    ///
    /// The caller guarantees `features` covers every split feature index.
    pub fn classify(&self, features: &[XT]) -> YT {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Internal {
                    feature_index,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature_index] < *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> TreeNode<f64, u8> {
        TreeNode::internal(
            1,
            2.5,
            TreeNode::leaf(0),
            TreeNode::internal(0, -1.0, TreeNode::leaf(1), TreeNode::leaf(2)),
        )
    }

    #[test]
    fn test_leaf() {
        let node: TreeNode<f64, u8> = TreeNode::leaf(4);
        assert!(node.is_leaf());
        assert_eq!(node.depth(), 0);
        assert_eq!(node.n_leaves(), 1);
        assert_eq!(node.classify(&[0.0]), 4);
    }

    #[test]
    fn test_shape() {
        let tree = stump();
        assert!(!tree.is_leaf());
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.n_leaves(), 3);
    }

    #[test]
    fn test_classify_uses_strict_less_than() {
        let tree = stump();
        assert_eq!(tree.classify(&[0.0, 2.4]), 0);
        // equal to the threshold goes right
        assert_eq!(tree.classify(&[0.0, 2.5]), 2);
        assert_eq!(tree.classify(&[-2.0, 3.0]), 1);
        assert_eq!(tree.classify(&[-1.0, 3.0]), 2);
    }
}
