//! # gini-tree
//!
//! `gini-tree` is a from-scratch CART decision tree classifier. Trees are grown by
//! greedy recursive partitioning on the split with the lowest weighted Gini
//! impurity, and stop at a maximum depth, at pure nodes, or when no split separates
//! the rows.
//!
//! ## Example Usage
//!
//! ```rust
//! use gini_tree::data::dataset::Dataset;
//! use gini_tree::trees::classifier::DecisionTreeClassifier;
//! use nalgebra::{DMatrix, DVector};
//! use std::collections::HashMap;
//!
//! let x = DMatrix::from_row_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);
//! let y = DVector::from_vec(vec![0u32, 0, 1, 1]);
//! let dataset = Dataset::new(x, y);
//!
//! let mut model = DecisionTreeClassifier::with_params(2);
//! model.fit(&dataset).unwrap();
//!
//! let test_x = DMatrix::from_row_slice(2, 1, &[1.5, 3.5]);
//! let predictions = model.predict(&test_x).unwrap();
//! assert_eq!(predictions, DVector::from_vec(vec![0, 1]));
//!
//! let class_names = HashMap::from([(0, "small".to_string()), (1, "large".to_string())]);
//! model.print_tree(&["size"], &class_names).unwrap();
//! ```

/// Dataset and data manipulation utilities
pub mod data;
/// Error type shared by the crate
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Decision trees
pub mod trees;

pub use error::{Result, TreeError};
