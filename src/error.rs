//! Errors returned by the tree, the dataset helpers and the metrics.
use thiserror::Error;

/// Errors that can occur while fitting, querying or printing a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Shape mismatch, invalid value, or a model used before `fit`.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A partition with no rows reached a routine that needs at least one.
    #[error("Cannot evaluate an empty partition.")]
    EmptyPartition,
    /// Writing a tree dump failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Reading a CSV dataset failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TreeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TreeError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;
