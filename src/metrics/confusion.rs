use std::collections::BTreeSet;

use nalgebra::{DMatrix, DVector};

use crate::data::dataset::WholeNumber;
use crate::error::{Result, TreeError};

type ConfusionMatrix = DMatrix<usize>;

pub trait ClassificationMetrics<T: WholeNumber> {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// Rows are true classes and columns predicted classes, both in ascending class
    /// order over every class present in either vector.
    ///
    /// # Arguments
    ///
    /// * `y_true` - The true labels.
    /// * `y_pred` - The predicted labels.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidInput`] if the vectors differ in length or are
    /// empty.
    fn confusion_matrix(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<ConfusionMatrix> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::invalid(
                "Predictions and labels are of different sizes.",
            ));
        }
        if y_true.is_empty() {
            return Err(TreeError::invalid("Cannot score empty predictions."));
        }

        let classes = y_true
            .iter()
            .chain(y_pred.iter())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        let mut matrix = DMatrix::zeros(classes.len(), classes.len());

        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            let matrix_row = classes.binary_search(y_t).unwrap_or_default();
            let matrix_col = classes.binary_search(y_p).unwrap_or_default();
            matrix[(matrix_row, matrix_col)] += 1;
        }

        Ok(matrix)
    }

    /// Computes the share of predictions that match the true labels.
    ///
    /// # Errors
    ///
    /// Same as [`confusion_matrix`](Self::confusion_matrix).
    fn accuracy(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        let correct: usize = matrix.diagonal().iter().sum();

        Ok(correct as f64 / y_true.len() as f64)
    }
}
