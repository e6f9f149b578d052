//! Core traits for fitted models.
//!
//! Fitting is separated from prediction: an [`Estimator`] is a stateless
//! configuration that produces an immutable model, and the model implements
//! [`Predictor`]. A fitted model is therefore never mutated after
//! construction and can be cached or shared freely.

use crate::error::Result;
use crate::metrics::r_squared;
use crate::primitives::{Matrix, Vector};

/// Supervised learner that turns training data into a fitted model.
///
/// # Examples
///
/// ```
/// use cocinar::prelude::*;
///
/// // y = 2x + 1
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).expect("4x1");
/// let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
///
/// let model = LinearRegression::new().fit(&x, &y).expect("well-posed system");
/// assert!(model.score(&x, &y).expect("same width") > 0.99);
/// ```
pub trait Estimator {
    /// The fitted model type.
    type Model: Predictor;

    /// Fits a model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, singular matrix, etc.).
    fn fit(&self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<Self::Model>;
}

/// A fitted model that maps feature rows to target values.
pub trait Predictor {
    /// Predicts one target value per row of `x`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` has the wrong number of columns.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>>;

    /// Computes R² of the model's predictions against `y`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` and `y` disagree with the model
    /// or each other.
    fn score(&self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        if y_pred.len() != y.len() {
            return Err(crate::error::CocinarError::dimension_mismatch(
                "targets",
                y_pred.len(),
                y.len(),
            ));
        }
        Ok(r_squared(&y_pred, y))
    }
}
