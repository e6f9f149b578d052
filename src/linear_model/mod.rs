//! Linear models for regression.
//!
//! Ordinary Least Squares fitted in closed form through the normal
//! equations. Used to learn how a recipe's nutrition relates to the
//! satisfaction (mean rating) it earns.

use crate::error::{CocinarError, Result};
use crate::metrics::{r_squared, rmse};
use crate::primitives::{Matrix, Vector};
use crate::traits::{Estimator, Predictor};
use serde::{Deserialize, Serialize};

/// Ordinary Least Squares (OLS) linear regression.
///
/// Fits a linear model by minimizing the residual sum of squares between
/// observed targets and predicted targets:
///
/// ```text
/// y = X θ + ε
/// ```
///
/// # Solver
///
/// A constant column of ones is prepended to `X` (the bias term) and the
/// normal equations `θ = (XᵀX)⁻¹ Xᵀy` are solved with the Gauss-Jordan
/// inverse from [`Matrix::inverse`]. There is no regularization, so
/// collinear features or fewer samples than parameters fail with
/// `SingularMatrix`.
///
/// # Examples
///
/// ```
/// use cocinar::prelude::*;
///
/// // y = 2 + 3*x1 - x2
/// let x = Matrix::from_vec(4, 2, vec![
///     0.0, 0.0,
///     1.0, 0.0,
///     0.0, 1.0,
///     2.0, 3.0,
/// ]).expect("4x2");
/// let y = Vector::from_slice(&[2.0, 5.0, 1.0, 5.0]);
///
/// let model = LinearRegression::new().fit(&x, &y).expect("well-posed system");
/// assert!((model.intercept() - 2.0).abs() < 1e-9);
/// assert!((model.r_squared() - 1.0).abs() < 1e-9);
/// ```
///
/// # Performance
///
/// - Time complexity: O(n·p² + p³) where n = samples, p = features
/// - Space complexity: O(np)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Whether to fit an intercept.
    fit_intercept: bool,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    /// Creates a new `LinearRegression` that fits an intercept.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fit_intercept: true,
        }
    }

    /// Sets whether to fit an intercept term. Without one the bias
    /// coefficient is fixed at 0.
    #[must_use]
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Returns whether an intercept is fitted.
    #[must_use]
    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }
}

impl Estimator for LinearRegression {
    type Model = RegressionModel;

    /// Fits the model using the normal equations.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `DimensionMismatch` if the row count differs from the target length
    /// - `SingularMatrix` if there are no samples, fewer samples than
    ///   parameters, or the features are collinear
    fn fit(&self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<RegressionModel> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.len() {
            return Err(CocinarError::dimension_mismatch(
                "targets",
                n_samples,
                y.len(),
            ));
        }

        let n_params = if self.fit_intercept {
            n_features + 1
        } else {
            n_features
        };

        if n_samples == 0 || n_samples < n_params {
            return Err(CocinarError::SingularMatrix { pivot: 0.0 });
        }

        let x_design = if self.fit_intercept {
            x.with_bias_column()
        } else {
            x.clone()
        };

        // θ = (XᵀX)⁻¹ Xᵀy
        let xt = x_design.transpose();
        let xtx = xt.matmul(&x_design)?;
        let xty = xt.matvec(y)?;
        let theta = xtx.inverse()?.matvec(&xty)?;

        let coefficients = if self.fit_intercept {
            theta.into_vec()
        } else {
            std::iter::once(0.0).chain(theta.into_vec()).collect()
        };

        let mut model = RegressionModel {
            coefficients,
            r_squared: 0.0,
            rmse: 0.0,
            n_samples,
        };

        let y_pred = model.predict(x)?;
        model.r_squared = r_squared(&y_pred, y);
        model.rmse = rmse(&y_pred, y);

        tracing::debug!(
            n_samples,
            n_features,
            r_squared = model.r_squared,
            rmse = model.rmse,
            "fitted linear regression"
        );

        Ok(model)
    }
}

/// A fitted OLS model. Immutable once fitted.
///
/// Deserialization rejects payloads without a bias coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RegressionModelData")]
pub struct RegressionModel {
    /// Bias followed by one weight per feature.
    coefficients: Vec<f64>,
    /// Coefficient of determination on the training data (may be negative).
    r_squared: f64,
    /// Root mean squared error on the training data.
    rmse: f64,
    /// Number of training rows.
    n_samples: usize,
}

/// Wire form of [`RegressionModel`], checked before it becomes a model.
#[derive(Deserialize)]
struct RegressionModelData {
    coefficients: Vec<f64>,
    r_squared: f64,
    rmse: f64,
    n_samples: usize,
}

impl TryFrom<RegressionModelData> for RegressionModel {
    type Error = CocinarError;

    fn try_from(data: RegressionModelData) -> Result<Self> {
        if data.coefficients.is_empty() {
            return Err(CocinarError::Serialization(
                "Regression model needs at least a bias coefficient".to_string(),
            ));
        }
        Ok(Self {
            coefficients: data.coefficients,
            r_squared: data.r_squared,
            rmse: data.rmse,
            n_samples: data.n_samples,
        })
    }
}

impl RegressionModel {
    /// Bias followed by one weight per feature.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Bias term θ₀.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.coefficients[0]
    }

    /// Per-feature weights θ₁..θₚ.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.coefficients[1..]
    }

    /// Number of features the model expects.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Training R².
    #[must_use]
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Training RMSE.
    #[must_use]
    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    /// Number of rows the model was fitted on.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// θ₀ + Σ θᵢ·featureᵢ for one feature row.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the row length differs from
    /// [`Self::n_features`].
    pub fn predict_one(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.n_features() {
            return Err(CocinarError::dimension_mismatch(
                "features",
                self.n_features(),
                features.len(),
            ));
        }
        Ok(self.intercept()
            + self
                .weights()
                .iter()
                .zip(features)
                .map(|(w, f)| w * f)
                .sum::<f64>())
    }
}

impl Predictor for RegressionModel {
    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>> {
        if x.n_cols() != self.n_features() {
            return Err(CocinarError::dimension_mismatch(
                "features",
                self.n_features(),
                x.n_cols(),
            ));
        }
        (0..x.n_rows())
            .map(|i| self.predict_one(x.row(i).as_slice()))
            .collect::<Result<Vec<f64>>>()
            .map(Vector::from_vec)
    }
}

#[cfg(test)]
#[path = "linear_model_tests.rs"]
mod tests;
