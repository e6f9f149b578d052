//! Error types for Cocinar operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Main error type for Cocinar operations.
///
/// Covers incompatible matrix shapes, singular systems during regression,
/// empty recipe catalogs and invalid configuration.
///
/// # Examples
///
/// ```
/// use cocinar::error::CocinarError;
///
/// let err = CocinarError::DimensionMismatch {
///     expected: "10x5".to_string(),
///     actual: "10x4".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum CocinarError {
    /// Matrix/vector dimensions don't match for the operation.
    #[error("Matrix dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// A pivot fell below the elimination epsilon while inverting.
    #[error("Singular matrix detected: pivot = {pivot:e}, cannot invert")]
    SingularMatrix {
        /// Magnitude of the rejected pivot
        pivot: f64,
    },

    /// Clustering or planning was requested with no recipes.
    #[error("Empty corpus: {context}")]
    EmptyCorpus {
        /// Operation that needed recipes
        context: String,
    },

    /// Invalid hyperparameter value provided.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Configuration could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CocinarError {
    fn from(err: serde_json::Error) -> Self {
        CocinarError::Serialization(err.to_string())
    }
}

impl CocinarError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty corpus error
    #[must_use]
    pub fn empty_corpus(context: &str) -> Self {
        Self::EmptyCorpus {
            context: context.to_string(),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, CocinarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = CocinarError::dimension_mismatch("inner", 3, 2);
        let msg = err.to_string();
        assert!(msg.contains("dimension mismatch"));
        assert!(msg.contains("inner=3"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_singular_matrix_display() {
        let err = CocinarError::SingularMatrix { pivot: 1e-15 };
        assert!(err.to_string().contains("Singular matrix"));
    }

    #[test]
    fn test_empty_corpus_display() {
        let err = CocinarError::empty_corpus("k-means");
        assert_eq!(err.to_string(), "Empty corpus: k-means");
    }

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = CocinarError::invalid_hyperparameter("n_clusters", 0, "> 0");
        assert_eq!(
            err.to_string(),
            "Invalid hyperparameter: n_clusters = 0, expected > 0"
        );
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: CocinarError = parse.unwrap_err().into();
        assert!(matches!(err, CocinarError::Serialization(_)));
    }
}
