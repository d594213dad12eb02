//! Error types for normrecon operations.
//!
//! Construction of distributions and selection policies never aborts the
//! process: every configuration problem is reported through [`NormError`]
//! and the caller decides whether to propagate or stop.

use thiserror::Error;

/// Main error type for normrecon operations.
///
/// # Examples
///
/// ```
/// use normrecon::error::NormError;
///
/// let err = NormError::DimensionMismatch {
///     expected: "4x2".to_string(),
///     actual: "4x3".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NormError {
    /// Array shapes don't match for the operation.
    #[error("Array dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected shape description
        expected: String,
        /// Actual shape found
        actual: String,
    },

    /// A combined mean / pre-std-dev block must have an even row count.
    #[error("Invalid parameter block: row count {rows} is odd, expected an even number of rows")]
    InvalidParameterBlock {
        /// Row count of the rejected block
        rows: usize,
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

    /// Generic error with string message.
    #[error("{0}")]
    Other(String),
}

impl NormError {
    /// Create a shape mismatch error from two `(rows, cols)` shapes.
    #[must_use]
    pub fn shape_mismatch(context: &str, expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }
}

impl From<&str> for NormError {
    fn from(msg: &str) -> Self {
        NormError::Other(msg.to_string())
    }
}

impl From<String> for NormError {
    fn from(msg: String) -> Self {
        NormError::Other(msg)
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, NormError>;
