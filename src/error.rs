//! Error types for transformation operations.
//!
//! Two kinds of failure exist and stay distinguishable:
//!
//! - Shape/contract errors ([`TransformError::InvalidShape`],
//!   [`TransformError::NotBroadcastable`]) are raised unconditionally,
//!   before any arithmetic runs.
//! - Invariant/numeric errors ([`TransformError::NotNormalized`],
//!   [`TransformError::OutOfRange`], [`TransformError::NonFinite`]) are
//!   raised only when a call runs with [`CheckMode::Debug`]; the default
//!   mode trusts inputs and computes through.
//!
//! [`CheckMode::Debug`]: crate::validation::CheckMode

use std::fmt;

use numr::dtype::DType;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors that can occur during transformation operations.
#[derive(Debug, Clone)]
pub enum TransformError {
    /// A static trailing dimension disagrees with the representation
    /// contract. The message names the offending argument.
    InvalidShape {
        arg: &'static str,
        reason: String,
    },

    /// Two operands' batch shapes cannot be broadcast together.
    NotBroadcastable {
        lhs: Vec<usize>,
        rhs: Vec<usize>,
        context: String,
    },

    /// A unit-norm or orthonormality assertion failed (debug mode only).
    NotNormalized {
        arg: &'static str,
        message: String,
    },

    /// A value fed to an inverse trigonometric guard was outside the
    /// assumed interval (debug mode only).
    OutOfRange {
        context: String,
        min: f64,
        max: f64,
    },

    /// NaN or Inf detected after a guarded operation (debug mode only).
    NonFinite { context: String },

    /// The operation does not support the given dtype.
    UnsupportedDType {
        dtype: DType,
        op: &'static str,
    },

    /// Error from an underlying numr operation.
    NumrError(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { arg, reason } => {
                write!(f, "'{}' {}", arg, reason)
            }
            Self::NotBroadcastable { lhs, rhs, context } => {
                write!(
                    f,
                    "batch shapes {:?} and {:?} must be broadcastable in {}",
                    lhs, rhs, context
                )
            }
            Self::NotNormalized { arg, message } => {
                write!(f, "'{}' is not normalized: {}", arg, message)
            }
            Self::OutOfRange { context, min, max } => {
                write!(
                    f,
                    "value outside of range [{}, {}] in {}",
                    min, max, context
                )
            }
            Self::NonFinite { context } => {
                write!(f, "Inf or NaN detected in {}", context)
            }
            Self::UnsupportedDType { dtype, op } => {
                write!(f, "{} does not support dtype {:?}", op, dtype)
            }
            Self::NumrError(msg) => {
                write!(f, "numr error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TransformError {}

impl From<numr::error::Error> for TransformError {
    fn from(err: numr::error::Error) -> Self {
        Self::NumrError(err.to_string())
    }
}

impl TransformError {
    /// True for the shape/contract kind, which is raised regardless of
    /// the check mode.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidShape { .. } | Self::NotBroadcastable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_names_argument() {
        let err = TransformError::InvalidShape {
            arg: "axis",
            reason: "must have a last dimension of 3, got shape [2]".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'axis'"));
        assert!(msg.contains("3"));
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_not_broadcastable_message() {
        let err = TransformError::NotBroadcastable {
            lhs: vec![2],
            rhs: vec![3],
            context: "quaternion_multiply".to_string(),
        };
        assert!(err.to_string().contains("must be broadcastable"));
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_invariant_errors_are_not_shape_errors() {
        let err = TransformError::NonFinite {
            context: "safe_unsigned_div".to_string(),
        };
        assert!(!err.is_shape_error());
    }
}
