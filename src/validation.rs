//! Shape-contract validation and numeric-safety configuration.
//!
//! Every public operation validates the static trailing dimensions of its
//! inputs here before any arithmetic runs. Leading batch dimensions are
//! never constrained individually, only required to be mutually
//! broadcastable where an operation combines two operands.

use crate::error::{TransformError, TransformResult};
use numr::dtype::DType;

/// Controls whether numeric invariant assertions run for a call.
///
/// Shape errors are raised regardless of the mode. Unit-norm and
/// orthonormality assertions, inverse-trig range checks, and NaN/Inf
/// detection only run under [`CheckMode::Debug`]; [`CheckMode::Fast`]
/// trusts inputs and computes through, prioritizing throughput. The mode
/// is an explicit per-call value, so a call's behavior is fully
/// determined by its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// Skip invariant and NaN/Inf checks.
    #[default]
    Fast,
    /// Verify invariants and detect NaN/Inf, raising on violation.
    Debug,
}

impl CheckMode {
    /// True when invariant checks should run.
    pub fn debug(self) -> bool {
        matches!(self, CheckMode::Debug)
    }
}

/// Default absolute tolerance for unit-norm checks.
pub const DEFAULT_NORM_ATOL: f64 = 1e-3;

/// Selects the epsilon added to denominators for the given dtype.
///
/// Reduced-precision dtypes get a proportionally larger guard. The value
/// is ten times the smallest positive normal of the dtype, small enough
/// not to bias well-conditioned divisions while keeping `x / (0 + eps)`
/// finite.
pub fn select_eps_for_division(dtype: DType, op: &'static str) -> TransformResult<f64> {
    match dtype {
        DType::F32 => Ok(10.0 * f32::MIN_POSITIVE as f64),
        DType::F64 => Ok(10.0 * f64::MIN_POSITIVE),
        _ => Err(TransformError::UnsupportedDType { dtype, op }),
    }
}

/// Selects the epsilon used for additive perturbations for the given
/// dtype: ten times the machine epsilon.
pub fn select_eps_for_addition(dtype: DType, op: &'static str) -> TransformResult<f64> {
    match dtype {
        DType::F32 => Ok(10.0 * f32::EPSILON as f64),
        DType::F64 => Ok(10.0 * f64::EPSILON),
        _ => Err(TransformError::UnsupportedDType { dtype, op }),
    }
}

/// Validate that a dtype is floating point (F32 or F64).
pub fn check_float_dtype(dtype: DType, op: &'static str) -> TransformResult<()> {
    match dtype {
        DType::F32 | DType::F64 => Ok(()),
        _ => Err(TransformError::UnsupportedDType { dtype, op }),
    }
}

/// Validate that the last dimension of `shape` equals `expected`.
///
/// Arbitrary leading batch dimensions are allowed; a rank-0 shape always
/// fails.
pub fn check_trailing_dim(
    shape: &[usize],
    expected: usize,
    arg: &'static str,
) -> TransformResult<()> {
    match shape.last() {
        Some(&last) if last == expected => Ok(()),
        _ => Err(TransformError::InvalidShape {
            arg,
            reason: format!(
                "must have a last dimension of {}, got shape {:?}",
                expected, shape
            ),
        }),
    }
}

/// Validate that the two trailing dimensions of `shape` are `rows` x `cols`.
pub fn check_trailing_matrix(
    shape: &[usize],
    rows: usize,
    cols: usize,
    arg: &'static str,
) -> TransformResult<()> {
    let n = shape.len();
    if n < 2 || shape[n - 2] != rows || shape[n - 1] != cols {
        return Err(TransformError::InvalidShape {
            arg,
            reason: format!(
                "must have trailing dimensions {}x{}, got shape {:?}",
                rows, cols, shape
            ),
        });
    }
    Ok(())
}

/// Validate that two tensors have identical full shapes.
pub fn check_same_shape(
    lhs: &[usize],
    rhs: &[usize],
    arg: &'static str,
) -> TransformResult<()> {
    if lhs != rhs {
        return Err(TransformError::InvalidShape {
            arg,
            reason: format!("must have the same shape as its peer: {:?} vs {:?}", lhs, rhs),
        });
    }
    Ok(())
}

/// Compute the broadcast of two batch shapes under the usual rules:
/// dimensions align from the right, and each pair must be equal or
/// contain a 1.
pub fn broadcast_batch_shapes(
    lhs: &[usize],
    rhs: &[usize],
    context: &str,
) -> TransformResult<Vec<usize>> {
    let rank = lhs.len().max(rhs.len());
    let mut out = vec![0usize; rank];
    for i in 0..rank {
        let l = if i < rank - lhs.len() {
            1
        } else {
            lhs[i - (rank - lhs.len())]
        };
        let r = if i < rank - rhs.len() {
            1
        } else {
            rhs[i - (rank - rhs.len())]
        };
        out[i] = if l == r || r == 1 {
            l
        } else if l == 1 {
            r
        } else {
            return Err(TransformError::NotBroadcastable {
                lhs: lhs.to_vec(),
                rhs: rhs.to_vec(),
                context: context.to_string(),
            });
        };
    }
    Ok(out)
}

/// The leading batch dimensions of a shape, i.e. everything before the
/// `trailing` representation dimensions. Callers validate the trailing
/// dimensions first, so the slice is always in range.
pub fn batch_dims(shape: &[usize], trailing: usize) -> &[usize] {
    &shape[..shape.len() - trailing]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_trailing_dim() {
        assert!(check_trailing_dim(&[4], 4, "quaternion").is_ok());
        assert!(check_trailing_dim(&[7, 2, 4], 4, "quaternion").is_ok());
        assert!(check_trailing_dim(&[3], 4, "quaternion").is_err());
        assert!(check_trailing_dim(&[], 4, "quaternion").is_err());

        let err = check_trailing_dim(&[2], 3, "axis").unwrap_err();
        assert!(err.to_string().contains("'axis'"));
    }

    #[test]
    fn test_check_trailing_matrix() {
        assert!(check_trailing_matrix(&[3, 3], 3, 3, "rotation_matrix").is_ok());
        assert!(check_trailing_matrix(&[5, 3, 3], 3, 3, "rotation_matrix").is_ok());
        assert!(check_trailing_matrix(&[3], 3, 3, "rotation_matrix").is_err());
        assert!(check_trailing_matrix(&[3, 2], 3, 3, "rotation_matrix").is_err());
    }

    #[test]
    fn test_broadcast_batch_shapes() {
        assert_eq!(
            broadcast_batch_shapes(&[2, 1], &[3], "test").unwrap(),
            vec![2, 3]
        );
        assert_eq!(broadcast_batch_shapes(&[], &[5], "test").unwrap(), vec![5]);
        assert_eq!(
            broadcast_batch_shapes(&[4, 1, 2], &[4, 3, 1], "test").unwrap(),
            vec![4, 3, 2]
        );

        let err = broadcast_batch_shapes(&[2], &[3], "test").unwrap_err();
        assert!(err.to_string().contains("must be broadcastable"));
    }

    #[test]
    fn test_eps_tables() {
        let div32 = select_eps_for_division(DType::F32, "test").unwrap();
        let div64 = select_eps_for_division(DType::F64, "test").unwrap();
        assert!(div32 > div64);
        assert!(div64 > 0.0);

        let add32 = select_eps_for_addition(DType::F32, "test").unwrap();
        let add64 = select_eps_for_addition(DType::F64, "test").unwrap();
        assert!(add32 > add64);

        assert!(select_eps_for_division(DType::I64, "test").is_err());
        assert!(check_float_dtype(DType::U8, "test").is_err());
    }

    #[test]
    fn test_check_mode_default_is_fast() {
        assert_eq!(CheckMode::default(), CheckMode::Fast);
        assert!(!CheckMode::Fast.debug());
        assert!(CheckMode::Debug.debug());
    }
}
