//! Broadcast materialization and host-kernel helpers.
//!
//! The engine client exposes no tensor-level trigonometry, so the
//! transcendental steps of the conversions run as host kernels: operands
//! are broadcast to a common batch shape, copied out with `to_vec`,
//! mapped in `f64`, and rebuilt with `Tensor::from_slice`. Results are
//! cast back to the input dtype so dtype-keyed epsilon selection stays
//! meaningful end to end.

use crate::error::{TransformError, TransformResult};
use crate::validation::CheckMode;
use numr::dtype::DType;
use numr::ops::TensorOps;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Number of batch elements in a batch shape (1 for a scalar instance).
pub(crate) fn batch_count(batch: &[usize]) -> usize {
    batch.iter().product()
}

/// Last dimension of a tensor, failing on rank-0 inputs.
pub(crate) fn last_dim<R: Runtime>(t: &Tensor<R>, arg: &'static str) -> TransformResult<usize> {
    t.shape()
        .last()
        .copied()
        .ok_or_else(|| TransformError::InvalidShape {
            arg,
            reason: "must have at least one dimension".to_string(),
        })
}

/// Host-side sign with `sign(0) = 1`.
pub(crate) fn nonzero_sign_f64(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Materializes `t` at `target`, prepending singleton dimensions if the
/// ranks differ. The result is contiguous and safe to `to_vec`.
pub(crate) fn broadcast_to_shape<R: Runtime>(
    t: &Tensor<R>,
    target: &[usize],
) -> TransformResult<Tensor<R>> {
    if t.shape() == target {
        return Ok(t.contiguous()?);
    }
    let mut padded = vec![1usize; target.len().saturating_sub(t.ndim())];
    padded.extend_from_slice(t.shape());
    let view = t.contiguous()?.reshape(&padded)?;
    Ok(view.broadcast_to(target)?.contiguous()?)
}

/// Materializes `t` at `batch` leading dimensions plus its fixed trailing
/// dimensions.
pub(crate) fn broadcast_to_batch<R: Runtime>(
    t: &Tensor<R>,
    batch: &[usize],
    trailing: &[usize],
) -> TransformResult<Tensor<R>> {
    let mut target = batch.to_vec();
    target.extend_from_slice(trailing);
    broadcast_to_shape(t, &target)
}

/// Broadcasts two tensors against each other over their full shapes,
/// failing with the broadcastability error when they conflict.
pub(crate) fn broadcast_pair_full<R: Runtime>(
    a: &Tensor<R>,
    b: &Tensor<R>,
    context: &str,
) -> TransformResult<(Tensor<R>, Tensor<R>)> {
    let shape = crate::validation::broadcast_batch_shapes(a.shape(), b.shape(), context)?;
    Ok((broadcast_to_shape(a, &shape)?, broadcast_to_shape(b, &shape)?))
}

/// Casts `t` to `dtype` unless it already has it.
pub(crate) fn cast_to_dtype<R, C>(
    client: &C,
    t: Tensor<R>,
    dtype: DType,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    if t.dtype() == dtype {
        Ok(t)
    } else {
        Ok(client.cast(&t, dtype)?)
    }
}

/// Applies a scalar `f64` kernel to every element of `t`, preserving its
/// shape and dtype.
pub(crate) fn map_elementwise<R, C, F>(
    client: &C,
    t: &Tensor<R>,
    f: F,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
    F: Fn(f64) -> f64,
{
    let src = t.contiguous()?;
    let data: Vec<f64> = src.to_vec();
    let out: Vec<f64> = data.iter().map(|&x| f(x)).collect();
    let result = Tensor::<R>::from_slice(&out, t.shape(), t.device());
    cast_to_dtype(client, result, t.dtype())
}

/// Debug-mode scan for NaN/Inf.
pub(crate) fn check_all_finite<R: Runtime>(
    t: &Tensor<R>,
    context: &str,
    checks: CheckMode,
) -> TransformResult<()> {
    if !checks.debug() {
        return Ok(());
    }
    let data: Vec<f64> = t.contiguous()?.to_vec();
    if data.iter().any(|v| !v.is_finite()) {
        return Err(TransformError::NonFinite {
            context: context.to_string(),
        });
    }
    Ok(())
}

/// Debug-mode scan asserting every element is strictly positive.
pub(crate) fn check_all_positive<R: Runtime>(
    t: &Tensor<R>,
    context: &str,
    checks: CheckMode,
) -> TransformResult<()> {
    if !checks.debug() {
        return Ok(());
    }
    let data: Vec<f64> = t.contiguous()?.to_vec();
    if data.iter().any(|v| !(*v > 0.0)) {
        return Err(TransformError::OutOfRange {
            context: context.to_string(),
            min: 0.0,
            max: f64::INFINITY,
        });
    }
    Ok(())
}

/// Debug-mode scan asserting every element lies inside `[min, max]`, or
/// `(min, max)` when `open_bounds` is set.
pub(crate) fn check_in_range<R: Runtime>(
    t: &Tensor<R>,
    min: f64,
    max: f64,
    open_bounds: bool,
    context: &str,
    checks: CheckMode,
) -> TransformResult<()> {
    if !checks.debug() {
        return Ok(());
    }
    let data: Vec<f64> = t.contiguous()?.to_vec();
    let outside = |v: &f64| {
        if open_bounds {
            *v <= min || *v >= max
        } else {
            *v < min || *v > max
        }
    };
    if data.iter().any(outside) {
        return Err(TransformError::OutOfRange {
            context: context.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

/// Debug-mode unit-norm assertion over the last `trailing` components of
/// each batch element.
pub(crate) fn check_normalized<R: Runtime>(
    t: &Tensor<R>,
    trailing: usize,
    arg: &'static str,
    atol: f64,
    checks: CheckMode,
) -> TransformResult<()> {
    if !checks.debug() {
        return Ok(());
    }
    let data: Vec<f64> = t.contiguous()?.to_vec();
    for chunk in data.chunks(trailing) {
        let norm = chunk.iter().map(|v| v * v).sum::<f64>().sqrt();
        if (norm - 1.0).abs() >= atol {
            return Err(TransformError::NotNormalized {
                arg,
                message: format!("norm {} deviates from 1 by more than {}", norm, atol),
            });
        }
    }
    Ok(())
}
