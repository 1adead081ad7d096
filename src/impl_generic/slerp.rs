//! Generic slerp implementation.
//!
//! Both variants compute two weights through the guarded trigonometric
//! ratio and combine them with a weighted sum. The guarded ratio returns
//! `factor` for angles near zero, so the interpolation degrades to lerp
//! between nearly parallel inputs instead of dividing by a vanishing
//! sine.

use crate::error::TransformResult;
use crate::impl_generic::batch::{broadcast_pair_full, check_normalized, map_elementwise};
use crate::impl_generic::safe_ops::{
    nonzero_sign_impl, safe_shrink_impl, safe_sinpx_div_sinx_impl,
};
use crate::impl_generic::vector::{vector_dot_impl, vector_l2_normalize_impl};
use crate::traits::slerp::InterpolationMethod;
use crate::validation::{check_same_shape, check_trailing_dim, CheckMode, DEFAULT_NORM_ATOL};
use numr::dtype::DType;
use numr::ops::{CompareOps, ConditionalOps, ReduceOps, ScalarOps, TensorOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Dot product over the last axis, shrunk into `[-1, 1]` so it is safe
/// for `acos`.
fn safe_dot<R, C>(
    client: &C,
    v1: &Tensor<R>,
    v2: &Tensor<R>,
    eps: Option<f64>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + RuntimeClient<R>,
{
    let dot = vector_dot_impl(client, v1, v2)?;
    safe_shrink_impl(client, &dot, -1.0, 1.0, false, eps, checks)
}

/// Slerp weights for two normalized quaternions, resolving the
/// hemisphere ambiguity toward the shorter great-circle path.
pub fn slerp_quaternion_weights_impl<R, C>(
    client: &C,
    quaternion1: &Tensor<R>,
    quaternion2: &Tensor<R>,
    percent: f64,
    eps: Option<f64>,
    checks: CheckMode,
) -> TransformResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R>
        + ScalarOps<R>
        + ReduceOps<R>
        + CompareOps<R>
        + ConditionalOps<R>
        + RuntimeClient<R>,
{
    check_trailing_dim(quaternion1.shape(), 4, "quaternion1")?;
    check_trailing_dim(quaternion2.shape(), 4, "quaternion2")?;
    check_same_shape(quaternion1.shape(), quaternion2.shape(), "quaternion2")?;
    check_normalized(quaternion1, 4, "quaternion1", DEFAULT_NORM_ATOL, checks)?;
    check_normalized(quaternion2, 4, "quaternion2", DEFAULT_NORM_ATOL, checks)?;

    let dot = safe_dot(client, quaternion1, quaternion2, eps, checks)?;
    // The angle between the rotations, not the 4d vectors: the shorter
    // path is taken by measuring against |dot| and carrying the sign
    // into the first weight.
    let theta = map_elementwise(client, &dot, |d| d.abs().acos())?;
    let scale1 = safe_sinpx_div_sinx_impl(client, &theta, 1.0 - percent, eps, checks)?;
    let scale2 = safe_sinpx_div_sinx_impl(client, &theta, percent, eps, checks)?;
    let sign = nonzero_sign_impl(client, &dot)?;
    let scale1 = client.mul(&scale1, &sign)?;
    Ok((scale1, scale2))
}

/// Slerp weights for two general vectors; inputs are normalized first
/// and no hemisphere correction applies.
pub fn slerp_vector_weights_impl<R, C>(
    client: &C,
    vector1: &Tensor<R>,
    vector2: &Tensor<R>,
    percent: f64,
    eps: Option<f64>,
    checks: CheckMode,
) -> TransformResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + RuntimeClient<R>,
{
    check_same_shape(vector1.shape(), vector2.shape(), "vector2")?;
    let normalized1 = vector_l2_normalize_impl(client, vector1, eps)?;
    let normalized2 = vector_l2_normalize_impl(client, vector2, eps)?;
    let dot = safe_dot(client, &normalized1, &normalized2, eps, checks)?;
    let theta = map_elementwise(client, &dot, f64::acos)?;
    let scale1 = safe_sinpx_div_sinx_impl(client, &theta, 1.0 - percent, eps, checks)?;
    let scale2 = safe_sinpx_div_sinx_impl(client, &theta, percent, eps, checks)?;
    Ok((scale1, scale2))
}

/// Weighted sum `weight1 * vector1 + weight2 * vector2`.
pub fn slerp_interpolate_with_weights_impl<R, C>(
    client: &C,
    vector1: &Tensor<R>,
    vector2: &Tensor<R>,
    weight1: &Tensor<R>,
    weight2: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    let (w1, v1) = broadcast_pair_full(weight1, vector1, "slerp_interpolate_with_weights")?;
    let (w2, v2) = broadcast_pair_full(weight2, vector2, "slerp_interpolate_with_weights")?;
    let term1 = client.mul(&w1, &v1)?;
    let term2 = client.mul(&w2, &v2)?;
    Ok(client.add(&term1, &term2)?)
}

/// Interpolates between two vectors or quaternions, dispatching on the
/// method.
pub fn slerp_interpolate_impl<R, C>(
    client: &C,
    vector1: &Tensor<R>,
    vector2: &Tensor<R>,
    percent: f64,
    method: InterpolationMethod,
    eps: Option<f64>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R>
        + ScalarOps<R>
        + ReduceOps<R>
        + CompareOps<R>
        + ConditionalOps<R>
        + RuntimeClient<R>,
{
    let (weight1, weight2) = match method {
        InterpolationMethod::Quaternion => {
            slerp_quaternion_weights_impl(client, vector1, vector2, percent, eps, checks)?
        }
        InterpolationMethod::Vector => {
            slerp_vector_weights_impl(client, vector1, vector2, percent, eps, checks)?
        }
    };
    slerp_interpolate_with_weights_impl(client, vector1, vector2, &weight1, &weight2)
}
