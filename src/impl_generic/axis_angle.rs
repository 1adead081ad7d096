//! Generic axis-angle implementation.
//!
//! Conversions from Euler angles and rotation matrices route through the
//! quaternion representation; direct formulas exist only where they are
//! simpler than the quaternion detour (rotation vectors, Rodrigues
//! rotation).

use crate::error::TransformResult;
use crate::impl_generic::batch::{
    broadcast_to_batch, broadcast_to_shape, cast_to_dtype, check_normalized, map_elementwise,
    nonzero_sign_f64,
};
use crate::impl_generic::quaternion::{
    norm_mask, quaternion_from_euler_impl,
    quaternion_from_euler_with_small_angles_approximation_impl,
    quaternion_from_rotation_matrix_impl,
};
use crate::impl_generic::safe_ops::safe_unsigned_div_impl;
use crate::impl_generic::vector::{vector_cross_impl, vector_dot_impl, vector_norm_impl};
use crate::validation::{
    batch_dims, broadcast_batch_shapes, check_trailing_dim, check_trailing_matrix,
    select_eps_for_addition, select_eps_for_division, CheckMode, DEFAULT_NORM_ATOL,
};
use numr::dtype::DType;
use numr::ops::{CompareOps, ReduceOps, ScalarOps, TensorOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Fallback axis used when the rotation is (near) identity and the true
/// axis is undetermined.
const DEFAULT_AXIS: [f64; 3] = [1.0, 0.0, 0.0];

/// Threshold on the quaternion vector norm below which the axis falls
/// back to [`DEFAULT_AXIS`].
const VECTOR_NORM_THRESHOLD: f64 = 1e-6;

/// Converts a normalized quaternion to an axis-angle pair.
pub fn axis_angle_from_quaternion_impl<R, C>(
    client: &C,
    quaternion: &Tensor<R>,
    checks: CheckMode,
) -> TransformResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(quaternion.shape(), 4, "quaternion")?;
    check_normalized(quaternion, 4, "quaternion", DEFAULT_NORM_ATOL, checks)?;

    let eps_add = select_eps_for_addition(quaternion.dtype(), "axis_angle_from_quaternion")?;
    let eps_div = select_eps_for_division(quaternion.dtype(), "axis_angle_from_quaternion")?;
    let src = quaternion.contiguous()?;
    let data: Vec<f64> = src.to_vec();

    let n = data.len() / 4;
    let mut axes = Vec::with_capacity(n * 3);
    let mut angles = Vec::with_capacity(n);
    for i in 0..n {
        let (x, y, z, w) = (
            data[i * 4],
            data[i * 4 + 1],
            data[i * 4 + 2],
            data[i * 4 + 3],
        );
        let norm = (x * x + y * y + z * z).sqrt();
        angles.push(2.0 * norm.atan2(w.abs() + eps_add));
        if norm < VECTOR_NORM_THRESHOLD {
            axes.extend_from_slice(&DEFAULT_AXIS);
        } else {
            let s = nonzero_sign_f64(w);
            let d = norm + eps_div;
            axes.push(s * x / d);
            axes.push(s * y / d);
            axes.push(s * z / d);
        }
    }

    let batch = batch_dims(quaternion.shape(), 1);
    let mut axis_shape = batch.to_vec();
    axis_shape.push(3);
    let mut angle_shape = batch.to_vec();
    angle_shape.push(1);
    let axis = Tensor::<R>::from_slice(&axes, &axis_shape, quaternion.device());
    let angle = Tensor::<R>::from_slice(&angles, &angle_shape, quaternion.device());
    Ok((
        cast_to_dtype(client, axis, quaternion.dtype())?,
        cast_to_dtype(client, angle, quaternion.dtype())?,
    ))
}

/// Converts Euler angles to an axis-angle pair, via the quaternion.
pub fn axis_angle_from_euler_impl<R, C>(
    client: &C,
    angles: &Tensor<R>,
) -> TransformResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    let quaternion = quaternion_from_euler_impl(client, angles)?;
    axis_angle_from_quaternion_impl(client, &quaternion, CheckMode::Fast)
}

/// Small-angle Euler conversion, via the approximate quaternion.
pub fn axis_angle_from_euler_with_small_angles_approximation_impl<R, C>(
    client: &C,
    angles: &Tensor<R>,
) -> TransformResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    let quaternion = quaternion_from_euler_with_small_angles_approximation_impl(client, angles)?;
    axis_angle_from_quaternion_impl(client, &quaternion, CheckMode::Fast)
}

/// Converts a rotation matrix to an axis-angle pair, via the quaternion.
///
/// The result is one of the two valid `(axis, angle)` / `(-axis, -angle)`
/// pairs, chosen deterministically.
pub fn axis_angle_from_rotation_matrix_impl<R, C>(
    client: &C,
    rotation_matrix: &Tensor<R>,
    checks: CheckMode,
) -> TransformResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_matrix(rotation_matrix.shape(), 3, 3, "rotation_matrix")?;
    let quaternion = quaternion_from_rotation_matrix_impl(client, rotation_matrix, checks)?;
    axis_angle_from_quaternion_impl(client, &quaternion, CheckMode::Fast)
}

/// Splits a rotation vector into `axis = r / ||r||` and `angle = ||r||`.
pub fn axis_angle_from_rotation_vector_impl<R, C>(
    client: &C,
    rotation_vector: &Tensor<R>,
) -> TransformResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(rotation_vector.shape(), 3, "rotation_vector")?;
    let angle = vector_norm_impl(client, rotation_vector)?;
    let axis = safe_unsigned_div_impl(client, rotation_vector, &angle, None, CheckMode::Fast)?;
    Ok((axis, angle))
}

/// Inverse rotation: same axis, negated angle.
pub fn axis_angle_inverse_impl<R, C>(
    client: &C,
    axis: &Tensor<R>,
    angle: &Tensor<R>,
    checks: CheckMode,
) -> TransformResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(axis.shape(), 3, "axis")?;
    check_trailing_dim(angle.shape(), 1, "angle")?;
    check_normalized(axis, 3, "axis", DEFAULT_NORM_ATOL, checks)?;
    Ok((axis.clone(), client.neg(angle)?))
}

/// Unit-norm mask for the axis, shape `[..., 1]`.
pub fn axis_angle_is_normalized_impl<R, C>(
    client: &C,
    axis: &Tensor<R>,
    angle: &Tensor<R>,
    atol: Option<f64>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(axis.shape(), 3, "axis")?;
    check_trailing_dim(angle.shape(), 1, "angle")?;
    norm_mask(client, axis, atol)
}

/// Rodrigues rotation
/// `p cos(theta) + (a x p) sin(theta) + a (a . p) (1 - cos(theta))`.
pub fn axis_angle_rotate_impl<R, C>(
    client: &C,
    point: &Tensor<R>,
    axis: &Tensor<R>,
    angle: &Tensor<R>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(point.shape(), 3, "point")?;
    check_trailing_dim(axis.shape(), 3, "axis")?;
    check_trailing_dim(angle.shape(), 1, "angle")?;
    check_normalized(axis, 3, "axis", DEFAULT_NORM_ATOL, checks)?;

    let batch = broadcast_batch_shapes(
        batch_dims(point.shape(), 1),
        batch_dims(axis.shape(), 1),
        "axis_angle_rotate",
    )?;
    let batch = broadcast_batch_shapes(&batch, batch_dims(angle.shape(), 1), "axis_angle_rotate")?;

    let p = broadcast_to_batch(point, &batch, &[3])?;
    let a = broadcast_to_batch(axis, &batch, &[3])?;
    let t = broadcast_to_batch(angle, &batch, &[1])?;

    let cos_t = map_elementwise(client, &t, f64::cos)?;
    let sin_t = map_elementwise(client, &t, f64::sin)?;
    let dot = vector_dot_impl(client, &a, &p)?;
    let cross = vector_cross_impl(client, &a, &p)?;

    let mut full = batch;
    full.push(3);
    let cos3 = broadcast_to_shape(&cos_t, &full)?;
    let sin3 = broadcast_to_shape(&sin_t, &full)?;
    let term1 = client.mul(&p, &cos3)?;
    let term2 = client.mul(&cross, &sin3)?;
    let one_minus_cos = client.add_scalar(&client.neg(&cos_t)?, 1.0)?;
    let scale = client.mul(&dot, &one_minus_cos)?;
    let scale3 = broadcast_to_shape(&scale, &full)?;
    let term3 = client.mul(&a, &scale3)?;

    Ok(client.add(&client.add(&term1, &term2)?, &term3)?)
}
