//! Generic quaternion implementation.
//!
//! Quaternions are `[x, y, z, w]` with the scalar part last. Conversions
//! validate trailing dimensions, materialize operands at their broadcast
//! batch shape, and run the trigonometric kernels on the host, following
//! the same split between tensor ops and host kernels used everywhere in
//! this crate.

use crate::error::TransformResult;
use crate::impl_generic::batch::{
    batch_count, broadcast_to_batch, broadcast_to_shape, cast_to_dtype, check_normalized,
    map_elementwise, nonzero_sign_f64,
};
use crate::impl_generic::rotation_matrix_3d::assert_rotation_matrix_normalized_impl;
use crate::impl_generic::safe_ops::{safe_shrink_impl, safe_unsigned_div_impl};
use crate::impl_generic::vector::{vector_dot_impl, vector_norm_impl};
use crate::validation::{
    batch_dims, broadcast_batch_shapes, check_float_dtype, check_trailing_dim,
    check_trailing_matrix, select_eps_for_addition, select_eps_for_division, CheckMode,
    DEFAULT_NORM_ATOL,
};
use numr::dtype::DType;
use numr::ops::{CompareOps, RandomOps, ReduceOps, ScalarOps, TensorOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Converts an axis-angle pair to a quaternion:
/// `q = (axis * sin(theta/2), cos(theta/2))`.
pub fn quaternion_from_axis_angle_impl<R, C>(
    client: &C,
    axis: &Tensor<R>,
    angle: &Tensor<R>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(axis.shape(), 3, "axis")?;
    check_trailing_dim(angle.shape(), 1, "angle")?;
    check_normalized(axis, 3, "axis", DEFAULT_NORM_ATOL, checks)?;

    let batch = broadcast_batch_shapes(
        batch_dims(axis.shape(), 1),
        batch_dims(angle.shape(), 1),
        "quaternion_from_axis_angle",
    )?;
    let axis_b = broadcast_to_batch(axis, &batch, &[3])?;
    let angle_b = broadcast_to_batch(angle, &batch, &[1])?;
    let axis_data: Vec<f64> = axis_b.to_vec();
    let angle_data: Vec<f64> = angle_b.to_vec();

    let n = batch_count(&batch);
    let mut quats = Vec::with_capacity(n * 4);
    for i in 0..n {
        let half = angle_data[i] / 2.0;
        let (s, c) = (half.sin(), half.cos());
        quats.push(axis_data[i * 3] * s);
        quats.push(axis_data[i * 3 + 1] * s);
        quats.push(axis_data[i * 3 + 2] * s);
        quats.push(c);
    }

    let mut shape = batch;
    shape.push(4);
    let out = Tensor::<R>::from_slice(&quats, &shape, axis.device());
    cast_to_dtype(client, out, axis.dtype())
}

/// Shared Euler kernel; `half_trig` maps a half angle to its (sin, cos).
fn from_euler_kernel<R, C>(
    client: &C,
    angles: &Tensor<R>,
    half_trig: fn(f64) -> (f64, f64),
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(angles.shape(), 3, "angles")?;
    let src = angles.contiguous()?;
    let data: Vec<f64> = src.to_vec();

    let n = data.len() / 3;
    let mut quats = Vec::with_capacity(n * 4);
    for i in 0..n {
        let (sx, cx) = half_trig(data[i * 3] / 2.0);
        let (sy, cy) = half_trig(data[i * 3 + 1] / 2.0);
        let (sz, cz) = half_trig(data[i * 3 + 2] / 2.0);
        // Closed form of qz * qy * qx, matching R = Rz * Ry * Rx.
        quats.push(sx * cy * cz - cx * sy * sz);
        quats.push(cx * sy * cz + sx * cy * sz);
        quats.push(cx * cy * sz - sx * sy * cz);
        quats.push(cx * cy * cz + sx * sy * sz);
    }

    let mut shape = batch_dims(angles.shape(), 1).to_vec();
    shape.push(4);
    let out = Tensor::<R>::from_slice(&quats, &shape, angles.device());
    cast_to_dtype(client, out, angles.dtype())
}

/// Converts Euler angles to a quaternion.
pub fn quaternion_from_euler_impl<R, C>(
    client: &C,
    angles: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    from_euler_kernel(client, angles, |h| (h.sin(), h.cos()))
}

/// Small-angle Euler conversion with `sin(x) ~ x`, `cos(x) ~ 1 - x^2/2`.
pub fn quaternion_from_euler_with_small_angles_approximation_impl<R, C>(
    client: &C,
    angles: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    from_euler_kernel(client, angles, |h| (h, 1.0 - 0.5 * h * h))
}

/// Converts a rotation matrix to a quaternion with a branch-free
/// trace-based extraction.
pub fn quaternion_from_rotation_matrix_impl<R, C>(
    client: &C,
    rotation_matrix: &Tensor<R>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_matrix(rotation_matrix.shape(), 3, 3, "rotation_matrix")?;
    assert_rotation_matrix_normalized_impl(client, rotation_matrix, None, checks)?;

    let eps = select_eps_for_addition(rotation_matrix.dtype(), "quaternion_from_rotation_matrix")?;
    let src = rotation_matrix.contiguous()?;
    let data: Vec<f64> = src.to_vec();

    let n = data.len() / 9;
    let mut quats = Vec::with_capacity(n * 4);
    for i in 0..n {
        let m = &data[i * 9..(i + 1) * 9];
        let trace = m[0] + m[4] + m[8];
        // Component magnitudes from guarded square roots; orientation from
        // the off-diagonal differences, with sign(0) fixed to +1 so the
        // 180-degree degeneracies resolve to one root deterministically.
        let w = 0.5 * ((1.0 + trace).max(0.0) + eps).sqrt();
        let x = 0.5
            * ((1.0 + m[0] - m[4] - m[8]).max(0.0) + eps).sqrt()
            * nonzero_sign_f64(m[7] - m[5]);
        let y = 0.5
            * ((1.0 - m[0] + m[4] - m[8]).max(0.0) + eps).sqrt()
            * nonzero_sign_f64(m[2] - m[6]);
        let z = 0.5
            * ((1.0 - m[0] - m[4] + m[8]).max(0.0) + eps).sqrt()
            * nonzero_sign_f64(m[3] - m[1]);
        quats.push(x);
        quats.push(y);
        quats.push(z);
        quats.push(w);
    }

    let mut shape = batch_dims(rotation_matrix.shape(), 2).to_vec();
    shape.push(4);
    let out = Tensor::<R>::from_slice(&quats, &shape, rotation_matrix.device());
    cast_to_dtype(client, out, rotation_matrix.dtype())
}

/// Conjugate `(-x, -y, -z, w)`.
pub fn quaternion_conjugate_impl<R, C>(
    client: &C,
    quaternion: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(quaternion.shape(), 4, "quaternion")?;
    let flip = Tensor::<R>::from_slice(&[-1.0f64, -1.0, -1.0, 1.0], &[4], quaternion.device());
    let flip = cast_to_dtype(client, flip, quaternion.dtype())?;
    let flip = broadcast_to_shape(&flip, quaternion.shape())?;
    Ok(client.mul(quaternion, &flip)?)
}

/// Inverse of a normalized quaternion (its conjugate).
pub fn quaternion_inverse_impl<R, C>(
    client: &C,
    quaternion: &Tensor<R>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(quaternion.shape(), 4, "quaternion")?;
    check_normalized(quaternion, 4, "quaternion", DEFAULT_NORM_ATOL, checks)?;
    quaternion_conjugate_impl(client, quaternion)
}

/// Hamilton product over broadcast batches.
pub fn quaternion_multiply_impl<R, C>(
    client: &C,
    quaternion1: &Tensor<R>,
    quaternion2: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(quaternion1.shape(), 4, "quaternion1")?;
    check_trailing_dim(quaternion2.shape(), 4, "quaternion2")?;
    let batch = broadcast_batch_shapes(
        batch_dims(quaternion1.shape(), 1),
        batch_dims(quaternion2.shape(), 1),
        "quaternion_multiply",
    )?;
    let a = broadcast_to_batch(quaternion1, &batch, &[4])?;
    let b = broadcast_to_batch(quaternion2, &batch, &[4])?;
    let a_data: Vec<f64> = a.to_vec();
    let b_data: Vec<f64> = b.to_vec();

    let n = batch_count(&batch);
    let mut quats = Vec::with_capacity(n * 4);
    for i in 0..n {
        let (x1, y1, z1, w1) = (
            a_data[i * 4],
            a_data[i * 4 + 1],
            a_data[i * 4 + 2],
            a_data[i * 4 + 3],
        );
        let (x2, y2, z2, w2) = (
            b_data[i * 4],
            b_data[i * 4 + 1],
            b_data[i * 4 + 2],
            b_data[i * 4 + 3],
        );
        quats.push(w1 * x2 + w2 * x1 + y1 * z2 - z1 * y2);
        quats.push(w1 * y2 + w2 * y1 + z1 * x2 - x1 * z2);
        quats.push(w1 * z2 + w2 * z1 + x1 * y2 - y1 * x2);
        quats.push(w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2);
    }

    let mut shape = batch;
    shape.push(4);
    let out = Tensor::<R>::from_slice(&quats, &shape, quaternion1.device());
    cast_to_dtype(client, out, quaternion1.dtype())
}

/// Guarded L2 normalization.
pub fn quaternion_normalize_impl<R, C>(
    client: &C,
    quaternion: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(quaternion.shape(), 4, "quaternion")?;
    let norm = vector_norm_impl(client, quaternion)?;
    safe_unsigned_div_impl(client, quaternion, &norm, None, CheckMode::Fast)
}

/// Per-element unit-norm test, returning a U8 mask of shape `[..., 1]`.
pub fn quaternion_is_normalized_impl<R, C>(
    client: &C,
    quaternion: &Tensor<R>,
    atol: Option<f64>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(quaternion.shape(), 4, "quaternion")?;
    norm_mask(client, quaternion, atol)
}

/// `| ||t|| - 1 | < atol` over the last axis as a U8 tensor.
pub(crate) fn norm_mask<R, C>(
    client: &C,
    t: &Tensor<R>,
    atol: Option<f64>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    let atol = atol.unwrap_or(DEFAULT_NORM_ATOL);
    let norm = vector_norm_impl(client, t)?;
    let diff = client.abs(&client.sub_scalar(&norm, 1.0)?)?;
    let tol = client.fill(diff.shape(), atol, diff.dtype())?;
    let mask = client.lt(&diff, &tol)?;
    Ok(client.cast(&mask, DType::U8)?)
}

/// Rotates a point as `q * (p, 0) * conjugate(q)`, dropping the scalar.
pub fn quaternion_rotate_impl<R, C>(
    client: &C,
    point: &Tensor<R>,
    quaternion: &Tensor<R>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(point.shape(), 3, "point")?;
    check_trailing_dim(quaternion.shape(), 4, "quaternion")?;
    check_normalized(quaternion, 4, "quaternion", DEFAULT_NORM_ATOL, checks)?;

    let mut pad_shape = batch_dims(point.shape(), 1).to_vec();
    pad_shape.push(1);
    let zeros = client.fill(&pad_shape, 0.0, point.dtype())?;
    let padded = client.cat(&[&point.contiguous()?, &zeros], -1)?;

    let conj = quaternion_conjugate_impl(client, quaternion)?;
    let rotated = quaternion_multiply_impl(
        client,
        &quaternion_multiply_impl(client, quaternion, &padded)?,
        &conj,
    )?;

    let out_batch = batch_dims(rotated.shape(), 1).to_vec();
    let n = batch_count(&out_batch);
    let xyz = rotated.contiguous()?.reshape(&[n, 4])?.narrow(1, 0, 3)?;
    let mut out_shape = out_batch;
    out_shape.push(3);
    Ok(xyz.contiguous()?.reshape(&out_shape)?)
}

/// Relative rotation angle `2 acos(|<q1, q2>|)` in `[0, pi]`, shape
/// `[A1, ..., An]`.
pub fn quaternion_relative_angle_impl<R, C>(
    client: &C,
    quaternion1: &Tensor<R>,
    quaternion2: &Tensor<R>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(quaternion1.shape(), 4, "quaternion1")?;
    check_trailing_dim(quaternion2.shape(), 4, "quaternion2")?;
    check_normalized(quaternion1, 4, "quaternion1", DEFAULT_NORM_ATOL, checks)?;
    check_normalized(quaternion2, 4, "quaternion2", DEFAULT_NORM_ATOL, checks)?;

    let dot = vector_dot_impl(client, quaternion1, quaternion2)?;
    let shrunk = safe_shrink_impl(client, &dot, -1.0, 1.0, false, None, checks)?;
    let angle = map_elementwise(client, &shrunk, |d| 2.0 * d.abs().acos())?;
    let out_shape = batch_dims(angle.shape(), 1).to_vec();
    Ok(angle.contiguous()?.reshape(&out_shape)?)
}

/// Quaternion of the smallest rotation taking `vector1` to `vector2`.
pub fn quaternion_between_two_vectors_3d_impl<R, C>(
    client: &C,
    vector1: &Tensor<R>,
    vector2: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(vector1.shape(), 3, "vector1")?;
    check_trailing_dim(vector2.shape(), 3, "vector2")?;
    let batch = broadcast_batch_shapes(
        batch_dims(vector1.shape(), 1),
        batch_dims(vector2.shape(), 1),
        "quaternion_between_two_vectors_3d",
    )?;
    let a = broadcast_to_batch(vector1, &batch, &[3])?;
    let b = broadcast_to_batch(vector2, &batch, &[3])?;
    let a_data: Vec<f64> = a.to_vec();
    let b_data: Vec<f64> = b.to_vec();
    let eps = select_eps_for_division(vector1.dtype(), "quaternion_between_two_vectors_3d")?;

    let n = batch_count(&batch);
    let mut quats = Vec::with_capacity(n * 4);
    for i in 0..n {
        let (a1, a2, a3) = (a_data[i * 3], a_data[i * 3 + 1], a_data[i * 3 + 2]);
        let (b1, b2, b3) = (b_data[i * 3], b_data[i * 3 + 1], b_data[i * 3 + 2]);
        let dot = a1 * b1 + a2 * b2 + a3 * b3;
        let cx = a2 * b3 - a3 * b2;
        let cy = a3 * b1 - a1 * b3;
        let cz = a1 * b2 - a2 * b1;
        let norms = ((a1 * a1 + a2 * a2 + a3 * a3) * (b1 * b1 + b2 * b2 + b3 * b3)).sqrt();
        let w = norms + dot;

        // Antiparallel inputs leave the axis undetermined; use a fixed
        // direction orthogonal to vector1.
        let (qx, qy, qz, qw) = if w < 1e-6 * norms {
            if a1.abs() > a3.abs() {
                (-a2, a1, 0.0, 0.0)
            } else {
                (0.0, -a3, a2, 0.0)
            }
        } else {
            (cx, cy, cz, w)
        };
        let len = (qx * qx + qy * qy + qz * qz + qw * qw).sqrt() + eps;
        quats.push(qx / len);
        quats.push(qy / len);
        quats.push(qz / len);
        quats.push(qw / len);
    }

    let mut shape = batch;
    shape.push(4);
    let out = Tensor::<R>::from_slice(&quats, &shape, vector1.device());
    cast_to_dtype(client, out, vector1.dtype())
}

/// Uniform unit quaternions from four normalized standard normals.
pub fn quaternion_normalized_random_uniform_impl<R, C>(
    client: &C,
    shape: &[usize],
    dtype: DType,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + RandomOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(shape, 4, "shape")?;
    check_float_dtype(dtype, "quaternion_normalized_random_uniform")?;
    let draws = client.randn(shape, DType::F64)?;
    let normalized = quaternion_normalize_impl(client, &draws)?;
    cast_to_dtype(client, normalized, dtype)
}
