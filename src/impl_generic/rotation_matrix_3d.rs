//! Generic 3d rotation matrix implementation.
//!
//! Matrices are row-major. Construction never validates orthonormality;
//! the explicit assertion runs it when the caller opts into debug checks.

use crate::error::{TransformError, TransformResult};
use crate::impl_generic::batch::{
    batch_count, broadcast_to_batch, cast_to_dtype, check_normalized,
};
use crate::validation::{
    batch_dims, broadcast_batch_shapes, check_trailing_dim, check_trailing_matrix, CheckMode,
    DEFAULT_NORM_ATOL,
};
use numr::dtype::DType;
use numr::ops::TensorOps;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Builds rotation matrices from an axis-angle pair:
/// `cos(t) I + sin(t) [a]_x + (1 - cos(t)) a a^T`.
pub fn rotation_matrix_3d_from_axis_angle_impl<R, C>(
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
        "rotation_matrix_3d_from_axis_angle",
    )?;
    let axis_b = broadcast_to_batch(axis, &batch, &[3])?;
    let angle_b = broadcast_to_batch(angle, &batch, &[1])?;
    let axis_data: Vec<f64> = axis_b.to_vec();
    let angle_data: Vec<f64> = angle_b.to_vec();

    let n = batch_count(&batch);
    let mut matrices = Vec::with_capacity(n * 9);
    for i in 0..n {
        let (ax, ay, az) = (axis_data[i * 3], axis_data[i * 3 + 1], axis_data[i * 3 + 2]);
        let c = angle_data[i].cos();
        let s = angle_data[i].sin();
        let k = 1.0 - c;
        matrices.push(c + k * ax * ax);
        matrices.push(k * ax * ay - s * az);
        matrices.push(k * ax * az + s * ay);
        matrices.push(k * ax * ay + s * az);
        matrices.push(c + k * ay * ay);
        matrices.push(k * ay * az - s * ax);
        matrices.push(k * ax * az - s * ay);
        matrices.push(k * ay * az + s * ax);
        matrices.push(c + k * az * az);
    }

    let mut shape = batch;
    shape.extend_from_slice(&[3, 3]);
    let out = Tensor::<R>::from_slice(&matrices, &shape, axis.device());
    cast_to_dtype(client, out, axis.dtype())
}

/// Shared Euler kernel; `trig` maps an angle to its (sin, cos).
fn from_euler_kernel<R, C>(
    client: &C,
    angles: &Tensor<R>,
    trig: fn(f64) -> (f64, f64),
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(angles.shape(), 3, "angles")?;
    let src = angles.contiguous()?;
    let data: Vec<f64> = src.to_vec();

    let n = data.len() / 3;
    let mut matrices = Vec::with_capacity(n * 9);
    for i in 0..n {
        let (sx, cx) = trig(data[i * 3]);
        let (sy, cy) = trig(data[i * 3 + 1]);
        let (sz, cz) = trig(data[i * 3 + 2]);
        // R = Rz * Ry * Rx.
        matrices.push(cy * cz);
        matrices.push(sx * sy * cz - cx * sz);
        matrices.push(cx * sy * cz + sx * sz);
        matrices.push(cy * sz);
        matrices.push(sx * sy * sz + cx * cz);
        matrices.push(cx * sy * sz - sx * cz);
        matrices.push(-sy);
        matrices.push(sx * cy);
        matrices.push(cx * cy);
    }

    let mut shape = batch_dims(angles.shape(), 1).to_vec();
    shape.extend_from_slice(&[3, 3]);
    let out = Tensor::<R>::from_slice(&matrices, &shape, angles.device());
    cast_to_dtype(client, out, angles.dtype())
}

/// Builds rotation matrices from Euler angles (`R = Rz * Ry * Rx`).
pub fn rotation_matrix_3d_from_euler_impl<R, C>(
    client: &C,
    angles: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    from_euler_kernel(client, angles, |a| (a.sin(), a.cos()))
}

/// Small-angle Euler conversion with `sin(x) ~ x`, `cos(x) ~ 1 - x^2/2`.
pub fn rotation_matrix_3d_from_euler_with_small_angles_approximation_impl<R, C>(
    client: &C,
    angles: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    from_euler_kernel(client, angles, |a| (a, 1.0 - 0.5 * a * a))
}

/// Builds rotation matrices from normalized quaternions `[x, y, z, w]`.
pub fn rotation_matrix_3d_from_quaternion_impl<R, C>(
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

    let src = quaternion.contiguous()?;
    let data: Vec<f64> = src.to_vec();
    let n = data.len() / 4;
    let mut matrices = Vec::with_capacity(n * 9);
    for i in 0..n {
        let (x, y, z, w) = (
            data[i * 4],
            data[i * 4 + 1],
            data[i * 4 + 2],
            data[i * 4 + 3],
        );
        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;
        matrices.push(1.0 - 2.0 * (yy + zz));
        matrices.push(2.0 * (xy - wz));
        matrices.push(2.0 * (xz + wy));
        matrices.push(2.0 * (xy + wz));
        matrices.push(1.0 - 2.0 * (xx + zz));
        matrices.push(2.0 * (yz - wx));
        matrices.push(2.0 * (xz - wy));
        matrices.push(2.0 * (yz + wx));
        matrices.push(1.0 - 2.0 * (xx + yy));
    }

    let mut shape = batch_dims(quaternion.shape(), 1).to_vec();
    shape.extend_from_slice(&[3, 3]);
    let out = Tensor::<R>::from_slice(&matrices, &shape, quaternion.device());
    cast_to_dtype(client, out, quaternion.dtype())
}

/// Inverse rotation: transpose of the last two axes.
pub fn rotation_matrix_3d_inverse_impl<R, C>(
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

    let batch = batch_dims(rotation_matrix.shape(), 2).to_vec();
    let n = batch_count(&batch);
    let m3 = rotation_matrix.contiguous()?.reshape(&[n, 3, 3])?;
    let transposed = m3.transpose(1, 2)?.contiguous()?;
    let mut shape = batch;
    shape.extend_from_slice(&[3, 3]);
    Ok(transposed.reshape(&shape)?)
}

/// Rotates points by matrix-vector products over broadcast batches.
pub fn rotation_matrix_3d_rotate_impl<R, C>(
    client: &C,
    point: &Tensor<R>,
    rotation_matrix: &Tensor<R>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(point.shape(), 3, "point")?;
    check_trailing_matrix(rotation_matrix.shape(), 3, 3, "rotation_matrix")?;
    assert_rotation_matrix_normalized_impl(client, rotation_matrix, None, checks)?;

    let batch = broadcast_batch_shapes(
        batch_dims(point.shape(), 1),
        batch_dims(rotation_matrix.shape(), 2),
        "rotation_matrix_3d_rotate",
    )?;
    let p = broadcast_to_batch(point, &batch, &[3])?;
    let m = broadcast_to_batch(rotation_matrix, &batch, &[3, 3])?;
    let p_data: Vec<f64> = p.to_vec();
    let m_data: Vec<f64> = m.to_vec();

    let n = batch_count(&batch);
    let mut points = Vec::with_capacity(n * 3);
    for i in 0..n {
        let p = &p_data[i * 3..(i + 1) * 3];
        let m = &m_data[i * 9..(i + 1) * 9];
        points.push(m[0] * p[0] + m[1] * p[1] + m[2] * p[2]);
        points.push(m[3] * p[0] + m[4] * p[1] + m[5] * p[2]);
        points.push(m[6] * p[0] + m[7] * p[1] + m[8] * p[2]);
    }

    let mut shape = batch;
    shape.push(3);
    let out = Tensor::<R>::from_slice(&points, &shape, point.device());
    cast_to_dtype(client, out, point.dtype())
}

/// Verifies `R R^T ~ I` and `det(R) ~ 1` under debug checks.
///
/// Shape validation always runs; the numeric scan only under `Debug`.
pub fn assert_rotation_matrix_normalized_impl<R, C>(
    _client: &C,
    rotation_matrix: &Tensor<R>,
    atol: Option<f64>,
    checks: CheckMode,
) -> TransformResult<()>
where
    R: Runtime,
    C: RuntimeClient<R>,
{
    check_trailing_matrix(rotation_matrix.shape(), 3, 3, "rotation_matrix")?;
    if !checks.debug() {
        return Ok(());
    }
    let atol = atol.unwrap_or(DEFAULT_NORM_ATOL);
    let src = rotation_matrix.contiguous()?;
    let data: Vec<f64> = src.to_vec();

    for m in data.chunks(9) {
        for i in 0..3 {
            for j in 0..3 {
                let gram =
                    m[i * 3] * m[j * 3] + m[i * 3 + 1] * m[j * 3 + 1] + m[i * 3 + 2] * m[j * 3 + 2];
                let expected = if i == j { 1.0 } else { 0.0 };
                if (gram - expected).abs() > atol {
                    return Err(TransformError::NotNormalized {
                        arg: "rotation_matrix",
                        message: format!(
                            "row gram entry ({}, {}) is {}, expected {}",
                            i, j, gram, expected
                        ),
                    });
                }
            }
        }
        let det = m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6]);
        if (det - 1.0).abs() > atol {
            return Err(TransformError::NotNormalized {
                arg: "rotation_matrix",
                message: format!("determinant is {}, expected 1", det),
            });
        }
    }
    Ok(())
}
