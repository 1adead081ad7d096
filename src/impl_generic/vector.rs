//! Generic batched vector helper implementation.
//!
//! Pure tensor-op formulations: products and reductions over the last
//! axis, with operands materialized at their broadcast batch shape first.

use crate::error::{TransformError, TransformResult};
use crate::impl_generic::batch::{batch_count, broadcast_to_batch, last_dim};
use crate::impl_generic::safe_ops::safe_unsigned_div_impl;
use crate::validation::{batch_dims, broadcast_batch_shapes, check_trailing_dim, CheckMode};
use numr::dtype::DType;
use numr::ops::{ReduceOps, ScalarOps, TensorOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Dot product over the last axis, keeping the reduced dimension.
pub fn vector_dot_impl<R, C>(
    client: &C,
    u: &Tensor<R>,
    v: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime,
    C: TensorOps<R> + ReduceOps<R> + RuntimeClient<R>,
{
    let lu = last_dim(u, "vector1")?;
    let lv = last_dim(v, "vector2")?;
    if lu != lv {
        return Err(TransformError::InvalidShape {
            arg: "vector2",
            reason: format!(
                "must have the same last dimension as 'vector1', got {} vs {}",
                lv, lu
            ),
        });
    }
    let batch = broadcast_batch_shapes(
        batch_dims(u.shape(), 1),
        batch_dims(v.shape(), 1),
        "vector_dot",
    )?;
    let ub = broadcast_to_batch(u, &batch, &[lu])?;
    let vb = broadcast_to_batch(v, &batch, &[lu])?;
    let prod = client.mul(&ub, &vb)?;
    let last = ub.ndim() - 1;
    Ok(client.sum(&prod, &[last], true)?)
}

/// Cross product of 3d vectors over the last axis.
pub fn vector_cross_impl<R, C>(
    client: &C,
    u: &Tensor<R>,
    v: &Tensor<R>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime,
    C: TensorOps<R> + RuntimeClient<R>,
{
    check_trailing_dim(u.shape(), 3, "vector1")?;
    check_trailing_dim(v.shape(), 3, "vector2")?;
    let batch = broadcast_batch_shapes(
        batch_dims(u.shape(), 1),
        batch_dims(v.shape(), 1),
        "vector_cross",
    )?;
    let n = batch_count(&batch);
    let u2 = broadcast_to_batch(u, &batch, &[3])?.reshape(&[n, 3])?;
    let v2 = broadcast_to_batch(v, &batch, &[3])?.reshape(&[n, 3])?;

    let ux = u2.narrow(1, 0, 1)?;
    let uy = u2.narrow(1, 1, 1)?;
    let uz = u2.narrow(1, 2, 1)?;
    let vx = v2.narrow(1, 0, 1)?;
    let vy = v2.narrow(1, 1, 1)?;
    let vz = v2.narrow(1, 2, 1)?;

    let cx = client.sub(&client.mul(&uy, &vz)?, &client.mul(&uz, &vy)?)?;
    let cy = client.sub(&client.mul(&uz, &vx)?, &client.mul(&ux, &vz)?)?;
    let cz = client.sub(&client.mul(&ux, &vy)?, &client.mul(&uy, &vx)?)?;
    let cross = client.cat(&[&cx, &cy, &cz], 1)?;

    let mut out_shape = batch;
    out_shape.push(3);
    Ok(cross.contiguous()?.reshape(&out_shape)?)
}

/// L2 norm over the last axis, keeping the reduced dimension.
pub fn vector_norm_impl<R, C>(client: &C, v: &Tensor<R>) -> TransformResult<Tensor<R>>
where
    R: Runtime,
    C: TensorOps<R> + ReduceOps<R> + RuntimeClient<R>,
{
    last_dim(v, "vector")?;
    let sq = client.mul(v, v)?;
    let last = v.ndim() - 1;
    let sum = client.sum(&sq, &[last], true)?;
    Ok(client.sqrt(&sum)?)
}

/// Guarded L2 normalization along the last axis.
pub fn vector_l2_normalize_impl<R, C>(
    client: &C,
    v: &Tensor<R>,
    eps: Option<f64>,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + ReduceOps<R> + RuntimeClient<R>,
{
    let norm = vector_norm_impl(client, v)?;
    safe_unsigned_div_impl(client, v, &norm, eps, CheckMode::Fast)
}
