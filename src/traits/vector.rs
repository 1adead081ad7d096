//! Batched vector helper operations trait.

use crate::error::TransformResult;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for batched vector helpers.
///
/// All operations act on the last axis and broadcast leading batch
/// dimensions between operands.
pub trait VectorAlgorithms<R: Runtime> {
    /// Dot product over the last axis, keeping the reduced dimension.
    ///
    /// # Arguments
    ///
    /// * `u` - Tensor of shape `[A1, ..., An, d]`.
    /// * `v` - Tensor with the same last dimension and broadcastable
    ///   batch dimensions.
    ///
    /// # Returns
    ///
    /// Tensor of shape `[A1, ..., An, 1]`.
    fn vector_dot(&self, u: &Tensor<R>, v: &Tensor<R>) -> TransformResult<Tensor<R>>;

    /// Cross product of 3d vectors over the last axis.
    fn vector_cross(&self, u: &Tensor<R>, v: &Tensor<R>) -> TransformResult<Tensor<R>>;

    /// L2 norm over the last axis, keeping the reduced dimension.
    fn vector_norm(&self, v: &Tensor<R>) -> TransformResult<Tensor<R>>;

    /// Normalizes `v` along its last axis with a guarded division.
    ///
    /// # Arguments
    ///
    /// * `v` - Tensor of shape `[A1, ..., An, d]`.
    /// * `eps` - Division guard; `None` selects the epsilon for the dtype
    ///   of `v`.
    fn vector_l2_normalize(&self, v: &Tensor<R>, eps: Option<f64>)
        -> TransformResult<Tensor<R>>;
}
