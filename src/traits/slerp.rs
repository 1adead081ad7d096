//! Spherical linear interpolation trait.
//!
//! Slerp is defined both for quaternions and for general vectors, and the
//! two differ because of the quaternion hemisphere ambiguity (`q` and
//! `-q` encode the same rotation). Both variants reduce to computing two
//! interpolation weights which are then combined by a weighted sum, so
//! the weight functions are exposed separately from the combinator.
//!
//! The quaternion variant assumes normalized inputs, resolves the
//! hemisphere ambiguity toward the shorter great-circle path, and yields
//! normalized results. The vector variant accepts unnormalized inputs
//! (weights are computed on their normalized directions) and degrades to
//! linear interpolation when the inputs are antiparallel.

use crate::error::TransformResult;
use crate::validation::CheckMode;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Which weight computation `slerp_interpolate` dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMethod {
    /// General vectors of any trailing dimension.
    Vector,
    /// Normalized quaternions with trailing dimension 4.
    #[default]
    Quaternion,
}

/// Algorithmic contract for slerp weight computation and interpolation.
pub trait SlerpAlgorithms<R: Runtime> {
    /// Slerp weights for two normalized quaternions.
    ///
    /// The weights are `sin((1-t) * theta) / sin(theta)` and
    /// `sin(t * theta) / sin(theta)` with `theta = acos(|<q1, q2>|)`,
    /// both evaluated through the guarded trigonometric ratio so nearly
    /// parallel quaternions reduce to lerp. The first weight carries the
    /// sign of the dot product, which selects the shorter great-circle
    /// path between the two hemispheres.
    ///
    /// # Arguments
    ///
    /// * `quaternion1` / `quaternion2` - Normalized quaternions of
    ///   identical shape `[A1, ..., An, 4]`.
    /// * `percent` - Interpolation parameter; values outside `[0, 1]`
    ///   extrapolate.
    /// * `eps` - Guard for the shrink and ratio operations; `None`
    ///   selects dtype defaults.
    /// * `checks` - Under `Debug`, asserts normalized inputs and finite
    ///   weights.
    ///
    /// # Returns
    ///
    /// Two weight tensors of shape `[A1, ..., An, 1]`.
    fn slerp_quaternion_weights(
        &self,
        quaternion1: &Tensor<R>,
        quaternion2: &Tensor<R>,
        percent: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<R>, Tensor<R>)>;

    /// Slerp weights for two general vectors.
    ///
    /// Inputs are L2-normalized before the angle computation and need not
    /// be normalized themselves; no hemisphere correction is applied.
    fn slerp_vector_weights(
        &self,
        vector1: &Tensor<R>,
        vector2: &Tensor<R>,
        percent: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<R>, Tensor<R>)>;

    /// Weighted sum `weight1 * vector1 + weight2 * vector2`.
    fn slerp_interpolate_with_weights(
        &self,
        vector1: &Tensor<R>,
        vector2: &Tensor<R>,
        weight1: &Tensor<R>,
        weight2: &Tensor<R>,
    ) -> TransformResult<Tensor<R>>;

    /// Interpolates between two vectors or quaternions.
    ///
    /// Dispatches to [`slerp_quaternion_weights`] or
    /// [`slerp_vector_weights`] according to `method` and combines the
    /// result with the weighted sum.
    ///
    /// [`slerp_quaternion_weights`]: SlerpAlgorithms::slerp_quaternion_weights
    /// [`slerp_vector_weights`]: SlerpAlgorithms::slerp_vector_weights
    fn slerp_interpolate(
        &self,
        vector1: &Tensor<R>,
        vector2: &Tensor<R>,
        percent: f64,
        method: InterpolationMethod,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;
}
