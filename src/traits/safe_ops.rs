//! Guarded arithmetic primitives trait.
//!
//! These functions prevent NaN and Inf values that would otherwise appear
//! near singular inputs because of machine precision, while keeping the
//! perturbation small, sign-unbiased, and free of data-dependent branches.
//! Under [`CheckMode::Debug`] they additionally verify that the guard
//! worked (no NaN/Inf in the result, denominators strictly positive,
//! shrunk values inside the assumed range).
//!
//! [`CheckMode::Debug`]: crate::validation::CheckMode

use crate::error::TransformResult;
use crate::validation::CheckMode;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for the guarded numeric primitives.
///
/// All operations are pure and elementwise; binary operations broadcast
/// their operands. Every `eps` parameter defaults (when `None`) to a
/// dtype-appropriate constant from the epsilon tables in
/// [`crate::validation`].
pub trait SafeOpsAlgorithms<R: Runtime> {
    /// Sign of `x` with `sign(0)` defined as 1 instead of 0.
    ///
    /// Used to pick perturbation directions deterministically: the result
    /// never contains a zero that could cancel a guard term.
    fn nonzero_sign(&self, x: &Tensor<R>) -> TransformResult<Tensor<R>>;

    /// Computes `a / (b + eps)` for non-negative `b`.
    ///
    /// # Arguments
    ///
    /// * `a` - Numerator tensor.
    /// * `b` - Denominator tensor with non-negative values, broadcastable
    ///   against `a`.
    /// * `eps` - Guard added to the denominator; `None` selects the
    ///   division epsilon for the dtype of `b`.
    /// * `checks` - Under `Debug`, asserts `b + eps > 0` and that the
    ///   result is finite.
    fn safe_unsigned_div(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Computes `a / (b + nonzero_sign(b) * eps)`, tolerating negative
    /// denominators.
    fn safe_signed_div(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Computes `sin(factor * theta) / sin(theta)` safely.
    ///
    /// The ratio appears in spherical interpolation weights and has
    /// removable singularities at `theta = n * pi` (the limit there is
    /// `factor`). The angle is perturbed by
    /// `nonzero_sign(pi/2 - (theta mod pi)) * eps * clip(1/factor, 1, 1e10)`
    /// before evaluation, which removes the singularity without biasing
    /// the perturbation direction and keeps the guard alive for very
    /// small factors.
    ///
    /// # Arguments
    ///
    /// * `theta` - Angles in radians, any shape.
    /// * `factor` - Scalar multiplier of the numerator angle.
    /// * `eps` - Angle perturbation; `None` selects the division epsilon
    ///   for the dtype of `theta`.
    /// * `checks` - Under `Debug`, asserts the result is finite.
    ///
    /// # Returns
    ///
    /// Tensor with the same shape as `theta`.
    fn safe_sinpx_div_sinx(
        &self,
        theta: &Tensor<R>,
        factor: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Computes `cos(factor * theta) / cos(theta)` safely.
    ///
    /// Analogous to [`safe_sinpx_div_sinx`], with singularities at
    /// `theta = (n + 1/2) * pi`.
    ///
    /// [`safe_sinpx_div_sinx`]: SafeOpsAlgorithms::safe_sinpx_div_sinx
    fn safe_cospx_div_cosx(
        &self,
        theta: &Tensor<R>,
        factor: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Shrinks `vector` by `1 - eps` to pull it strictly inside an
    /// interval before an inverse trigonometric call.
    ///
    /// A dot product of normalized vectors can exceed 1.0 by a rounding
    /// error, which would make `acos` return NaN. Unlike clamping, the
    /// multiplicative shrink leaves the derivative unchanged.
    ///
    /// # Arguments
    ///
    /// * `vector` - Values to shrink, any shape.
    /// * `minval` / `maxval` - Assumed bounds after shrinking, verified
    ///   only under `Debug`.
    /// * `open_bounds` - Whether the assumed interval is open.
    /// * `eps` - Shrink amount; `None` selects the addition epsilon for
    ///   the dtype of `vector`.
    fn safe_shrink(
        &self,
        vector: &Tensor<R>,
        minval: f64,
        maxval: f64,
        open_bounds: bool,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;
}
