//! Axis-angle representation and operations trait.
//!
//! The representation is the pair `(axis, angle)`: a normalized direction
//! of shape `[A1, ..., An, 3]` and an angle in radians of shape
//! `[A1, ..., An, 1]`. The two tensors always travel together. Rotation of
//! a point uses the Rodrigues formula
//! `p' = p cos(theta) + (a x p) sin(theta) + a (a . p)(1 - cos(theta))`.

use crate::error::TransformResult;
use crate::validation::CheckMode;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for axis-angle operations.
pub trait AxisAngleAlgorithms<R: Runtime> {
    /// Converts a normalized quaternion to an axis-angle pair.
    ///
    /// The angle is `2 * atan2(||xyz||, |w| + eps)`. For `||xyz||` below
    /// `1e-6` the rotation is (near) identity and the axis is ambiguous;
    /// the fixed default axis `(1, 0, 0)` is returned, which keeps the
    /// output deterministic and the formula branch-free elsewhere.
    ///
    /// # Returns
    ///
    /// `(axis, angle)` of shapes `[A1, ..., An, 3]` and `[A1, ..., An, 1]`;
    /// the axis is normalized.
    fn axis_angle_from_quaternion(
        &self,
        quaternion: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<R>, Tensor<R>)>;

    /// Converts Euler angles to an axis-angle pair, via the quaternion
    /// representation.
    fn axis_angle_from_euler(
        &self,
        angles: &Tensor<R>,
    ) -> TransformResult<(Tensor<R>, Tensor<R>)>;

    /// Small-angle variant of [`axis_angle_from_euler`], using the
    /// second-order Taylor approximations of sine and cosine. Smallness
    /// of the input is not verified.
    ///
    /// [`axis_angle_from_euler`]: AxisAngleAlgorithms::axis_angle_from_euler
    fn axis_angle_from_euler_with_small_angles_approximation(
        &self,
        angles: &Tensor<R>,
    ) -> TransformResult<(Tensor<R>, Tensor<R>)>;

    /// Converts a rotation matrix to an axis-angle pair, via the
    /// quaternion representation.
    ///
    /// The result is not unique: a rotation matrix maps to both
    /// `(axis, angle)` and `(-axis, -angle)`, and this function commits
    /// to one of them deterministically.
    fn axis_angle_from_rotation_matrix(
        &self,
        rotation_matrix: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<R>, Tensor<R>)>;

    /// Splits a rotation vector `r` into `axis = r / ||r||` (guarded) and
    /// `angle = ||r||`.
    fn axis_angle_from_rotation_vector(
        &self,
        rotation_vector: &Tensor<R>,
    ) -> TransformResult<(Tensor<R>, Tensor<R>)>;

    /// Inverse rotation: same axis, negated angle.
    fn axis_angle_inverse(
        &self,
        axis: &Tensor<R>,
        angle: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<R>, Tensor<R>)>;

    /// Per-element unit-norm test on the axis.
    ///
    /// # Returns
    ///
    /// U8 tensor of shape `[A1, ..., An, 1]` holding 1 where the axis is
    /// normalized within `atol` (default `1e-3`).
    fn axis_angle_is_normalized(
        &self,
        axis: &Tensor<R>,
        angle: &Tensor<R>,
        atol: Option<f64>,
    ) -> TransformResult<Tensor<R>>;

    /// Rotates a 3d point with the Rodrigues rotation formula.
    ///
    /// # Arguments
    ///
    /// * `point` - Points, shape `[A1, ..., An, 3]`.
    /// * `axis` - Normalized axes, broadcastable against `point`.
    /// * `angle` - Angles, shape `[A1, ..., An, 1]`.
    /// * `checks` - Under `Debug`, asserts the axes are normalized.
    fn axis_angle_rotate(
        &self,
        point: &Tensor<R>,
        axis: &Tensor<R>,
        angle: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;
}
