//! 3d rotation matrix representation and operations trait.
//!
//! Rotation matrices are stored row-major in tensors of shape
//! `[A1, ..., An, 3, 3]` and are expected to be orthonormal with
//! determinant +1. Orthonormality is never verified on construction;
//! [`assert_rotation_matrix_normalized`] performs the check explicitly,
//! and conversion/rotation entry points run it when called with
//! [`CheckMode::Debug`].
//!
//! [`assert_rotation_matrix_normalized`]:
//!     RotationMatrix3dAlgorithms::assert_rotation_matrix_normalized
//! [`CheckMode::Debug`]: crate::validation::CheckMode

use crate::error::TransformResult;
use crate::validation::CheckMode;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for 3d rotation matrix operations.
pub trait RotationMatrix3dAlgorithms<R: Runtime> {
    /// Builds rotation matrices from an axis-angle pair:
    /// `cos(theta) I + sin(theta) [a]_x + (1 - cos(theta)) a a^T`.
    fn rotation_matrix_3d_from_axis_angle(
        &self,
        axis: &Tensor<R>,
        angle: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Builds rotation matrices from Euler angles.
    ///
    /// The convention is `R = Rz * Ry * Rx`: `angles[..., 0]` rotates
    /// about x, `[..., 1]` about y, `[..., 2]` about z, in radians.
    fn rotation_matrix_3d_from_euler(&self, angles: &Tensor<R>) -> TransformResult<Tensor<R>>;

    /// Small-angle variant of [`rotation_matrix_3d_from_euler`] using
    /// `sin(x) ~ x` and `cos(x) ~ 1 - x^2/2`; smallness is not verified.
    ///
    /// [`rotation_matrix_3d_from_euler`]:
    ///     RotationMatrix3dAlgorithms::rotation_matrix_3d_from_euler
    fn rotation_matrix_3d_from_euler_with_small_angles_approximation(
        &self,
        angles: &Tensor<R>,
    ) -> TransformResult<Tensor<R>>;

    /// Builds rotation matrices from normalized quaternions.
    fn rotation_matrix_3d_from_quaternion(
        &self,
        quaternion: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Inverse rotation, i.e. the transpose of the last two axes.
    fn rotation_matrix_3d_inverse(
        &self,
        rotation_matrix: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Rotates 3d points by matrix-vector products over broadcast
    /// batches.
    ///
    /// # Arguments
    ///
    /// * `point` - Points, shape `[A1, ..., An, 3]`.
    /// * `rotation_matrix` - Shape `[A1, ..., An, 3, 3]`, batch
    ///   dimensions broadcastable against those of `point`.
    fn rotation_matrix_3d_rotate(
        &self,
        point: &Tensor<R>,
        rotation_matrix: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Verifies `R * R^T ~ I` and `det(R) ~ 1` within `atol` (default
    /// `1e-3`).
    ///
    /// Shape validation always runs; the numeric check itself runs only
    /// under `Debug` and raises a normalization error on violation. In
    /// `Fast` mode the call is a no-op after shape validation.
    fn assert_rotation_matrix_normalized(
        &self,
        rotation_matrix: &Tensor<R>,
        atol: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<()>;
}
