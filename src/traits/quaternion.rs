//! Quaternion representation and operations trait.
//!
//! Quaternions are stored as `[x, y, z, w]` with the scalar part last,
//! in tensors of shape `[A1, ..., An, 4]` where A1..An are optional batch
//! dimensions. Functions documented as expecting a normalized quaternion
//! assume `x^2 + y^2 + z^2 + w^2 = 1`; the assumption is verified only
//! under [`CheckMode::Debug`].
//!
//! The quaternion is the canonical hub representation: axis-angle and
//! rotation-matrix conversions route through it.
//!
//! [`CheckMode::Debug`]: crate::validation::CheckMode

use crate::error::TransformResult;
use crate::validation::CheckMode;
use numr::dtype::DType;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for quaternion operations.
pub trait QuaternionAlgorithms<R: Runtime> {
    /// Converts an axis-angle representation to a quaternion.
    ///
    /// # Arguments
    ///
    /// * `axis` - Normalized axes, shape `[A1, ..., An, 3]`.
    /// * `angle` - Angles in radians, shape `[A1, ..., An, 1]`,
    ///   broadcastable against `axis`.
    /// * `checks` - Under `Debug`, asserts the axes are normalized.
    ///
    /// # Returns
    ///
    /// Normalized quaternions, shape `[A1, ..., An, 4]`.
    fn quaternion_from_axis_angle(
        &self,
        axis: &Tensor<R>,
        angle: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Converts Euler angles to a quaternion.
    ///
    /// Composes the per-axis half-angle quaternions in closed form, with
    /// no intermediate rotation matrix. The convention matches
    /// `R = Rz * Ry * Rx`: `angles[..., 0]` is the angle about x,
    /// `[..., 1]` about y, `[..., 2]` about z, in radians.
    fn quaternion_from_euler(&self, angles: &Tensor<R>) -> TransformResult<Tensor<R>>;

    /// Converts small Euler angles to a quaternion using the second-order
    /// Taylor approximations `sin(x) ~ x` and `cos(x) ~ 1 - x^2/2`.
    ///
    /// The smallness of the angles is not verified; the caller is
    /// responsible for staying in the regime where the approximation
    /// holds.
    fn quaternion_from_euler_with_small_angles_approximation(
        &self,
        angles: &Tensor<R>,
    ) -> TransformResult<Tensor<R>>;

    /// Converts a rotation matrix to a quaternion.
    ///
    /// Uses a single smooth closed form: each component magnitude comes
    /// from a guarded square root of a trace combination, oriented by
    /// [`nonzero_sign`] of the corresponding off-diagonal difference. At
    /// 180-degree rotations, where several quaternions are valid, one
    /// root is returned deterministically; no branching on the largest
    /// diagonal entry takes place.
    ///
    /// # Arguments
    ///
    /// * `rotation_matrix` - Shape `[A1, ..., An, 3, 3]`.
    /// * `checks` - Under `Debug`, asserts the matrices are normalized
    ///   rotation matrices.
    ///
    /// [`nonzero_sign`]: crate::traits::safe_ops::SafeOpsAlgorithms::nonzero_sign
    fn quaternion_from_rotation_matrix(
        &self,
        rotation_matrix: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Conjugate `(-x, -y, -z, w)`.
    fn quaternion_conjugate(&self, quaternion: &Tensor<R>) -> TransformResult<Tensor<R>>;

    /// Inverse of a normalized quaternion, which is its conjugate.
    fn quaternion_inverse(
        &self,
        quaternion: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Hamilton product `q1 * q2`.
    ///
    /// Batch dimensions of the operands must be broadcastable.
    fn quaternion_multiply(
        &self,
        quaternion1: &Tensor<R>,
        quaternion2: &Tensor<R>,
    ) -> TransformResult<Tensor<R>>;

    /// L2-normalizes a quaternion with a guarded division.
    fn quaternion_normalize(&self, quaternion: &Tensor<R>) -> TransformResult<Tensor<R>>;

    /// Per-element unit-norm test `| ||q|| - 1 | < atol`.
    ///
    /// # Arguments
    ///
    /// * `quaternion` - Shape `[A1, ..., An, 4]`.
    /// * `atol` - Absolute tolerance; `None` uses the default `1e-3`.
    ///
    /// # Returns
    ///
    /// U8 tensor of shape `[A1, ..., An, 1]` holding 1 where normalized.
    fn quaternion_is_normalized(
        &self,
        quaternion: &Tensor<R>,
        atol: Option<f64>,
    ) -> TransformResult<Tensor<R>>;

    /// Rotates a 3d point by a normalized quaternion.
    ///
    /// Computed as `q * (p, 0) * conjugate(q)` with the scalar component
    /// dropped, equivalent to but without building the rotation matrix.
    fn quaternion_rotate(
        &self,
        point: &Tensor<R>,
        quaternion: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Relative rotation angle between two normalized quaternions.
    ///
    /// `2 * acos(|<q1, q2>|)` with the dot product shrunk into `[-1, 1]`
    /// before the `acos`. Because the absolute dot product is used, the
    /// result is invariant under the hemisphere ambiguity (`q` and `-q`
    /// encode the same rotation).
    ///
    /// # Returns
    ///
    /// Angles in `[0, pi]`, shape `[A1, ..., An]`.
    fn quaternion_relative_angle(
        &self,
        quaternion1: &Tensor<R>,
        quaternion2: &Tensor<R>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<R>>;

    /// Quaternion of the smallest rotation taking `vector1` to `vector2`.
    ///
    /// Inputs need not be normalized. For antiparallel inputs the
    /// rotation axis is ambiguous; a deterministic axis orthogonal to
    /// `vector1` is used.
    fn quaternion_between_two_vectors_3d(
        &self,
        vector1: &Tensor<R>,
        vector2: &Tensor<R>,
    ) -> TransformResult<Tensor<R>>;

    /// Samples uniformly distributed unit quaternions.
    ///
    /// Draws four independent standard normals per element and
    /// normalizes, which yields the uniform distribution on the unit
    /// 3-sphere. Suitable both for tests and for variable initialization.
    ///
    /// # Arguments
    ///
    /// * `shape` - Full output shape; the last dimension must be 4.
    /// * `dtype` - Output dtype; must be floating point.
    fn quaternion_normalized_random_uniform(
        &self,
        shape: &[usize],
        dtype: DType,
    ) -> TransformResult<Tensor<R>>;
}
