//! CPU implementation of the quaternion operations.

use crate::error::TransformResult;
use crate::impl_generic::{
    quaternion_between_two_vectors_3d_impl, quaternion_conjugate_impl,
    quaternion_from_axis_angle_impl, quaternion_from_euler_impl,
    quaternion_from_euler_with_small_angles_approximation_impl,
    quaternion_from_rotation_matrix_impl, quaternion_inverse_impl, quaternion_is_normalized_impl,
    quaternion_multiply_impl, quaternion_normalize_impl,
    quaternion_normalized_random_uniform_impl, quaternion_relative_angle_impl,
    quaternion_rotate_impl,
};
use crate::traits::quaternion::QuaternionAlgorithms;
use crate::validation::CheckMode;
use numr::dtype::DType;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl QuaternionAlgorithms<CpuRuntime> for CpuClient {
    fn quaternion_from_axis_angle(
        &self,
        axis: &Tensor<CpuRuntime>,
        angle: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_from_axis_angle_impl(self, axis, angle, checks)
    }

    fn quaternion_from_euler(
        &self,
        angles: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_from_euler_impl(self, angles)
    }

    fn quaternion_from_euler_with_small_angles_approximation(
        &self,
        angles: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_from_euler_with_small_angles_approximation_impl(self, angles)
    }

    fn quaternion_from_rotation_matrix(
        &self,
        rotation_matrix: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_from_rotation_matrix_impl(self, rotation_matrix, checks)
    }

    fn quaternion_conjugate(
        &self,
        quaternion: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_conjugate_impl(self, quaternion)
    }

    fn quaternion_inverse(
        &self,
        quaternion: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_inverse_impl(self, quaternion, checks)
    }

    fn quaternion_multiply(
        &self,
        quaternion1: &Tensor<CpuRuntime>,
        quaternion2: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_multiply_impl(self, quaternion1, quaternion2)
    }

    fn quaternion_normalize(
        &self,
        quaternion: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_normalize_impl(self, quaternion)
    }

    fn quaternion_is_normalized(
        &self,
        quaternion: &Tensor<CpuRuntime>,
        atol: Option<f64>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_is_normalized_impl(self, quaternion, atol)
    }

    fn quaternion_rotate(
        &self,
        point: &Tensor<CpuRuntime>,
        quaternion: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_rotate_impl(self, point, quaternion, checks)
    }

    fn quaternion_relative_angle(
        &self,
        quaternion1: &Tensor<CpuRuntime>,
        quaternion2: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_relative_angle_impl(self, quaternion1, quaternion2, checks)
    }

    fn quaternion_between_two_vectors_3d(
        &self,
        vector1: &Tensor<CpuRuntime>,
        vector2: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_between_two_vectors_3d_impl(self, vector1, vector2)
    }

    fn quaternion_normalized_random_uniform(
        &self,
        shape: &[usize],
        dtype: DType,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        quaternion_normalized_random_uniform_impl(self, shape, dtype)
    }
}
