//! WebGPU implementation of the quaternion operations.

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
use numr::runtime::wgpu::{WgpuClient, WgpuRuntime};
use numr::tensor::Tensor;

impl QuaternionAlgorithms<WgpuRuntime> for WgpuClient {
    fn quaternion_from_axis_angle(
        &self,
        axis: &Tensor<WgpuRuntime>,
        angle: &Tensor<WgpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_from_axis_angle_impl(self, axis, angle, checks)
    }

    fn quaternion_from_euler(
        &self,
        angles: &Tensor<WgpuRuntime>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_from_euler_impl(self, angles)
    }

    fn quaternion_from_euler_with_small_angles_approximation(
        &self,
        angles: &Tensor<WgpuRuntime>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_from_euler_with_small_angles_approximation_impl(self, angles)
    }

    fn quaternion_from_rotation_matrix(
        &self,
        rotation_matrix: &Tensor<WgpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_from_rotation_matrix_impl(self, rotation_matrix, checks)
    }

    fn quaternion_conjugate(
        &self,
        quaternion: &Tensor<WgpuRuntime>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_conjugate_impl(self, quaternion)
    }

    fn quaternion_inverse(
        &self,
        quaternion: &Tensor<WgpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_inverse_impl(self, quaternion, checks)
    }

    fn quaternion_multiply(
        &self,
        quaternion1: &Tensor<WgpuRuntime>,
        quaternion2: &Tensor<WgpuRuntime>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_multiply_impl(self, quaternion1, quaternion2)
    }

    fn quaternion_normalize(
        &self,
        quaternion: &Tensor<WgpuRuntime>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_normalize_impl(self, quaternion)
    }

    fn quaternion_is_normalized(
        &self,
        quaternion: &Tensor<WgpuRuntime>,
        atol: Option<f64>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_is_normalized_impl(self, quaternion, atol)
    }

    fn quaternion_rotate(
        &self,
        point: &Tensor<WgpuRuntime>,
        quaternion: &Tensor<WgpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_rotate_impl(self, point, quaternion, checks)
    }

    fn quaternion_relative_angle(
        &self,
        quaternion1: &Tensor<WgpuRuntime>,
        quaternion2: &Tensor<WgpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_relative_angle_impl(self, quaternion1, quaternion2, checks)
    }

    fn quaternion_between_two_vectors_3d(
        &self,
        vector1: &Tensor<WgpuRuntime>,
        vector2: &Tensor<WgpuRuntime>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_between_two_vectors_3d_impl(self, vector1, vector2)
    }

    fn quaternion_normalized_random_uniform(
        &self,
        shape: &[usize],
        dtype: DType,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        quaternion_normalized_random_uniform_impl(self, shape, dtype)
    }
}
