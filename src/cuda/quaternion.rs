//! CUDA implementation of the quaternion operations.

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
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl QuaternionAlgorithms<CudaRuntime> for CudaClient {
    fn quaternion_from_axis_angle(
        &self,
        axis: &Tensor<CudaRuntime>,
        angle: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_from_axis_angle_impl(self, axis, angle, checks)
    }

    fn quaternion_from_euler(
        &self,
        angles: &Tensor<CudaRuntime>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_from_euler_impl(self, angles)
    }

    fn quaternion_from_euler_with_small_angles_approximation(
        &self,
        angles: &Tensor<CudaRuntime>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_from_euler_with_small_angles_approximation_impl(self, angles)
    }

    fn quaternion_from_rotation_matrix(
        &self,
        rotation_matrix: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_from_rotation_matrix_impl(self, rotation_matrix, checks)
    }

    fn quaternion_conjugate(
        &self,
        quaternion: &Tensor<CudaRuntime>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_conjugate_impl(self, quaternion)
    }

    fn quaternion_inverse(
        &self,
        quaternion: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_inverse_impl(self, quaternion, checks)
    }

    fn quaternion_multiply(
        &self,
        quaternion1: &Tensor<CudaRuntime>,
        quaternion2: &Tensor<CudaRuntime>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_multiply_impl(self, quaternion1, quaternion2)
    }

    fn quaternion_normalize(
        &self,
        quaternion: &Tensor<CudaRuntime>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_normalize_impl(self, quaternion)
    }

    fn quaternion_is_normalized(
        &self,
        quaternion: &Tensor<CudaRuntime>,
        atol: Option<f64>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_is_normalized_impl(self, quaternion, atol)
    }

    fn quaternion_rotate(
        &self,
        point: &Tensor<CudaRuntime>,
        quaternion: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_rotate_impl(self, point, quaternion, checks)
    }

    fn quaternion_relative_angle(
        &self,
        quaternion1: &Tensor<CudaRuntime>,
        quaternion2: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_relative_angle_impl(self, quaternion1, quaternion2, checks)
    }

    fn quaternion_between_two_vectors_3d(
        &self,
        vector1: &Tensor<CudaRuntime>,
        vector2: &Tensor<CudaRuntime>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_between_two_vectors_3d_impl(self, vector1, vector2)
    }

    fn quaternion_normalized_random_uniform(
        &self,
        shape: &[usize],
        dtype: DType,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        quaternion_normalized_random_uniform_impl(self, shape, dtype)
    }
}
