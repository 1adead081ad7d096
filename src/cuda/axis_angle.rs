//! CUDA implementation of the axis-angle operations.

use crate::error::TransformResult;
use crate::impl_generic::{
    axis_angle_from_euler_impl, axis_angle_from_euler_with_small_angles_approximation_impl,
    axis_angle_from_quaternion_impl, axis_angle_from_rotation_matrix_impl,
    axis_angle_from_rotation_vector_impl, axis_angle_inverse_impl, axis_angle_is_normalized_impl,
    axis_angle_rotate_impl,
};
use crate::traits::axis_angle::AxisAngleAlgorithms;
use crate::validation::CheckMode;
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl AxisAngleAlgorithms<CudaRuntime> for CudaClient {
    fn axis_angle_from_quaternion(
        &self,
        quaternion: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<CudaRuntime>, Tensor<CudaRuntime>)> {
        axis_angle_from_quaternion_impl(self, quaternion, checks)
    }

    fn axis_angle_from_euler(
        &self,
        angles: &Tensor<CudaRuntime>,
    ) -> TransformResult<(Tensor<CudaRuntime>, Tensor<CudaRuntime>)> {
        axis_angle_from_euler_impl(self, angles)
    }

    fn axis_angle_from_euler_with_small_angles_approximation(
        &self,
        angles: &Tensor<CudaRuntime>,
    ) -> TransformResult<(Tensor<CudaRuntime>, Tensor<CudaRuntime>)> {
        axis_angle_from_euler_with_small_angles_approximation_impl(self, angles)
    }

    fn axis_angle_from_rotation_matrix(
        &self,
        rotation_matrix: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<CudaRuntime>, Tensor<CudaRuntime>)> {
        axis_angle_from_rotation_matrix_impl(self, rotation_matrix, checks)
    }

    fn axis_angle_from_rotation_vector(
        &self,
        rotation_vector: &Tensor<CudaRuntime>,
    ) -> TransformResult<(Tensor<CudaRuntime>, Tensor<CudaRuntime>)> {
        axis_angle_from_rotation_vector_impl(self, rotation_vector)
    }

    fn axis_angle_inverse(
        &self,
        axis: &Tensor<CudaRuntime>,
        angle: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<CudaRuntime>, Tensor<CudaRuntime>)> {
        axis_angle_inverse_impl(self, axis, angle, checks)
    }

    fn axis_angle_is_normalized(
        &self,
        axis: &Tensor<CudaRuntime>,
        angle: &Tensor<CudaRuntime>,
        atol: Option<f64>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        axis_angle_is_normalized_impl(self, axis, angle, atol)
    }

    fn axis_angle_rotate(
        &self,
        point: &Tensor<CudaRuntime>,
        axis: &Tensor<CudaRuntime>,
        angle: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        axis_angle_rotate_impl(self, point, axis, angle, checks)
    }
}
