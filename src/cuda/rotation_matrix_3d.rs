//! CUDA implementation of the 3d rotation matrix operations.

use crate::error::TransformResult;
use crate::impl_generic::{
    assert_rotation_matrix_normalized_impl, rotation_matrix_3d_from_axis_angle_impl,
    rotation_matrix_3d_from_euler_impl,
    rotation_matrix_3d_from_euler_with_small_angles_approximation_impl,
    rotation_matrix_3d_from_quaternion_impl, rotation_matrix_3d_inverse_impl,
    rotation_matrix_3d_rotate_impl,
};
use crate::traits::rotation_matrix_3d::RotationMatrix3dAlgorithms;
use crate::validation::CheckMode;
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl RotationMatrix3dAlgorithms<CudaRuntime> for CudaClient {
    fn rotation_matrix_3d_from_axis_angle(
        &self,
        axis: &Tensor<CudaRuntime>,
        angle: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        rotation_matrix_3d_from_axis_angle_impl(self, axis, angle, checks)
    }

    fn rotation_matrix_3d_from_euler(
        &self,
        angles: &Tensor<CudaRuntime>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        rotation_matrix_3d_from_euler_impl(self, angles)
    }

    fn rotation_matrix_3d_from_euler_with_small_angles_approximation(
        &self,
        angles: &Tensor<CudaRuntime>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        rotation_matrix_3d_from_euler_with_small_angles_approximation_impl(self, angles)
    }

    fn rotation_matrix_3d_from_quaternion(
        &self,
        quaternion: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        rotation_matrix_3d_from_quaternion_impl(self, quaternion, checks)
    }

    fn rotation_matrix_3d_inverse(
        &self,
        rotation_matrix: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        rotation_matrix_3d_inverse_impl(self, rotation_matrix, checks)
    }

    fn rotation_matrix_3d_rotate(
        &self,
        point: &Tensor<CudaRuntime>,
        rotation_matrix: &Tensor<CudaRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        rotation_matrix_3d_rotate_impl(self, point, rotation_matrix, checks)
    }

    fn assert_rotation_matrix_normalized(
        &self,
        rotation_matrix: &Tensor<CudaRuntime>,
        atol: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<()> {
        assert_rotation_matrix_normalized_impl(self, rotation_matrix, atol, checks)
    }
}
