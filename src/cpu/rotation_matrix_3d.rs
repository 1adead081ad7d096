//! CPU implementation of the 3d rotation matrix operations.

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
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl RotationMatrix3dAlgorithms<CpuRuntime> for CpuClient {
    fn rotation_matrix_3d_from_axis_angle(
        &self,
        axis: &Tensor<CpuRuntime>,
        angle: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        rotation_matrix_3d_from_axis_angle_impl(self, axis, angle, checks)
    }

    fn rotation_matrix_3d_from_euler(
        &self,
        angles: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        rotation_matrix_3d_from_euler_impl(self, angles)
    }

    fn rotation_matrix_3d_from_euler_with_small_angles_approximation(
        &self,
        angles: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        rotation_matrix_3d_from_euler_with_small_angles_approximation_impl(self, angles)
    }

    fn rotation_matrix_3d_from_quaternion(
        &self,
        quaternion: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        rotation_matrix_3d_from_quaternion_impl(self, quaternion, checks)
    }

    fn rotation_matrix_3d_inverse(
        &self,
        rotation_matrix: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        rotation_matrix_3d_inverse_impl(self, rotation_matrix, checks)
    }

    fn rotation_matrix_3d_rotate(
        &self,
        point: &Tensor<CpuRuntime>,
        rotation_matrix: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        rotation_matrix_3d_rotate_impl(self, point, rotation_matrix, checks)
    }

    fn assert_rotation_matrix_normalized(
        &self,
        rotation_matrix: &Tensor<CpuRuntime>,
        atol: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<()> {
        assert_rotation_matrix_normalized_impl(self, rotation_matrix, atol, checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::traits::quaternion::QuaternionAlgorithms;
    use numr::dtype::DType;
    use numr::ops::RandomOps;
    use numr::runtime::cpu::CpuDevice;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    const MAT_Z_90: [f64; 9] = [0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];

    fn setup() -> (CpuClient, CpuDevice) {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        (client, device)
    }

    fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < tol, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn test_from_euler_preset() {
        let (client, device) = setup();
        let angles = Tensor::<CpuRuntime>::from_slice(&[0.0, 0.0, PI / 2.0], &[3], &device);

        let matrix = client.rotation_matrix_3d_from_euler(&angles).unwrap();
        assert_eq!(matrix.shape(), &[3, 3]);
        let data: Vec<f64> = matrix.to_vec();
        assert_close(&data, &MAT_Z_90, 1e-9);
    }

    #[test]
    fn test_from_euler_keeps_batch_shape() {
        let (client, _device) = setup();
        let angles = client.randn(&[2, 2, 3], DType::F64).unwrap();

        let matrix = client.rotation_matrix_3d_from_euler(&angles).unwrap();
        assert_eq!(matrix.shape(), &[2, 2, 3, 3]);
        client
            .assert_rotation_matrix_normalized(&matrix, None, CheckMode::Debug)
            .unwrap();
    }

    #[test]
    fn test_from_quaternion_preset() {
        let (client, device) = setup();
        let quat = Tensor::<CpuRuntime>::from_slice(
            &[0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2],
            &[4],
            &device,
        );

        let matrix = client
            .rotation_matrix_3d_from_quaternion(&quat, CheckMode::Debug)
            .unwrap();
        let data: Vec<f64> = matrix.to_vec();
        assert_close(&data, &MAT_Z_90, 1e-9);
    }

    #[test]
    fn test_from_axis_angle_preset() {
        let (client, device) = setup();
        let axis = Tensor::<CpuRuntime>::from_slice(&[0.0, 0.0, 1.0], &[3], &device);
        let angle = Tensor::<CpuRuntime>::from_slice(&[PI / 2.0], &[1], &device);

        let matrix = client
            .rotation_matrix_3d_from_axis_angle(&axis, &angle, CheckMode::Debug)
            .unwrap();
        let data: Vec<f64> = matrix.to_vec();
        assert_close(&data, &MAT_Z_90, 1e-9);
    }

    #[test]
    fn test_rotate_preset() {
        let (client, device) = setup();
        let point = Tensor::<CpuRuntime>::from_slice(&[1.0, 0.0, 0.0], &[3], &device);
        let matrix = Tensor::<CpuRuntime>::from_slice(&MAT_Z_90, &[3, 3], &device);

        let rotated = client
            .rotation_matrix_3d_rotate(&point, &matrix, CheckMode::Debug)
            .unwrap();
        let data: Vec<f64> = rotated.to_vec();
        assert_close(&data, &[0.0, 1.0, 0.0], 1e-9);
    }

    #[test]
    fn test_inverse_is_transpose() {
        let (client, device) = setup();
        let matrix = Tensor::<CpuRuntime>::from_slice(&MAT_Z_90, &[3, 3], &device);

        let inverse = client
            .rotation_matrix_3d_inverse(&matrix, CheckMode::Debug)
            .unwrap();
        let data: Vec<f64> = inverse.to_vec();
        let expected = [0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        assert_close(&data, &expected, 1e-12);
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let (client, _device) = setup();
        let quat = client
            .quaternion_normalized_random_uniform(&[3, 4], DType::F64)
            .unwrap();
        let matrix = client
            .rotation_matrix_3d_from_quaternion(&quat, CheckMode::Fast)
            .unwrap();
        let point = client.randn(&[3, 3], DType::F64).unwrap();

        let rotated = client
            .rotation_matrix_3d_rotate(&point, &matrix, CheckMode::Fast)
            .unwrap();
        let inverse = client
            .rotation_matrix_3d_inverse(&matrix, CheckMode::Fast)
            .unwrap();
        let restored = client
            .rotation_matrix_3d_rotate(&rotated, &inverse, CheckMode::Fast)
            .unwrap();

        let expected: Vec<f64> = point.to_vec();
        let actual: Vec<f64> = restored.to_vec();
        assert_close(&actual, &expected, 1e-9);
    }

    #[test]
    fn test_small_angles_approximation_close_to_exact() {
        let (client, device) = setup();
        let angles = Tensor::<CpuRuntime>::from_slice(
            &[0.2, -0.15, 0.1, -0.05, 0.25, -0.2],
            &[2, 3],
            &device,
        );

        let exact: Vec<f64> = client
            .rotation_matrix_3d_from_euler(&angles)
            .unwrap()
            .to_vec();
        let approx: Vec<f64> = client
            .rotation_matrix_3d_from_euler_with_small_angles_approximation(&angles)
            .unwrap()
            .to_vec();
        assert_close(&exact, &approx, 1e-3);
    }

    #[test]
    fn test_assert_normalized_accepts_rotations() {
        let (client, device) = setup();
        let matrix = Tensor::<CpuRuntime>::from_slice(&MAT_Z_90, &[3, 3], &device);
        client
            .assert_rotation_matrix_normalized(&matrix, None, CheckMode::Debug)
            .unwrap();
    }

    #[test]
    fn test_assert_normalized_rejects_scaled_matrix() {
        let (client, device) = setup();
        let matrix = Tensor::<CpuRuntime>::from_slice(
            &[2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0],
            &[3, 3],
            &device,
        );

        let err = client
            .assert_rotation_matrix_normalized(&matrix, None, CheckMode::Debug)
            .unwrap_err();
        assert!(matches!(
            err,
            TransformError::NotNormalized { arg: "rotation_matrix", .. }
        ));

        // Fast mode skips the numeric check entirely.
        client
            .assert_rotation_matrix_normalized(&matrix, None, CheckMode::Fast)
            .unwrap();
    }

    #[test]
    fn test_assert_normalized_rejects_reflection() {
        let (client, device) = setup();
        // Orthonormal but det = -1.
        let matrix = Tensor::<CpuRuntime>::from_slice(
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0],
            &[3, 3],
            &device,
        );

        let err = client
            .assert_rotation_matrix_normalized(&matrix, None, CheckMode::Debug)
            .unwrap_err();
        assert!(matches!(err, TransformError::NotNormalized { .. }));
    }

    #[test]
    fn test_shape_error() {
        let (client, device) = setup();
        let matrix = Tensor::<CpuRuntime>::from_slice(&[1.0, 0.0, 0.0], &[3], &device);

        let err = client
            .assert_rotation_matrix_normalized(&matrix, None, CheckMode::Fast)
            .unwrap_err();
        assert!(matches!(
            err,
            TransformError::InvalidShape { arg: "rotation_matrix", .. }
        ));
    }
}
