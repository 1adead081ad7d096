//! CPU implementation of the axis-angle operations.

use crate::error::TransformResult;
use crate::impl_generic::{
    axis_angle_from_euler_impl, axis_angle_from_euler_with_small_angles_approximation_impl,
    axis_angle_from_quaternion_impl, axis_angle_from_rotation_matrix_impl,
    axis_angle_from_rotation_vector_impl, axis_angle_inverse_impl, axis_angle_is_normalized_impl,
    axis_angle_rotate_impl,
};
use crate::traits::axis_angle::AxisAngleAlgorithms;
use crate::validation::CheckMode;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl AxisAngleAlgorithms<CpuRuntime> for CpuClient {
    fn axis_angle_from_quaternion(
        &self,
        quaternion: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        axis_angle_from_quaternion_impl(self, quaternion, checks)
    }

    fn axis_angle_from_euler(
        &self,
        angles: &Tensor<CpuRuntime>,
    ) -> TransformResult<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        axis_angle_from_euler_impl(self, angles)
    }

    fn axis_angle_from_euler_with_small_angles_approximation(
        &self,
        angles: &Tensor<CpuRuntime>,
    ) -> TransformResult<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        axis_angle_from_euler_with_small_angles_approximation_impl(self, angles)
    }

    fn axis_angle_from_rotation_matrix(
        &self,
        rotation_matrix: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        axis_angle_from_rotation_matrix_impl(self, rotation_matrix, checks)
    }

    fn axis_angle_from_rotation_vector(
        &self,
        rotation_vector: &Tensor<CpuRuntime>,
    ) -> TransformResult<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        axis_angle_from_rotation_vector_impl(self, rotation_vector)
    }

    fn axis_angle_inverse(
        &self,
        axis: &Tensor<CpuRuntime>,
        angle: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        axis_angle_inverse_impl(self, axis, angle, checks)
    }

    fn axis_angle_is_normalized(
        &self,
        axis: &Tensor<CpuRuntime>,
        angle: &Tensor<CpuRuntime>,
        atol: Option<f64>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        axis_angle_is_normalized_impl(self, axis, angle, atol)
    }

    fn axis_angle_rotate(
        &self,
        point: &Tensor<CpuRuntime>,
        axis: &Tensor<CpuRuntime>,
        angle: &Tensor<CpuRuntime>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        axis_angle_rotate_impl(self, point, axis, angle, checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::traits::quaternion::QuaternionAlgorithms;
    use numr::dtype::DType;
    use numr::ops::{RandomOps, ScalarOps, TensorOps, TypeConversionOps};
    use numr::runtime::cpu::CpuDevice;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

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
    fn test_rotate_preset() {
        let (client, device) = setup();
        let point = Tensor::<CpuRuntime>::from_slice(&[1.0, 0.0, 0.0], &[3], &device);
        let axis = Tensor::<CpuRuntime>::from_slice(&[0.0, 0.0, 1.0], &[3], &device);
        let angle = Tensor::<CpuRuntime>::from_slice(&[PI / 2.0], &[1], &device);

        let rotated = client
            .axis_angle_rotate(&point, &axis, &angle, CheckMode::Debug)
            .unwrap();
        let data: Vec<f64> = rotated.to_vec();
        assert_close(&data, &[0.0, 1.0, 0.0], 1e-6);
    }

    #[test]
    fn test_rotate_matches_quaternion_rotate() {
        let (client, device) = setup();
        let axis = Tensor::<CpuRuntime>::from_slice(
            &[0.0, 0.0, 1.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0],
            &[2, 3],
            &device,
        );
        let angle = Tensor::<CpuRuntime>::from_slice(&[0.8, -1.9], &[2, 1], &device);
        let point = client.randn(&[2, 3], DType::F64).unwrap();

        let direct: Vec<f64> = client
            .axis_angle_rotate(&point, &axis, &angle, CheckMode::Debug)
            .unwrap()
            .to_vec();
        let quat = client
            .quaternion_from_axis_angle(&axis, &angle, CheckMode::Debug)
            .unwrap();
        let via_quat: Vec<f64> = client
            .quaternion_rotate(&point, &quat, CheckMode::Debug)
            .unwrap()
            .to_vec();
        assert_close(&direct, &via_quat, 1e-9);
    }

    #[test]
    fn test_from_quaternion_preset() {
        let (client, device) = setup();
        let quat = Tensor::<CpuRuntime>::from_slice(
            &[0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2],
            &[4],
            &device,
        );

        let (axis, angle) = client
            .axis_angle_from_quaternion(&quat, CheckMode::Debug)
            .unwrap();
        let axis: Vec<f64> = axis.to_vec();
        let angle: Vec<f64> = angle.to_vec();
        assert_close(&axis, &[0.0, 0.0, 1.0], 1e-6);
        assert!((angle[0] - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_quaternion_negative_hemisphere() {
        let (client, device) = setup();
        // -q encodes the same rotation; the axis flips along with w.
        let quat = Tensor::<CpuRuntime>::from_slice(
            &[0.0, 0.0, -FRAC_1_SQRT_2, -FRAC_1_SQRT_2],
            &[4],
            &device,
        );

        let (axis, angle) = client
            .axis_angle_from_quaternion(&quat, CheckMode::Debug)
            .unwrap();
        let axis: Vec<f64> = axis.to_vec();
        let angle: Vec<f64> = angle.to_vec();
        assert_close(&axis, &[0.0, 0.0, 1.0], 1e-6);
        assert!((angle[0] - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_quaternion_identity_uses_default_axis() {
        let (client, device) = setup();
        let quat = Tensor::<CpuRuntime>::from_slice(&[0.0, 0.0, 0.0, 1.0], &[4], &device);

        let (axis, angle) = client
            .axis_angle_from_quaternion(&quat, CheckMode::Debug)
            .unwrap();
        let axis: Vec<f64> = axis.to_vec();
        let angle: Vec<f64> = angle.to_vec();
        assert_close(&axis, &[1.0, 0.0, 0.0], 1e-12);
        assert!(angle[0].abs() < 1e-6);
    }

    #[test]
    fn test_from_rotation_vector_round_trip() {
        let (client, device) = setup();
        let rotvec = Tensor::<CpuRuntime>::from_slice(
            &[0.0, 0.0, PI / 2.0, 0.3, -0.4, 1.2],
            &[2, 3],
            &device,
        );

        let (axis, angle) = client.axis_angle_from_rotation_vector(&rotvec).unwrap();
        let axis_data: Vec<f64> = axis.to_vec();
        let angle_data: Vec<f64> = angle.to_vec();
        assert_close(&axis_data[0..3], &[0.0, 0.0, 1.0], 1e-9);
        assert!((angle_data[0] - PI / 2.0).abs() < 1e-9);

        // axis * angle reconstructs the rotation vector.
        let expected: Vec<f64> = rotvec.to_vec();
        for i in 0..2 {
            for j in 0..3 {
                let r = axis_data[i * 3 + j] * angle_data[i];
                assert!((r - expected[i * 3 + j]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_from_euler_preset() {
        let (client, device) = setup();
        let angles = Tensor::<CpuRuntime>::from_slice(&[0.0, 0.0, PI / 2.0], &[3], &device);

        let (axis, angle) = client.axis_angle_from_euler(&angles).unwrap();
        let axis: Vec<f64> = axis.to_vec();
        let angle: Vec<f64> = angle.to_vec();
        assert_close(&axis, &[0.0, 0.0, 1.0], 1e-6);
        assert!((angle[0] - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_euler_small_angles_close_to_exact() {
        let (client, device) = setup();
        let angles = Tensor::<CpuRuntime>::from_slice(&[0.1, -0.2, 0.15], &[3], &device);

        let (axis_e, angle_e) = client.axis_angle_from_euler(&angles).unwrap();
        let (axis_a, angle_a) = client
            .axis_angle_from_euler_with_small_angles_approximation(&angles)
            .unwrap();
        let axis_e: Vec<f64> = axis_e.to_vec();
        let axis_a: Vec<f64> = axis_a.to_vec();
        let angle_e: Vec<f64> = angle_e.to_vec();
        let angle_a: Vec<f64> = angle_a.to_vec();
        assert_close(&axis_e, &axis_a, 1e-3);
        assert_close(&angle_e, &angle_a, 1e-3);
    }

    #[test]
    fn test_from_rotation_matrix_preset() {
        let (client, device) = setup();
        let matrix = Tensor::<CpuRuntime>::from_slice(
            &[0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            &[3, 3],
            &device,
        );

        let (axis, angle) = client
            .axis_angle_from_rotation_matrix(&matrix, CheckMode::Debug)
            .unwrap();
        let axis: Vec<f64> = axis.to_vec();
        let angle: Vec<f64> = angle.to_vec();
        assert_close(&axis, &[0.0, 0.0, 1.0], 1e-6);
        assert!((angle[0] - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let (client, device) = setup();
        let axis = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0, 0.0], &[3], &device);
        let angle = Tensor::<CpuRuntime>::from_slice(&[1.1], &[1], &device);
        let point = client.randn(&[3], DType::F64).unwrap();

        let rotated = client
            .axis_angle_rotate(&point, &axis, &angle, CheckMode::Debug)
            .unwrap();
        let (inv_axis, inv_angle) = client
            .axis_angle_inverse(&axis, &angle, CheckMode::Debug)
            .unwrap();
        let restored = client
            .axis_angle_rotate(&rotated, &inv_axis, &inv_angle, CheckMode::Debug)
            .unwrap();

        let expected: Vec<f64> = point.to_vec();
        let actual: Vec<f64> = restored.to_vec();
        assert_close(&actual, &expected, 1e-9);
    }

    #[test]
    fn test_is_normalized_mask() {
        let (client, device) = setup();
        let axis = Tensor::<CpuRuntime>::from_slice(
            &[1.0, 0.0, 0.0, 2.0, 0.0, 0.0],
            &[2, 3],
            &device,
        );
        let angle = Tensor::<CpuRuntime>::from_slice(&[0.1, 0.2], &[2, 1], &device);

        let mask = client
            .axis_angle_is_normalized(&axis, &angle, None)
            .unwrap();
        let mask: Vec<f64> = client.cast(&mask, DType::F64).unwrap().to_vec();
        assert_eq!(mask, vec![1.0, 0.0]);
    }

    #[test]
    fn test_rotate_shape_error_names_angle() {
        let (client, device) = setup();
        let point = Tensor::<CpuRuntime>::from_slice(&[1.0, 0.0, 0.0], &[3], &device);
        let axis = Tensor::<CpuRuntime>::from_slice(&[0.0, 0.0, 1.0], &[3], &device);
        let angle = Tensor::<CpuRuntime>::from_slice(&[0.1, 0.2, 0.3], &[3], &device);

        let err = client
            .axis_angle_rotate(&point, &axis, &angle, CheckMode::Fast)
            .unwrap_err();
        assert!(matches!(err, TransformError::InvalidShape { arg: "angle", .. }));
    }

    #[test]
    fn test_rotate_debug_rejects_unnormalized_axis() {
        let (client, device) = setup();
        let point = Tensor::<CpuRuntime>::from_slice(&[1.0, 0.0, 0.0], &[3], &device);
        let axis = Tensor::<CpuRuntime>::from_slice(&[0.0, 0.0, 3.0], &[3], &device);
        let angle = Tensor::<CpuRuntime>::from_slice(&[0.1], &[1], &device);

        let err = client
            .axis_angle_rotate(&point, &axis, &angle, CheckMode::Debug)
            .unwrap_err();
        assert!(matches!(err, TransformError::NotNormalized { arg: "axis", .. }));
        assert!(client
            .axis_angle_rotate(&point, &axis, &angle, CheckMode::Fast)
            .is_ok());
    }

    #[test]
    fn test_round_trip_through_quaternion() {
        let (client, _device) = setup();
        let quat = client
            .quaternion_normalized_random_uniform(&[4, 4], DType::F64)
            .unwrap();

        let (axis, angle) = client
            .axis_angle_from_quaternion(&quat, CheckMode::Debug)
            .unwrap();
        let recovered = client
            .quaternion_from_axis_angle(&axis, &angle, CheckMode::Debug)
            .unwrap();

        // Same rotation up to the global sign.
        let q: Vec<f64> = quat.to_vec();
        let r: Vec<f64> = recovered.to_vec();
        for i in 0..4 {
            let dot: f64 = (0..4).map(|j| q[i * 4 + j] * r[i * 4 + j]).sum();
            assert!((dot.abs() - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_scaled_axis_is_not_normalized() {
        let (client, device) = setup();
        let axis = Tensor::<CpuRuntime>::from_slice(&[1.0, 0.0, 0.0], &[3], &device);
        let angle = Tensor::<CpuRuntime>::from_slice(&[0.5], &[1], &device);
        let scaled = client.mul_scalar(&axis, 1.5).unwrap();

        let mask = client
            .axis_angle_is_normalized(&scaled, &angle, None)
            .unwrap();
        let mask: Vec<f64> = client.cast(&mask, DType::F64).unwrap().to_vec();
        assert_eq!(mask, vec![0.0]);
    }
}
