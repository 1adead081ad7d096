//! CPU implementation of the slerp operations.

use crate::error::TransformResult;
use crate::impl_generic::{
    slerp_interpolate_impl, slerp_interpolate_with_weights_impl, slerp_quaternion_weights_impl,
    slerp_vector_weights_impl,
};
use crate::traits::slerp::{InterpolationMethod, SlerpAlgorithms};
use crate::validation::CheckMode;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl SlerpAlgorithms<CpuRuntime> for CpuClient {
    fn slerp_quaternion_weights(
        &self,
        quaternion1: &Tensor<CpuRuntime>,
        quaternion2: &Tensor<CpuRuntime>,
        percent: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        slerp_quaternion_weights_impl(self, quaternion1, quaternion2, percent, eps, checks)
    }

    fn slerp_vector_weights(
        &self,
        vector1: &Tensor<CpuRuntime>,
        vector2: &Tensor<CpuRuntime>,
        percent: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        slerp_vector_weights_impl(self, vector1, vector2, percent, eps, checks)
    }

    fn slerp_interpolate_with_weights(
        &self,
        vector1: &Tensor<CpuRuntime>,
        vector2: &Tensor<CpuRuntime>,
        weight1: &Tensor<CpuRuntime>,
        weight2: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        slerp_interpolate_with_weights_impl(self, vector1, vector2, weight1, weight2)
    }

    fn slerp_interpolate(
        &self,
        vector1: &Tensor<CpuRuntime>,
        vector2: &Tensor<CpuRuntime>,
        percent: f64,
        method: InterpolationMethod,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        slerp_interpolate_impl(self, vector1, vector2, percent, method, eps, checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::traits::quaternion::QuaternionAlgorithms;
    use numr::dtype::DType;
    use numr::runtime::cpu::CpuDevice;
    use std::f64::consts::FRAC_1_SQRT_2;

    const SIN_22_5: f64 = 0.3826834323650898;
    const COS_22_5: f64 = 0.9238795325112867;
    const QUAT_ID: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
    const QUAT_Z_45: [f64; 4] = [0.0, 0.0, SIN_22_5, COS_22_5];
    const QUAT_Z_90: [f64; 4] = [0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2];

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
    fn test_quaternion_endpoints() {
        let (client, device) = setup();
        let q1 = Tensor::<CpuRuntime>::from_slice(&QUAT_ID, &[4], &device);
        let q2 = Tensor::<CpuRuntime>::from_slice(&QUAT_Z_90, &[4], &device);

        let at_start: Vec<f64> = client
            .slerp_interpolate(
                &q1,
                &q2,
                0.0,
                InterpolationMethod::Quaternion,
                None,
                CheckMode::Debug,
            )
            .unwrap()
            .to_vec();
        assert_close(&at_start, &QUAT_ID, 1e-6);

        let at_end: Vec<f64> = client
            .slerp_interpolate(
                &q1,
                &q2,
                1.0,
                InterpolationMethod::Quaternion,
                None,
                CheckMode::Debug,
            )
            .unwrap()
            .to_vec();
        assert_close(&at_end, &QUAT_Z_90, 1e-6);
    }

    #[test]
    fn test_quaternion_midpoint() {
        let (client, device) = setup();
        let q1 = Tensor::<CpuRuntime>::from_slice(&QUAT_ID, &[4], &device);
        let q2 = Tensor::<CpuRuntime>::from_slice(&QUAT_Z_90, &[4], &device);

        let mid: Vec<f64> = client
            .slerp_interpolate(
                &q1,
                &q2,
                0.5,
                InterpolationMethod::Quaternion,
                None,
                CheckMode::Debug,
            )
            .unwrap()
            .to_vec();
        assert_close(&mid, &QUAT_Z_45, 1e-6);
    }

    #[test]
    fn test_quaternion_takes_shorter_path() {
        let (client, device) = setup();
        let q1 = Tensor::<CpuRuntime>::from_slice(&QUAT_ID, &[4], &device);
        let negated: Vec<f64> = QUAT_Z_90.iter().map(|v| -v).collect();
        let q2 = Tensor::<CpuRuntime>::from_slice(&negated, &[4], &device);

        let mid: Vec<f64> = client
            .slerp_interpolate(
                &q1,
                &q2,
                0.5,
                InterpolationMethod::Quaternion,
                None,
                CheckMode::Debug,
            )
            .unwrap()
            .to_vec();
        // -q encodes the same rotation, so the midpoint must still be the
        // 45-degree rotation up to the global sign.
        let dot: f64 = mid.iter().zip(QUAT_Z_45.iter()).map(|(a, b)| a * b).sum();
        assert!((dot.abs() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_identical_quaternions_stay_fixed() {
        let (client, _device) = setup();
        let quat = client
            .quaternion_normalized_random_uniform(&[3, 4], DType::F64)
            .unwrap();

        let mid: Vec<f64> = client
            .slerp_interpolate(
                &quat,
                &quat,
                0.5,
                InterpolationMethod::Quaternion,
                None,
                CheckMode::Debug,
            )
            .unwrap()
            .to_vec();
        let expected: Vec<f64> = quat.to_vec();
        assert_close(&mid, &expected, 1e-6);
    }

    #[test]
    fn test_vector_weights_orthogonal_midpoint() {
        let (client, device) = setup();
        let v1 = Tensor::<CpuRuntime>::from_slice(&[1.0, 0.0, 0.0], &[3], &device);
        let v2 = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0, 0.0], &[3], &device);

        let (w1, w2) = client
            .slerp_vector_weights(&v1, &v2, 0.5, None, CheckMode::Debug)
            .unwrap();
        let w1: Vec<f64> = w1.to_vec();
        let w2: Vec<f64> = w2.to_vec();
        // sin(pi/4) / sin(pi/2)
        assert!((w1[0] - FRAC_1_SQRT_2).abs() < 1e-6);
        assert!((w2[0] - FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_vector_endpoints_with_unnormalized_inputs() {
        let (client, device) = setup();
        let v1 = Tensor::<CpuRuntime>::from_slice(&[3.0, 0.0, 1.0], &[3], &device);
        let v2 = Tensor::<CpuRuntime>::from_slice(&[0.0, -2.0, 0.5], &[3], &device);

        let at_start: Vec<f64> = client
            .slerp_interpolate(
                &v1,
                &v2,
                0.0,
                InterpolationMethod::Vector,
                None,
                CheckMode::Debug,
            )
            .unwrap()
            .to_vec();
        assert_close(&at_start, &[3.0, 0.0, 1.0], 1e-6);

        let at_end: Vec<f64> = client
            .slerp_interpolate(
                &v1,
                &v2,
                1.0,
                InterpolationMethod::Vector,
                None,
                CheckMode::Debug,
            )
            .unwrap()
            .to_vec();
        assert_close(&at_end, &[0.0, -2.0, 0.5], 1e-6);
    }

    #[test]
    fn test_interpolate_with_weights() {
        let (client, device) = setup();
        let v1 = Tensor::<CpuRuntime>::from_slice(&[4.0, 0.0], &[2], &device);
        let v2 = Tensor::<CpuRuntime>::from_slice(&[0.0, 8.0], &[2], &device);
        let w1 = Tensor::<CpuRuntime>::from_slice(&[0.25], &[1], &device);
        let w2 = Tensor::<CpuRuntime>::from_slice(&[0.75], &[1], &device);

        let out: Vec<f64> = client
            .slerp_interpolate_with_weights(&v1, &v2, &w1, &w2)
            .unwrap()
            .to_vec();
        assert_close(&out, &[1.0, 6.0], 1e-12);
    }

    #[test]
    fn test_quaternion_weights_shapes() {
        let (client, _device) = setup();
        let q1 = client
            .quaternion_normalized_random_uniform(&[2, 3, 4], DType::F64)
            .unwrap();
        let q2 = client
            .quaternion_normalized_random_uniform(&[2, 3, 4], DType::F64)
            .unwrap();

        let (w1, w2) = client
            .slerp_quaternion_weights(&q1, &q2, 0.3, None, CheckMode::Debug)
            .unwrap();
        assert_eq!(w1.shape(), &[2, 3, 1]);
        assert_eq!(w2.shape(), &[2, 3, 1]);
    }

    #[test]
    fn test_mismatched_shapes_rejected() {
        let (client, _device) = setup();
        let q1 = client
            .quaternion_normalized_random_uniform(&[2, 4], DType::F64)
            .unwrap();
        let q2 = client
            .quaternion_normalized_random_uniform(&[4], DType::F64)
            .unwrap();

        let err = client
            .slerp_quaternion_weights(&q1, &q2, 0.5, None, CheckMode::Fast)
            .unwrap_err();
        assert!(matches!(err, TransformError::InvalidShape { .. }));
    }

    #[test]
    fn test_quaternion_weights_debug_rejects_unnormalized() {
        let (client, device) = setup();
        let q1 = Tensor::<CpuRuntime>::from_slice(&[0.0, 0.0, 0.0, 2.0], &[4], &device);
        let q2 = Tensor::<CpuRuntime>::from_slice(&QUAT_ID, &[4], &device);

        let err = client
            .slerp_quaternion_weights(&q1, &q2, 0.5, None, CheckMode::Debug)
            .unwrap_err();
        assert!(matches!(err, TransformError::NotNormalized { .. }));

        assert!(client
            .slerp_quaternion_weights(&q1, &q2, 0.5, None, CheckMode::Fast)
            .is_ok());
    }

    #[test]
    fn test_extrapolation_is_finite() {
        let (client, device) = setup();
        let q1 = Tensor::<CpuRuntime>::from_slice(&QUAT_ID, &[4], &device);
        let q2 = Tensor::<CpuRuntime>::from_slice(&QUAT_Z_45, &[4], &device);

        let out: Vec<f64> = client
            .slerp_interpolate(
                &q1,
                &q2,
                2.0,
                InterpolationMethod::Quaternion,
                None,
                CheckMode::Debug,
            )
            .unwrap()
            .to_vec();
        assert!(out.iter().all(|v| v.is_finite()));
        // Extrapolating twice the 45-degree step lands on the 90-degree
        // rotation.
        let dot: f64 = out.iter().zip(QUAT_Z_90.iter()).map(|(a, b)| a * b).sum();
        assert!((dot.abs() - 1.0).abs() < 1e-6);
    }
}
