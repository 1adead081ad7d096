//! CPU implementation of the guarded numeric primitives.

use crate::error::TransformResult;
use crate::impl_generic::{
    nonzero_sign_impl, safe_cospx_div_cosx_impl, safe_shrink_impl, safe_signed_div_impl,
    safe_sinpx_div_sinx_impl, safe_unsigned_div_impl,
};
use crate::traits::safe_ops::SafeOpsAlgorithms;
use crate::validation::CheckMode;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl SafeOpsAlgorithms<CpuRuntime> for CpuClient {
    fn nonzero_sign(&self, x: &Tensor<CpuRuntime>) -> TransformResult<Tensor<CpuRuntime>> {
        nonzero_sign_impl(self, x)
    }

    fn safe_unsigned_div(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        safe_unsigned_div_impl(self, a, b, eps, checks)
    }

    fn safe_signed_div(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        safe_signed_div_impl(self, a, b, eps, checks)
    }

    fn safe_sinpx_div_sinx(
        &self,
        theta: &Tensor<CpuRuntime>,
        factor: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        safe_sinpx_div_sinx_impl(self, theta, factor, eps, checks)
    }

    fn safe_cospx_div_cosx(
        &self,
        theta: &Tensor<CpuRuntime>,
        factor: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        safe_cospx_div_cosx_impl(self, theta, factor, eps, checks)
    }

    fn safe_shrink(
        &self,
        vector: &Tensor<CpuRuntime>,
        minval: f64,
        maxval: f64,
        open_bounds: bool,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        safe_shrink_impl(self, vector, minval, maxval, open_bounds, eps, checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use numr::runtime::cpu::CpuDevice;
    use std::f64::consts::PI;

    fn setup() -> (CpuClient, CpuDevice) {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        (client, device)
    }

    #[test]
    fn test_nonzero_sign_maps_zero_to_one() {
        let (client, device) = setup();
        let x = Tensor::<CpuRuntime>::from_slice(&[-2.0, 0.0, 3.0], &[3], &device);

        let sign = client.nonzero_sign(&x).unwrap();
        let data: Vec<f64> = sign.to_vec();
        assert_eq!(data, vec![-1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_safe_unsigned_div_regular_values() {
        let (client, device) = setup();
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0, 6.0], &[2], &device);
        let b = Tensor::<CpuRuntime>::from_slice(&[2.0, 3.0], &[2], &device);

        let div = client
            .safe_unsigned_div(&a, &b, None, CheckMode::Fast)
            .unwrap();
        let data: Vec<f64> = div.to_vec();
        assert!((data[0] - 0.5).abs() < 1e-12);
        assert!((data[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_safe_signed_div_zero_denominator_is_finite() {
        let (client, device) = setup();
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0, -1.0], &[2], &device);
        let b = Tensor::<CpuRuntime>::from_slice(&[0.0, 0.0], &[2], &device);

        let div = client
            .safe_signed_div(&a, &b, None, CheckMode::Debug)
            .unwrap();
        let data: Vec<f64> = div.to_vec();
        assert!(data.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_safe_signed_div_negative_denominator() {
        let (client, device) = setup();
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0], &[1], &device);
        let b = Tensor::<CpuRuntime>::from_slice(&[-2.0], &[1], &device);

        let div = client
            .safe_signed_div(&a, &b, None, CheckMode::Fast)
            .unwrap();
        let data: Vec<f64> = div.to_vec();
        assert!((data[0] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_safe_sinpx_div_sinx_singular_points() {
        let (client, device) = setup();
        let theta = Tensor::<CpuRuntime>::from_slice(&[0.0, PI, 2.0 * PI], &[3], &device);

        for factor in [0.25, 0.5, 0.9] {
            let div = client
                .safe_sinpx_div_sinx(&theta, factor, None, CheckMode::Debug)
                .unwrap();
            let data: Vec<f64> = div.to_vec();
            assert!(data.iter().all(|v| v.is_finite()), "factor {}", factor);
            // At zero the removable singularity has limit `factor`.
            assert!((data[0] - factor).abs() < 1e-6, "factor {}", factor);
        }
    }

    #[test]
    fn test_safe_sinpx_div_sinx_regular_angle() {
        let (client, device) = setup();
        let theta = Tensor::<CpuRuntime>::from_slice(&[1.0], &[1], &device);

        let div = client
            .safe_sinpx_div_sinx(&theta, 0.5, None, CheckMode::Fast)
            .unwrap();
        let data: Vec<f64> = div.to_vec();
        assert!((data[0] - (0.5f64).sin() / (1.0f64).sin()).abs() < 1e-9);
    }

    #[test]
    fn test_safe_cospx_div_cosx_singular_point() {
        let (client, device) = setup();
        let theta = Tensor::<CpuRuntime>::from_slice(&[PI / 2.0], &[1], &device);

        let identity = client
            .safe_cospx_div_cosx(&theta, 1.0, None, CheckMode::Debug)
            .unwrap();
        let data: Vec<f64> = identity.to_vec();
        assert!((data[0] - 1.0).abs() < 1e-6);

        // l'Hopital limit of cos(3x)/cos(x) at pi/2 is -3.
        let three = client
            .safe_cospx_div_cosx(&theta, 3.0, None, CheckMode::Debug)
            .unwrap();
        let data: Vec<f64> = three.to_vec();
        assert!((data[0] + 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_safe_shrink_pulls_inside_closed_interval() {
        let (client, device) = setup();
        // One ulp above 1, as produced by dot products of unit vectors.
        let v = Tensor::<CpuRuntime>::from_slice(&[1.0 + f64::EPSILON], &[1], &device);

        let shrunk = client
            .safe_shrink(&v, -1.0, 1.0, false, None, CheckMode::Debug)
            .unwrap();
        let data: Vec<f64> = shrunk.to_vec();
        assert!(data[0] <= 1.0);
        assert!(data[0].acos().is_finite());
    }

    #[test]
    fn test_safe_shrink_debug_range_violation() {
        let (client, device) = setup();
        let v = Tensor::<CpuRuntime>::from_slice(&[1.5], &[1], &device);

        let err = client
            .safe_shrink(&v, -1.0, 1.0, false, None, CheckMode::Debug)
            .unwrap_err();
        assert!(matches!(err, TransformError::OutOfRange { .. }));

        // The fast path computes through without raising.
        assert!(client
            .safe_shrink(&v, -1.0, 1.0, false, None, CheckMode::Fast)
            .is_ok());
    }

    #[test]
    fn test_safe_unsigned_div_debug_detects_overflow() {
        let (client, device) = setup();
        let a = Tensor::<CpuRuntime>::from_slice(&[1e300], &[1], &device);
        let b = Tensor::<CpuRuntime>::from_slice(&[0.0], &[1], &device);

        let err = client
            .safe_unsigned_div(&a, &b, None, CheckMode::Debug)
            .unwrap_err();
        assert!(matches!(err, TransformError::NonFinite { .. }));

        // Without checks the degraded value passes through silently.
        let div = client
            .safe_unsigned_div(&a, &b, None, CheckMode::Fast)
            .unwrap();
        let data: Vec<f64> = div.to_vec();
        assert!(data[0].is_infinite());
    }

    #[test]
    fn test_broadcasting_between_operands() {
        let (client, device) = setup();
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0, 2.0, 3.0, 4.0], &[2, 2], &device);
        let b = Tensor::<CpuRuntime>::from_slice(&[2.0, 4.0], &[2], &device);

        let div = client
            .safe_unsigned_div(&a, &b, None, CheckMode::Fast)
            .unwrap();
        assert_eq!(div.shape(), &[2, 2]);
        let data: Vec<f64> = div.to_vec();
        assert!((data[0] - 0.5).abs() < 1e-12);
        assert!((data[3] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_incompatible_shapes_rejected() {
        let (client, device) = setup();
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0, 2.0], &[2], &device);
        let b = Tensor::<CpuRuntime>::from_slice(&[1.0, 2.0, 3.0], &[3], &device);

        let err = client
            .safe_unsigned_div(&a, &b, None, CheckMode::Fast)
            .unwrap_err();
        assert!(err.to_string().contains("must be broadcastable"));
    }
}
