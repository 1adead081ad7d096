//! CPU implementation of the batched vector helpers.

use crate::error::TransformResult;
use crate::impl_generic::{
    vector_cross_impl, vector_dot_impl, vector_l2_normalize_impl, vector_norm_impl,
};
use crate::traits::vector::VectorAlgorithms;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl VectorAlgorithms<CpuRuntime> for CpuClient {
    fn vector_dot(
        &self,
        u: &Tensor<CpuRuntime>,
        v: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        vector_dot_impl(self, u, v)
    }

    fn vector_cross(
        &self,
        u: &Tensor<CpuRuntime>,
        v: &Tensor<CpuRuntime>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        vector_cross_impl(self, u, v)
    }

    fn vector_norm(&self, v: &Tensor<CpuRuntime>) -> TransformResult<Tensor<CpuRuntime>> {
        vector_norm_impl(self, v)
    }

    fn vector_l2_normalize(
        &self,
        v: &Tensor<CpuRuntime>,
        eps: Option<f64>,
    ) -> TransformResult<Tensor<CpuRuntime>> {
        vector_l2_normalize_impl(self, v, eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numr::runtime::cpu::CpuDevice;

    fn setup() -> (CpuClient, CpuDevice) {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        (client, device)
    }

    #[test]
    fn test_vector_dot() {
        let (client, device) = setup();
        let u = Tensor::<CpuRuntime>::from_slice(&[1.0, 2.0, 3.0], &[3], &device);
        let v = Tensor::<CpuRuntime>::from_slice(&[4.0, -5.0, 6.0], &[3], &device);

        let dot = client.vector_dot(&u, &v).unwrap();
        assert_eq!(dot.shape(), &[1]);
        let data: Vec<f64> = dot.to_vec();
        assert!((data[0] - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_vector_dot_broadcasts_batches() {
        let (client, device) = setup();
        let u = Tensor::<CpuRuntime>::from_slice(
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            &[2, 3],
            &device,
        );
        let v = Tensor::<CpuRuntime>::from_slice(&[1.0, 2.0, 3.0], &[3], &device);

        let dot = client.vector_dot(&u, &v).unwrap();
        assert_eq!(dot.shape(), &[2, 1]);
        let data: Vec<f64> = dot.to_vec();
        assert!((data[0] - 1.0).abs() < 1e-12);
        assert!((data[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_vector_cross_basis() {
        let (client, device) = setup();
        let x = Tensor::<CpuRuntime>::from_slice(&[1.0, 0.0, 0.0], &[3], &device);
        let y = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0, 0.0], &[3], &device);

        let cross = client.vector_cross(&x, &y).unwrap();
        let data: Vec<f64> = cross.to_vec();
        assert!((data[0]).abs() < 1e-12);
        assert!((data[1]).abs() < 1e-12);
        assert!((data[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vector_cross_anticommutes() {
        let (client, device) = setup();
        let u = Tensor::<CpuRuntime>::from_slice(&[0.3, -1.2, 2.0], &[3], &device);
        let v = Tensor::<CpuRuntime>::from_slice(&[1.5, 0.4, -0.7], &[3], &device);

        let uv: Vec<f64> = client.vector_cross(&u, &v).unwrap().to_vec();
        let vu: Vec<f64> = client.vector_cross(&v, &u).unwrap().to_vec();
        for i in 0..3 {
            assert!((uv[i] + vu[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_vector_norm() {
        let (client, device) = setup();
        let v = Tensor::<CpuRuntime>::from_slice(&[3.0, 4.0, 0.0], &[3], &device);

        let norm = client.vector_norm(&v).unwrap();
        let data: Vec<f64> = norm.to_vec();
        assert!((data[0] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_vector_l2_normalize() {
        let (client, device) = setup();
        let v = Tensor::<CpuRuntime>::from_slice(
            &[3.0, 4.0, 0.0, 0.0, 0.0, -2.0],
            &[2, 3],
            &device,
        );

        let normalized = client.vector_l2_normalize(&v, None).unwrap();
        let norms: Vec<f64> = client.vector_norm(&normalized).unwrap().to_vec();
        for n in norms {
            assert!((n - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vector_cross_requires_3d() {
        let (client, device) = setup();
        let u = Tensor::<CpuRuntime>::from_slice(&[1.0, 0.0], &[2], &device);
        let v = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0], &[2], &device);

        let err = client.vector_cross(&u, &v).unwrap_err();
        assert!(err.to_string().contains("'vector1'"));
    }
}
