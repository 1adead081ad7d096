//! CUDA implementation of the batched vector helpers.

use crate::error::TransformResult;
use crate::impl_generic::{
    vector_cross_impl, vector_dot_impl, vector_l2_normalize_impl, vector_norm_impl,
};
use crate::traits::vector::VectorAlgorithms;
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl VectorAlgorithms<CudaRuntime> for CudaClient {
    fn vector_dot(
        &self,
        u: &Tensor<CudaRuntime>,
        v: &Tensor<CudaRuntime>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        vector_dot_impl(self, u, v)
    }

    fn vector_cross(
        &self,
        u: &Tensor<CudaRuntime>,
        v: &Tensor<CudaRuntime>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        vector_cross_impl(self, u, v)
    }

    fn vector_norm(&self, v: &Tensor<CudaRuntime>) -> TransformResult<Tensor<CudaRuntime>> {
        vector_norm_impl(self, v)
    }

    fn vector_l2_normalize(
        &self,
        v: &Tensor<CudaRuntime>,
        eps: Option<f64>,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        vector_l2_normalize_impl(self, v, eps)
    }
}
