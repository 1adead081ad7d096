//! WebGPU implementation of the batched vector helpers.

use crate::error::TransformResult;
use crate::impl_generic::{
    vector_cross_impl, vector_dot_impl, vector_l2_normalize_impl, vector_norm_impl,
};
use crate::traits::vector::VectorAlgorithms;
use numr::runtime::wgpu::{WgpuClient, WgpuRuntime};
use numr::tensor::Tensor;

impl VectorAlgorithms<WgpuRuntime> for WgpuClient {
    fn vector_dot(
        &self,
        u: &Tensor<WgpuRuntime>,
        v: &Tensor<WgpuRuntime>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        vector_dot_impl(self, u, v)
    }

    fn vector_cross(
        &self,
        u: &Tensor<WgpuRuntime>,
        v: &Tensor<WgpuRuntime>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        vector_cross_impl(self, u, v)
    }

    fn vector_norm(&self, v: &Tensor<WgpuRuntime>) -> TransformResult<Tensor<WgpuRuntime>> {
        vector_norm_impl(self, v)
    }

    fn vector_l2_normalize(
        &self,
        v: &Tensor<WgpuRuntime>,
        eps: Option<f64>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        vector_l2_normalize_impl(self, v, eps)
    }
}
