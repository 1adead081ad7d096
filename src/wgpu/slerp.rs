//! WebGPU implementation of the slerp operations.

use crate::error::TransformResult;
use crate::impl_generic::{
    slerp_interpolate_impl, slerp_interpolate_with_weights_impl, slerp_quaternion_weights_impl,
    slerp_vector_weights_impl,
};
use crate::traits::slerp::{InterpolationMethod, SlerpAlgorithms};
use crate::validation::CheckMode;
use numr::runtime::wgpu::{WgpuClient, WgpuRuntime};
use numr::tensor::Tensor;

impl SlerpAlgorithms<WgpuRuntime> for WgpuClient {
    fn slerp_quaternion_weights(
        &self,
        quaternion1: &Tensor<WgpuRuntime>,
        quaternion2: &Tensor<WgpuRuntime>,
        percent: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<WgpuRuntime>, Tensor<WgpuRuntime>)> {
        slerp_quaternion_weights_impl(self, quaternion1, quaternion2, percent, eps, checks)
    }

    fn slerp_vector_weights(
        &self,
        vector1: &Tensor<WgpuRuntime>,
        vector2: &Tensor<WgpuRuntime>,
        percent: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<(Tensor<WgpuRuntime>, Tensor<WgpuRuntime>)> {
        slerp_vector_weights_impl(self, vector1, vector2, percent, eps, checks)
    }

    fn slerp_interpolate_with_weights(
        &self,
        vector1: &Tensor<WgpuRuntime>,
        vector2: &Tensor<WgpuRuntime>,
        weight1: &Tensor<WgpuRuntime>,
        weight2: &Tensor<WgpuRuntime>,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        slerp_interpolate_with_weights_impl(self, vector1, vector2, weight1, weight2)
    }

    fn slerp_interpolate(
        &self,
        vector1: &Tensor<WgpuRuntime>,
        vector2: &Tensor<WgpuRuntime>,
        percent: f64,
        method: InterpolationMethod,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<WgpuRuntime>> {
        slerp_interpolate_impl(self, vector1, vector2, percent, method, eps, checks)
    }
}
