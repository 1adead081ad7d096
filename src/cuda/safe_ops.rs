//! CUDA implementation of the guarded numeric primitives.

use crate::error::TransformResult;
use crate::impl_generic::{
    nonzero_sign_impl, safe_cospx_div_cosx_impl, safe_shrink_impl, safe_signed_div_impl,
    safe_sinpx_div_sinx_impl, safe_unsigned_div_impl,
};
use crate::traits::safe_ops::SafeOpsAlgorithms;
use crate::validation::CheckMode;
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl SafeOpsAlgorithms<CudaRuntime> for CudaClient {
    fn nonzero_sign(&self, x: &Tensor<CudaRuntime>) -> TransformResult<Tensor<CudaRuntime>> {
        nonzero_sign_impl(self, x)
    }

    fn safe_unsigned_div(
        &self,
        a: &Tensor<CudaRuntime>,
        b: &Tensor<CudaRuntime>,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        safe_unsigned_div_impl(self, a, b, eps, checks)
    }

    fn safe_signed_div(
        &self,
        a: &Tensor<CudaRuntime>,
        b: &Tensor<CudaRuntime>,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        safe_signed_div_impl(self, a, b, eps, checks)
    }

    fn safe_sinpx_div_sinx(
        &self,
        theta: &Tensor<CudaRuntime>,
        factor: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        safe_sinpx_div_sinx_impl(self, theta, factor, eps, checks)
    }

    fn safe_cospx_div_cosx(
        &self,
        theta: &Tensor<CudaRuntime>,
        factor: f64,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        safe_cospx_div_cosx_impl(self, theta, factor, eps, checks)
    }

    fn safe_shrink(
        &self,
        vector: &Tensor<CudaRuntime>,
        minval: f64,
        maxval: f64,
        open_bounds: bool,
        eps: Option<f64>,
        checks: CheckMode,
    ) -> TransformResult<Tensor<CudaRuntime>> {
        safe_shrink_impl(self, vector, minval, maxval, open_bounds, eps, checks)
    }
}
