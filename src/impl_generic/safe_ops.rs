//! Generic guarded arithmetic implementation.
//!
//! The guards perturb inputs by a dtype-selected epsilon on the
//! sign-correct side instead of branching on the singular configuration,
//! so the formulas stay smooth and both the forward value and any
//! engine-derived gradient remain finite at the documented singular
//! points.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::TransformResult;
use crate::impl_generic::batch::{
    broadcast_pair_full, check_all_finite, check_all_positive, check_in_range, map_elementwise,
    nonzero_sign_f64,
};
use crate::validation::{select_eps_for_addition, select_eps_for_division, CheckMode};
use numr::dtype::DType;
use numr::ops::{CompareOps, ConditionalOps, ScalarOps, TensorOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Sign of `x` with `sign(0)` mapped to 1.
pub fn nonzero_sign_impl<R, C>(client: &C, x: &Tensor<R>) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + CompareOps<R> + ConditionalOps<R> + RuntimeClient<R>,
{
    let zero = client.fill(x.shape(), 0.0, x.dtype())?;
    let one = client.fill(x.shape(), 1.0, x.dtype())?;
    let minus_one = client.fill(x.shape(), -1.0, x.dtype())?;
    let nonneg = client.ge(x, &zero)?;
    Ok(client.where_cond(&nonneg, &one, &minus_one)?)
}

/// `a / (b + eps)` for non-negative `b`.
pub fn safe_unsigned_div_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    eps: Option<f64>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + RuntimeClient<R>,
{
    let eps = match eps {
        Some(e) => e,
        None => select_eps_for_division(b.dtype(), "safe_unsigned_div")?,
    };
    let denom = client.add_scalar(b, eps)?;
    let (a_b, denom_b) = broadcast_pair_full(a, &denom, "safe_unsigned_div")?;
    check_all_positive(&denom_b, "safe_unsigned_div", checks)?;
    let div = client.div(&a_b, &denom_b)?;
    check_all_finite(&div, "safe_unsigned_div", checks)?;
    Ok(div)
}

/// `a / (b + nonzero_sign(b) * eps)`, tolerating negative denominators.
pub fn safe_signed_div_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    eps: Option<f64>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + CompareOps<R> + ConditionalOps<R> + RuntimeClient<R>,
{
    let eps = match eps {
        Some(e) => e,
        None => select_eps_for_division(b.dtype(), "safe_signed_div")?,
    };
    let sign = nonzero_sign_impl(client, b)?;
    let shift = client.mul_scalar(&sign, eps)?;
    let denom = client.add(b, &shift)?;
    let (a_b, denom_b) = broadcast_pair_full(a, &denom, "safe_signed_div")?;
    if checks.debug() {
        let magnitude = client.abs(&denom_b)?;
        check_all_positive(&magnitude, "safe_signed_div", checks)?;
    }
    let div = client.div(&a_b, &denom_b)?;
    check_all_finite(&div, "safe_signed_div", checks)?;
    Ok(div)
}

/// `sin(factor * theta) / sin(theta)` with the removable singularities at
/// `theta = n * pi` taken out by an unbiased angle perturbation.
pub fn safe_sinpx_div_sinx_impl<R, C>(
    client: &C,
    theta: &Tensor<R>,
    factor: f64,
    eps: Option<f64>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    let eps = match eps {
        Some(e) => e,
        None => select_eps_for_division(theta.dtype(), "safe_sinpx_div_sinx")?,
    };
    // The perturbation is multiplied by factor inside the numerator; a
    // tiny factor would scale it away, so eps grows by min(1/factor, 1e10).
    let eps = eps * (1.0 / factor).clamp(1.0, 1e10);
    let div = map_elementwise(client, theta, |t| {
        let sign = nonzero_sign_f64(FRAC_PI_2 - t.rem_euclid(PI));
        let t = t + sign * eps;
        (factor * t).sin() / t.sin()
    })?;
    check_all_finite(&div, "safe_sinpx_div_sinx", checks)?;
    Ok(div)
}

/// `cos(factor * theta) / cos(theta)`, singular at `theta = (n + 1/2) pi`.
pub fn safe_cospx_div_cosx_impl<R, C>(
    client: &C,
    theta: &Tensor<R>,
    factor: f64,
    eps: Option<f64>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + RuntimeClient<R>,
{
    let eps = match eps {
        Some(e) => e,
        None => select_eps_for_division(theta.dtype(), "safe_cospx_div_cosx")?,
    };
    let eps = eps * (1.0 / factor).clamp(1.0, 1e10);
    let div = map_elementwise(client, theta, |t| {
        let sign = nonzero_sign_f64(FRAC_PI_2 - (t - FRAC_PI_2).rem_euclid(PI));
        let t = t + sign * eps;
        (factor * t).cos() / t.cos()
    })?;
    check_all_finite(&div, "safe_cospx_div_cosx", checks)?;
    Ok(div)
}

/// Multiplicative shrink by `1 - eps` toward the interior of an interval.
pub fn safe_shrink_impl<R, C>(
    client: &C,
    vector: &Tensor<R>,
    minval: f64,
    maxval: f64,
    open_bounds: bool,
    eps: Option<f64>,
    checks: CheckMode,
) -> TransformResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TensorOps<R> + ScalarOps<R> + RuntimeClient<R>,
{
    let eps = match eps {
        Some(e) => e,
        None => select_eps_for_addition(vector.dtype(), "safe_shrink")?,
    };
    let shrunk = client.mul_scalar(vector, 1.0 - eps)?;
    check_in_range(&shrunk, minval, maxval, open_bounds, "safe_shrink", checks)?;
    Ok(shrunk)
}
