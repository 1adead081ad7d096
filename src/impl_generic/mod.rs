//! Generic implementations over numr's `Runtime` trait.
//!
//! Written once; the per-backend modules delegate here. Tensor ops carry
//! the batched algebra, host kernels carry the transcendental math.

pub(crate) mod batch;

mod axis_angle;
mod quaternion;
mod rotation_matrix_3d;
mod safe_ops;
mod slerp;
mod vector;

pub use axis_angle::*;
pub use quaternion::*;
pub use rotation_matrix_3d::*;
pub use safe_ops::*;
pub use slerp::*;
pub use vector::*;
