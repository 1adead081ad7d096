//! spinr - Batched rotation transforms on numr tensors
//!
//! spinr converts between rotation representations (quaternion,
//! axis-angle, 3x3 rotation matrix, Euler-angle input) and applies them
//! to points, in batch, with a guarded-numerics layer that keeps every
//! conversion finite near its mathematical singularities (zero-length
//! axes, gimbal configurations, antipodal quaternions). Built on numr's
//! tensors, it works across all backends (CPU, CUDA, WebGPU).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      spinr                              │
//! │  (quaternion / axis-angle / matrix / slerp / safe ops)  │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ uses
//! ┌──────────────────────────▼──────────────────────────────┐
//! │                       numr                              │
//! │      (tensors, broadcasting, elementwise/reduce ops)    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! All operations are runtime-generic and laid out in three layers:
//!
//! ```text
//! src/
//! ├── validation.rs         # Shape contracts, CheckMode, eps tables
//! ├── error.rs              # TransformError / TransformResult
//! ├── traits/               # Algorithm trait definitions
//! ├── impl_generic/         # Generic implementations (written once)
//! ├── cpu/                  # CPU trait impls (pure delegation)
//! ├── cuda/                 # CUDA trait impls (feature `cuda`)
//! └── wgpu/                 # WebGPU trait impls (feature `wgpu`)
//! ```
//!
//! # Data model
//!
//! Every value is a tensor with arbitrary leading batch dimensions and
//! fixed trailing dimensions: points `[A1, ..., An, 3]`, quaternions
//! `[A1, ..., An, 4]` as `(x, y, z, w)`, rotation matrices
//! `[A1, ..., An, 3, 3]`, Euler angles `[A1, ..., An, 3]` (input only),
//! axis-angle as an `(axis, angle)` pair of shapes `[..., 3]` and
//! `[..., 1]`. Trailing dimensions are validated before any arithmetic;
//! batch dimensions are only required to be mutually broadcastable
//! between operands.
//!
//! # Numeric safety and checking
//!
//! Shape errors always raise. Numeric invariants (unit quaternions, unit
//! axes, orthonormal matrices, NaN/Inf after guarded divisions) are
//! verified only when a call is made with [`CheckMode::Debug`]; the
//! default [`CheckMode::Fast`] trusts its inputs. Epsilon guards default
//! to dtype-keyed constants, larger for `F32` than for `F64`.
//!
//! # Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `cuda`  | Enable CUDA GPU acceleration | numr/cuda |
//! | `wgpu`  | Enable WebGPU cross-platform GPU | numr/wgpu |
//!
//! # Example
//!
//! ```ignore
//! use spinr::{CheckMode, QuaternionAlgorithms, SlerpAlgorithms};
//! use numr::runtime::cpu::{CpuClient, CpuDevice};
//! use numr::tensor::Tensor;
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! let axis = Tensor::from_slice(&[0.0, 0.0, 1.0], &[3], &device);
//! let angle = Tensor::from_slice(&[std::f64::consts::FRAC_PI_2], &[1], &device);
//! let quat = client.quaternion_from_axis_angle(&axis, &angle, CheckMode::Fast)?;
//!
//! let point = Tensor::from_slice(&[1.0, 0.0, 0.0], &[3], &device);
//! let rotated = client.quaternion_rotate(&point, &quat, CheckMode::Fast)?;
//! ```

pub mod error;
pub mod impl_generic;
pub mod traits;
pub mod validation;

mod cpu;

#[cfg(feature = "cuda")]
mod cuda;

#[cfg(feature = "wgpu")]
mod wgpu;

// Re-export the public surface.
pub use error::{TransformError, TransformResult};
pub use validation::{
    broadcast_batch_shapes, check_float_dtype, check_same_shape, check_trailing_dim,
    check_trailing_matrix, select_eps_for_addition, select_eps_for_division, CheckMode,
    DEFAULT_NORM_ATOL,
};

pub use traits::axis_angle::AxisAngleAlgorithms;
pub use traits::quaternion::QuaternionAlgorithms;
pub use traits::rotation_matrix_3d::RotationMatrix3dAlgorithms;
pub use traits::safe_ops::SafeOpsAlgorithms;
pub use traits::slerp::{InterpolationMethod, SlerpAlgorithms};
pub use traits::vector::VectorAlgorithms;

// Re-export numr types that users will commonly need.
pub use numr::dtype::DType;
pub use numr::runtime::{Runtime, RuntimeClient};
pub use numr::tensor::Tensor;
