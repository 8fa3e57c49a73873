#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Grouping temporarily reinterprets a contiguous run of axes as a single
//! axis; ungrouping splits it back. Both follow row-major (C-order) element
//! order and accept negative axis indices counted from the end.
//!
//! ```rust
//! use projector_tensor::Tensor;
//! use projector_tensor_ops::{group, ungroup};
//!
//! let t = Tensor::from_shape_fn(&[2, 3, 4], |idx| (idx[0] * 12 + idx[1] * 4 + idx[2]) as f64);
//! let g = group(&t, 1, 3).unwrap();
//! assert_eq!(g.shape(), &[2, 12]);
//!
//! let u = ungroup(&g, 1, &[3, 4]).unwrap();
//! assert_eq!(u.shape(), &[2, 3, 4]);
//! assert_eq!(u.as_slice(), t.as_slice());
//! ```

/// Error types for axis operations.
///
/// Defines [`TensorOpsError`] for rejected axis ranges, indices and split shapes.
pub mod error;

/// Axis grouping and ungrouping.
///
/// Provides the free functions [`group`] and [`ungroup`] and the [`AxisOps`]
/// trait exposing them as tensor methods.
pub mod ops;

pub use error::TensorOpsError;
pub use ops::{group, normalize_axis, ungroup, AxisOps};
