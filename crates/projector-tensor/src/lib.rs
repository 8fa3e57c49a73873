#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `projector-tensor` provides the dense array type that the axis and
//! decomposition operations of this workspace act on. The rank of a [`Tensor`]
//! is a runtime property, so operations that merge or split axes can return
//! tensors of a different rank than their input.
//!
//! # Architecture
//!
//! - **Tensor**: shape and stride information over a shared element buffer
//! - **TensorStorage**: `Arc`-backed buffer, so reshapes and clones do not copy
//!
//! # Quick Start
//!
//! ```rust
//! use projector_tensor::Tensor;
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let tensor = Tensor::<f64>::from_shape_vec(&[2, 3], data).unwrap();
//! assert_eq!(tensor.get(&[1, 2]), Some(&6.0));
//!
//! let reshaped = tensor.reshape(&[3, 2]).unwrap();
//! assert_eq!(reshaped.shape(), &[3, 2]);
//! ```

/// Serde module for serialization and deserialization.
///
/// Enabled with the `serde` feature. Tensors are written as their row-major
/// `data` and `shape`.
#[cfg(feature = "serde")]
pub mod serde;

/// Storage module containing the shared element buffer.
pub mod storage;

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

pub use crate::storage::TensorStorage;
pub use crate::tensor::{Tensor, TensorError};
