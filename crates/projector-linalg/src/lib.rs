#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! A tensor is split after its first `nu` axes into a row group and a column
//! group, viewed as a matrix, and factored with a thin SVD. The factors keep
//! the original axis sizes:
//!
//! ```rust
//! use projector_linalg::tsvd;
//! use projector_tensor::Tensor;
//!
//! let t = Tensor::from_shape_fn(&[2, 3, 4, 5], |idx| idx.iter().sum::<usize>() as f64);
//! let svd = tsvd(&t, 2).unwrap();
//! assert_eq!(svd.u.shape(), &[2, 3, 6]);
//! assert_eq!(svd.s.shape(), &[6]);
//! assert_eq!(svd.v.shape(), &[4, 5, 6]);
//!
//! let r = svd.reconstruct().unwrap();
//! assert_eq!(r.shape(), t.shape());
//! ```

/// Error types for the decompositions.
pub mod error;

/// Element types supported by the decompositions.
pub mod scalar;

/// Matrix SVD backends.
pub mod svd;

/// SVD of tensors over grouped axes.
pub mod tsvd;

pub use error::LinalgError;
pub use scalar::Scalar;
pub use svd::{FaerSvd, MatrixSvd, SvdBackend};
pub use tsvd::{tsvd, tsvd_with, TensorSvd};
