#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use projector_tensor as tensor;

#[doc(inline)]
pub use projector_tensor_ops as tensor_ops;

#[doc(inline)]
pub use projector_linalg as linalg;
