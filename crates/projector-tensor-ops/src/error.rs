use projector_tensor::TensorError;
use thiserror::Error;

/// An error type for axis operations.
///
/// Axis indices are reported as the caller passed them, before negative-index
/// normalization, together with the rank they were checked against.
#[derive(Error, Debug, PartialEq)]
pub enum TensorOpsError {
    /// The range of axes to merge is empty or out of bounds.
    #[error(
        "Invalid axis range [{begin}, {end}) for a tensor with {ndim} axes: \
         begin and end must satisfy 0 <= begin < end <= {ndim} after normalization"
    )]
    InvalidAxisRange {
        /// First axis to merge, as requested
        begin: isize,
        /// Axis after the last one to merge, as requested
        end: isize,
        /// Number of axes of the tensor
        ndim: usize,
    },

    /// The axis to split is out of bounds.
    #[error(
        "Invalid target axis {target} for a tensor with {ndim} axes: \
         target must be between 0 and {ndim} - 1 after normalization"
    )]
    InvalidAxisIndex {
        /// Axis to split, as requested
        target: isize,
        /// Number of axes of the tensor
        ndim: usize,
    },

    /// The split shape does not cover the target axis exactly.
    #[error("Cannot ungroup: {size} -> {split:?}")]
    ShapeMismatch {
        /// Size of the target axis
        size: usize,
        /// Requested split shape
        split: Vec<usize>,
        /// Product of the split shape, `None` if it overflows `usize`
        product: Option<usize>,
    },

    /// Tensor error
    #[error("Error with the tensor: {0}")]
    TensorError(#[from] TensorError),
}
