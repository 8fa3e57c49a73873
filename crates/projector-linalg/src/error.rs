use projector_tensor::TensorError;
use projector_tensor_ops::TensorOpsError;

/// An error type for the tensor decompositions.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LinalgError {
    /// The split point does not leave at least one axis on each side.
    #[error("Invalid split point nu = {nu} for a tensor with {ndim} axes: nu must be between 1 and {ndim} - 1")]
    InvalidSplitPoint {
        /// Requested number of row axes.
        nu: usize,
        /// Number of axes of the input tensor.
        ndim: usize,
    },

    /// The SVD backend failed to factor the matrix.
    #[error("SVD failed: {0}")]
    NumericalFailure(String),

    /// Error from the axis operations.
    #[error(transparent)]
    TensorOpsError(#[from] TensorOpsError),

    /// Error from the tensor container.
    #[error("Error with the tensor: {0}")]
    TensorError(#[from] TensorError),
}

impl LinalgError {
    /// Creates an [`LinalgError::InvalidSplitPoint`] error.
    pub fn invalid_split_point(nu: usize, ndim: usize) -> Self {
        Self::InvalidSplitPoint { nu, ndim }
    }

    /// Returns a hint on how to fix the error, if one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidSplitPoint { .. } => {
                Some("Choose nu so that both the row and column axis groups are non-empty")
            }
            Self::NumericalFailure(_) => {
                Some("Check the input for NaN or infinite values before decomposing")
            }
            _ => None,
        }
    }
}
