use faer::linalg::solvers::Svd;
use faer::MatRef;
use projector_tensor::{Tensor, TensorError};

use crate::error::LinalgError;
use crate::scalar::Scalar;

/// Thin SVD factors of a rank-2 tensor `M` with shape `[rows, cols]`.
///
/// With `k = min(rows, cols)` the factors satisfy `M = u · diag(s) · vᵀ`,
/// with `u` of shape `[rows, k]` and `v` of shape `[cols, k]`. For complex
/// input `v` already holds the conjugated right singular vectors, so the
/// product needs no further conjugation.
#[derive(Debug, Clone)]
pub struct MatrixSvd<T: Scalar> {
    /// Left singular vectors, one per column.
    pub u: Tensor<T>,
    /// Singular values.
    pub s: Vec<T::RealScalar>,
    /// Conjugated right singular vectors, one per column.
    pub v: Tensor<T>,
}

/// A matrix SVD implementation.
///
/// `thin_svd` receives a rank-2 tensor and returns its thin factors. Implementations
/// are not required to sort the singular values; callers that need a
/// descending order sort them themselves.
pub trait SvdBackend<T: Scalar> {
    /// Computes the thin SVD of a rank-2 tensor.
    fn thin_svd(&self, matrix: &Tensor<T>) -> Result<MatrixSvd<T>, LinalgError>;
}

/// SVD backed by faer's dense solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaerSvd;

impl<T: Scalar> SvdBackend<T> for FaerSvd {
    fn thin_svd(&self, matrix: &Tensor<T>) -> Result<MatrixSvd<T>, LinalgError> {
        let (rows, cols) = matrix_dims(matrix)?;
        let k = rows.min(cols);

        if k == 0 {
            return Ok(MatrixSvd {
                u: Tensor::from_shape_val(&[rows, 0], T::default()),
                s: Vec::new(),
                v: Tensor::from_shape_val(&[cols, 0], T::default()),
            });
        }

        let contiguous = matrix.to_standard_layout();
        let mat = MatRef::from_row_major_slice(contiguous.as_slice(), rows, cols);

        let svd =
            Svd::new_thin(mat).map_err(|e| LinalgError::NumericalFailure(format!("{e:?}")))?;
        let (u_mat, v_mat) = (svd.U(), svd.V());
        let s_diag = svd.S().column_vector();

        let u = Tensor::from_shape_fn(&[rows, k], |idx| u_mat[(idx[0], idx[1])]);
        let v = Tensor::from_shape_fn(&[cols, k], |idx| v_mat[(idx[0], idx[1])].conjugate());
        let s = (0..k).map(|i| s_diag[i].real_part()).collect();

        Ok(MatrixSvd { u, s, v })
    }
}

/// Returns `(rows, cols)` of a rank-2 tensor.
pub(crate) fn matrix_dims<T>(matrix: &Tensor<T>) -> Result<(usize, usize), TensorError> {
    match matrix.shape() {
        &[rows, cols] => Ok((rows, cols)),
        shape => Err(TensorError::dimension_mismatch(
            "SVD input must be a matrix",
            &[2],
            &[shape.len()],
        )),
    }
}
