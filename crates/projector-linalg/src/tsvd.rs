use num_traits::float::TotalOrder;
use projector_tensor::{Tensor, TensorError};
use projector_tensor_ops::{group, ungroup};

use crate::error::LinalgError;
use crate::scalar::Scalar;
use crate::svd::{FaerSvd, MatrixSvd, SvdBackend};

/// Factors of a tensor SVD split after the first `nu` axes.
///
/// For an input of shape `[d0, ..., d(n-1)]` and `k = min(d0·…·d(nu-1), dnu·…·d(n-1))`:
///
/// * `u` has shape `[d0, ..., d(nu-1), k]`,
/// * `s` has shape `[k]`, real and non-increasing,
/// * `v` has shape `[dnu, ..., d(n-1), k]`.
///
/// Contracting the trailing axis of `u`, `s` and `v` together recovers the
/// input, see [`TensorSvd::reconstruct`].
#[derive(Debug, Clone)]
pub struct TensorSvd<T: Scalar> {
    /// Left factor.
    pub u: Tensor<T>,
    /// Singular values in descending order.
    pub s: Tensor<T::RealScalar>,
    /// Right factor, already conjugated.
    pub v: Tensor<T>,
}

impl<T: Scalar> TensorSvd<T> {
    /// Number of singular values.
    pub fn rank(&self) -> usize {
        self.s.numel()
    }

    /// Contracts the factors back into a tensor of the original shape.
    pub fn reconstruct(&self) -> Result<Tensor<T>, LinalgError> {
        let k = self.rank();
        let u = group(&self.u, 0, -1)?;
        let v = group(&self.v, 0, -1)?;
        let (rows, cols) = (u.shape()[0], v.shape()[0]);
        if u.shape()[1] != k || v.shape()[1] != k {
            return Err(TensorError::dimension_mismatch(
                "factor ranks disagree with the singular values",
                &[k, k],
                &[u.shape()[1], v.shape()[1]],
            )
            .into());
        }

        let s: Vec<T> = self
            .s
            .to_standard_layout()
            .as_slice()
            .iter()
            .map(|&x| T::from_real(x))
            .collect();
        let (u, v) = (u.as_slice(), v.as_slice());

        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            let u_row = &u[r * k..(r + 1) * k];
            for c in 0..cols {
                let v_row = &v[c * k..(c + 1) * k];
                let value = u_row
                    .iter()
                    .zip(&s)
                    .zip(v_row)
                    .fold(T::default(), |acc, ((&a, &b), &w)| acc + a * b * w);
                data.push(value);
            }
        }

        let mut shape = self.u.shape()[..self.u.ndim() - 1].to_vec();
        shape.extend_from_slice(&self.v.shape()[..self.v.ndim() - 1]);
        Ok(Tensor::from_shape_vec(&shape, data)?)
    }
}

/// Computes the SVD of a tensor viewed as a matrix, using [`FaerSvd`].
///
/// The first `nu` axes form the rows and the remaining axes the columns.
/// See [`tsvd_with`] for the details.
///
/// # Errors
///
/// Returns [`LinalgError::InvalidSplitPoint`] unless `1 <= nu <= ndim - 1`,
/// and [`LinalgError::NumericalFailure`] if the SVD does not converge.
///
/// # Example
///
/// ```rust
/// use projector_linalg::tsvd;
/// use projector_tensor::Tensor;
///
/// let t = Tensor::from_shape_fn(&[2, 3, 4], |idx| (idx[0] + 2 * idx[1] + idx[2]) as f64);
/// let svd = tsvd(&t, 1).unwrap();
/// assert_eq!(svd.u.shape(), &[2, 2]);
/// assert_eq!(svd.s.shape(), &[2]);
/// assert_eq!(svd.v.shape(), &[3, 4, 2]);
/// ```
pub fn tsvd<T: Scalar>(tensor: &Tensor<T>, nu: usize) -> Result<TensorSvd<T>, LinalgError> {
    tsvd_with(&FaerSvd, tensor, nu)
}

/// Computes the SVD of a tensor viewed as a matrix with a custom backend.
///
/// The axes `[nu, ndim)` are grouped into the column axis and then `[0, nu)`
/// into the row axis. The backend factors the resulting matrix, the singular
/// values are put in descending order, and the shared axis of each factor is
/// ungrouped back to the original axis sizes.
pub fn tsvd_with<T, B>(backend: &B, tensor: &Tensor<T>, nu: usize) -> Result<TensorSvd<T>, LinalgError>
where
    T: Scalar,
    B: SvdBackend<T> + ?Sized,
{
    let ndim = tensor.ndim();
    if nu == 0 || nu >= ndim {
        return Err(LinalgError::invalid_split_point(nu, ndim));
    }

    let shape = tensor.shape();
    let matrix = group(&group(tensor, nu as isize, ndim as isize)?, 0, nu as isize)?;
    let (rows, cols) = (matrix.shape()[0], matrix.shape()[1]);
    let k = rows.min(cols);
    log::debug!("tsvd: factoring {shape:?} as a {rows}x{cols} matrix (nu = {nu})");

    let factors = match backend.thin_svd(&matrix) {
        Ok(factors) => factors,
        Err(err) => {
            log::warn!("tsvd: SVD of a {rows}x{cols} matrix failed: {err}");
            return Err(err);
        }
    };
    check_factors(&factors, rows, cols, k)?;
    let factors = sort_descending(factors);

    let u = ungroup(&factors.u, 0, &shape[..nu])?;
    let v = ungroup(&factors.v, 0, &shape[nu..])?;
    let s = Tensor::from_shape_vec(&[k], factors.s)?;
    log::debug!("tsvd: rank {k}");

    Ok(TensorSvd { u, s, v })
}

fn check_factors<T: Scalar>(
    factors: &MatrixSvd<T>,
    rows: usize,
    cols: usize,
    k: usize,
) -> Result<(), TensorError> {
    if factors.u.shape() != [rows, k] {
        return Err(TensorError::dimension_mismatch(
            "left factor has the wrong shape",
            &[rows, k],
            factors.u.shape(),
        ));
    }
    if factors.v.shape() != [cols, k] {
        return Err(TensorError::dimension_mismatch(
            "right factor has the wrong shape",
            &[cols, k],
            factors.v.shape(),
        ));
    }
    if factors.s.len() != k {
        return Err(TensorError::invalid_shape(k, factors.s.len()));
    }
    Ok(())
}

/// Reorders the singular triplets so that `s` is non-increasing.
///
/// Uses the IEEE total order, so a positive NaN sorts before every number
/// and a negative NaN after. The sort is stable.
fn sort_descending<T: Scalar>(factors: MatrixSvd<T>) -> MatrixSvd<T> {
    if factors.s.windows(2).all(|w| w[0] >= w[1]) {
        return factors;
    }

    let k = factors.s.len();
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| factors.s[b].total_cmp(&factors.s[a]));
    log::debug!("tsvd: reordering singular values {order:?}");

    let permute_columns = |m: &Tensor<T>| {
        let m = m.to_standard_layout();
        let data = m.as_slice();
        Tensor::from_shape_fn(m.shape(), |idx| data[idx[0] * k + order[idx[1]]])
    };

    MatrixSvd {
        u: permute_columns(&factors.u),
        s: order.iter().map(|&i| factors.s[i]).collect(),
        v: permute_columns(&factors.v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Returns fixed factors regardless of the input.
    struct FixedSvd(MatrixSvd<f64>);

    impl SvdBackend<f64> for FixedSvd {
        fn thin_svd(&self, _matrix: &Tensor<f64>) -> Result<MatrixSvd<f64>, LinalgError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSvd;

    impl SvdBackend<f64> for FailingSvd {
        fn thin_svd(&self, _matrix: &Tensor<f64>) -> Result<MatrixSvd<f64>, LinalgError> {
            Err(LinalgError::NumericalFailure("no convergence".to_string()))
        }
    }

    fn eye(n: usize) -> Tensor<f64> {
        Tensor::from_shape_fn(&[n, n], |idx| if idx[0] == idx[1] { 1.0 } else { 0.0 })
    }

    #[test]
    fn test_tsvd_invalid_split_point() {
        let t = eye(3);
        assert_eq!(
            tsvd(&t, 0).unwrap_err(),
            LinalgError::InvalidSplitPoint { nu: 0, ndim: 2 }
        );
        assert_eq!(
            tsvd(&t, 2).unwrap_err(),
            LinalgError::InvalidSplitPoint { nu: 2, ndim: 2 }
        );

        let v = Tensor::from_shape_vec(&[3], vec![1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            tsvd(&v, 1),
            Err(LinalgError::InvalidSplitPoint { nu: 1, ndim: 1 })
        ));
    }

    #[test]
    fn test_tsvd_identity() -> Result<(), LinalgError> {
        let svd = tsvd(&eye(3), 1)?;
        assert_eq!(svd.rank(), 3);
        for &x in svd.s.as_slice() {
            assert_relative_eq!(x, 1.0, epsilon = 1e-12);
        }
        let r = svd.reconstruct()?;
        for (a, b) in r.as_slice().iter().zip(eye(3).as_slice()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_tsvd_shapes() -> Result<(), LinalgError> {
        let t = Tensor::from_shape_fn(&[2, 3, 4], |idx| (idx[0] * 12 + idx[1] * 4 + idx[2]) as f64);
        let svd = tsvd(&t, 2)?;
        assert_eq!(svd.u.shape(), &[2, 3, 4]);
        assert_eq!(svd.s.shape(), &[4]);
        assert_eq!(svd.v.shape(), &[4, 4]);
        Ok(())
    }

    #[test]
    fn test_tsvd_sorts_backend_output() -> Result<(), LinalgError> {
        // M = diag(1, 3) expressed with the singular values in ascending order
        let factors = MatrixSvd {
            u: Tensor::from_shape_vec(&[2, 2], vec![1.0, 0.0, 0.0, 1.0])?,
            s: vec![1.0, 3.0],
            v: Tensor::from_shape_vec(&[2, 2], vec![1.0, 0.0, 0.0, 1.0])?,
        };
        let t = Tensor::from_shape_vec(&[2, 2], vec![1.0, 0.0, 0.0, 3.0])?;

        let svd = tsvd_with(&FixedSvd(factors), &t, 1)?;
        assert_eq!(svd.s.as_slice(), &[3.0, 1.0]);
        assert_eq!(svd.u.as_slice(), &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(svd.v.as_slice(), &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(svd.reconstruct()?.as_slice(), t.as_slice());
        Ok(())
    }

    #[test]
    fn test_tsvd_orders_nan_singular_values() -> Result<(), LinalgError> {
        let k = 64;
        let mut s: Vec<f64> = (0..k).map(|i| ((i * 37) % k) as f64).collect();
        s[3] = f64::NAN;
        s[40] = f64::NAN;
        let factors = MatrixSvd {
            u: Tensor::from_shape_fn(&[k, k], |idx| (idx[0] == idx[1]) as u8 as f64),
            s,
            v: Tensor::from_shape_fn(&[k, k], |idx| (idx[0] == idx[1]) as u8 as f64),
        };
        let t = Tensor::<f64>::zeros(&[k, k]);

        let svd = tsvd_with(&FixedSvd(factors), &t, 1)?;
        let s = svd.s.as_slice();
        assert!(s[0].is_nan() && s[1].is_nan());
        assert!(s[2..].iter().all(|x| !x.is_nan()));
        assert!(s[2..].windows(2).all(|w| w[0] >= w[1]), "{s:?}");
        Ok(())
    }

    #[test]
    fn test_tsvd_rejects_malformed_factors() -> Result<(), LinalgError> {
        let factors = MatrixSvd {
            u: Tensor::from_shape_vec(&[2, 1], vec![1.0, 0.0])?,
            s: vec![1.0],
            v: Tensor::from_shape_vec(&[2, 1], vec![1.0, 0.0])?,
        };
        let t = eye(2);
        assert!(matches!(
            tsvd_with(&FixedSvd(factors), &t, 1),
            Err(LinalgError::TensorError(TensorError::DimensionMismatch { .. }))
        ));
        Ok(())
    }

    #[test]
    fn test_tsvd_propagates_backend_failure() {
        let t = eye(2);
        assert_eq!(
            tsvd_with(&FailingSvd, &t, 1).unwrap_err(),
            LinalgError::NumericalFailure("no convergence".to_string())
        );
    }

    #[test]
    fn test_tsvd_zero_sized_axis() -> Result<(), LinalgError> {
        let t = Tensor::<f64>::zeros(&[2, 0, 3]);
        let svd = tsvd(&t, 1)?;
        assert_eq!(svd.rank(), 0);
        assert_eq!(svd.u.shape(), &[2, 0]);
        assert_eq!(svd.v.shape(), &[0, 3, 0]);
        assert_eq!(svd.reconstruct()?.shape(), &[2, 0, 3]);
        Ok(())
    }
}
