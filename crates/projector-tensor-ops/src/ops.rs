use projector_tensor::tensor::checked_numel;
use projector_tensor::Tensor;

use crate::error::TensorOpsError;

/// Map a possibly negative axis index onto `0..ndim`.
///
/// Negative values count from the end, so `-1` is the last axis. The result
/// is not bounds-checked; callers validate it against their own range.
///
/// # Example
///
/// ```
/// use projector_tensor_ops::ops::normalize_axis;
///
/// assert_eq!(normalize_axis(-1, 3), 2);
/// assert_eq!(normalize_axis(1, 3), 1);
/// assert_eq!(normalize_axis(-4, 3), -1);
/// ```
#[inline]
pub fn normalize_axis(index: isize, ndim: usize) -> isize {
    if index < 0 {
        index + ndim as isize
    } else {
        index
    }
}

/// Merge the axes in the half-open range `[begin, end)` into a single axis.
///
/// The merged axis takes the place of `begin` and its elements follow the
/// row-major order of the merged axes, so the last merged axis varies fastest.
/// Standard-layout inputs share their storage with the result.
///
/// # Arguments
///
/// * `tensor` - The input tensor.
/// * `begin` - First axis to merge (inclusive). Negative values count from the end.
/// * `end` - Axis after the last one to merge (exclusive). Negative values count from the end.
///
/// # Returns
///
/// A tensor of shape `shape[..begin] + [prod(shape[begin..end])] + shape[end..]`.
///
/// # Errors
///
/// Returns [`TensorOpsError::InvalidAxisRange`] unless `0 <= begin < end <= ndim`
/// holds after normalization.
///
/// # Example
///
/// ```
/// use projector_tensor::Tensor;
/// use projector_tensor_ops::ops::group;
///
/// let t = Tensor::<f32>::zeros(&[2, 3, 4]);
/// let g = group(&t, 1, 3).unwrap();
/// assert_eq!(g.shape(), &[2, 12]);
///
/// let g = group(&t, 0, -1).unwrap();
/// assert_eq!(g.shape(), &[6, 4]);
/// ```
pub fn group<T>(tensor: &Tensor<T>, begin: isize, end: isize) -> Result<Tensor<T>, TensorOpsError>
where
    T: Clone,
{
    let ndim = tensor.ndim();
    let (b, e) = (normalize_axis(begin, ndim), normalize_axis(end, ndim));
    if b < 0 || b >= e || e > ndim as isize {
        return Err(TensorOpsError::InvalidAxisRange { begin, end, ndim });
    }
    let (b, e) = (b as usize, e as usize);

    let shape = tensor.shape();
    let mut out_shape = Vec::with_capacity(ndim + 1 - (e - b));
    out_shape.extend_from_slice(&shape[..b]);
    out_shape.push(shape[b..e].iter().product());
    out_shape.extend_from_slice(&shape[e..]);

    Ok(tensor.reshape(&out_shape)?)
}

/// Split the axis `target` into the shape `split`.
///
/// The inverse of [`group`]: the expansion is row-major, so the last entry of
/// `split` varies fastest. An empty `split` removes an axis of size one.
///
/// # Arguments
///
/// * `tensor` - The input tensor.
/// * `target` - Axis to split. Negative values count from the end.
/// * `split` - Shape that replaces the target axis.
///
/// # Returns
///
/// A tensor of shape `shape[..target] + split + shape[target + 1..]`.
///
/// # Errors
///
/// * [`TensorOpsError::InvalidAxisIndex`] unless `0 <= target < ndim` after normalization.
/// * [`TensorOpsError::ShapeMismatch`] if the product of `split` differs from the target axis size.
///
/// # Example
///
/// ```
/// use projector_tensor::Tensor;
/// use projector_tensor_ops::ops::ungroup;
///
/// let t = Tensor::<f32>::zeros(&[2, 12]);
/// let u = ungroup(&t, -1, &[3, 4]).unwrap();
/// assert_eq!(u.shape(), &[2, 3, 4]);
/// ```
pub fn ungroup<T>(
    tensor: &Tensor<T>,
    target: isize,
    split: &[usize],
) -> Result<Tensor<T>, TensorOpsError>
where
    T: Clone,
{
    let ndim = tensor.ndim();
    let t = normalize_axis(target, ndim);
    if t < 0 || t >= ndim as isize {
        return Err(TensorOpsError::InvalidAxisIndex { target, ndim });
    }
    let t = t as usize;

    let shape = tensor.shape();
    let product = checked_numel(split);
    if product != Some(shape[t]) {
        return Err(TensorOpsError::ShapeMismatch {
            size: shape[t],
            split: split.to_vec(),
            product,
        });
    }

    let mut out_shape = Vec::with_capacity(ndim - 1 + split.len());
    out_shape.extend_from_slice(&shape[..t]);
    out_shape.extend_from_slice(split);
    out_shape.extend_from_slice(&shape[t + 1..]);

    Ok(tensor.reshape(&out_shape)?)
}

/// Axis grouping as methods on [`Tensor`].
///
/// # Example
///
/// ```
/// use projector_tensor::Tensor;
/// use projector_tensor_ops::AxisOps;
///
/// let t = Tensor::from_shape_fn(&[2, 3, 4], |idx| idx.iter().sum::<usize>());
/// let roundtrip = t.group(1, 3).unwrap().ungroup(1, &[3, 4]).unwrap();
/// assert_eq!(roundtrip.as_slice(), t.as_slice());
/// ```
pub trait AxisOps<T> {
    /// Merge the axes in `[begin, end)` into one. See [`group`].
    fn group(&self, begin: isize, end: isize) -> Result<Tensor<T>, TensorOpsError>;

    /// Split the axis `target` into `split`. See [`ungroup`].
    fn ungroup(&self, target: isize, split: &[usize]) -> Result<Tensor<T>, TensorOpsError>;
}

impl<T: Clone> AxisOps<T> for Tensor<T> {
    fn group(&self, begin: isize, end: isize) -> Result<Tensor<T>, TensorOpsError> {
        self::group(self, begin, end)
    }

    fn ungroup(&self, target: isize, split: &[usize]) -> Result<Tensor<T>, TensorOpsError> {
        self::ungroup(self, target, split)
    }
}
