use thiserror::Error;

use crate::storage::TensorStorage;

/// Error type for tensor creation and layout operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape dimensions must equal the number of elements
    /// handed to the constructor.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Tensor dimensions incompatible for the requested operation.
    ///
    /// # Examples
    /// - Reshaping to a shape with a different number of elements
    /// - Permuting with an axis list that is not a permutation of `0..ndim`
    /// - Handing a 3-d tensor to an operation that needs a matrix
    #[error("Dimension mismatch: {message}. Expected shape: {expected}, got: {actual}")]
    DimensionMismatch {
        /// Human-readable description of the mismatch
        message: String,
        /// Expected shape description
        expected: String,
        /// Actual shape description
        actual: String,
    },
}

impl TensorError {
    /// Creates an InvalidShape error with clear context.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates a DimensionMismatch error with formatted shapes.
    pub fn dimension_mismatch(
        message: impl Into<String>,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }
    }

    /// Returns a user-friendly suggestion for resolving the error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::InvalidShape { .. } => {
                "Ensure the product of shape dimensions equals the number of data elements"
            }
            Self::DimensionMismatch { .. } => {
                "Check tensor shapes are compatible for the operation"
            }
        }
    }
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// The rightmost dimension has stride 1 and each dimension's stride is the
/// product of all dimensions to its right.
///
/// # Examples
///
/// ```rust
/// use projector_tensor::tensor::get_strides_from_shape;
///
/// let strides = get_strides_from_shape(&[2, 3, 4]);
/// assert_eq!(strides, vec![12, 4, 1]);
/// ```
pub fn get_strides_from_shape(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride: usize = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        // only zero-sized tensors can get here with an unrepresentable stride
        stride = stride.saturating_mul(shape[i]);
    }
    strides
}

/// Number of elements of a tensor with the given shape.
///
/// Returns `None` when the count does not fit in a `usize`. Any zero-sized
/// axis makes the count zero, whatever the other axes hold.
///
/// # Examples
///
/// ```rust
/// use projector_tensor::tensor::checked_numel;
///
/// assert_eq!(checked_numel(&[2, 3, 4]), Some(24));
/// assert_eq!(checked_numel(&[]), Some(1));
/// assert_eq!(checked_numel(&[usize::MAX, 2]), None);
/// assert_eq!(checked_numel(&[usize::MAX, 2, 0]), Some(0));
/// ```
pub fn checked_numel(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// A multi-dimensional array with owned, reference-counted data.
///
/// Unlike a fixed-rank array, the number of axes is a runtime property: axis
/// grouping and the tensor SVD change the rank of their outputs depending on
/// their arguments.
///
/// # Memory Layout
///
/// Tensors built by the constructors use row-major (C-contiguous) layout where
/// the rightmost dimension varies fastest. [`Tensor::permute_axes`] only
/// reorders shape and strides, producing a non-standard layout that
/// [`Tensor::to_standard_layout`] materializes.
///
/// # Examples
///
/// ```rust
/// use projector_tensor::Tensor;
///
/// let t = Tensor::from_shape_vec(&[2, 2], vec![1u8, 2, 3, 4]).unwrap();
/// assert_eq!(t.shape(), &[2, 2]);
/// assert_eq!(t.get(&[1, 0]), Some(&3));
/// ```
pub struct Tensor<T> {
    /// The storage of the tensor.
    pub storage: TensorStorage<T>,
    /// The shape of the tensor.
    pub shape: Vec<usize>,
    /// The strides of the tensor data in memory.
    pub strides: Vec<usize>,
}

impl<T> Tensor<T> {
    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use projector_tensor::Tensor;
    ///
    /// let t = Tensor::from_shape_vec(&[2, 3], vec![0.0f64; 6]).unwrap();
    /// assert_eq!(t.strides(), &[3, 1]);
    /// ```
    pub fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self, TensorError> {
        let Some(numel) = checked_numel(shape) else {
            return Err(TensorError::dimension_mismatch(
                "Shape has more elements than can be addressed",
                shape,
                &[data.len()],
            ));
        };
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            storage: TensorStorage::from_vec(data),
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new `Tensor` with the given shape and slice of data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    pub fn from_shape_slice(shape: &[usize], data: &[T]) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        Self::from_shape_vec(shape, data.to_vec())
    }

    /// Creates a new `Tensor` with every element set to `value`.
    pub fn from_shape_val(shape: &[usize], value: T) -> Self
    where
        T: Clone,
    {
        let numel = checked_numel(shape).unwrap_or(usize::MAX);
        Self {
            storage: TensorStorage::from_vec(vec![value; numel]),
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new `Tensor` with the given shape and a function to generate the data.
    ///
    /// The function `f` is called with the multi-index of each element in
    /// row-major order.
    ///
    /// # Example
    ///
    /// ```
    /// use projector_tensor::Tensor;
    ///
    /// let t = Tensor::from_shape_fn(&[2, 2], |idx| (idx[0] * 2 + idx[1]) as u8);
    /// assert_eq!(t.as_slice(), &[0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: &[usize], f: F) -> Self
    where
        F: Fn(&[usize]) -> T,
    {
        let numel = checked_numel(shape).unwrap_or(usize::MAX);
        let mut index = vec![0; shape.len()];
        let data: Vec<T> = (0..numel)
            .map(|i| {
                let mut j = i;
                for k in (0..shape.len()).rev() {
                    index[k] = j % shape[k];
                    j /= shape[k];
                }
                f(index.as_slice())
            })
            .collect();
        Self {
            storage: TensorStorage::from_vec(data),
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new tensor with all elements set to zero.
    pub fn zeros(shape: &[usize]) -> Self
    where
        T: Clone + num_traits::Zero,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// Returns the shape of the tensor.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the strides of the tensor.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Returns the number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        // every constructor rejects or fails to allocate an unrepresentable count
        checked_numel(&self.shape).unwrap_or(usize::MAX)
    }

    /// Get the data of the tensor as a slice, in memory order.
    ///
    /// For standard-layout tensors memory order is row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Get the data of the tensor as a pointer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Consumes the tensor and returns its elements in row-major order.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        if self.is_standard_layout() {
            self.storage.into_vec()
        } else {
            self.to_standard_layout().storage.into_vec()
        }
    }

    /// Get the offset of the element at the given index.
    ///
    /// Returns `None` when the index has the wrong length or is out of bounds.
    pub fn get_iter_offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.ndim() {
            return None;
        }
        let mut offset = 0;
        for ((&idx, &dim_size), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Get the element at the given index, checking if the index is out of bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use projector_tensor::Tensor;
    ///
    /// let t = Tensor::from_shape_vec(&[2, 2], vec![1u8, 2, 3, 4]).unwrap();
    /// assert_eq!(t.get(&[0, 1]), Some(&2));
    /// assert!(t.get(&[2, 0]).is_none());
    /// ```
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.get_iter_offset(index)
            .and_then(|i| self.storage.as_slice().get(i))
    }

    /// Reshape the tensor to a new shape, keeping row-major element order.
    ///
    /// Standard-layout tensors share their storage with the result; other
    /// layouts are copied into standard layout first.
    ///
    /// # Errors
    ///
    /// If the number of elements in the new shape does not match the number of elements in the tensor, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use projector_tensor::Tensor;
    ///
    /// let t = Tensor::from_shape_vec(&[4], vec![1u8, 2, 3, 4]).unwrap();
    /// let t2 = t.reshape(&[2, 2]).unwrap();
    /// assert_eq!(t2.shape(), &[2, 2]);
    /// assert_eq!(t2.strides(), &[2, 1]);
    /// assert_eq!(t2.as_ptr(), t.as_ptr());
    /// ```
    pub fn reshape(&self, shape: &[usize]) -> Result<Tensor<T>, TensorError>
    where
        T: Clone,
    {
        let numel = checked_numel(shape);
        if numel != Some(self.numel()) {
            let expected = match numel {
                Some(n) => format!("{:?} ({} elements)", shape, n),
                None => format!("{:?} (more than usize::MAX elements)", shape),
            };
            return Err(TensorError::DimensionMismatch {
                message: "Reshape operation requires same number of elements".to_string(),
                expected,
                actual: format!("{:?} ({} elements)", self.shape, self.numel()),
            });
        }

        let storage = if self.is_standard_layout() {
            self.storage.clone()
        } else {
            self.to_standard_layout().storage
        };

        Ok(Tensor {
            storage,
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
        })
    }

    /// Permutes (reorders) the axes of the tensor without copying data.
    ///
    /// `axes[i]` names the source axis that becomes the i-th axis of the result.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::DimensionMismatch`] if `axes` is not a permutation of `0..ndim`.
    pub fn permute_axes(&self, axes: &[usize]) -> Result<Tensor<T>, TensorError> {
        let mut seen = vec![false; self.ndim()];
        let is_permutation = axes.len() == self.ndim()
            && axes.iter().all(|&axis| {
                axis < seen.len() && !std::mem::replace(&mut seen[axis], true)
            });
        if !is_permutation {
            return Err(TensorError::dimension_mismatch(
                "Axes must be a permutation of the tensor axes",
                &(0..self.ndim()).collect::<Vec<_>>(),
                axes,
            ));
        }

        Ok(Tensor {
            storage: self.storage.clone(),
            shape: axes.iter().map(|&axis| self.shape[axis]).collect(),
            strides: axes.iter().map(|&axis| self.strides[axis]).collect(),
        })
    }

    /// Checks if the tensor has a standard contiguous (row-major) memory layout.
    ///
    /// Axes of size one never affect the layout, whatever their stride.
    pub fn is_standard_layout(&self) -> bool {
        let mut expected_stride: usize = 1;
        for (&dim, &stride) in self.shape.iter().rev().zip(self.strides.iter().rev()) {
            if dim != 1 && stride != expected_stride {
                return false;
            }
            expected_stride = expected_stride.saturating_mul(dim);
        }
        true
    }

    /// Converts the tensor to standard contiguous (row-major) memory layout.
    ///
    /// Returns a cheap clone if the tensor already has standard layout, otherwise
    /// copies the elements in row-major order of the current shape.
    pub fn to_standard_layout(&self) -> Self
    where
        T: Clone,
    {
        if self.is_standard_layout() {
            return self.clone();
        }

        let total_elems = self.numel();
        let mut flat = Vec::with_capacity(total_elems);
        let mut idx = vec![0; self.ndim()];
        let slice = self.storage.as_slice();

        for _ in 0..total_elems {
            let offset = idx
                .iter()
                .zip(self.strides.iter())
                .map(|(&i, &s)| i * s)
                .sum::<usize>();

            flat.push(slice[offset].clone());

            // increment index
            for dim in (0..self.ndim()).rev() {
                idx[dim] += 1;
                if idx[dim] < self.shape[dim] {
                    break;
                }
                idx[dim] = 0;
            }
        }

        Tensor {
            storage: TensorStorage::from_vec(flat),
            shape: self.shape.clone(),
            strides: get_strides_from_shape(&self.shape),
        }
    }

    /// Apply a function to each element of the tensor.
    ///
    /// The result has the same shape and strides as `self`.
    pub fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        F: Fn(&T) -> U,
    {
        let data: Vec<U> = self.as_slice().iter().map(f).collect();
        Tensor {
            storage: TensorStorage::from_vec(data),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }
}

impl<T> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("data", &self.as_slice())
            .finish()
    }
}
