//! Arc-based storage for zero-copy reshapes and cheap clones.

use std::sync::Arc;

/// Reference-counted, immutable element buffer shared between tensors.
///
/// Cloning the storage only increments a reference count, so reshaped or
/// permuted tensors can point at the same elements as their source.
///
/// # Thread Safety
///
/// `TensorStorage` is `Send + Sync` when `T: Send + Sync`.
pub struct TensorStorage<T> {
    inner: Arc<Vec<T>>,
}

impl<T> TensorStorage<T> {
    /// Creates a new storage taking ownership of the vector without copying.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            inner: Arc::new(data),
        }
    }

    /// Returns the storage data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    /// Returns the pointer to the first element.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.inner.as_ptr()
    }

    /// Returns the number of elements in the storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the storage holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if no other tensor shares this storage.
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Returns true if both storages point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Consumes the storage and returns the elements.
    ///
    /// The vector is moved out when the storage is uniquely owned and copied
    /// otherwise.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        Arc::try_unwrap(self.inner).unwrap_or_else(|shared| shared.as_ref().clone())
    }
}

impl<T> Clone for TensorStorage<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for TensorStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorStorage")
            .field("len", &self.len())
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}
