//! Element types accepted by the tensor SVD.

use std::fmt::Debug;
use std::ops::{Add, Mul};

use faer_traits::ComplexField;

pub use faer::{c32, c64};

/// Scalar types the decomposition can factor.
///
/// Wraps faer's `ComplexField` with the arithmetic needed to contract the
/// factors back together. Implemented for `f32`, `f64`, [`c32`] and [`c64`].
pub trait Scalar:
    ComplexField + Copy + Debug + Default + Add<Output = Self> + Mul<Output = Self> + Send + Sync + 'static
{
    /// Real type of the singular values.
    type RealScalar: num_traits::Float + num_traits::float::TotalOrder + Debug + Default + Send + Sync + 'static;

    /// Real part of the value.
    fn real_part(self) -> Self::RealScalar;

    /// Embeds a real value.
    fn from_real(value: Self::RealScalar) -> Self;

    /// Complex conjugate; the identity for real types.
    fn conjugate(self) -> Self;

    /// Absolute value.
    fn modulus(self) -> Self::RealScalar;
}

impl Scalar for f32 {
    type RealScalar = f32;

    fn real_part(self) -> f32 {
        self
    }

    fn from_real(value: f32) -> Self {
        value
    }

    fn conjugate(self) -> Self {
        self
    }

    fn modulus(self) -> f32 {
        self.abs()
    }
}

impl Scalar for f64 {
    type RealScalar = f64;

    fn real_part(self) -> f64 {
        self
    }

    fn from_real(value: f64) -> Self {
        value
    }

    fn conjugate(self) -> Self {
        self
    }

    fn modulus(self) -> f64 {
        self.abs()
    }
}

impl Scalar for c32 {
    type RealScalar = f32;

    fn real_part(self) -> f32 {
        self.re
    }

    fn from_real(value: f32) -> Self {
        c32::new(value, 0.0)
    }

    fn conjugate(self) -> Self {
        c32::new(self.re, -self.im)
    }

    fn modulus(self) -> f32 {
        self.re.hypot(self.im)
    }
}

impl Scalar for c64 {
    type RealScalar = f64;

    fn real_part(self) -> f64 {
        self.re
    }

    fn from_real(value: f64) -> Self {
        c64::new(value, 0.0)
    }

    fn conjugate(self) -> Self {
        c64::new(self.re, -self.im)
    }

    fn modulus(self) -> f64 {
        self.re.hypot(self.im)
    }
}
