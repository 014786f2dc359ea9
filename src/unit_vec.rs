//! A vector whose norm is always one.

use crate::float_types::RealScalar;
use crate::matrix;
use nalgebra::{SMatrix, SVector};
use std::ops::{Deref, Mul, Neg};

/// Column vector of unit length.
///
/// Every constructor and setter normalises, except [`UnitVec::new_unchecked`] and
/// negation, which already preserve the invariant. Elements are readable through
/// `Deref` but there is no mutable access: vector addition would break the norm.
/// A zero input produces the invalid sentinel (see [`crate::matrix::invalid`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVec<T: RealScalar, const N: usize>(SVector<T, N>);

impl<T: RealScalar, const N: usize> UnitVec<T, N> {
    /// Normalises `v`.
    pub fn new(v: impl Into<SVector<T, N>>) -> Self {
        Self(normalized_or_invalid(v.into()))
    }

    /// Wraps `v` as-is. The caller guarantees `‖v‖ = 1`.
    #[inline]
    pub const fn new_unchecked(v: SVector<T, N>) -> Self {
        Self(v)
    }

    /// The invalid sentinel.
    pub fn invalid() -> Self {
        Self(matrix::invalid())
    }

    /// Standard basis vector `eᵢ`.
    ///
    /// # Panics
    /// When `i >= N`.
    pub fn axis(i: usize) -> Self {
        assert!(i < N, "axis index {i} out of range for dimension {N}");
        let mut v = SVector::<T, N>::zeros();
        v[i] = T::one();
        Self(v)
    }

    /// Replaces the direction, normalising `v`.
    pub fn set(&mut self, v: impl Into<SVector<T, N>>) {
        self.0 = normalized_or_invalid(v.into());
    }

    #[inline]
    pub const fn vec(&self) -> &SVector<T, N> {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> SVector<T, N> {
        self.0
    }

    /// Always one.
    #[inline]
    pub fn norm(&self) -> T {
        T::one()
    }

    /// Always one.
    #[inline]
    pub fn sqr_norm(&self) -> T {
        T::one()
    }

    /// Outer product `self · otherᵀ`.
    pub fn dyadic(&self, other: &SVector<T, N>) -> SMatrix<T, N, N> {
        matrix::dyadic(&self.0, other)
    }

    pub fn is_valid(&self) -> bool {
        matrix::is_valid(&self.0)
    }
}

fn normalized_or_invalid<T: RealScalar, const N: usize>(v: SVector<T, N>) -> SVector<T, N> {
    let norm = v.norm();
    if norm.is_zero() {
        return matrix::invalid();
    }
    v / norm
}

impl<T: RealScalar, const N: usize> Default for UnitVec<T, N> {
    /// The last basis vector, e.g. `(0, 0, 1)` in 3D.
    fn default() -> Self {
        Self::axis(N - 1)
    }
}

impl<T: RealScalar, const N: usize> Deref for UnitVec<T, N> {
    type Target = SVector<T, N>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: RealScalar, const N: usize> AsRef<SVector<T, N>> for UnitVec<T, N> {
    fn as_ref(&self) -> &SVector<T, N> {
        &self.0
    }
}

impl<T: RealScalar, const N: usize> From<UnitVec<T, N>> for SVector<T, N> {
    fn from(u: UnitVec<T, N>) -> Self {
        u.0
    }
}

impl<T: RealScalar, const N: usize> Neg for UnitVec<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Scaling leaves the unit sphere, so the result is a plain vector.
impl<T: RealScalar, const N: usize> Mul<T> for UnitVec<T, N> {
    type Output = SVector<T, N>;

    fn mul(self, s: T) -> SVector<T, N> {
        self.0 * s
    }
}

impl<T: RealScalar, const N: usize> approx::AbsDiffEq for UnitVec<T, N> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

impl<T: RealScalar, const N: usize> approx::RelativeEq for UnitVec<T, N> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        approx::RelativeEq::relative_eq(&self.0, &other.0, epsilon, max_relative)
    }
}
