//! Thin façade over the nalgebra dense matrix backend.
//!
//! Element access, arithmetic, `try_inverse`, `transpose`, `norm`, `dot` and `cross`
//! come straight from nalgebra. This module adds the pieces the rest of the crate
//! relies on: the **invalid sentinel** (a matrix holding "no value", all zeros except
//! a NaN at `(0, 0)`), division that produces the sentinel instead of infinities,
//! and the dyadic/skew products used by rotations and reflections.

use crate::float_types::RealScalar;
use nalgebra::{
    ComplexField, DMatrix, DVector, DefaultAllocator, Dim, Matrix3, OMatrix, RawStorage,
    RawStorageMut, SMatrix, SVector, Scalar, Storage, Vector3, allocator::Allocator,
};
use num_traits::Zero;

/// Fixed-size dense matrix.
pub type Matrix<T, const R: usize, const C: usize> = SMatrix<T, R, C>;
/// Fixed-size column vector.
pub type Vector<T, const N: usize> = SVector<T, N>;
/// Matrix whose extent is only known at runtime.
pub type DynamicMat<T> = DMatrix<T>;
/// Column vector whose length is only known at runtime.
pub type DynamicVec<T> = DVector<T>;

/// A quiet NaN in any real or complex field.
#[inline]
pub fn nan<T: ComplexField>() -> T {
    T::from_real(T::RealField::zero() / T::RealField::zero())
}

/// Turns `m` into the invalid sentinel in place.
///
/// Empty matrices have no `(0, 0)` slot and stay as they are.
pub fn invalidate<T, R, C, S>(m: &mut nalgebra::Matrix<T, R, C, S>)
where
    T: ComplexField,
    R: Dim,
    C: Dim,
    S: RawStorageMut<T, R, C>,
{
    m.fill(T::zero());
    if !m.is_empty() {
        m[(0, 0)] = nan();
    }
}

/// The invalid sentinel of a fixed shape.
pub fn invalid<T: ComplexField, const R: usize, const C: usize>() -> SMatrix<T, R, C> {
    let mut m = SMatrix::<T, R, C>::zeros();
    invalidate(&mut m);
    m
}

/// `false` only for the invalid sentinel. An empty matrix counts as valid.
#[allow(clippy::eq_op)]
pub fn is_valid<T, R, C, S>(m: &nalgebra::Matrix<T, R, C, S>) -> bool
where
    T: ComplexField,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    if m.is_empty() {
        return true;
    }
    let head = &m[(0, 0)];
    // NaN is the only value unequal to itself, for complex numbers too.
    head == head
}

/// Scalar division where an exact zero divisor yields the invalid sentinel.
pub fn div_or_invalid<T, R, C, S>(m: &nalgebra::Matrix<T, R, C, S>, s: T) -> OMatrix<T, R, C>
where
    T: ComplexField,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
    DefaultAllocator: Allocator<R, C>,
{
    if s.is_zero() {
        let mut res = m.clone_owned();
        invalidate(&mut res);
        res
    } else {
        m / s
    }
}

/// `true` for a single row or column holding more than one element.
pub fn has_vector_interface<T, R, C, S>(m: &nalgebra::Matrix<T, R, C, S>) -> bool
where
    T: Scalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    (m.nrows() == 1 || m.ncols() == 1) && m.len() > 1
}

/// `true` for a square matrix larger than 1×1.
pub fn is_square_matrix<T, R, C, S>(m: &nalgebra::Matrix<T, R, C, S>) -> bool
where
    T: Scalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    m.nrows() == m.ncols() && m.ncols() > 1
}

/// Outer product `u · vᵀ`.
#[inline]
pub fn dyadic<T: RealScalar, const N: usize>(u: &SVector<T, N>, v: &SVector<T, N>) -> SMatrix<T, N, N> {
    u * v.transpose()
}

/// Cross-product matrix `[v]ₓ`, so that `skew(a) * b == a.cross(&b)`.
pub fn skew<T: RealScalar>(v: &Vector3<T>) -> Matrix3<T> {
    let zero = T::zero();
    Matrix3::new(
        zero, -v.z, v.y,
        v.z, zero, -v.x,
        -v.y, v.x, zero,
    )
}

/// Copies any matrix (fixed, dynamic or a view) into a dynamically sized one.
pub fn to_dynamic<T, R, C, S>(m: &nalgebra::Matrix<T, R, C, S>) -> DMatrix<T>
where
    T: Scalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    DMatrix::from_iterator(m.nrows(), m.ncols(), m.iter().cloned())
}
