//! Square matrices with orthonormal columns.

use crate::float_types::RealScalar;
use crate::matrix;
use nalgebra::{SMatrix, SVector};
use std::ops::{Deref, Mul, Neg};

/// A square matrix whose columns form an orthonormal basis.
///
/// Construction runs Gram-Schmidt column by column, so any invertible matrix is
/// accepted and straightened. Both proper rotations (det = +1) and reflections
/// (det = −1) are representable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthogonalMat<T: RealScalar, const N: usize>(SMatrix<T, N, N>);

impl<T: RealScalar, const N: usize> OrthogonalMat<T, N> {
    /// Orthonormalises the columns of `m`.
    pub fn new(m: SMatrix<T, N, N>) -> Self {
        Self(gram_schmidt(m))
    }

    /// Wraps `m` as-is. The caller guarantees `mᵀm = I`.
    #[inline]
    pub const fn new_unchecked(m: SMatrix<T, N, N>) -> Self {
        Self(m)
    }

    pub fn identity() -> Self {
        Self(SMatrix::identity())
    }

    /// The invalid sentinel.
    pub fn invalid() -> Self {
        Self(matrix::invalid())
    }

    /// Replaces the contents, orthonormalising `m`.
    pub fn set(&mut self, m: SMatrix<T, N, N>) {
        self.0 = gram_schmidt(m);
    }

    #[inline]
    pub const fn mat(&self) -> &SMatrix<T, N, N> {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> SMatrix<T, N, N> {
        self.0
    }

    /// Column `j` as an owned vector.
    pub fn col(&self, j: usize) -> SVector<T, N> {
        self.0.column(j).into_owned()
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Same as [`OrthogonalMat::transpose`].
    #[inline]
    pub fn inv(&self) -> Self {
        self.transpose()
    }

    pub fn is_valid(&self) -> bool {
        matrix::is_valid(&self.0)
    }
}

/// Classical Gram-Schmidt: each column loses its projection on the already
/// orthonormalised columns to its left, then gets normalised.
fn gram_schmidt<T: RealScalar, const N: usize>(mut m: SMatrix<T, N, N>) -> SMatrix<T, N, N> {
    debug_assert!(
        N > 0 && matrix::is_valid(&m),
        "Gram-Schmidt needs a valid non-empty matrix"
    );
    for j in 0..N {
        let mut col = m.column(j).into_owned();
        for k in 0..j {
            let basis = m.column(k);
            col -= basis * basis.dot(&m.column(j));
        }
        let norm = col.norm();
        if norm.is_zero() {
            return matrix::invalid();
        }
        m.set_column(j, &(col / norm));
    }
    m
}

impl<T: RealScalar, const N: usize> Default for OrthogonalMat<T, N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: RealScalar, const N: usize> Deref for OrthogonalMat<T, N> {
    type Target = SMatrix<T, N, N>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: RealScalar, const N: usize> From<OrthogonalMat<T, N>> for SMatrix<T, N, N> {
    fn from(m: OrthogonalMat<T, N>) -> Self {
        m.0
    }
}

impl<T: RealScalar, const N: usize> Neg for OrthogonalMat<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// The product of two orthogonal matrices is orthogonal; rounding is cleaned up.
impl<T: RealScalar, const N: usize> Mul for OrthogonalMat<T, N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.0 * rhs.0)
    }
}

impl<T: RealScalar, const N: usize, const C: usize> Mul<SMatrix<T, N, C>> for OrthogonalMat<T, N> {
    type Output = SMatrix<T, N, C>;

    fn mul(self, rhs: SMatrix<T, N, C>) -> SMatrix<T, N, C> {
        self.0 * rhs
    }
}

impl<T: RealScalar, const N: usize, const C: usize> Mul<&SMatrix<T, N, C>> for &OrthogonalMat<T, N> {
    type Output = SMatrix<T, N, C>;

    fn mul(self, rhs: &SMatrix<T, N, C>) -> SMatrix<T, N, C> {
        self.0 * rhs
    }
}

impl<T: RealScalar, const N: usize> Mul<T> for OrthogonalMat<T, N> {
    type Output = SMatrix<T, N, N>;

    fn mul(self, s: T) -> SMatrix<T, N, N> {
        self.0 * s
    }
}

impl<T: RealScalar, const N: usize> approx::AbsDiffEq for OrthogonalMat<T, N> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

impl<T: RealScalar, const N: usize> approx::RelativeEq for OrthogonalMat<T, N> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        approx::RelativeEq::relative_eq(&self.0, &other.0, epsilon, max_relative)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix2, Matrix3, Vector3};

    #[test]
    fn gram_schmidt_orthonormalises() {
        let m = Matrix3::new(
            2.0, 1.0, 0.0,
            0.0, 1.0, 1.0,
            0.0, 0.0, 3.0,
        );
        let o = OrthogonalMat::new(m);
        assert_relative_eq!(o.transpose().into_inner() * o.into_inner(), Matrix3::identity(), epsilon = 1e-12);
        // First column only gets normalised.
        assert_relative_eq!(o.col(0), Vector3::x());
    }

    #[test]
    fn reflections_are_kept() {
        let o = OrthogonalMat::new(Matrix2::new(1.0, 0.0, 0.0, -1.0));
        assert_relative_eq!(o.determinant(), -1.0);
    }

    #[test]
    fn products() {
        let a = OrthogonalMat::new(Matrix2::new(0.0, -1.0, 1.0, 0.0));
        let b = a * a;
        assert_relative_eq!(b.into_inner(), -Matrix2::identity());
        let v = a * nalgebra::Matrix2x1::new(1.0, 0.0);
        assert_relative_eq!(v, nalgebra::Vector2::new(0.0, 1.0));
    }
}
