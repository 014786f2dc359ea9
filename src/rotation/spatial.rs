use super::Rotator;
use crate::float_types::RealScalar;
use crate::matrix::{dyadic, skew};
use crate::orthogonal::OrthogonalMat;
use crate::quaternion::{Quaternion, UnitQuaternion};
use crate::unit_vec::UnitVec;
use nalgebra::{Matrix3, Vector3};

/// Rotation of space backed by a unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation3<T: RealScalar> {
    q: UnitQuaternion<T>,
}

impl<T: RealScalar> Rotation3<T> {
    pub fn identity() -> Self {
        Self::from_unit_quaternion(UnitQuaternion::identity())
    }

    pub const fn from_unit_quaternion(q: UnitQuaternion<T>) -> Self {
        Self { q }
    }

    /// Rotation by `alpha` about x, then `beta` about y, then `gamma` about z,
    /// all axes fixed in space. The matrix equals `Rz(γ)·Ry(β)·Rx(α)`.
    pub fn from_euler_angles(alpha: T, beta: T, gamma: T) -> Self {
        let two = T::one() + T::one();
        let (sa, ca) = (alpha / two).sin_cos();
        let (sb, cb) = (beta / two).sin_cos();
        let (sg, cg) = (gamma / two).sin_cos();
        Self::from_unit_quaternion(UnitQuaternion::new(
            ca * cb * cg + sa * sb * sg,
            sa * cb * cg - ca * sb * sg,
            ca * sb * cg + sa * cb * sg,
            ca * cb * sg - sa * sb * cg,
        ))
    }

    /// Rotation by `angle` about `axis`, counter-clockwise when the axis points at the viewer.
    pub fn from_axis_angle(axis: &UnitVec<T, 3>, angle: T) -> Self {
        let two = T::one() + T::one();
        let (s, c) = (angle / two).sin_cos();
        Self::from_unit_quaternion(UnitQuaternion::new_unchecked(Quaternion::from_parts(
            c,
            axis.into_inner() * s,
        )))
    }

    /// Rotation whose axis is the direction of `spin` and whose angle is its length.
    /// The zero vector is the identity.
    pub fn from_spin_vec(spin: &Vector3<T>) -> Self {
        let angle = spin.norm();
        if angle.is_zero() {
            return Self::identity();
        }
        Self::from_axis_angle(&UnitVec::new_unchecked(spin / angle), angle)
    }

    /// Rebuilds from an arbitrary matrix, orthonormalising it first.
    pub fn from_matrix(m: Matrix3<T>) -> Self {
        Self::from_ortho_mat(&OrthogonalMat::new(m))
    }

    #[inline]
    pub const fn unit_qtn(&self) -> &UnitQuaternion<T> {
        &self.q
    }

    pub fn set_unit_qtn(&mut self, q: UnitQuaternion<T>) {
        self.q = q;
    }

    /// Axis times angle, with the angle in `[0, π]`.
    pub fn spin_vec(&self) -> Vector3<T> {
        // q and -q are the same rotation; pick the one giving the shorter angle.
        let q = if self.q.w() < T::zero() { -self.q } else { self.q };
        let sin_half = q.v().norm();
        if sin_half.is_zero() {
            return Vector3::zeros();
        }
        let two = T::one() + T::one();
        let angle = two * sin_half.atan2(q.w());
        q.v() * (angle / sin_half)
    }

    pub fn set_spin_vec(&mut self, spin: &Vector3<T>) {
        *self = Self::from_spin_vec(spin);
    }
}

impl<T: RealScalar> Rotator<T, 3> for Rotation3<T> {
    fn from_ortho_mat(m: &OrthogonalMat<T, 3>) -> Self {
        let one = T::one();
        let trace = m.trace();
        let (w, x, y, z) = if trace > T::default_epsilon() {
            let s = (trace + one).sqrt();
            (s, (m[(2, 1)] - m[(1, 2)]) / s, (m[(0, 2)] - m[(2, 0)]) / s, (m[(1, 0)] - m[(0, 1)]) / s)
        } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
            let s = (m[(0, 0)] - m[(1, 1)] - m[(2, 2)] + one).sqrt();
            ((m[(2, 1)] - m[(1, 2)]) / s, s, (m[(0, 1)] + m[(1, 0)]) / s, (m[(2, 0)] + m[(0, 2)]) / s)
        } else if m[(1, 1)] > m[(2, 2)] {
            let s = (m[(1, 1)] - m[(0, 0)] - m[(2, 2)] + one).sqrt();
            ((m[(0, 2)] - m[(2, 0)]) / s, (m[(0, 1)] + m[(1, 0)]) / s, s, (m[(1, 2)] + m[(2, 1)]) / s)
        } else {
            let s = (m[(2, 2)] - m[(0, 0)] - m[(1, 1)] + one).sqrt();
            ((m[(1, 0)] - m[(0, 1)]) / s, (m[(2, 0)] + m[(0, 2)]) / s, (m[(1, 2)] + m[(2, 1)]) / s, s)
        };
        Self::from_unit_quaternion(UnitQuaternion::new(w, x, y, z))
    }

    fn ortho_mat(&self) -> OrthogonalMat<T, 3> {
        let w = self.q.w();
        let v = *self.q.v();
        let two = T::one() + T::one();
        let m = Matrix3::identity() * (w * w - v.norm_squared())
            + skew(&v) * (two * w)
            + dyadic(&v, &v) * two;
        // Exact for a unit quaternion, no need to re-orthonormalise.
        OrthogonalMat::new_unchecked(m)
    }

    fn inv(&self) -> Self {
        Self::from_unit_quaternion(self.q.inv())
    }

    fn apply(&self, v: &Vector3<T>) -> Vector3<T> {
        (self.q * Quaternion::pure(*v) * self.q.inv()).v
    }

    fn then(&self, next: &Self) -> Self {
        Self::from_unit_quaternion(next.q * self.q)
    }
}

impl<T: RealScalar> Default for Rotation3<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: RealScalar> From<(T, T, T)> for Rotation3<T> {
    /// Euler angles `(α, β, γ)`, see [`Rotation3::from_euler_angles`].
    fn from((alpha, beta, gamma): (T, T, T)) -> Self {
        Self::from_euler_angles(alpha, beta, gamma)
    }
}

impl<T: RealScalar> From<(UnitVec<T, 3>, T)> for Rotation3<T> {
    fn from((axis, angle): (UnitVec<T, 3>, T)) -> Self {
        Self::from_axis_angle(&axis, angle)
    }
}

impl<T: RealScalar> From<UnitQuaternion<T>> for Rotation3<T> {
    fn from(q: UnitQuaternion<T>) -> Self {
        Self::from_unit_quaternion(q)
    }
}

impl<T: RealScalar> From<OrthogonalMat<T, 3>> for Rotation3<T> {
    fn from(m: OrthogonalMat<T, 3>) -> Self {
        Self::from_ortho_mat(&m)
    }
}

impl<T: RealScalar> approx::AbsDiffEq for Rotation3<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    /// Compares the rotations themselves, so `q` and `-q` are equal.
    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.ortho_mat(), &other.ortho_mat(), epsilon)
    }
}

impl<T: RealScalar> approx::RelativeEq for Rotation3<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        approx::RelativeEq::relative_eq(
            &self.ortho_mat(),
            &other.ortho_mat(),
            epsilon,
            max_relative,
        )
    }
}
