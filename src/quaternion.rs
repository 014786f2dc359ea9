//! Hamilton quaternions and their unit-norm subset.

use crate::float_types::{RealScalar, are_almost_same};
use crate::unit_vec::UnitVec;
use nalgebra::Vector3;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A quaternion `w + xi + yj + zk`, stored as a real part and a vector part.
///
/// The default value is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion<T: RealScalar> {
    pub w: T,
    pub v: Vector3<T>,
}

impl<T: RealScalar> Quaternion<T> {
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, v: Vector3::new(x, y, z) }
    }

    pub const fn from_parts(w: T, v: Vector3<T>) -> Self {
        Self { w, v }
    }

    /// `0 + v`.
    pub fn pure(v: Vector3<T>) -> Self {
        Self { w: T::zero(), v }
    }

    /// `w + 0`.
    pub fn from_real(w: T) -> Self {
        Self { w, v: Vector3::zeros() }
    }

    pub fn zero() -> Self {
        Self::from_real(T::zero())
    }

    pub fn identity() -> Self {
        Self::from_real(T::one())
    }

    #[inline]
    pub fn x(&self) -> T {
        self.v.x
    }

    #[inline]
    pub fn y(&self) -> T {
        self.v.y
    }

    #[inline]
    pub fn z(&self) -> T {
        self.v.z
    }

    pub fn conjugate(&self) -> Self {
        Self { w: self.w, v: -self.v }
    }

    pub fn sqr_norm(&self) -> T {
        self.w * self.w + self.v.norm_squared()
    }

    pub fn norm(&self) -> T {
        self.sqr_norm().sqrt()
    }

    /// Multiplicative inverse `q* / ‖q‖²`. Zero has none and maps to NaNs.
    pub fn inv(&self) -> Self {
        self.conjugate() / self.sqr_norm()
    }

    pub fn normalized(&self) -> Self {
        *self / self.norm()
    }

    pub fn normalize(&mut self) {
        *self = self.normalized();
    }
}

impl<T: RealScalar> Default for Quaternion<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: RealScalar> From<T> for Quaternion<T> {
    fn from(w: T) -> Self {
        Self::from_real(w)
    }
}

impl<T: RealScalar> Add for Quaternion<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { w: self.w + rhs.w, v: self.v + rhs.v }
    }
}

impl<T: RealScalar> Sub for Quaternion<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { w: self.w - rhs.w, v: self.v - rhs.v }
    }
}

/// Adds `s` to the real part.
impl<T: RealScalar> Add<T> for Quaternion<T> {
    type Output = Self;

    fn add(self, s: T) -> Self {
        self + Self::from_real(s)
    }
}

impl<T: RealScalar> Sub<T> for Quaternion<T> {
    type Output = Self;

    fn sub(self, s: T) -> Self {
        self - Self::from_real(s)
    }
}

impl<T: RealScalar> Neg for Quaternion<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self { w: -self.w, v: -self.v }
    }
}

/// Hamilton product.
impl<T: RealScalar> Mul for Quaternion<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            w: self.w * rhs.w - self.v.dot(&rhs.v),
            v: rhs.v * self.w + self.v * rhs.w + self.v.cross(&rhs.v),
        }
    }
}

impl<T: RealScalar> Mul<T> for Quaternion<T> {
    type Output = Self;

    fn mul(self, s: T) -> Self {
        Self { w: self.w * s, v: self.v * s }
    }
}

impl<T: RealScalar> Div<T> for Quaternion<T> {
    type Output = Self;

    fn div(self, s: T) -> Self {
        Self { w: self.w / s, v: self.v / s }
    }
}

impl<T: RealScalar> AddAssign for Quaternion<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: RealScalar> SubAssign for Quaternion<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: RealScalar> AddAssign<T> for Quaternion<T> {
    fn add_assign(&mut self, s: T) {
        *self = *self + s;
    }
}

impl<T: RealScalar> SubAssign<T> for Quaternion<T> {
    fn sub_assign(&mut self, s: T) {
        *self = *self - s;
    }
}

impl<T: RealScalar> MulAssign for Quaternion<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: RealScalar> MulAssign<T> for Quaternion<T> {
    fn mul_assign(&mut self, s: T) {
        *self = *self * s;
    }
}

impl<T: RealScalar> DivAssign<T> for Quaternion<T> {
    fn div_assign(&mut self, s: T) {
        *self = *self / s;
    }
}

impl<T: RealScalar> approx::AbsDiffEq for Quaternion<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.w, &other.w, epsilon)
            && approx::AbsDiffEq::abs_diff_eq(&self.v, &other.v, epsilon)
    }
}

impl<T: RealScalar> approx::RelativeEq for Quaternion<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        approx::RelativeEq::relative_eq(&self.w, &other.w, epsilon, max_relative)
            && approx::RelativeEq::relative_eq(&self.v, &other.v, epsilon, max_relative)
    }
}

/// A quaternion of norm one.
///
/// Every constructor normalises except [`UnitQuaternion::new_unchecked`] and the
/// pure form built from a [`UnitVec`]. The inverse is the conjugate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitQuaternion<T: RealScalar>(Quaternion<T>);

impl<T: RealScalar> UnitQuaternion<T> {
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self::from_quaternion(Quaternion::new(w, x, y, z))
    }

    pub fn from_quaternion(q: Quaternion<T>) -> Self {
        Self(q.normalized())
    }

    pub fn from_parts(w: T, v: Vector3<T>) -> Self {
        Self::from_quaternion(Quaternion::from_parts(w, v))
    }

    /// The pure quaternion `0 + u`, already of norm one.
    pub fn from_unit_vec(u: &UnitVec<T, 3>) -> Self {
        Self(Quaternion::pure(*u.vec()))
    }

    /// Wraps `q` as-is. The caller guarantees `‖q‖ = 1`.
    #[inline]
    pub const fn new_unchecked(q: Quaternion<T>) -> Self {
        Self(q)
    }

    pub fn identity() -> Self {
        Self(Quaternion::identity())
    }

    /// Replaces the value, normalising `q`.
    pub fn set(&mut self, q: Quaternion<T>) {
        self.0 = q.normalized();
    }

    #[inline]
    pub const fn qtn(&self) -> &Quaternion<T> {
        &self.0
    }

    #[inline]
    pub fn w(&self) -> T {
        self.0.w
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0.v.x
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0.v.y
    }

    #[inline]
    pub fn z(&self) -> T {
        self.0.v.z
    }

    #[inline]
    pub fn v(&self) -> &Vector3<T> {
        &self.0.v
    }

    #[inline]
    pub fn norm(&self) -> T {
        T::one()
    }

    pub fn conjugate(&self) -> Self {
        Self(self.0.conjugate())
    }

    pub fn inv(&self) -> Self {
        self.conjugate()
    }

    /// Spherical linear interpolation from `q0` (`t = 0`) to `q1` (`t = 1`)
    /// along the shorter of the two great arcs.
    pub fn slerp(q0: &Self, q1: &Self, t: T) -> Self {
        let cos_half_theta = (*q1 * q0.inv()).w();
        let target = if cos_half_theta > T::zero() { *q1 } else { -*q1 };
        let rel = q0.inv() * target;
        if are_almost_same(rel.w(), T::one()) {
            return *q0;
        }
        let axis = UnitVec::new(*rel.v());
        let half_theta = rel.w().clamp(-T::one(), T::one()).acos();
        let step = t * half_theta;
        *q0 * Self::from_parts(step.cos(), axis.into_inner() * step.sin())
    }
}

impl<T: RealScalar> Default for UnitQuaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: RealScalar> From<UnitQuaternion<T>> for Quaternion<T> {
    fn from(q: UnitQuaternion<T>) -> Self {
        q.0
    }
}

impl<T: RealScalar> Neg for UnitQuaternion<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Renormalised so that rounding does not accumulate over long chains.
impl<T: RealScalar> Mul for UnitQuaternion<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_quaternion(self.0 * rhs.0)
    }
}

impl<T: RealScalar> Mul<Quaternion<T>> for UnitQuaternion<T> {
    type Output = Quaternion<T>;

    fn mul(self, rhs: Quaternion<T>) -> Quaternion<T> {
        self.0 * rhs
    }
}

impl<T: RealScalar> Mul<UnitQuaternion<T>> for Quaternion<T> {
    type Output = Quaternion<T>;

    fn mul(self, rhs: UnitQuaternion<T>) -> Quaternion<T> {
        self * rhs.0
    }
}

impl<T: RealScalar> Mul<T> for UnitQuaternion<T> {
    type Output = Quaternion<T>;

    fn mul(self, s: T) -> Quaternion<T> {
        self.0 * s
    }
}

impl<T: RealScalar> approx::AbsDiffEq for UnitQuaternion<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

impl<T: RealScalar> approx::RelativeEq for UnitQuaternion<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        approx::RelativeEq::relative_eq(&self.0, &other.0, epsilon, max_relative)
    }
}
