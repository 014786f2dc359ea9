use super::Rotator;
use crate::float_types::RealScalar;
use crate::orthogonal::OrthogonalMat;
use nalgebra::{Matrix2, Vector2};

/// Counter-clockwise rotation of the plane, stored as an angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation2<T: RealScalar> {
    angle: T,
}

impl<T: RealScalar> Rotation2<T> {
    pub const fn new(angle: T) -> Self {
        Self { angle }
    }

    pub fn identity() -> Self {
        Self::new(T::zero())
    }

    #[inline]
    pub const fn angle(&self) -> T {
        self.angle
    }

    pub fn set_angle(&mut self, angle: T) {
        self.angle = angle;
    }
}

impl<T: RealScalar> Default for Rotation2<T> {
    fn default() -> Self {
        Self::new(T::zero())
    }
}

impl<T: RealScalar> Rotator<T, 2> for Rotation2<T> {
    /// Recovers the angle in `(-π, π]` from the first column.
    fn from_ortho_mat(m: &OrthogonalMat<T, 2>) -> Self {
        let cos = m[(0, 0)].clamp(-T::one(), T::one());
        let angle = cos.acos();
        if m[(1, 0)] >= T::zero() {
            Self::new(angle)
        } else {
            Self::new(-angle)
        }
    }

    fn ortho_mat(&self) -> OrthogonalMat<T, 2> {
        let (s, c) = self.angle.sin_cos();
        OrthogonalMat::new_unchecked(Matrix2::new(c, -s, s, c))
    }

    fn inv(&self) -> Self {
        Self::new(-self.angle)
    }

    fn apply(&self, v: &Vector2<T>) -> Vector2<T> {
        self.ortho_mat().mat() * v
    }

    fn then(&self, next: &Self) -> Self {
        Self::new(self.angle + next.angle)
    }
}

impl<T: RealScalar> From<T> for Rotation2<T> {
    fn from(angle: T) -> Self {
        Self::new(angle)
    }
}

impl<T: RealScalar> From<OrthogonalMat<T, 2>> for Rotation2<T> {
    fn from(m: OrthogonalMat<T, 2>) -> Self {
        Self::from_ortho_mat(&m)
    }
}

impl<T: RealScalar> approx::AbsDiffEq for Rotation2<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    /// Compares the rotations themselves, so `π` and `-π` are equal.
    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.ortho_mat(), &other.ortho_mat(), epsilon)
    }
}

impl<T: RealScalar> approx::RelativeEq for Rotation2<T> {
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
