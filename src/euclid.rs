//! Planes, lines and the elementary Euclidean queries between them and points.
//!
//! Queries dispatch on the pair of operand types through small traits
//! ([`Projection`], [`Distance`], [`Intersection`]), so an unsupported pair such
//! as "line to line distance" is rejected at compile time.

use crate::float_types::{RealScalar, are_almost_same};
use crate::matrix;
use crate::unit_vec::UnitVec;
use nalgebra::SVector;

/// Hyperplane through `position` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane<T: RealScalar, const D: usize> {
    position: SVector<T, D>,
    normal: UnitVec<T, D>,
}

impl<T: RealScalar, const D: usize> Plane<T, D> {
    pub fn new(position: impl Into<SVector<T, D>>, normal: UnitVec<T, D>) -> Self {
        Self {
            position: position.into(),
            normal,
        }
    }

    #[inline]
    pub const fn position(&self) -> &SVector<T, D> {
        &self.position
    }

    #[inline]
    pub const fn normal(&self) -> &UnitVec<T, D> {
        &self.normal
    }

    pub fn set_position(&mut self, position: impl Into<SVector<T, D>>) {
        self.position = position.into();
    }

    pub fn set_normal(&mut self, normal: UnitVec<T, D>) {
        self.normal = normal;
    }

    /// Positive on the side the normal points to.
    pub fn signed_dist_to(&self, p: &SVector<T, D>) -> T {
        self.normal.dot(&(p - self.position))
    }
}

/// Through the origin, normal along the last axis.
impl<T: RealScalar, const D: usize> Default for Plane<T, D> {
    fn default() -> Self {
        Self::new(SVector::<T, D>::zeros(), UnitVec::default())
    }
}

/// Infinite line through `position` along unit `tangent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<T: RealScalar, const D: usize> {
    position: SVector<T, D>,
    tangent: UnitVec<T, D>,
}

impl<T: RealScalar, const D: usize> Line<T, D> {
    pub fn new(position: impl Into<SVector<T, D>>, tangent: UnitVec<T, D>) -> Self {
        Self {
            position: position.into(),
            tangent,
        }
    }

    #[inline]
    pub const fn position(&self) -> &SVector<T, D> {
        &self.position
    }

    #[inline]
    pub const fn tangent(&self) -> &UnitVec<T, D> {
        &self.tangent
    }

    pub fn set_position(&mut self, position: impl Into<SVector<T, D>>) {
        self.position = position.into();
    }

    pub fn set_tangent(&mut self, tangent: UnitVec<T, D>) {
        self.tangent = tangent;
    }
}

impl<T: RealScalar, const D: usize> Default for Line<T, D> {
    fn default() -> Self {
        Self::new(SVector::<T, D>::zeros(), UnitVec::default())
    }
}

/// Orthogonal projection of `Self` onto `Dest`.
pub trait Projection<Dest> {
    type Output;

    fn project_onto(&self, dest: &Dest) -> Self::Output;
}

impl<T: RealScalar, const D: usize> Projection<Plane<T, D>> for SVector<T, D> {
    type Output = SVector<T, D>;

    fn project_onto(&self, plane: &Plane<T, D>) -> SVector<T, D> {
        self - plane.normal.vec() * plane.signed_dist_to(self)
    }
}

impl<T: RealScalar, const D: usize> Projection<Line<T, D>> for SVector<T, D> {
    type Output = SVector<T, D>;

    fn project_onto(&self, line: &Line<T, D>) -> SVector<T, D> {
        let t = line.tangent.vec();
        line.position + t * t.dot(&(self - line.position))
    }
}

/// `None` when the line is perpendicular to the plane and collapses to a point.
impl<T: RealScalar, const D: usize> Projection<Plane<T, D>> for Line<T, D> {
    type Output = Option<Line<T, D>>;

    fn project_onto(&self, plane: &Plane<T, D>) -> Option<Line<T, D>> {
        let n = plane.normal.vec();
        let in_plane = self.tangent.vec() - n * n.dot(self.tangent.vec());
        if are_almost_same(in_plane.norm(), T::zero()) {
            return None;
        }
        let tangent = UnitVec::new(in_plane);
        Some(Line::new(self.position.project_onto(plane), tangent))
    }
}

/// Euclidean distance between `Self` and `Dest`.
pub trait Distance<Dest> {
    type Scalar;

    fn sqr_distance_to(&self, dest: &Dest) -> Self::Scalar;

    fn distance_to(&self, dest: &Dest) -> Self::Scalar;
}

impl<T: RealScalar, const D: usize> Distance<SVector<T, D>> for SVector<T, D> {
    type Scalar = T;

    fn sqr_distance_to(&self, other: &SVector<T, D>) -> T {
        (other - self).norm_squared()
    }

    fn distance_to(&self, other: &SVector<T, D>) -> T {
        (other - self).norm()
    }
}

impl<T: RealScalar, const D: usize> Distance<Plane<T, D>> for SVector<T, D> {
    type Scalar = T;

    fn sqr_distance_to(&self, plane: &Plane<T, D>) -> T {
        let d = plane.signed_dist_to(self);
        d * d
    }

    fn distance_to(&self, plane: &Plane<T, D>) -> T {
        plane.signed_dist_to(self).abs()
    }
}

impl<T: RealScalar, const D: usize> Distance<Line<T, D>> for SVector<T, D> {
    type Scalar = T;

    fn sqr_distance_to(&self, line: &Line<T, D>) -> T {
        (self - self.project_onto(line)).norm_squared()
    }

    fn distance_to(&self, line: &Line<T, D>) -> T {
        (self - self.project_onto(line)).norm()
    }
}

/// Common point of `Self` and `Dest`, if there is exactly one.
pub trait Intersection<Dest> {
    type Output;

    fn intersect(&self, dest: &Dest) -> Option<Self::Output>;
}

/// `None` when the line runs parallel to the plane.
impl<T: RealScalar, const D: usize> Intersection<Plane<T, D>> for Line<T, D> {
    type Output = SVector<T, D>;

    fn intersect(&self, plane: &Plane<T, D>) -> Option<SVector<T, D>> {
        let n = plane.normal.vec();
        let den = n.dot(self.tangent.vec());
        if are_almost_same(den, T::zero()) {
            return None;
        }
        let t = n.dot(&(plane.position - self.position)) / den;
        Some(self.position + self.tangent.vec() * t)
    }
}

pub fn projection<S: Projection<Dest>, Dest>(src: &S, dest: &Dest) -> S::Output {
    src.project_onto(dest)
}

pub fn sqr_distance<S: Distance<Dest>, Dest>(src: &S, dest: &Dest) -> S::Scalar {
    src.sqr_distance_to(dest)
}

pub fn distance<S: Distance<Dest>, Dest>(src: &S, dest: &Dest) -> S::Scalar {
    src.distance_to(dest)
}

pub fn intersection<S: Intersection<Dest>, Dest>(src: &S, dest: &Dest) -> Option<S::Output> {
    src.intersect(dest)
}

/// Angular relations between two direction vectors of any length.
///
/// Invalid (sentinel) or zero-length inputs are never parallel, orthogonal or
/// angled; [`Direction::angle`] returns `None` for them.
pub struct Direction;

impl Direction {
    pub fn are_acute_angled<T: RealScalar, const D: usize>(u: &SVector<T, D>, v: &SVector<T, D>) -> bool {
        u.dot(v) > T::zero()
    }

    pub fn are_obtuse_angled<T: RealScalar, const D: usize>(u: &SVector<T, D>, v: &SVector<T, D>) -> bool {
        u.dot(v) < T::zero()
    }

    pub fn are_parallel<T: RealScalar, const D: usize>(u: &SVector<T, D>, v: &SVector<T, D>) -> bool {
        match Self::norm_product(u, v) {
            Some(den) => are_almost_same(u.dot(v).abs(), den),
            None => false,
        }
    }

    pub fn are_orthogonal<T: RealScalar, const D: usize>(u: &SVector<T, D>, v: &SVector<T, D>) -> bool {
        Self::norm_product(u, v).is_some() && are_almost_same(u.dot(v), T::zero())
    }

    /// Unsigned angle in `[0, π]`.
    pub fn angle<T: RealScalar, const D: usize>(u: &SVector<T, D>, v: &SVector<T, D>) -> Option<T> {
        let den = Self::norm_product(u, v)?;
        Some((u.dot(v) / den).clamp(-T::one(), T::one()).acos())
    }

    fn norm_product<T: RealScalar, const D: usize>(u: &SVector<T, D>, v: &SVector<T, D>) -> Option<T> {
        if !matrix::is_valid(u) || !matrix::is_valid(v) {
            return None;
        }
        let den = u.norm() * v.norm();
        (!are_almost_same(den, T::zero())).then_some(den)
    }
}
