//! Rotations in the plane and in space.
//!
//! The representation depends on the dimension: a single angle in 2D, a unit
//! quaternion in 3D. [`Rotation<T, D>`] picks the right one at compile time, so
//! generic transform code can be written once over `D` while a rotation in an
//! unsupported dimension simply does not exist as a type.

use crate::float_types::RealScalar;
use crate::orthogonal::OrthogonalMat;
use crate::unit_vec::UnitVec;
use nalgebra::SVector;
use std::fmt::Debug;

mod planar;
mod spatial;

pub use planar::Rotation2;
pub use spatial::Rotation3;

/// Dimension marker used to select per-dimension representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Space<const D: usize>;

/// Maps a dimension to its rotation type.
pub trait RotationSpace<T: RealScalar, const D: usize> {
    type Rotation: Rotator<T, D>;
}

impl<T: RealScalar> RotationSpace<T, 2> for Space<2> {
    type Rotation = Rotation2<T>;
}

impl<T: RealScalar> RotationSpace<T, 3> for Space<3> {
    type Rotation = Rotation3<T>;
}

/// The rotation type of dimension `D`: [`Rotation2`] or [`Rotation3`].
pub type Rotation<T, const D: usize> = <Space<D> as RotationSpace<T, D>>::Rotation;

/// Operations every rotation representation offers.
pub trait Rotator<T: RealScalar, const D: usize>:
    Copy + Clone + Debug + PartialEq + Default
{
    /// Builds the rotation from an orthogonal matrix.
    ///
    /// The matrix is assumed to be proper (det = +1).
    fn from_ortho_mat(m: &OrthogonalMat<T, D>) -> Self;

    /// Equivalent orthogonal matrix.
    fn ortho_mat(&self) -> OrthogonalMat<T, D>;

    fn inv(&self) -> Self;

    /// Rotates a vector.
    fn apply(&self, v: &SVector<T, D>) -> SVector<T, D>;

    /// Rotates a direction; the result keeps unit length.
    fn apply_unit(&self, u: &UnitVec<T, D>) -> UnitVec<T, D> {
        UnitVec::new_unchecked(self.apply(u.vec()))
    }

    /// `self` followed by `next`.
    fn then(&self, next: &Self) -> Self;

    /// Composes a further rotation, given in any form convertible to `Self`,
    /// applied after `self`.
    fn rotate<R: Into<Self>>(&self, r: R) -> Self {
        self.then(&r.into())
    }

    /// Replaces the rotation with the one described by `m`.
    fn set_ortho_mat(&mut self, m: &OrthogonalMat<T, D>) {
        *self = Self::from_ortho_mat(m);
    }
}
