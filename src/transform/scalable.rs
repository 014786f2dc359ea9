use super::{AffineInterface, Compose, RigidBodyTransform, householder};
use crate::float_types::RealScalar;
use crate::orthogonal::OrthogonalMat;
use crate::rotation::{Rotation, RotationSpace, Rotator, Space};
use crate::unit_vec::UnitVec;
use nalgebra::{SMatrix, SVector};

/// Similarity map `q ↦ s·R·q + a` with an orthogonal `R` and a uniform scale `s`.
///
/// `R` may be improper (det = −1), which is how reflections of rigid
/// transforms are carried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalableBodyTransform<T: RealScalar, const D: usize> {
    ortho: OrthogonalMat<T, D>,
    translation: SVector<T, D>,
    scalar: T,
}

impl<T: RealScalar, const D: usize> ScalableBodyTransform<T, D> {
    pub fn new(ortho: OrthogonalMat<T, D>, translation: impl Into<SVector<T, D>>, scalar: T) -> Self {
        Self {
            ortho,
            translation: translation.into(),
            scalar,
        }
    }

    pub fn identity() -> Self {
        Self::new(OrthogonalMat::identity(), SVector::<T, D>::zeros(), T::one())
    }

    pub fn from_translation(v: impl Into<SVector<T, D>>) -> Self {
        Self::new(OrthogonalMat::identity(), v, T::one())
    }

    #[inline]
    pub const fn ortho_mat(&self) -> &OrthogonalMat<T, D> {
        &self.ortho
    }

    #[inline]
    pub const fn scalar(&self) -> T {
        self.scalar
    }
}

impl<T: RealScalar, const D: usize> Default for ScalableBodyTransform<T, D> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: RealScalar, const D: usize> AffineInterface<T, D> for ScalableBodyTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    type Scaled = Self;
    type Reflected = Self;

    fn mat(&self) -> SMatrix<T, D, D> {
        self.ortho * self.scalar
    }

    fn vec(&self) -> SVector<T, D> {
        self.translation
    }

    fn inv(&self) -> Self {
        let inv_scalar = T::one() / self.scalar;
        let inv_ortho = self.ortho.transpose();
        let translation = -(inv_ortho.mat() * self.translation) * inv_scalar;
        Self::new(inv_ortho, translation, inv_scalar)
    }

    fn translate(&self, v: impl Into<SVector<T, D>>) -> Self {
        let v: SVector<T, D> = v.into();
        Self::new(self.ortho, self.translation + v, self.scalar)
    }

    fn rotate<R: Into<Rotation<T, D>>>(&self, r: R) -> Self {
        self.compose(&RigidBodyTransform::from_rotation(r.into()))
    }

    fn reflect_normal(&self, n: &UnitVec<T, D>) -> Self {
        let mirror = Self::new(
            OrthogonalMat::new_unchecked(householder(n)),
            SVector::<T, D>::zeros(),
            T::one(),
        );
        self.compose(&mirror)
    }

    /// Scales the translation and the scale factor; the orientation is kept.
    fn scale(&self, s: T) -> Self {
        Self::new(self.ortho, self.translation * s, self.scalar * s)
    }
}

impl<T: RealScalar, const D: usize> Compose<ScalableBodyTransform<T, D>> for ScalableBodyTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    type Output = Self;

    /// Scale factors multiply.
    fn compose(&self, next: &Self) -> Self {
        Self::new(
            next.ortho * self.ortho,
            next.mat() * self.translation + next.translation,
            self.scalar * next.scalar,
        )
    }
}

impl<T: RealScalar, const D: usize> Compose<RigidBodyTransform<T, D>> for ScalableBodyTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    type Output = Self;

    fn compose(&self, next: &RigidBodyTransform<T, D>) -> Self {
        Self::new(
            next.rotator().ortho_mat() * self.ortho,
            next.transfer_point(&self.translation),
            self.scalar,
        )
    }
}

impl<T: RealScalar, const D: usize> Compose<ScalableBodyTransform<T, D>> for RigidBodyTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    type Output = ScalableBodyTransform<T, D>;

    fn compose(&self, next: &ScalableBodyTransform<T, D>) -> ScalableBodyTransform<T, D> {
        ScalableBodyTransform::from(*self).compose(next)
    }
}

/// Scale one.
impl<T: RealScalar, const D: usize> From<RigidBodyTransform<T, D>> for ScalableBodyTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    fn from(r: RigidBodyTransform<T, D>) -> Self {
        Self::new(r.rotator().ortho_mat(), r.vec(), T::one())
    }
}
