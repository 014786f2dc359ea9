use super::{AffineInterface, Compose, ScalableBodyTransform};
use crate::float_types::RealScalar;
use crate::orthogonal::OrthogonalMat;
use crate::rotation::{Rotation, RotationSpace, Rotator, Space};
use crate::unit_vec::UnitVec;
use nalgebra::{SMatrix, SVector};

/// Isometry `q ↦ R(q) + a` with a proper rotation `R`.
///
/// The rotation is kept in its native form ([`Rotation<T, D>`]: an angle in 2D,
/// a unit quaternion in 3D), so long composition chains do not drift away from
/// orthogonality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBodyTransform<T: RealScalar, const D: usize>
where
    Space<D>: RotationSpace<T, D>,
{
    rotation: Rotation<T, D>,
    translation: SVector<T, D>,
}

impl<T: RealScalar, const D: usize> RigidBodyTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    pub fn new(rotation: impl Into<Rotation<T, D>>, translation: impl Into<SVector<T, D>>) -> Self {
        Self {
            rotation: rotation.into(),
            translation: translation.into(),
        }
    }

    pub fn identity() -> Self {
        Self::from_rotation(Default::default())
    }

    pub fn from_rotation(rotation: Rotation<T, D>) -> Self {
        Self {
            rotation,
            translation: SVector::zeros(),
        }
    }

    pub fn from_translation(v: impl Into<SVector<T, D>>) -> Self {
        Self {
            rotation: Default::default(),
            translation: v.into(),
        }
    }

    #[inline]
    pub const fn rotator(&self) -> &Rotation<T, D> {
        &self.rotation
    }

    pub fn ortho_mat(&self) -> OrthogonalMat<T, D> {
        self.rotation.ortho_mat()
    }
}

impl<T: RealScalar, const D: usize> Default for RigidBodyTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: RealScalar, const D: usize> AffineInterface<T, D> for RigidBodyTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    type Scaled = ScalableBodyTransform<T, D>;
    /// A reflection is not a proper rotation. It is carried by the orthogonal
    /// part of a scalable transform with scale one.
    type Reflected = ScalableBodyTransform<T, D>;

    fn mat(&self) -> SMatrix<T, D, D> {
        self.rotation.ortho_mat().into_inner()
    }

    fn vec(&self) -> SVector<T, D> {
        self.translation
    }

    fn transfer_point(&self, q: &SVector<T, D>) -> SVector<T, D> {
        self.rotation.apply(q) + self.translation
    }

    fn transfer_dir(&self, u: &UnitVec<T, D>) -> UnitVec<T, D> {
        self.rotation.apply_unit(u)
    }

    fn inv(&self) -> Self {
        let inv_rotation = self.rotation.inv();
        Self {
            rotation: inv_rotation,
            translation: -inv_rotation.apply(&self.translation),
        }
    }

    fn translate(&self, v: impl Into<SVector<T, D>>) -> Self {
        let v: SVector<T, D> = v.into();
        Self {
            rotation: self.rotation,
            translation: self.translation + v,
        }
    }

    fn rotate<R: Into<Rotation<T, D>>>(&self, r: R) -> Self {
        self.compose(&Self::from_rotation(r.into()))
    }

    fn reflect_normal(&self, n: &UnitVec<T, D>) -> ScalableBodyTransform<T, D> {
        ScalableBodyTransform::from(*self).reflect_normal(n)
    }

    fn scale(&self, s: T) -> ScalableBodyTransform<T, D> {
        ScalableBodyTransform::new(self.ortho_mat(), self.translation * s, s)
    }
}

impl<T: RealScalar, const D: usize> Compose<RigidBodyTransform<T, D>> for RigidBodyTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    type Output = Self;

    fn compose(&self, next: &Self) -> Self {
        Self {
            rotation: self.rotation.then(&next.rotation),
            translation: next.transfer_point(&self.translation),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;
    use approx::assert_relative_eq;
    use nalgebra::{Vector2, Vector3};

    #[test]
    fn translate_keeps_rotation() {
        let r = RigidBodyTransform::<f64, 2>::identity().rotate(FRAC_PI_2).translate([1.0, 0.0]);
        assert_relative_eq!(r.transfer_point(&Vector2::new(1.0, 0.0)), Vector2::new(1.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(r.rotator().angle(), FRAC_PI_2);
    }

    #[test]
    fn inverse_composes_to_identity() {
        let r = RigidBodyTransform::<f64, 3>::new((0.3, -0.2, 1.1), [1.0, 2.0, 3.0]);
        let id = r >> r.inv();
        assert_relative_eq!(id, RigidBodyTransform::identity(), epsilon = 1e-12);
        assert_relative_eq!(id.vec(), Vector3::zeros(), epsilon = 1e-12);
    }
}
