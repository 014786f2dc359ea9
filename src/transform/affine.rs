use super::{AffineInterface, Compose, RigidBodyTransform, ScalableBodyTransform, householder};
use crate::errors::LinalgError;
use crate::float_types::RealScalar;
use crate::matrix;
use crate::rotation::{Rotation, RotationSpace, Space};
use crate::unit_vec::UnitVec;
use nalgebra::{SMatrix, SVector};

/// General affine map `q ↦ A·q + a`.
///
/// Nothing is assumed about `A`: it may shear, scale anisotropically or be singular.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform<T: RealScalar, const D: usize> {
    linear: SMatrix<T, D, D>,
    translation: SVector<T, D>,
}

impl<T: RealScalar, const D: usize> AffineTransform<T, D> {
    pub fn new(linear: SMatrix<T, D, D>, translation: impl Into<SVector<T, D>>) -> Self {
        Self {
            linear,
            translation: translation.into(),
        }
    }

    pub fn identity() -> Self {
        Self::new(SMatrix::identity(), SVector::<T, D>::zeros())
    }

    pub fn from_translation(v: impl Into<SVector<T, D>>) -> Self {
        Self::new(SMatrix::identity(), v)
    }

    /// Both parts set to the invalid sentinel.
    pub fn invalid() -> Self {
        Self::new(matrix::invalid(), matrix::invalid::<T, D, 1>())
    }

    pub fn is_valid(&self) -> bool {
        matrix::is_valid(&self.linear) && matrix::is_valid(&self.translation)
    }

    /// Inverse map, or [`LinalgError::Singular`] when `A` has no inverse.
    pub fn try_inv(&self) -> Result<Self, LinalgError> {
        let inv_linear = self.linear.try_inverse().ok_or(LinalgError::Singular)?;
        let translation = -(inv_linear * self.translation);
        Ok(Self::new(inv_linear, translation))
    }

    /// Pre-multiplies the linear part by `s`; the translation is untouched.
    pub fn scale_mat(&self, s: &SMatrix<T, D, D>) -> Self {
        Self::new(s * self.linear, self.translation)
    }
}

impl<T: RealScalar, const D: usize> Default for AffineTransform<T, D> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: RealScalar, const D: usize> AffineInterface<T, D> for AffineTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    type Scaled = Self;
    type Reflected = Self;

    fn mat(&self) -> SMatrix<T, D, D> {
        self.linear
    }

    fn vec(&self) -> SVector<T, D> {
        self.translation
    }

    /// A singular linear part yields [`AffineTransform::invalid`];
    /// use [`AffineTransform::try_inv`] to tell the cases apart.
    fn inv(&self) -> Self {
        self.try_inv().unwrap_or_else(|err| {
            log::debug!("{err}, returning the invalid transform");
            Self::invalid()
        })
    }

    fn translate(&self, v: impl Into<SVector<T, D>>) -> Self {
        let v: SVector<T, D> = v.into();
        Self::new(self.linear, self.translation + v)
    }

    fn rotate<R: Into<Rotation<T, D>>>(&self, r: R) -> Self {
        self.compose(&RigidBodyTransform::from_rotation(r.into()))
    }

    fn reflect_normal(&self, n: &UnitVec<T, D>) -> Self {
        self.compose(&Self::new(householder(n), SVector::<T, D>::zeros()))
    }

    /// Pre-multiplies the linear part by `s`; the translation is untouched.
    fn scale(&self, s: T) -> Self {
        Self::new(self.linear * s, self.translation)
    }
}

/// `(B·A, B·a + b)` for any two transforms, as a general affine map.
fn chain<T, const D: usize, A, B>(first: &A, next: &B) -> AffineTransform<T, D>
where
    T: RealScalar,
    A: AffineInterface<T, D>,
    B: AffineInterface<T, D>,
    Space<D>: RotationSpace<T, D>,
{
    let m = next.mat();
    AffineTransform::new(m * first.mat(), m * first.vec() + next.vec())
}

/// Every pairing with an affine operand on either side widens to affine.
macro_rules! impl_compose_to_affine {
    ($lhs:ident, $rhs:ident) => {
        impl<T: RealScalar, const D: usize> Compose<$rhs<T, D>> for $lhs<T, D>
        where
            Space<D>: RotationSpace<T, D>,
        {
            type Output = AffineTransform<T, D>;

            fn compose(&self, next: &$rhs<T, D>) -> AffineTransform<T, D> {
                chain(self, next)
            }
        }
    };
}

impl_compose_to_affine!(AffineTransform, AffineTransform);
impl_compose_to_affine!(AffineTransform, ScalableBodyTransform);
impl_compose_to_affine!(AffineTransform, RigidBodyTransform);
impl_compose_to_affine!(ScalableBodyTransform, AffineTransform);
impl_compose_to_affine!(RigidBodyTransform, AffineTransform);

impl<T: RealScalar, const D: usize> From<ScalableBodyTransform<T, D>> for AffineTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    fn from(s: ScalableBodyTransform<T, D>) -> Self {
        Self::new(s.mat(), s.vec())
    }
}

impl<T: RealScalar, const D: usize> From<RigidBodyTransform<T, D>> for AffineTransform<T, D>
where
    Space<D>: RotationSpace<T, D>,
{
    fn from(r: RigidBodyTransform<T, D>) -> Self {
        Self::new(r.mat(), r.vec())
    }
}
