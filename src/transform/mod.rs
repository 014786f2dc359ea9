//! Composable spatial transforms.
//!
//! Three representations share one interface, [`AffineInterface`]:
//!
//! | type | stores | models |
//! |------|--------|--------|
//! | [`AffineTransform`] | full matrix + translation | any affine map |
//! | [`ScalableBodyTransform`] | orthogonal matrix + translation + uniform scale | similarity |
//! | [`RigidBodyTransform`] | rotation + translation | isometry |
//!
//! Composition goes through [`Compose`], implemented once per concrete operand
//! pairing. The result type follows a promotion lattice: anything with an affine
//! operand is affine, a scalable operand makes the result scalable, two rigid
//! operands stay rigid. A pairing without an impl does not compile.
//!
//! The `>>` operator reads left to right in application order:
//!
//! ```
//! use spatialrs::transform::{AffineInterface, Rigid2};
//! use spatialrs::float_types::FRAC_PI_2;
//! use nalgebra::Vector2;
//!
//! let p = Vector2::new(1.0, 0.0)
//!     >> Rigid2::identity().rotate(FRAC_PI_2).translate([1.0, 0.0]).scale(2.0).translate([0.0, -1.0]);
//! assert!((p - Vector2::new(2.0, 1.0)).norm() < 1e-9);
//! ```

use crate::euclid::Plane;
use crate::float_types::{Real, RealScalar};
use crate::rotation::{Rotation, RotationSpace, Space};
use crate::unit_vec::UnitVec;
use nalgebra::{SMatrix, SVector};

mod affine;
mod rigid;
mod scalable;

pub use affine::AffineTransform;
pub use rigid::RigidBodyTransform;
pub use scalable::ScalableBodyTransform;

pub type Affine2 = AffineTransform<Real, 2>;
pub type Affine3 = AffineTransform<Real, 3>;
pub type Scalable2 = ScalableBodyTransform<Real, 2>;
pub type Scalable3 = ScalableBodyTransform<Real, 3>;
pub type Rigid2 = RigidBodyTransform<Real, 2>;
pub type Rigid3 = RigidBodyTransform<Real, 3>;

/// "Apply `self`, then apply `next`".
///
/// With `self = (A, a)` and `next = (B, b)` the result is `(B·A, B·a + b)`.
pub trait Compose<Rhs> {
    type Output;

    fn compose(&self, next: &Rhs) -> Self::Output;
}

/// The operations shared by every transform representation.
pub trait AffineInterface<T: RealScalar, const D: usize>: Sized + Clone
where
    Space<D>: RotationSpace<T, D>,
{
    /// Result of [`AffineInterface::scale`].
    type Scaled: AffineInterface<T, D>;
    /// Result of [`AffineInterface::reflect`].
    type Reflected: AffineInterface<T, D>;

    /// Linear part.
    fn mat(&self) -> SMatrix<T, D, D>;

    /// Translation part.
    fn vec(&self) -> SVector<T, D>;

    /// `mat() * q + vec()`.
    fn transfer_point(&self, q: &SVector<T, D>) -> SVector<T, D> {
        self.mat() * q + self.vec()
    }

    /// Directions ignore the translation and stay unit length.
    fn transfer_dir(&self, u: &UnitVec<T, D>) -> UnitVec<T, D> {
        UnitVec::new(self.mat() * u.vec())
    }

    /// Transfers a point or a direction, see [`Transferable`].
    fn transfer<Q: Transferable<T, D>>(&self, q: &Q) -> Q::Output {
        q.transferred_by(self)
    }

    /// Transfers every point in place, keeping their order.
    fn transfer_all<'a, I>(&self, points: I)
    where
        I: IntoIterator<Item = &'a mut SVector<T, D>>,
        T: 'a,
    {
        for p in points {
            *p = self.transfer_point(p);
        }
    }

    fn inv(&self) -> Self;

    /// Adds `v` to the translation; the linear part is untouched.
    fn translate(&self, v: impl Into<SVector<T, D>>) -> Self;

    /// Composes a pure rotation after `self`.
    fn rotate<R: Into<Rotation<T, D>>>(&self, r: R) -> Self;

    /// Composes the reflection `I - 2nnᵀ` through the hyperplane with normal `n`
    /// passing through the origin.
    fn reflect_normal(&self, n: &UnitVec<T, D>) -> Self::Reflected;

    /// Uniform scaling about the origin.
    fn scale(&self, s: T) -> Self::Scaled;

    /// Reflects through a [`Plane`] or through the origin-centered hyperplane
    /// of a normal [`UnitVec`].
    fn reflect<M: Mirror<T, D>>(&self, m: &M) -> Self::Reflected {
        m.mirror(self)
    }

    /// Rotation about `origin` instead of the coordinate origin.
    fn rotate_at<R: Into<Rotation<T, D>>>(&self, origin: &SVector<T, D>, r: R) -> Self {
        self.translate(-origin).rotate(r).translate(*origin)
    }

    /// Scaling about `origin` instead of the coordinate origin.
    fn scale_at(&self, origin: &SVector<T, D>, s: T) -> Self::Scaled {
        self.translate(-origin).scale(s).translate(*origin)
    }
}

/// Something a transform can reflect through.
pub trait Mirror<T: RealScalar, const D: usize> {
    fn mirror<A>(&self, a: &A) -> A::Reflected
    where
        A: AffineInterface<T, D>,
        Space<D>: RotationSpace<T, D>;
}

impl<T: RealScalar, const D: usize> Mirror<T, D> for UnitVec<T, D> {
    fn mirror<A>(&self, a: &A) -> A::Reflected
    where
        A: AffineInterface<T, D>,
        Space<D>: RotationSpace<T, D>,
    {
        a.reflect_normal(self)
    }
}

impl<T: RealScalar, const D: usize> Mirror<T, D> for Plane<T, D> {
    fn mirror<A>(&self, a: &A) -> A::Reflected
    where
        A: AffineInterface<T, D>,
        Space<D>: RotationSpace<T, D>,
    {
        let p = *self.position();
        a.translate(-p).reflect_normal(self.normal()).translate(p)
    }
}

/// Something a transform can be applied to.
///
/// Points get the full affine map, directions only the linear part.
pub trait Transferable<T: RealScalar, const D: usize> {
    type Output;

    fn transferred_by<A>(&self, a: &A) -> Self::Output
    where
        A: AffineInterface<T, D>,
        Space<D>: RotationSpace<T, D>;
}

impl<T: RealScalar, const D: usize> Transferable<T, D> for SVector<T, D> {
    type Output = SVector<T, D>;

    fn transferred_by<A>(&self, a: &A) -> SVector<T, D>
    where
        A: AffineInterface<T, D>,
        Space<D>: RotationSpace<T, D>,
    {
        a.transfer_point(self)
    }
}

impl<T: RealScalar, const D: usize> Transferable<T, D> for UnitVec<T, D> {
    type Output = UnitVec<T, D>;

    fn transferred_by<A>(&self, a: &A) -> UnitVec<T, D>
    where
        A: AffineInterface<T, D>,
        Space<D>: RotationSpace<T, D>,
    {
        a.transfer_dir(self)
    }
}

/// `I - 2nnᵀ`
pub(crate) fn householder<T: RealScalar, const D: usize>(n: &UnitVec<T, D>) -> SMatrix<T, D, D> {
    let two = T::one() + T::one();
    SMatrix::identity() - n.dyadic(n.vec()) * two
}

/// Streaming operators shared by the three transform types:
/// `a >> b` composes, `p >> a` transfers, and the `>>=` forms apply in place
/// (element-wise on a collection of points).
macro_rules! impl_streaming_ops {
    ($ty:ident) => {
        impl<T: RealScalar, const D: usize, Q> std::ops::Shr<Q> for $ty<T, D>
        where
            Space<D>: RotationSpace<T, D>,
            $ty<T, D>: Compose<Q>,
        {
            type Output = <$ty<T, D> as Compose<Q>>::Output;

            fn shr(self, next: Q) -> Self::Output {
                self.compose(&next)
            }
        }

        impl<T: RealScalar, const D: usize, Q> std::ops::ShrAssign<Q> for $ty<T, D>
        where
            Space<D>: RotationSpace<T, D>,
            $ty<T, D>: Compose<Q, Output = $ty<T, D>>,
        {
            fn shr_assign(&mut self, next: Q) {
                *self = self.compose(&next);
            }
        }

        impl<T: RealScalar, const D: usize> std::ops::Shr<$ty<T, D>> for SVector<T, D>
        where
            Space<D>: RotationSpace<T, D>,
        {
            type Output = SVector<T, D>;

            fn shr(self, a: $ty<T, D>) -> SVector<T, D> {
                a.transfer_point(&self)
            }
        }

        impl<T: RealScalar, const D: usize> std::ops::Shr<&$ty<T, D>> for SVector<T, D>
        where
            Space<D>: RotationSpace<T, D>,
        {
            type Output = SVector<T, D>;

            fn shr(self, a: &$ty<T, D>) -> SVector<T, D> {
                a.transfer_point(&self)
            }
        }

        impl<T: RealScalar, const D: usize> std::ops::Shr<$ty<T, D>> for UnitVec<T, D>
        where
            Space<D>: RotationSpace<T, D>,
        {
            type Output = UnitVec<T, D>;

            fn shr(self, a: $ty<T, D>) -> UnitVec<T, D> {
                a.transfer_dir(&self)
            }
        }

        impl<T: RealScalar, const D: usize> std::ops::ShrAssign<$ty<T, D>> for SVector<T, D>
        where
            Space<D>: RotationSpace<T, D>,
        {
            fn shr_assign(&mut self, a: $ty<T, D>) {
                *self = a.transfer_point(self);
            }
        }

        impl<T: RealScalar, const D: usize> std::ops::ShrAssign<$ty<T, D>> for UnitVec<T, D>
        where
            Space<D>: RotationSpace<T, D>,
        {
            fn shr_assign(&mut self, a: $ty<T, D>) {
                *self = a.transfer_dir(self);
            }
        }

        impl<T: RealScalar, const D: usize> std::ops::ShrAssign<$ty<T, D>> for [SVector<T, D>]
        where
            Space<D>: RotationSpace<T, D>,
        {
            fn shr_assign(&mut self, a: $ty<T, D>) {
                a.transfer_all(self.iter_mut());
            }
        }

        impl<T: RealScalar, const D: usize> std::ops::ShrAssign<$ty<T, D>> for Vec<SVector<T, D>>
        where
            Space<D>: RotationSpace<T, D>,
        {
            fn shr_assign(&mut self, a: $ty<T, D>) {
                a.transfer_all(self.iter_mut());
            }
        }
    };
}

/// Conversions from a bare rotation and `Compose` impls with a rotation on the right,
/// one set per supported dimension. Composing with a rotation is composing with a
/// rigid transform without translation.
macro_rules! impl_compose_rotation {
    ($rot:ident, $dim:literal) => {
        impl<T: RealScalar> From<crate::rotation::$rot<T>> for RigidBodyTransform<T, $dim> {
            fn from(r: crate::rotation::$rot<T>) -> Self {
                Self::from_rotation(r)
            }
        }

        impl<T: RealScalar> From<crate::rotation::$rot<T>> for ScalableBodyTransform<T, $dim> {
            fn from(r: crate::rotation::$rot<T>) -> Self {
                RigidBodyTransform::from_rotation(r).into()
            }
        }

        impl<T: RealScalar> From<crate::rotation::$rot<T>> for AffineTransform<T, $dim> {
            fn from(r: crate::rotation::$rot<T>) -> Self {
                RigidBodyTransform::from_rotation(r).into()
            }
        }

        impl<T: RealScalar> Compose<crate::rotation::$rot<T>> for AffineTransform<T, $dim> {
            type Output = AffineTransform<T, $dim>;

            fn compose(&self, next: &crate::rotation::$rot<T>) -> Self::Output {
                self.compose(&RigidBodyTransform::from(*next))
            }
        }

        impl<T: RealScalar> Compose<crate::rotation::$rot<T>> for ScalableBodyTransform<T, $dim> {
            type Output = ScalableBodyTransform<T, $dim>;

            fn compose(&self, next: &crate::rotation::$rot<T>) -> Self::Output {
                self.compose(&RigidBodyTransform::from(*next))
            }
        }

        impl<T: RealScalar> Compose<crate::rotation::$rot<T>> for RigidBodyTransform<T, $dim> {
            type Output = RigidBodyTransform<T, $dim>;

            fn compose(&self, next: &crate::rotation::$rot<T>) -> Self::Output {
                self.compose(&RigidBodyTransform::from(*next))
            }
        }
    };
}

impl_streaming_ops!(AffineTransform);
impl_streaming_ops!(ScalableBodyTransform);
impl_streaming_ops!(RigidBodyTransform);

impl_compose_rotation!(Rotation2, 2);
impl_compose_rotation!(Rotation3, 3);

/// Shared tolerance comparison on the `(mat, vec)` pair.
macro_rules! impl_approx_by_parts {
    ($ty:ident) => {
        impl<T: RealScalar, const D: usize> approx::AbsDiffEq for $ty<T, D>
        where
            Space<D>: RotationSpace<T, D>,
        {
            type Epsilon = T;

            fn default_epsilon() -> T {
                T::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
                approx::AbsDiffEq::abs_diff_eq(&self.mat(), &other.mat(), epsilon)
                    && approx::AbsDiffEq::abs_diff_eq(&self.vec(), &other.vec(), epsilon)
            }
        }

        impl<T: RealScalar, const D: usize> approx::RelativeEq for $ty<T, D>
        where
            Space<D>: RotationSpace<T, D>,
        {
            fn default_max_relative() -> T {
                T::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
                approx::RelativeEq::relative_eq(&self.mat(), &other.mat(), epsilon, max_relative)
                    && approx::RelativeEq::relative_eq(
                        &self.vec(),
                        &other.vec(),
                        epsilon,
                        max_relative,
                    )
            }
        }
    };
}

impl_approx_by_parts!(AffineTransform);
impl_approx_by_parts!(ScalableBodyTransform);
impl_approx_by_parts!(RigidBodyTransform);
