mod support;

use approx::assert_relative_eq;
use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};
use spatialrs::{
    euclid::Plane,
    errors::LinalgError,
    orthogonal::OrthogonalMat,
    rotation::{Rotation2, Rotation3, Rotator},
    transform::{
        AffineInterface, AffineTransform, Compose, RigidBodyTransform, ScalableBodyTransform,
    },
    unit_vec::UnitVec,
};
use std::f64::consts::{FRAC_PI_2, PI};

type Rigid2 = RigidBodyTransform<f64, 2>;
type Rigid3 = RigidBodyTransform<f64, 3>;
type Scalable2 = ScalableBodyTransform<f64, 2>;
type Scalable3 = ScalableBodyTransform<f64, 3>;
type Affine2 = AffineTransform<f64, 2>;
type Affine3 = AffineTransform<f64, 3>;

fn quarter_turn() -> Matrix2<f64> {
    Matrix2::new(0.0, -1.0, 1.0, 0.0)
}

// --------------------------------------------------------
//   Worked chains
// --------------------------------------------------------

#[test]
fn rigid_chain_rotate_translate_scale_translate() {
    let t = Rigid2::identity()
        .rotate(FRAC_PI_2)
        .translate([1.0, 0.0])
        .scale(2.0)
        .translate([0.0, -1.0]);
    assert_relative_eq!(t.transfer_point(&Vector2::new(1.0, 0.0)), Vector2::new(2.0, 1.0), epsilon = 1e-12);
    assert_relative_eq!(Vector2::new(1.0, 0.0) >> t, Vector2::new(2.0, 1.0), epsilon = 1e-12);
}

#[test]
fn scalable_chain() {
    let first = Scalable2::new(OrthogonalMat::new(quarter_turn()), [1.0, 0.0], 1.0);
    let second = Scalable2::new(OrthogonalMat::identity(), [0.0, -1.0], 2.0);
    let p = Vector2::new(1.0, 0.0) >> first >> second;
    assert_relative_eq!(p, Vector2::new(2.0, 1.0), epsilon = 1e-12);
    let both: Scalable2 = first >> second;
    assert_relative_eq!(both.transfer_point(&Vector2::new(1.0, 0.0)), Vector2::new(2.0, 1.0), epsilon = 1e-12);
}

#[test]
fn affine_chain() {
    let first = Affine2::new(quarter_turn(), [1.0, 0.0]);
    let second = Affine2::new(Matrix2::identity() * 2.0, [0.0, -1.0]);
    let both = first >> second;
    assert_relative_eq!(both.transfer_point(&Vector2::new(1.0, 0.0)), Vector2::new(2.0, 1.0), epsilon = 1e-12);
    assert_relative_eq!(both.mat(), second.mat() * first.mat());
    assert_relative_eq!(both.vec(), second.mat() * first.vec() + second.vec());
}

#[test]
fn rigid_transfer_in_space() {
    let v = Vector3::new(1.0, 0.0, 0.0)
        >> Rigid3::identity()
            .translate([0.0, 2.0, 0.0])
            .rotate((UnitVec::new([1.0, 1.0, 1.0]), 2.0 * PI / 3.0))
        >> Rigid3::identity().translate([2.0, 0.0, 0.0]).inv();
    assert_relative_eq!(v, Vector3::new(-2.0, 1.0, 2.0), epsilon = 1e-12);
}

#[test]
fn in_place_broadcast_over_points() {
    let r = Rigid3::identity().rotate((UnitVec::new([1.0, 1.0, 1.0]), 2.0 * PI / 3.0));
    let mut points = vec![
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 2.0, 0.0),
        Vector3::new(0.0, 0.0, 3.0),
    ];
    points >>= r;
    assert_eq!(points.len(), 3);
    assert_relative_eq!(points[0], Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(points[1], Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
    assert_relative_eq!(points[2], Vector3::new(3.0, 0.0, 0.0), epsilon = 1e-12);

    let mut single = Vector3::new(0.0, 0.0, 3.0);
    single >>= r;
    assert_relative_eq!(single, points[2], epsilon = 1e-12);

    let slice: &mut [Vector3<f64>] = &mut points;
    *slice >>= r.inv();
    assert_relative_eq!(slice[1], Vector3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
}

// --------------------------------------------------------
//   Promotion lattice
// --------------------------------------------------------

#[test]
fn result_types_follow_promotion() {
    let rigid = Rigid2::identity().translate([1.0, 2.0]);
    let scalable = Scalable2::identity().scale(3.0);
    let affine = Affine2::new(Matrix2::new(1.0, 2.0, 0.0, 1.0), [0.0, 1.0]);

    let _: Rigid2 = rigid >> rigid;
    let _: Scalable2 = rigid >> scalable;
    let _: Scalable2 = scalable >> rigid;
    let _: Scalable2 = scalable >> scalable;
    let _: Affine2 = rigid >> affine;
    let _: Affine2 = affine >> rigid;
    let _: Affine2 = scalable >> affine;
    let _: Affine2 = affine >> scalable;
    let _: Affine2 = affine >> affine;
    let _: Rigid2 = rigid >> Rotation2::new(0.5);
    let _: Scalable2 = scalable >> Rotation2::new(0.5);
    let _: Affine2 = affine >> Rotation2::new(0.5);
}

#[test]
fn mixed_composition_matches_affine_formula() {
    let rigid = Rigid3::new(Rotation3::from_euler_angles(0.2, 0.4, -0.3), [1.0, 0.0, -1.0]);
    let scalable = Scalable3::new(OrthogonalMat::new(support::rot_x(1.1)), [0.0, 2.0, 0.0], 0.5);
    let affine = Affine3::new(Matrix3::new(1.0, 0.5, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0), [3.0, 0.0, 0.0]);
    let p = Vector3::new(0.3, -1.0, 2.0);

    let rs = rigid.compose(&scalable);
    assert_relative_eq!(rs.transfer_point(&p), scalable.transfer_point(&rigid.transfer_point(&p)), epsilon = 1e-12);
    assert_relative_eq!(rs.scalar(), 0.5);

    let sr = scalable.compose(&rigid);
    assert_relative_eq!(sr.transfer_point(&p), rigid.transfer_point(&scalable.transfer_point(&p)), epsilon = 1e-12);

    let full = rigid >> scalable >> affine;
    assert_relative_eq!(full.transfer_point(&p), p >> rigid >> scalable >> affine, epsilon = 1e-12);
}

#[test]
fn composing_with_rotation_is_composing_with_rigid() {
    let t = Scalable3::new(OrthogonalMat::identity(), [1.0, 2.0, 3.0], 2.0);
    let r = Rotation3::from_euler_angles(0.1, 0.2, 0.3);
    assert_relative_eq!(t >> r, t >> Rigid3::from_rotation(r), epsilon = 1e-12);
}

#[test]
fn compose_assign_keeps_type() {
    let mut t = Rigid2::identity();
    t >>= Rigid2::from_translation([1.0, 0.0]);
    t >>= Rotation2::new(FRAC_PI_2);
    assert_relative_eq!(t.vec(), Vector2::new(0.0, 1.0), epsilon = 1e-12);

    let mut s = Scalable2::identity();
    s >>= Scalable2::identity().scale(2.0);
    s >>= Rigid2::from_translation([0.0, 1.0]);
    assert_relative_eq!(s.scalar(), 2.0);
    assert_relative_eq!(s.vec(), Vector2::new(0.0, 1.0));
}

#[test]
fn widening_conversions() {
    let rigid = Rigid2::new(0.7, [1.0, -1.0]);
    let scalable: Scalable2 = rigid.into();
    let affine: Affine2 = rigid.into();
    let p = Vector2::new(0.25, 4.0);
    assert_relative_eq!(scalable.transfer_point(&p), rigid.transfer_point(&p), epsilon = 1e-12);
    assert_relative_eq!(affine.transfer_point(&p), rigid.transfer_point(&p), epsilon = 1e-12);
    assert_relative_eq!(AffineTransform::from(scalable), affine, epsilon = 1e-12);
    assert_eq!(scalable.scalar(), 1.0);
}

// --------------------------------------------------------
//   Inverses
// --------------------------------------------------------

#[test]
fn rigid_inverse_is_identity_after_compose() {
    for (a, b, g) in [(0.1, 0.2, 0.3), (3.0, -1.0, 0.2), (0.0, PI / 2.0, 0.0)] {
        let r = Rigid3::new((a, b, g), [1.5, -2.0, 0.25]);
        let id = r >> r.inv();
        assert_relative_eq!(id.vec(), Vector3::zeros(), epsilon = 1e-12);
        assert_relative_eq!(id.mat(), Matrix3::identity(), epsilon = 1e-12);
    }
}

#[test]
fn scalable_double_inverse() {
    for s in [0.5, 2.0, -3.0, 1e3] {
        let t = Scalable3::new(OrthogonalMat::new(support::rot_z(0.9)), [1.0, 2.0, -3.0], s);
        assert_relative_eq!(t.inv().inv(), t, epsilon = 1e-9);
        assert_relative_eq!(t.inv().inv().scalar(), s, epsilon = 1e-9);
    }
}

#[test]
fn affine_inverse() {
    let t = Affine2::new(Matrix2::new(2.0, 1.0, 0.0, 1.0), [1.0, 1.0]);
    let p = Vector2::new(-1.0, 0.5);
    assert_relative_eq!(p >> t >> t.inv(), p, epsilon = 1e-12);
    assert_relative_eq!(t.try_inv().unwrap(), t.inv());

    let singular = Affine2::new(Matrix2::new(1.0, 2.0, 2.0, 4.0), [0.0, 0.0]);
    assert_eq!(singular.try_inv(), Err(LinalgError::Singular));
    assert!(!singular.inv().is_valid());
}

// --------------------------------------------------------
//   Reflection
// --------------------------------------------------------

#[test]
fn reflect_through_normal_and_plane() {
    let n = UnitVec::new([1.0, 1.0, 1.0]);
    let p = Vector3::new(1.0, 1.0, 1.0);

    let through_origin = Affine3::identity().reflect(&n);
    assert_relative_eq!(through_origin.transfer_point(&p), -p, epsilon = 1e-12);

    let plane = Plane::new([0.5, 0.5, 0.5], n);
    let shifted = Affine3::identity().reflect(&plane);
    assert_relative_eq!(shifted.transfer_point(&p), Vector3::zeros(), epsilon = 1e-12);

    let rigid = Rigid3::identity().reflect(&plane);
    assert_relative_eq!(rigid.transfer_point(&p), Vector3::zeros(), epsilon = 1e-12);
}

#[test]
fn rigid_reflection_is_an_involution() {
    let n = UnitVec::new([0.0, 3.0, 4.0]);
    let r = Rigid3::new((0.3, 0.1, -0.5), [1.0, 2.0, 3.0]);
    let once: Scalable3 = r.reflect(&n);
    assert_relative_eq!(once.scalar(), 1.0);
    assert_relative_eq!(once.ortho_mat().determinant(), -1.0, epsilon = 1e-12);
    let twice = once.reflect(&n);
    assert_relative_eq!(twice, Scalable3::from(r), epsilon = 1e-12);
}

#[test]
fn directions_ignore_translation() {
    let t = Rigid2::new(FRAC_PI_2, [10.0, -10.0]);
    let u = UnitVec::new([1.0, 0.0]) >> t;
    assert_relative_eq!(*u.vec(), Vector2::new(0.0, 1.0), epsilon = 1e-12);

    let a = Affine2::new(Matrix2::new(3.0, 0.0, 0.0, 1.0), [5.0, 5.0]);
    let d = a.transfer(&UnitVec::new([1.0, 1.0]));
    assert_relative_eq!(d.vec().norm(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(d[0] / d[1], 3.0, epsilon = 1e-12);
}

// --------------------------------------------------------
//   Pivots and scaling
// --------------------------------------------------------

#[test]
fn rotate_and_scale_about_pivot() {
    let pivot = Vector2::new(1.0, 1.0);
    let r = Rigid2::identity().rotate_at(&pivot, FRAC_PI_2);
    assert_relative_eq!(r.transfer_point(&pivot), pivot, epsilon = 1e-12);
    assert_relative_eq!(r.transfer_point(&Vector2::new(2.0, 1.0)), Vector2::new(1.0, 2.0), epsilon = 1e-12);

    let s = Rigid2::identity().scale_at(&pivot, 3.0);
    assert_relative_eq!(s.transfer_point(&pivot), pivot, epsilon = 1e-12);
    assert_relative_eq!(s.transfer_point(&Vector2::new(2.0, 1.0)), Vector2::new(4.0, 1.0), epsilon = 1e-12);
}

#[test]
fn affine_scaling_keeps_translation() {
    let t = Affine2::from_translation([1.0, 2.0]).scale(2.0);
    assert_relative_eq!(t.vec(), Vector2::new(1.0, 2.0));
    let m = t.scale_mat(&Matrix2::new(1.0, 0.0, 0.0, 3.0));
    assert_relative_eq!(m.mat(), Matrix2::new(2.0, 0.0, 0.0, 6.0));
}

#[test]
fn rotation_accessors() {
    let r = Rigid3::new(Rotation3::from_spin_vec(&Vector3::new(0.0, 0.0, 0.4)), [0.0; 3]);
    assert_relative_eq!(r.rotator().spin_vec(), Vector3::new(0.0, 0.0, 0.4), epsilon = 1e-12);
    assert_relative_eq!(r.ortho_mat().into_inner(), support::rot_z(0.4), epsilon = 1e-12);
    assert_relative_eq!(r.rotator().ortho_mat(), r.ortho_mat());
}
