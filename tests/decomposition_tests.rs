mod support;

use approx::assert_relative_eq;
use nalgebra::{Complex, DMatrix, DVector, Matrix2, Matrix3, Vector2, Vector3};
use spatialrs::{
    decomposition::{
        EigenDecomposition, GeneralEigen, LeastSquareProblem, SingularValueDecomposition,
        SolvingMode, SvdFactors, SvdFlags, SvdShape, SymmetricEigenDecomposition, Truncation,
    },
    errors::LinalgError,
    matrix::to_dynamic,
};
use support::svd_sample;

// --------------------------------------------------------
//   Eigen
// --------------------------------------------------------

#[test]
fn symmetric_eigen_pairs() {
    support::init_logging();
    let m = Matrix2::<f64>::new(5.0, -2.0, -2.0, 2.0);
    let ed = SymmetricEigenDecomposition::new(&m);
    assert_eq!(ed.size(), 2);
    assert_relative_eq!(ed.eigenval(0).unwrap(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(ed.eigenval(1).unwrap(), 6.0, epsilon = 1e-12);

    let v0 = ed.eigenvec(0).unwrap();
    let v1 = ed.eigenvec(1).unwrap();
    let e0 = Vector2::new(1.0, 2.0).normalize();
    let e1 = Vector2::new(-2.0, 1.0).normalize();
    assert_relative_eq!(v0.dot(&DVector::from_column_slice(e0.as_slice())).abs(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(v1.dot(&DVector::from_column_slice(e1.as_slice())).abs(), 1.0, epsilon = 1e-12);
}

#[test]
fn general_eigen_pairs() {
    let m = Matrix2::<f64>::new(5.0, -2.0, -2.0, 2.0);
    let ed = GeneralEigen::new(&m);
    let mut values: Vec<f64> = ed.eigenvals().iter().map(|c| c.re).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_relative_eq!(values[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(values[1], 6.0, epsilon = 1e-10);
    assert!(ed.eigenvals().iter().all(|c| c.im.abs() < 1e-10));

    let mc = m.map(|x| Complex::new(x, 0.0));
    for i in 0..ed.size() {
        let lambda = ed.eigenval(i).unwrap();
        let v = ed.eigenvec(i).unwrap();
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-10);
        let residual = to_dynamic(&mc) * &v - &v * lambda;
        assert!(residual.norm() < 1e-9);
    }
}

#[test]
fn general_eigen_of_rotation_is_complex() {
    let m = Matrix2::<f64>::new(0.0, -1.0, 1.0, 0.0);
    let ed = EigenDecomposition::<f64>::new(&m);
    for i in 0..2 {
        let lambda = ed.eigenval(i).unwrap();
        assert_relative_eq!(lambda.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(lambda.im.abs(), 1.0, epsilon = 1e-12);
    }
    let v0 = ed.eigenvec(0).unwrap();
    let v1 = ed.eigenvec(1).unwrap();
    assert!(v0.dotc(&v1).norm() < 1e-9);
    assert_relative_eq!(v0.dotc(&v0).re, 1.0, epsilon = 1e-10);
}

#[test]
fn general_eigen_repeated_values_span_eigenspace() {
    let diagonal = Matrix3::<f64>::from_diagonal(&Vector3::new(2.0, 2.0, 5.0));
    for m in [Matrix3::<f64>::identity(), diagonal] {
        let ed = GeneralEigen::new(&m);
        let basis = ed.basemat().unwrap().clone();
        assert_eq!(basis.clone().svd(false, false).rank(1e-9), 3);

        let mc = to_dynamic(&m.map(|x| Complex::new(x, 0.0)));
        for i in 0..3 {
            let v = ed.eigenvec(i).unwrap();
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-10);
            assert!((&mc * &v - &v * ed.eigenval(i).unwrap()).norm() < 1e-9);
        }
    }
}

#[test]
fn reconstruct_from_eigen_basis() {
    let m = Matrix3::<f64>::new(2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0);
    let ed = SymmetricEigenDecomposition::new(&m);
    let v = ed.basemat().unwrap();
    assert_relative_eq!(v * ed.diagmat() * v.transpose(), to_dynamic(&m), epsilon = 1e-10);
    assert_relative_eq!(v.transpose() * v, DMatrix::identity(3, 3), epsilon = 1e-10);
}

#[test]
fn values_only_refuses_vectors() {
    let m = Matrix3::<f64>::new(2.0, 0.0, 0.0, 0.0, 3.0, 4.0, 0.0, 4.0, 9.0);
    let mut ed = SymmetricEigenDecomposition::values_only(&m);
    assert!(!ed.has_eigenvectors());
    assert_eq!(ed.eigenvec(0), Err(LinalgError::EigenvectorsNotComputed));
    assert!(ed.basemat().is_err());
    assert_relative_eq!(ed.eigenval(0).unwrap(), 1.0, epsilon = 1e-10);
    assert_relative_eq!(ed.eigenval(2).unwrap(), 11.0, epsilon = 1e-10);
    assert_eq!(ed.eigenval(3), Err(LinalgError::IndexOutOfRange { index: 3, len: 3 }));

    ed.compute(&m, false);
    assert!(ed.has_eigenvectors());
    assert!(ed.eigenvec(2).is_ok());
}

#[test]
#[should_panic]
fn eigen_needs_square_input() {
    let _ = GeneralEigen::new(&DMatrix::<f64>::zeros(2, 3));
}

// --------------------------------------------------------
//   SVD
// --------------------------------------------------------

#[test]
fn default_flags_keep_everything() {
    let flags = SvdFlags::<f64>::default();
    assert_eq!(flags.shape, SvdShape::Thin);
    assert_eq!(flags.factors, SvdFactors::Both);
    assert_eq!(flags.truncation, Truncation::Keep);
    let svd = SingularValueDecomposition::with_flags(&svd_sample(), flags).unwrap();
    assert_eq!(svd, SingularValueDecomposition::new(&svd_sample()));
}

#[test]
fn singular_values_descend() {
    let flags = SvdFlags::default().factors(SvdFactors::ValuesOnly);
    let svd = SingularValueDecomposition::with_flags(&svd_sample(), flags).unwrap();
    assert_eq!(svd.nof_singularvals(), 3);
    assert!(svd.singularval(0).unwrap() > svd.singularval(1).unwrap());
    assert!(svd.singularval(1).unwrap() > svd.singularval(2).unwrap());
    assert!(svd.umat().is_empty());
    assert!(svd.vmat().is_empty());
    assert_eq!(svd.ucol(0), Err(LinalgError::MissingFactor("U")));
}

#[test]
fn thin_reconstruction() {
    support::init_logging();
    let a = svd_sample();
    let svd = SingularValueDecomposition::new(&a);
    assert_eq!(svd.umat().shape(), (9, 3));
    assert_eq!(svd.diagmat().shape(), (3, 3));
    assert_eq!(svd.vmat().shape(), (3, 3));
    assert_relative_eq!(svd.umat() * svd.diagmat() * svd.vmat().transpose(), a, epsilon = 1e-10);
}

#[test]
fn full_reconstruction() {
    let a = svd_sample();
    let flags = SvdFlags::default().shape(SvdShape::Full);
    let svd = SingularValueDecomposition::with_flags(&a, flags).unwrap();
    assert_eq!(svd.umat().shape(), (9, 9));
    assert_eq!(svd.diagmat().shape(), (9, 3));
    assert_eq!(svd.vmat().shape(), (3, 3));
    assert_relative_eq!(svd.umat() * svd.diagmat() * svd.vmat().transpose(), a, epsilon = 1e-10);
    assert_relative_eq!(svd.umat().transpose() * svd.umat(), DMatrix::identity(9, 9), epsilon = 1e-10);
}

#[test]
fn truncation_policies() {
    let a = svd_sample();
    let absolute = SvdFlags::default().truncation(Truncation::Absolute(1.0));
    let svd = SingularValueDecomposition::with_flags(&a, absolute).unwrap();
    assert_eq!(svd.nof_singularvals(), 2);
    assert_eq!(svd.umat().ncols(), 2);
    assert_eq!(svd.vmat().ncols(), 2);
    assert!(svd.vcol(2).is_err());

    let relative = SvdFlags::default().truncation(Truncation::Relative(0.03));
    let svd = SingularValueDecomposition::with_flags(&a, relative).unwrap();
    assert_eq!(svd.nof_singularvals(), 2);

    let keep_all = SvdFlags::default().truncation(Truncation::Relative(0.0));
    let svd = SingularValueDecomposition::with_flags(&a, keep_all).unwrap();
    assert_eq!(svd.nof_singularvals(), 3);

    let bad = SvdFlags::default().truncation(Truncation::Relative(-0.5));
    assert_eq!(
        SingularValueDecomposition::with_flags(&a, bad),
        Err(LinalgError::InvalidCutoffRatio(-0.5))
    );
}

#[test]
fn one_sided_factors() {
    let a = svd_sample();
    let mut svd = SingularValueDecomposition::with_flags(
        &a,
        SvdFlags::default().factors(SvdFactors::UOnly),
    )
    .unwrap();
    assert_eq!(svd.umat().shape(), (9, 3));
    assert!(svd.vmat().is_empty());
    assert_eq!(svd.vcol(0), Err(LinalgError::MissingFactor("V")));

    svd.compute(&a, SvdFlags::default().factors(SvdFactors::VOnly)).unwrap();
    assert!(svd.umat().is_empty());
    assert_eq!(svd.vmat().shape(), (3, 3));
    assert_relative_eq!(svd.vcol(0).unwrap().norm(), 1.0, epsilon = 1e-12);
}

// --------------------------------------------------------
//   Least squares
// --------------------------------------------------------

#[test]
fn least_squares_strategies_agree() {
    support::init_logging();
    let a = DMatrix::from_row_slice(2, 3, &[-1.0, -0.737, 0.511, -0.0827, 0.0655, -0.562]);
    let b = DVector::from_column_slice(&[-0.906, 0.358, 0.359]);
    let at = a.transpose();

    let closed_form = (&a * &at).try_inverse().unwrap() * &a * &b;
    for mode in [SolvingMode::Qr, SolvingMode::Svd, SolvingMode::Cholesky] {
        let x = LeastSquareProblem::solution(&at, &b, mode).unwrap();
        assert_relative_eq!(x, closed_form, epsilon = 1e-10);
    }
    assert_eq!(SolvingMode::default(), SolvingMode::Qr);
}

#[test]
fn least_squares_rejects_bad_rhs() {
    let a = DMatrix::<f64>::identity(3, 2);
    let two_columns = DMatrix::<f64>::zeros(3, 2);
    assert_eq!(
        LeastSquareProblem::solution(&a, &two_columns, SolvingMode::Svd),
        Err(LinalgError::DimensionMismatch { expected: 1, found: 2 })
    );
}

#[test]
fn rank_deficient_qr_gives_a_solution() {
    let a = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
    let b = DVector::from_column_slice(&[1.0, 2.0, 3.0]);
    let x = LeastSquareProblem::solution(&a, &b, SolvingMode::Qr).unwrap();
    assert_relative_eq!(&a * x, b, epsilon = 1e-10);
}
