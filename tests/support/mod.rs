//! Test support library
//! Provides shared fixtures & helper functions for tests.
#![allow(dead_code)]

use nalgebra::{DMatrix, Matrix3};

/// Routes `log` output through the test harness. Set `RUST_LOG` to see it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

/// `Rz(γ)·Ry(β)·Rx(α)` written out element by element.
pub fn euler_reference(alpha: f64, beta: f64, gamma: f64) -> Matrix3<f64> {
    let (sa, ca) = alpha.sin_cos();
    let (sb, cb) = beta.sin_cos();
    let (sg, cg) = gamma.sin_cos();
    Matrix3::new(
        cg * cb, -sg * ca + cg * sb * sa, sg * sa + cg * sb * ca,
        sg * cb, cg * ca + sg * sb * sa, -cg * sa + sg * sb * ca,
        -sb, cb * sa, cb * ca,
    )
}

pub fn rot_x(a: f64) -> Matrix3<f64> {
    let (s, c) = a.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c)
}

pub fn rot_y(a: f64) -> Matrix3<f64> {
    let (s, c) = a.sin_cos();
    Matrix3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
}

pub fn rot_z(a: f64) -> Matrix3<f64> {
    let (s, c) = a.sin_cos();
    Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}

/// 9×3 sample with singular values of very different magnitude.
pub fn svd_sample() -> DMatrix<f64> {
    DMatrix::from_row_slice(
        9,
        3,
        &[
            -10.0, -1.0, -0.05,
            0.0, -1.0, 0.0,
            10.0, -1.0, 0.2,
            -10.0, 0.0, 0.0,
            0.0, 0.0, -0.1,
            10.0, 0.0, 0.0,
            -10.0, 1.0, -0.05,
            0.0, 1.0, 0.0,
            10.0, 1.0, 0.05,
        ],
    )
}
