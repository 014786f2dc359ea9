use nalgebra::RealField;
use std::sync::OnceLock;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Scalar bound shared by every geometric type in the crate.
///
/// Anything nalgebra treats as a real field and that is `Copy` and `Default`
/// qualifies, which in practice means `f32` and `f64`.
pub trait RealScalar: RealField + Copy + Default {}

impl<T: RealField + Copy + Default> RealScalar for T {}

/// Lazily-initialized tolerance used across the crate.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden
/// by calling [`set_tolerance`] once before using the library.
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-6
    }
}

/// Returns the current comparison tolerance.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(default_tolerance)
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `spatialrs::float_types::set_tolerance(1e-9);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// The crate tolerance expressed in an arbitrary scalar type.
#[inline]
pub fn tolerance_as<T: RealScalar>() -> T {
    nalgebra::convert::<f64, T>(tolerance() as f64)
}

/// `true` when `a` and `b` differ by less than the crate tolerance.
#[inline]
pub fn are_almost_same<T: RealScalar>(a: T, b: T) -> bool {
    (a - b).abs() < tolerance_as::<T>()
}

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Frac Pi 2
/// π/2
#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
/// π/2
#[cfg(feature = "f64")]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;
