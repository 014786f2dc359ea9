//! Small-dimension linear algebra and spatial transforms on top of
//! [nalgebra](https://nalgebra.org).
//!
//! - [`matrix`]: invalid-value sentinel and shape predicates for nalgebra matrices
//! - [`unit_vec::UnitVec`], [`orthogonal::OrthogonalMat`]: types that keep their invariant
//! - [`quaternion`]: general and unit quaternions, slerp
//! - [`rotation`]: angle (2D) and unit quaternion (3D) rotations behind one trait
//! - [`transform`]: affine, similarity and rigid transforms composed with `>>`
//! - [`decomposition`]: eigen, singular value and least-squares solvers
//! - [`euclid`]: planes, lines, projection, distance and intersection
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod decomposition;
pub mod errors;
pub mod euclid;
pub mod float_types;
pub mod matrix;
pub mod orthogonal;
pub mod quaternion;
pub mod rotation;
pub mod transform;
pub mod unit_vec;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::LinalgError;
pub use euclid::{Line, Plane};
pub use orthogonal::OrthogonalMat;
pub use quaternion::{Quaternion, UnitQuaternion};
pub use rotation::{Rotation, Rotation2, Rotation3, Rotator};
pub use transform::{
    AffineInterface, AffineTransform, Compose, RigidBodyTransform, ScalableBodyTransform,
};
pub use unit_vec::UnitVec;
