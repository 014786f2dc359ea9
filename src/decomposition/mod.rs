//! Matrix decompositions on dynamically sized inputs.
//!
//! Every entry point accepts any nalgebra matrix (fixed, dynamic or a view) and
//! works on a dynamic copy. Results are computed eagerly at construction and
//! stay available until the next `compute` call.

mod eigen;
mod least_squares;
mod svd;

pub use eigen::{EigenDecomposition, EigenKind, General, RealSymmetric};
pub use least_squares::{LeastSquareProblem, SolvingMode};
pub use svd::{SingularValueDecomposition, SvdFactors, SvdFlags, SvdShape, Truncation};

/// Eigen decomposition of an arbitrary square matrix, complex results.
pub type GeneralEigen<T> = EigenDecomposition<T, General>;

/// Eigen decomposition of a real symmetric matrix, real results in ascending order.
pub type SymmetricEigenDecomposition<T> = EigenDecomposition<T, RealSymmetric>;
