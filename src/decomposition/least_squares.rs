use crate::errors::LinalgError;
use crate::float_types::{RealScalar, tolerance_as};
use crate::matrix::to_dynamic;
use nalgebra::{DMatrix, DVector, Dim, RawStorage};

/// Factorisation used to solve `min ‖A·x − b‖`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolvingMode {
    /// Column-pivoted QR of `A`. Rank deficient systems get the basic solution.
    #[default]
    Qr,
    /// Pseudo-inverse through the SVD of `A`. Rank deficient systems get the
    /// minimum norm solution.
    Svd,
    /// Cholesky factor of the normal equations `AᵀA·x = Aᵀb`. Fastest, and the
    /// least accurate on ill-conditioned `A`.
    Cholesky,
}

pub struct LeastSquareProblem;

impl LeastSquareProblem {
    /// Least-squares solution of `A·x ≈ b` for a single right-hand side.
    pub fn solution<T, R1, C1, S1, R2, C2, S2>(
        a: &nalgebra::Matrix<T, R1, C1, S1>,
        b: &nalgebra::Matrix<T, R2, C2, S2>,
        mode: SolvingMode,
    ) -> Result<DVector<T>, LinalgError>
    where
        T: RealScalar,
        R1: Dim,
        C1: Dim,
        S1: RawStorage<T, R1, C1>,
        R2: Dim,
        C2: Dim,
        S2: RawStorage<T, R2, C2>,
    {
        log::trace!(
            "least squares {}x{} with {mode:?}",
            a.nrows(),
            a.ncols()
        );
        if b.ncols() != 1 {
            return Err(LinalgError::DimensionMismatch {
                expected: 1,
                found: b.ncols(),
            });
        }
        if b.nrows() != a.nrows() {
            return Err(LinalgError::DimensionMismatch {
                expected: a.nrows(),
                found: b.nrows(),
            });
        }

        let a = to_dynamic(a);
        let b: DVector<T> = to_dynamic(b).column(0).into_owned();
        let solved = match mode {
            SolvingMode::Qr => solve_qr(a, &b),
            SolvingMode::Svd => solve_svd(a, &b),
            SolvingMode::Cholesky => solve_cholesky(&a, &b),
        };
        if let Err(e) = &solved {
            log::warn!("least squares with {mode:?} failed: {e}");
        }
        solved
    }
}

/// Pivots and singular values below this are treated as zero when picking the rank.
fn rank_tolerance<T: RealScalar>(largest: T) -> T {
    largest * tolerance_as::<T>()
}

fn solve_qr<T: RealScalar>(a: DMatrix<T>, b: &DVector<T>) -> Result<DVector<T>, LinalgError> {
    let cols = a.ncols();
    let qr = a.col_piv_qr();
    let r = qr.r();
    let qtb = qr.q().transpose() * b;

    let diag: Vec<T> = (0..r.nrows().min(r.ncols())).map(|i| r[(i, i)].abs()).collect();
    let largest = diag.iter().copied().fold(T::zero(), |acc, d| acc.max(d));
    let tol = rank_tolerance(largest);
    let rank = diag.iter().take_while(|&&d| d > tol).count();
    if rank < cols {
        log::debug!("QR least squares: numerical rank {rank} below {cols} columns");
    }

    let head = r
        .view((0, 0), (rank, rank))
        .solve_upper_triangular(&qtb.rows(0, rank))
        .ok_or(LinalgError::SolveFailed("upper triangular factor is singular"))?;

    let mut x = DVector::zeros(cols);
    x.rows_mut(0, rank).copy_from(&head);
    qr.p().inv_permute_rows(&mut x);
    Ok(x)
}

fn solve_svd<T: RealScalar>(a: DMatrix<T>, b: &DVector<T>) -> Result<DVector<T>, LinalgError> {
    let svd = a.svd(true, true);
    let eps = rank_tolerance(svd.singular_values.amax());
    svd.solve(b, eps).map_err(LinalgError::SolveFailed)
}

fn solve_cholesky<T: RealScalar>(a: &DMatrix<T>, b: &DVector<T>) -> Result<DVector<T>, LinalgError> {
    let at = a.transpose();
    let chol = (&at * a).cholesky().ok_or(LinalgError::NotPositiveDefinite)?;
    Ok(chol.solve(&(at * b)))
}
