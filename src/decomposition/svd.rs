use crate::errors::LinalgError;
use crate::float_types::RealScalar;
use crate::matrix::to_dynamic;
use nalgebra::{DMatrix, DVector, Dim, RawStorage};

/// Shape of the singular vector matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SvdShape {
    /// `U` is m×k and `V` is n×k with `k = min(m, n)`.
    #[default]
    Thin,
    /// `U` is m×m and `V` is n×n.
    Full,
}

/// Which singular vector matrices are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SvdFactors {
    #[default]
    Both,
    UOnly,
    VOnly,
    ValuesOnly,
}

impl SvdFactors {
    fn wants_u(self) -> bool {
        matches!(self, Self::Both | Self::UOnly)
    }

    fn wants_v(self) -> bool {
        matches!(self, Self::Both | Self::VOnly)
    }
}

/// Which singular values survive the decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Truncation<T> {
    Keep,
    /// Keeps `σ ≥ r·σ₀` for a ratio `r` in `[0, 1)`.
    Relative(T),
    /// Keeps `σ ≥ c`.
    Absolute(T),
}

impl<T> Default for Truncation<T> {
    fn default() -> Self {
        Self::Keep
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvdFlags<T> {
    pub shape: SvdShape,
    pub factors: SvdFactors,
    pub truncation: Truncation<T>,
}

impl<T> Default for SvdFlags<T> {
    fn default() -> Self {
        Self {
            shape: SvdShape::default(),
            factors: SvdFactors::default(),
            truncation: Truncation::Keep,
        }
    }
}

impl<T> SvdFlags<T> {
    pub fn shape(mut self, shape: SvdShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn factors(mut self, factors: SvdFactors) -> Self {
        self.factors = factors;
        self
    }

    pub fn truncation(mut self, truncation: Truncation<T>) -> Self {
        self.truncation = truncation;
        self
    }
}

/// `A = U·D·Vᵀ` with singular values in descending order.
///
/// A factor dropped by [`SvdFactors`] is stored as an empty matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SingularValueDecomposition<T: RealScalar> {
    values: DVector<T>,
    u: DMatrix<T>,
    v: DMatrix<T>,
}

impl<T: RealScalar> SingularValueDecomposition<T> {
    /// Thin decomposition with both factors and no truncation.
    pub fn new<R: Dim, C: Dim, S: RawStorage<T, R, C>>(m: &nalgebra::Matrix<T, R, C, S>) -> Self {
        let m = to_dynamic(m);
        let mut svd = Self::empty();
        svd.run(m, &SvdFlags::default());
        svd
    }

    pub fn with_flags<R: Dim, C: Dim, S: RawStorage<T, R, C>>(
        m: &nalgebra::Matrix<T, R, C, S>,
        flags: SvdFlags<T>,
    ) -> Result<Self, LinalgError> {
        let mut svd = Self::empty();
        svd.compute(m, flags)?;
        Ok(svd)
    }

    /// Re-runs the decomposition on another matrix, replacing every result.
    pub fn compute<R: Dim, C: Dim, S: RawStorage<T, R, C>>(
        &mut self,
        m: &nalgebra::Matrix<T, R, C, S>,
        flags: SvdFlags<T>,
    ) -> Result<&mut Self, LinalgError> {
        validate(&flags)?;
        self.run(to_dynamic(m), &flags);
        Ok(self)
    }

    fn empty() -> Self {
        Self {
            values: DVector::zeros(0),
            u: DMatrix::zeros(0, 0),
            v: DMatrix::zeros(0, 0),
        }
    }

    fn run(&mut self, m: DMatrix<T>, flags: &SvdFlags<T>) {
        let (rows, cols) = m.shape();
        log::trace!("SVD of a {rows}x{cols} matrix with {flags:?}");
        *self = Self::empty();
        if rows == 0 || cols == 0 {
            return;
        }

        let want_u = flags.factors.wants_u();
        let want_v = flags.factors.wants_v();
        let raw = m.svd(want_u, want_v);

        let mut order: Vec<usize> = (0..raw.singular_values.len()).collect();
        order.sort_by(|&i, &j| {
            raw.singular_values[j]
                .partial_cmp(&raw.singular_values[i])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        self.values = DVector::from_iterator(order.len(), order.iter().map(|&i| raw.singular_values[i]));
        debug_assert!(self.values.as_slice().windows(2).all(|w| w[0] >= w[1]));

        if let Some(u) = raw.u.filter(|_| want_u) {
            let columns: Vec<_> = order.iter().map(|&i| u.column(i).into_owned()).collect();
            self.u = DMatrix::from_columns(&columns);
        }
        if let Some(v_t) = raw.v_t.filter(|_| want_v) {
            let columns: Vec<_> = order.iter().map(|&i| v_t.row(i).transpose()).collect();
            self.v = DMatrix::from_columns(&columns);
        }

        if flags.shape == SvdShape::Full {
            if want_u {
                self.u = complete_basis(std::mem::replace(&mut self.u, DMatrix::zeros(0, 0)));
            }
            if want_v {
                self.v = complete_basis(std::mem::replace(&mut self.v, DMatrix::zeros(0, 0)));
            }
        }

        self.truncate(flags.truncation);
    }

    fn truncate(&mut self, truncation: Truncation<T>) {
        let cutoff = match truncation {
            Truncation::Keep => return,
            Truncation::Relative(r) => match self.values.get(0) {
                Some(&largest) => largest * r,
                None => return,
            },
            Truncation::Absolute(c) => c,
        };
        let kept = self.values.as_slice().partition_point(|&s| s >= cutoff);
        log::debug!(
            "SVD truncation at {cutoff:?} keeps {kept} of {} singular values",
            self.values.len()
        );
        self.values = self.values.rows(0, kept).into_owned();
        if self.u.ncols() > 0 {
            self.u = self.u.columns(0, kept).into_owned();
        }
        if self.v.ncols() > 0 {
            self.v = self.v.columns(0, kept).into_owned();
        }
    }

    pub fn nof_singularvals(&self) -> usize {
        self.values.len()
    }

    pub fn singularval(&self, i: usize) -> Result<T, LinalgError> {
        self.values.get(i).copied().ok_or(LinalgError::IndexOutOfRange {
            index: i,
            len: self.values.len(),
        })
    }

    pub fn singular_values(&self) -> &DVector<T> {
        &self.values
    }

    /// Singular values on the diagonal of a matrix shaped to fit between `U` and `Vᵀ`.
    pub fn diagmat(&self) -> DMatrix<T> {
        let k = self.values.len();
        let (rows, cols) = if self.u.is_square() && self.v.is_square() && !self.u.is_empty() && !self.v.is_empty() {
            (self.u.nrows(), self.v.nrows())
        } else {
            (k, k)
        };
        let mut d = DMatrix::zeros(rows, cols);
        for (i, &s) in self.values.iter().enumerate().take(rows.min(cols)) {
            d[(i, i)] = s;
        }
        d
    }

    pub fn ucol(&self, i: usize) -> Result<DVector<T>, LinalgError> {
        column(&self.u, i, "U")
    }

    pub fn vcol(&self, i: usize) -> Result<DVector<T>, LinalgError> {
        column(&self.v, i, "V")
    }

    /// Left singular vectors as columns; empty when not computed.
    pub fn umat(&self) -> &DMatrix<T> {
        &self.u
    }

    /// Right singular vectors as columns; empty when not computed.
    pub fn vmat(&self) -> &DMatrix<T> {
        &self.v
    }
}

fn validate<T: RealScalar>(flags: &SvdFlags<T>) -> Result<(), LinalgError> {
    if let Truncation::Relative(r) = flags.truncation {
        if r < T::zero() || r >= T::one() {
            return Err(LinalgError::InvalidCutoffRatio(r.to_subset().unwrap_or(f64::NAN)));
        }
    }
    Ok(())
}

fn column<T: RealScalar>(m: &DMatrix<T>, i: usize, name: &'static str) -> Result<DVector<T>, LinalgError> {
    if m.is_empty() {
        return Err(LinalgError::MissingFactor(name));
    }
    if i >= m.ncols() {
        return Err(LinalgError::IndexOutOfRange { index: i, len: m.ncols() });
    }
    Ok(m.column(i).into_owned())
}

/// Extends orthonormal columns to a full orthonormal basis of their ambient space.
///
/// Each new column is the standard basis vector with the largest residual
/// against the columns collected so far, orthogonalised twice.
fn complete_basis<T: RealScalar>(basis: DMatrix<T>) -> DMatrix<T> {
    let n = basis.nrows();
    let mut columns: Vec<DVector<T>> = basis.column_iter().map(|c| c.into_owned()).collect();
    while columns.len() < n {
        let best = (0..n)
            .map(|i| {
                let mut candidate = DVector::<T>::zeros(n);
                candidate[i] = T::one();
                for _ in 0..2 {
                    for c in &columns {
                        let proj = c.dot(&candidate);
                        candidate -= c * proj;
                    }
                }
                candidate
            })
            .max_by(|a, b| {
                a.norm_squared()
                    .partial_cmp(&b.norm_squared())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        match best {
            Some(candidate) => {
                let norm = candidate.norm();
                columns.push(candidate / norm);
            }
            None => break,
        }
    }
    DMatrix::from_columns(&columns)
}
