use crate::errors::LinalgError;
use crate::float_types::{RealScalar, tolerance_as};
use crate::matrix::to_dynamic;
use nalgebra::{Complex, ComplexField, DMatrix, DVector, Dim, RawStorage, SymmetricEigen};
use std::marker::PhantomData;

/// Selects the eigen solver and the scalar type of its results.
pub trait EigenKind<T: RealScalar> {
    /// Scalar type of eigenvalues and eigenvector entries.
    type Elem: ComplexField + Copy;

    /// Eigenvalues, plus the eigenvectors as columns when `with_vectors` is set.
    fn solve(m: &DMatrix<T>, with_vectors: bool) -> (DVector<Self::Elem>, Option<DMatrix<Self::Elem>>);
}

/// Any square matrix. Results are complex and come in no particular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct General;

/// Real symmetric matrices. Results are real, eigenvalues ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RealSymmetric;

impl<T: RealScalar> EigenKind<T> for General {
    type Elem = Complex<T>;

    fn solve(m: &DMatrix<T>, with_vectors: bool) -> (DVector<Complex<T>>, Option<DMatrix<Complex<T>>>) {
        let values = m.complex_eigenvalues();
        if !with_vectors {
            return (values, None);
        }
        let n = m.nrows();
        let mc: DMatrix<Complex<T>> = m.map(|x| Complex::new(x, T::zero()));
        let tol = tolerance_as::<T>();
        let mut columns: Vec<Option<DVector<Complex<T>>>> = vec![None; n];
        for i in 0..n {
            if columns[i].is_some() {
                continue;
            }
            let lambda = values[i];
            let scale = lambda.modulus().max(T::one());
            let group: Vec<usize> = (i..n)
                .filter(|&j| j == i || (columns[j].is_none() && (values[j] - lambda).modulus() <= tol * scale))
                .collect();
            if group.len() > 1 {
                log::trace!("eigenvalue {lambda:?} repeated {} times", group.len());
            }
            let shifted = &mc - DMatrix::<Complex<T>>::identity(n, n) * lambda;
            for (&j, v) in group.iter().zip(kernel_basis(shifted, group.len())) {
                columns[j] = Some(v);
            }
        }
        let columns: Vec<DVector<Complex<T>>> = columns.into_iter().flatten().collect();
        (values, Some(DMatrix::from_columns(&columns)))
    }
}

/// Orthonormal vectors spanning the (numerical) kernel of `shifted`: the right
/// singular vectors of its `k` smallest singular values.
///
/// A repeated eigenvalue asks for as many vectors as its multiplicity. For a
/// defective matrix the surplus vectors are not eigenvectors.
fn kernel_basis<T: RealScalar>(shifted: DMatrix<Complex<T>>, k: usize) -> Vec<DVector<Complex<T>>> {
    let n = shifted.ncols();
    let svd = shifted.svd(false, true);
    let Some(v_t) = svd.v_t else {
        log::warn!("SVD returned no right singular vectors, eigenvectors left as NaN");
        return vec![DVector::from_element(n, crate::matrix::nan()); k];
    };
    let sigma = svd.singular_values;
    let mut order: Vec<usize> = (0..sigma.len()).collect();
    order.sort_by(|&i, &j| sigma[i].partial_cmp(&sigma[j]).unwrap_or(std::cmp::Ordering::Equal));
    order
        .into_iter()
        .take(k)
        .map(|i| v_t.row(i).adjoint().normalize())
        .collect()
}

impl<T: RealScalar> EigenKind<T> for RealSymmetric {
    type Elem = T;

    fn solve(m: &DMatrix<T>, with_vectors: bool) -> (DVector<T>, Option<DMatrix<T>>) {
        if !with_vectors {
            let mut values = m.symmetric_eigenvalues();
            values.as_mut_slice().sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            return (values, None);
        }
        let eigen = SymmetricEigen::new(m.clone());
        let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
        order.sort_by(|&i, &j| {
            eigen.eigenvalues[i]
                .partial_cmp(&eigen.eigenvalues[j])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let values = DVector::from_iterator(order.len(), order.iter().map(|&i| eigen.eigenvalues[i]));
        let columns: Vec<_> = order.iter().map(|&i| eigen.eigenvectors.column(i)).collect();
        (values, Some(DMatrix::from_columns(&columns)))
    }
}

/// Eigenvalues and, unless created with [`EigenDecomposition::values_only`],
/// eigenvectors of a square matrix.
///
/// `K` picks the solver: [`General`] (complex results) or [`RealSymmetric`].
#[derive(Debug, Clone)]
pub struct EigenDecomposition<T: RealScalar, K: EigenKind<T> = General> {
    values: DVector<K::Elem>,
    vectors: Option<DMatrix<K::Elem>>,
    _kind: PhantomData<K>,
}

impl<T: RealScalar, K: EigenKind<T>> EigenDecomposition<T, K> {
    pub fn new<R: Dim, C: Dim, S: RawStorage<T, R, C>>(m: &nalgebra::Matrix<T, R, C, S>) -> Self {
        Self::run(m, true)
    }

    /// Skips the eigenvectors; [`EigenDecomposition::eigenvec`] then fails.
    pub fn values_only<R: Dim, C: Dim, S: RawStorage<T, R, C>>(m: &nalgebra::Matrix<T, R, C, S>) -> Self {
        Self::run(m, false)
    }

    /// Re-runs the decomposition on another matrix, replacing every result.
    pub fn compute<R: Dim, C: Dim, S: RawStorage<T, R, C>>(
        &mut self,
        m: &nalgebra::Matrix<T, R, C, S>,
        values_only: bool,
    ) -> &mut Self {
        *self = Self::run(m, !values_only);
        self
    }

    fn run<R: Dim, C: Dim, S: RawStorage<T, R, C>>(m: &nalgebra::Matrix<T, R, C, S>, with_vectors: bool) -> Self {
        assert!(
            m.nrows() == m.ncols(),
            "eigen decomposition needs a square matrix, got {}x{}",
            m.nrows(),
            m.ncols()
        );
        log::trace!(
            "eigen decomposition of a {0}x{0} matrix (eigenvectors: {with_vectors})",
            m.nrows()
        );
        let (values, vectors) = K::solve(&to_dynamic(m), with_vectors);
        Self {
            values,
            vectors,
            _kind: PhantomData,
        }
    }

    /// Number of eigenvalues.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn has_eigenvectors(&self) -> bool {
        self.vectors.is_some()
    }

    pub fn eigenvals(&self) -> &DVector<K::Elem> {
        &self.values
    }

    pub fn eigenval(&self, i: usize) -> Result<K::Elem, LinalgError> {
        self.values.get(i).copied().ok_or(LinalgError::IndexOutOfRange {
            index: i,
            len: self.values.len(),
        })
    }

    /// Unit eigenvector belonging to [`EigenDecomposition::eigenval`]`(i)`.
    pub fn eigenvec(&self, i: usize) -> Result<DVector<K::Elem>, LinalgError> {
        let basis = self.basemat()?;
        if i >= basis.ncols() {
            return Err(LinalgError::IndexOutOfRange {
                index: i,
                len: basis.ncols(),
            });
        }
        Ok(basis.column(i).into_owned())
    }

    /// Eigenvalues on the diagonal.
    pub fn diagmat(&self) -> DMatrix<K::Elem> {
        DMatrix::from_diagonal(&self.values)
    }

    /// Eigenvectors as columns, in eigenvalue order.
    pub fn basemat(&self) -> Result<&DMatrix<K::Elem>, LinalgError> {
        self.vectors.as_ref().ok_or(LinalgError::EigenvectorsNotComputed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Matrix3;

    #[test]
    fn symmetric_values_ascend() {
        let m = Matrix3::new(
            2.0, 1.0, 0.0,
            1.0, 3.0, 1.0,
            0.0, 1.0, 4.0,
        );
        let ed = EigenDecomposition::<f64, RealSymmetric>::new(&m);
        let vals = ed.eigenvals();
        assert!(vals[0] <= vals[1] && vals[1] <= vals[2]);
        let values_only = EigenDecomposition::<f64, RealSymmetric>::values_only(&m);
        assert_relative_eq!(values_only.eigenvals(), vals, epsilon = 1e-9);
    }

    #[test]
    fn reconstructs_symmetric_matrix() {
        let m = Matrix3::new(
            4.0, -1.0, 0.5,
            -1.0, 3.0, 0.0,
            0.5, 0.0, 1.0,
        );
        let ed = EigenDecomposition::<f64, RealSymmetric>::new(&m);
        let v = ed.basemat().unwrap();
        let back = v * ed.diagmat() * v.transpose();
        assert_relative_eq!(back, to_dynamic(&m), epsilon = 1e-9);
    }

    #[test]
    fn vectors_missing_after_values_only() {
        let m = Matrix3::<f64>::identity();
        let mut ed = EigenDecomposition::<f64>::values_only(&m);
        assert_eq!(ed.eigenvec(0), Err(LinalgError::EigenvectorsNotComputed));
        ed.compute(&m, false);
        assert!(ed.eigenvec(2).is_ok());
        assert!(matches!(ed.eigenvec(3), Err(LinalgError::IndexOutOfRange { index: 3, len: 3 })));
    }
}
