// Jacobi preconditioner implementation

use std::fmt::Debug;

use crate::error::AlgError;
use crate::preconditioner::Preconditioner;
use faer::Mat;
use num_traits::Float;

/// Jacobi preconditioner: P = D⁻¹
#[derive(Debug, Clone)]
pub struct Jacobi<T> {
    pub(crate) inv_diag: Vec<T>,
}

impl<T: Float> Jacobi<T> {
    /// Read the diagonal of a dense matrix.
    pub fn from_matrix(a: &Mat<T>) -> Self {
        let n = a.nrows().min(a.ncols());
        Self::from_diagonal((0..n).map(|i| a[(i, i)]).collect())
    }

    /// Recover the diagonal of a matrix-free operator by applying it to unit vectors.
    pub fn from_operator<A>(n: usize, a: A) -> Result<Self, AlgError>
    where
        A: Fn(&Vec<T>) -> Result<Vec<T>, AlgError>,
    {
        let mut diag = vec![T::zero(); n];
        let mut e = vec![T::zero(); n];
        for i in 0..n {
            e.iter_mut().for_each(|x| *x = T::zero());
            e[i] = T::one();
            let col = a(&e)?;
            if col.len() != n {
                return Err(AlgError::DimensionMismatch { expected: n, found: col.len() });
            }
            diag[i] = col[i];
        }
        Ok(Self::from_diagonal(diag))
    }

    /// Zero diagonal entries map to zero.
    pub fn from_diagonal(diag: Vec<T>) -> Self {
        let inv_diag = diag
            .into_iter()
            .map(|d| if d != T::zero() { T::one() / d } else { T::zero() })
            .collect();
        Self { inv_diag }
    }
}

impl<T> Preconditioner<Vec<T>> for Jacobi<T>
where
    T: Float + Debug + Send + Sync,
{
    fn apply(&self, r: &Vec<T>) -> Result<Vec<T>, AlgError> {
        if r.len() != self.inv_diag.len() {
            return Err(AlgError::DimensionMismatch {
                expected: self.inv_diag.len(),
                found: r.len(),
            });
        }
        Ok(r.iter().zip(&self.inv_diag).map(|(ri, di)| *di * *ri).collect())
    }
}
