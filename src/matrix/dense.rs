//! Dense matrices as solver operators.
//!
//! Wraps a `faer::Mat<T>` as the `Fn(&Vec<T>) -> Result<Vec<T>, AlgError>`
//! callables the solvers take, checking operand lengths instead of panicking.

use std::fmt::Debug;

use crate::core::traits::{MatTransVec, MatVec};
use crate::error::AlgError;
use faer::Mat;
use num_traits::Float;

/// `x ↦ A x`
pub fn operator<T>(a: &Mat<T>) -> impl Fn(&Vec<T>) -> Result<Vec<T>, AlgError> + '_
where
    T: Float + Debug + Send + Sync,
{
    move |x: &Vec<T>| -> Result<Vec<T>, AlgError> {
        if x.len() != a.ncols() {
            return Err(AlgError::DimensionMismatch { expected: a.ncols(), found: x.len() });
        }
        let mut y = vec![T::zero(); a.nrows()];
        a.matvec(x, &mut y);
        Ok(y)
    }
}

/// `u ↦ Aᵀ u`
pub fn adjoint_operator<T>(a: &Mat<T>) -> impl Fn(&Vec<T>) -> Result<Vec<T>, AlgError> + '_
where
    T: Float + Debug + Send + Sync,
{
    move |u: &Vec<T>| -> Result<Vec<T>, AlgError> {
        if u.len() != a.nrows() {
            return Err(AlgError::DimensionMismatch { expected: a.nrows(), found: u.len() });
        }
        let mut y = vec![T::zero(); a.ncols()];
        a.mattransvec(u, &mut y);
        Ok(y)
    }
}
