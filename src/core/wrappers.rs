//! Wrappers for faer dense matrix types and vector operations.
//!
//! This module provides implementations of the core traits for `faer::Mat`, `faer::MatRef`,
//! and `Vec<T>`, so that plain vectors can be used as solver variables and dense matrices as
//! linear maps.
//!
//! # Features
//! - Matrix-vector and matrix-transpose-vector multiplication for `faer` dense matrices.
//! - Inner product, norm and the fused `axpy`/`xpay` updates for vectors, with optional Rayon parallelism.
//! - Elementwise arithmetic used by array-valued step sizes.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use std::fmt::Debug;

use crate::core::traits::{InnerProduct, MatTransVec, MatVec, VectorOps};
use faer::{Mat, MatRef};
use num_traits::Float;

/// Implements matrix-vector multiplication for `faer::Mat`.
///
/// Computes `y = A * x` where `A` is a dense matrix, `x` and `y` are vectors.
impl<T: Float> MatVec<Vec<T>> for Mat<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        self.as_ref().matvec(x, y)
    }
}

/// Implements matrix-vector multiplication for a matrix reference (`faer::MatRef`).
impl<'a, T: Float> MatVec<Vec<T>> for MatRef<'a, T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for i in 0..self.nrows() {
            y[i] = T::zero();
            for j in 0..self.ncols() {
                y[i] = y[i] + self[(i, j)] * x[j];
            }
        }
    }
}

/// Implements matrix-transpose-vector multiplication for `faer::Mat`.
///
/// Computes `y = A^T * x` where `A` is a dense matrix, `x` and `y` are vectors.
impl<T: Float> MatTransVec<Vec<T>> for Mat<T> {
    fn mattransvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        self.as_ref().mattransvec(x, y)
    }
}

/// Implements matrix-transpose-vector multiplication for a matrix reference (`faer::MatRef`).
impl<'a, T: Float> MatTransVec<Vec<T>> for MatRef<'a, T> {
    fn mattransvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.ncols(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.nrows(), x.len(), "Input vector x has incorrect length");
        for j in 0..self.ncols() {
            y[j] = T::zero();
            for i in 0..self.nrows() {
                y[j] = y[j] + self[(i, j)] * x[i];
            }
        }
    }
}

/// Implements inner product and norm for vectors, with optional Rayon parallelism.
///
/// If the `rayon` feature is enabled, uses parallel iterators for performance.
impl<T: Float + Debug + Send + Sync> InnerProduct for Vec<T> {
    type Scalar = T;
    /// Computes the dot product of two vectors: `x^T y`.
    fn dot(&self, other: &Vec<T>) -> T {
        assert_eq!(self.len(), other.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            self.as_slice()
                .par_iter()
                .zip(other.as_slice().par_iter())
                .map(|(xi, yi)| *xi * *yi)
                .reduce(|| T::zero(), |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            self.iter()
                .zip(other.iter())
                .map(|(xi, yi)| *xi * *yi)
                .fold(T::zero(), |acc, v| acc + v)
        }
    }
    /// Computes the Euclidean norm of a vector: `||x||_2`.
    fn norm(&self) -> T {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            self.as_slice()
                .par_iter()
                .map(|xi| *xi * *xi)
                .reduce(|| T::zero(), |acc, v| acc + v)
                .sqrt()
        }
        #[cfg(not(feature = "rayon"))]
        {
            self.iter()
                .map(|xi| *xi * *xi)
                .fold(T::zero(), |acc, v| acc + v)
                .sqrt()
        }
    }
}

impl<T: Float + Debug + Send + Sync> VectorOps for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn axpy(&mut self, a: T, x: &Vec<T>) {
        assert_eq!(self.len(), x.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            self.par_iter_mut()
                .zip(x.par_iter())
                .for_each(|(yi, xi)| *yi = *yi + a * *xi);
        }
        #[cfg(not(feature = "rayon"))]
        {
            for (yi, xi) in self.iter_mut().zip(x.iter()) {
                *yi = *yi + a * *xi;
            }
        }
    }

    fn xpay(&mut self, a: T, x: &Vec<T>) {
        assert_eq!(self.len(), x.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            self.par_iter_mut()
                .zip(x.par_iter())
                .for_each(|(yi, xi)| *yi = *xi + a * *yi);
        }
        #[cfg(not(feature = "rayon"))]
        {
            for (yi, xi) in self.iter_mut().zip(x.iter()) {
                *yi = *xi + a * *yi;
            }
        }
    }

    fn scale(&mut self, a: T) {
        self.iter_mut().for_each(|yi| *yi = *yi * a);
    }

    fn move_from(&mut self, src: &Vec<T>) {
        assert_eq!(self.len(), src.len(), "Vectors must have the same length");
        self.copy_from_slice(src);
    }

    fn mul_elementwise(&mut self, other: &Vec<T>) {
        assert_eq!(self.len(), other.len(), "Vectors must have the same length");
        for (yi, oi) in self.iter_mut().zip(other.iter()) {
            *yi = *yi * *oi;
        }
    }

    fn div_elementwise(&mut self, other: &Vec<T>) {
        assert_eq!(self.len(), other.len(), "Vectors must have the same length");
        for (yi, oi) in self.iter_mut().zip(other.iter()) {
            *yi = *yi / *oi;
        }
    }

    fn min_abs(&self) -> T {
        self.iter()
            .map(|v| v.abs())
            .fold(T::infinity(), |acc, v| acc.min(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xpay_keeps_x_and_scales_self() {
        let mut p = vec![1.0, 2.0];
        p.xpay(0.5, &vec![10.0, 20.0]);
        assert_eq!(p, vec![10.5, 21.0]);
    }

    #[test]
    fn min_abs_ignores_sign() {
        assert_eq!(vec![-0.25f64, 3.0, -1.0].min_abs(), 0.25);
    }

    #[test]
    fn mattransvec_matches_transpose() {
        let a = Mat::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
        let x = vec![1.0, -1.0];
        let mut y = vec![0.0; 3];
        a.mattransvec(&x, &mut y);
        assert_eq!(y, vec![-3.0, -3.0, -3.0]);
    }
}
