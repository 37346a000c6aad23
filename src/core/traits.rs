//! Core linear-algebra traits for iteralg.
//!
//! The solvers never touch array storage directly. Everything they need from
//! an array backend goes through [`InnerProduct`] and [`VectorOps`].

use std::fmt::Debug;

use num_traits::Float;

use crate::device::Placed;

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Transposed matrix–vector product: y ← Aᵀ x.
pub trait MatTransVec<V> {
    /// Compute y = Aᵀ · x.
    fn mattransvec(&self, x: &V, y: &mut V);
}

/// Inner products & norms.
pub trait InnerProduct {
    /// Associated scalar type.
    type Scalar: Float + Debug + Send + Sync;
    /// Compute dot(self, other).
    fn dot(&self, other: &Self) -> Self::Scalar;
    /// Compute ‖self‖₂.
    fn norm(&self) -> Self::Scalar {
        self.dot(self).sqrt()
    }
}

/// In-place vector arithmetic used by the solver recurrences.
pub trait VectorOps: InnerProduct + Clone {
    /// Number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// self ← self + a·x
    fn axpy(&mut self, a: Self::Scalar, x: &Self);

    /// self ← x + a·self
    fn xpay(&mut self, a: Self::Scalar, x: &Self);

    /// self ← a·self
    fn scale(&mut self, a: Self::Scalar);

    /// Replace the contents of `self` with those of `src`, keeping `self`'s
    /// buffer (and therefore every outstanding handle to it).
    fn move_from(&mut self, src: &Self);

    /// self ← self ∘ other
    fn mul_elementwise(&mut self, other: &Self);

    /// self ← self ⊘ other
    fn div_elementwise(&mut self, other: &Self);

    /// min over entries of |self_i|.
    fn min_abs(&self) -> Self::Scalar;
}

/// Everything a solver variable must provide.
pub trait Vector: VectorOps + Placed {}

impl<V: VectorOps + Placed> Vector for V {}
