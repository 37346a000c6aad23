//! Preconditioners for conjugate gradient.
//!
//! This module defines the Preconditioner trait. Any closure `Fn(&V) -> Result<V, AlgError>`
//! is a preconditioner; [`Jacobi`] is provided for dense matrices and matrix-free operators.

use crate::error::AlgError;

/// A preconditioner P ≈ A⁻¹.
pub trait Preconditioner<V> {
    /// Apply P to r, returning z = P r
    fn apply(&self, r: &V) -> Result<V, AlgError>;
}

impl<V, F> Preconditioner<V> for F
where
    F: Fn(&V) -> Result<V, AlgError>,
{
    fn apply(&self, r: &V) -> Result<V, AlgError> {
        self(r)
    }
}

pub mod jacobi;
pub use jacobi::Jacobi;
