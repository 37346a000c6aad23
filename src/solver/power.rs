//! Power iteration for the dominant eigenpair of a Hermitian map.
//!
//! `x ← A(x) / ‖A(x)‖`. The eigenvalue estimate `max_eig` is reported as a
//! diagnostic; the method runs for exactly `max_iter` steps.

use num_traits::Float;

use crate::core::Vector;
use crate::error::AlgError;
use crate::solver::{diag, IterState, IterativeAlgorithm, Operator};
use crate::utils::convergence::Diagnostics;

pub struct PowerMethod<'a, V: Vector> {
    a: Operator<'a, V>,
    x: &'a mut V,
    max_eig: V::Scalar,
    state: IterState,
}

impl<'a, V: Vector> PowerMethod<'a, V> {
    pub fn new<A>(a: A, x: &'a mut V) -> Self
    where
        A: Fn(&V) -> Result<V, AlgError> + 'a,
    {
        let state = IterState::new(30, x.device());
        Self {
            a: Box::new(a),
            x,
            max_eig: V::Scalar::infinity(),
            state,
        }
    }

    /// Current estimate of the largest eigenvalue magnitude.
    pub fn max_eig(&self) -> V::Scalar {
        self.max_eig
    }

    /// Current eigenvector estimate.
    pub fn x(&self) -> &V {
        self.x
    }
}

impl<'a, V: Vector> IterativeAlgorithm for PowerMethod<'a, V> {
    fn name(&self) -> &'static str {
        "PowerMethod"
    }

    fn state(&self) -> &IterState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IterState {
        &mut self.state
    }

    fn init_state(&mut self) -> Result<(), AlgError> {
        self.max_eig = V::Scalar::infinity();
        Ok(())
    }

    fn step(&mut self) -> Result<(), AlgError> {
        let mut y = (self.a)(self.x)?;
        self.max_eig = y.norm();
        y.scale(self.max_eig.recip());
        self.x.move_from(&y);
        Ok(())
    }

    fn diagnostics(&self) -> Diagnostics {
        vec![("max_eig", diag(self.max_eig))]
    }
}
