//! Damped Newton method for composite self-concordant minimization.
//!
//! Minimizes `f(x) + g(x)` with `f` self-concordant and `g` simple. Each step
//! solves the Hessian-weighted proximal subproblem
//! `s = proxHg(H, H x − ∇f(x))`, forms the direction `d = s − x` and the
//! proximal Newton decrement `λ = √(dᵀ H d)`, and moves `x ← x + d/(1+λ)`.
//!
//! # References
//! - Tran-Dinh, Q., Kyrillidis, A., & Cevher, V. (2015). Composite self-concordant
//!   minimization. JMLR, 16(1), 371-416.

use num_traits::{Float, One, Zero};

use crate::core::Vector;
use crate::error::AlgError;
use crate::solver::{diag, IterState, IterativeAlgorithm, Operator};
use crate::utils::convergence::Diagnostics;

/// Hessian action at a point.
pub type Hessian<'a, V> = Box<dyn Fn(&V) -> Result<Operator<'a, V>, AlgError> + 'a>;

/// Hessian-weighted proximal operator of `g`.
pub type HessianProx<'a, V> =
    Box<dyn Fn(&dyn Fn(&V) -> Result<V, AlgError>, &V) -> Result<V, AlgError> + 'a>;

pub struct NewtonsMethod<'a, V: Vector> {
    gradf: Operator<'a, V>,
    hessf: Hessian<'a, V>,
    prox_hg: HessianProx<'a, V>,
    x: &'a mut V,
    sigma: V::Scalar,
    lamda: V::Scalar,
    state: IterState,
}

impl<'a, V: Vector> NewtonsMethod<'a, V> {
    pub fn new<G, H, P>(gradf: G, hessf: H, prox_hg: P, x: &'a mut V) -> Self
    where
        G: Fn(&V) -> Result<V, AlgError> + 'a,
        H: Fn(&V) -> Result<Operator<'a, V>, AlgError> + 'a,
        P: Fn(&dyn Fn(&V) -> Result<V, AlgError>, &V) -> Result<V, AlgError> + 'a,
    {
        let state = IterState::new(10, x.device());
        let one = V::Scalar::one();
        let five = one + one + one + one + one;
        Self {
            gradf: Box::new(gradf),
            hessf: Box::new(hessf),
            prox_hg: Box::new(prox_hg),
            x,
            // (3 − √5) / 2
            sigma: (one + one + one - five.sqrt()) / (one + one),
            lamda: V::Scalar::infinity(),
            state,
        }
    }

    pub fn with_sigma(mut self, sigma: V::Scalar) -> Self {
        self.sigma = sigma;
        self
    }

    /// Proximal Newton decrement of the last step.
    pub fn lamda(&self) -> V::Scalar {
        self.lamda
    }

    pub fn sigma(&self) -> V::Scalar {
        self.sigma
    }

    /// `λ < σ`: full Newton steps would be safe from here on.
    pub fn in_quadratic_region(&self) -> bool {
        self.lamda < self.sigma
    }

    pub fn x(&self) -> &V {
        self.x
    }
}

impl<'a, V: Vector> IterativeAlgorithm for NewtonsMethod<'a, V> {
    fn name(&self) -> &'static str {
        "NewtonsMethod"
    }

    fn state(&self) -> &IterState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IterState {
        &mut self.state
    }

    fn init_state(&mut self) -> Result<(), AlgError> {
        self.lamda = V::Scalar::infinity();
        Ok(())
    }

    fn step(&mut self) -> Result<(), AlgError> {
        let hess = (self.hessf)(self.x)?;
        let mut v = hess(self.x)?;
        v.axpy(-V::Scalar::one(), &(self.gradf)(self.x)?);
        let mut d = (self.prox_hg)(&*hess, &v)?;
        d.axpy(-V::Scalar::one(), self.x);

        self.lamda = d.dot(&hess(&d)?).sqrt();
        let alpha = (V::Scalar::one() + self.lamda).recip();
        self.x.axpy(alpha, &d);
        Ok(())
    }

    fn diagnostics(&self) -> Diagnostics {
        vec![("lamda", diag(self.lamda))]
    }
}
