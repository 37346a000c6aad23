//! (Preconditioned) Conjugate Gradient per Saad §9.2, as a stepwise state machine.
//!
//! Solves `A x = b` for Hermitian `A` with an optional preconditioner `P`.
//! The right-hand side is taken by value: `init()` turns it into the residual
//! `r = b − A x` in place.
//!
//! Stops when the iteration budget is spent, when `√(rᵀz)` is exactly zero,
//! or when a search direction with zero curvature (`pᵀAp = 0`) is met. The
//! last case voids that update and is reported through [`zero_gradient`].
//!
//! [`zero_gradient`]: ConjugateGradient::zero_gradient

use num_traits::{Float, One, Zero};
use tracing::debug;

use crate::core::Vector;
use crate::error::AlgError;
use crate::preconditioner::Preconditioner;
use crate::solver::{diag, IterState, IterativeAlgorithm, Operator};
use crate::utils::convergence::Diagnostics;

struct CgWork<V: Vector> {
    r: V,
    /// Search direction; `None` when it shares the residual buffer
    /// (unpreconditioned runs with a single permitted step).
    p: Option<V>,
    rzold: V::Scalar,
}

pub struct ConjugateGradient<'a, V: Vector> {
    a: Operator<'a, V>,
    pc: Option<Box<dyn Preconditioner<V> + 'a>>,
    x: &'a mut V,
    b: Option<V>,
    work: Option<CgWork<V>>,
    residual: V::Scalar,
    zero_gradient: bool,
    state: IterState,
}

impl<'a, V: Vector> ConjugateGradient<'a, V> {
    pub fn new<A>(a: A, b: V, x: &'a mut V) -> Self
    where
        A: Fn(&V) -> Result<V, AlgError> + 'a,
    {
        let state = IterState::new(100, x.device());
        Self {
            a: Box::new(a),
            pc: None,
            x,
            b: Some(b),
            work: None,
            residual: V::Scalar::infinity(),
            zero_gradient: false,
            state,
        }
    }

    pub fn with_preconditioner<P>(mut self, pc: P) -> Self
    where
        P: Preconditioner<V> + 'a,
    {
        self.pc = Some(Box::new(pc));
        self
    }

    /// `√(rᵀ P r)`
    pub fn residual(&self) -> V::Scalar {
        self.residual
    }

    pub fn zero_gradient(&self) -> bool {
        self.zero_gradient
    }

    pub fn x(&self) -> &V {
        self.x
    }

    /// Current search direction (after `init`, before `cleanup`).
    pub fn direction(&self) -> Option<&V> {
        self.work.as_ref().map(|w| w.p.as_ref().unwrap_or(&w.r))
    }
}

impl<'a, V: Vector> IterativeAlgorithm for ConjugateGradient<'a, V> {
    fn name(&self) -> &'static str {
        "ConjugateGradient"
    }

    fn state(&self) -> &IterState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IterState {
        &mut self.state
    }

    fn init_state(&mut self) -> Result<(), AlgError> {
        let mut r = self.b.take().ok_or(AlgError::RhsConsumed)?;
        let ax = (self.a)(self.x)?;
        r.axpy(-V::Scalar::one(), &ax);

        let (p, rzold) = match self.pc.as_ref() {
            Some(pc) => {
                let z = pc.apply(&r)?;
                let rz = r.dot(&z);
                (Some(z), rz)
            }
            None => {
                let rz = r.dot(&r);
                let p = (self.state.max_iter() > 1).then(|| r.clone());
                (p, rz)
            }
        };

        self.zero_gradient = false;
        self.residual = rzold.sqrt();
        self.work = Some(CgWork { r, p, rzold });
        Ok(())
    }

    fn step(&mut self) -> Result<(), AlgError> {
        let last = self.state.is_last_iteration();
        let CgWork { r, p, rzold } = self.work.as_mut().ok_or(AlgError::NotInitialized("ConjugateGradient"))?;

        let (ap, pap) = {
            let dir = p.as_ref().unwrap_or(&*r);
            let ap = (self.a)(dir)?;
            let pap = dir.dot(&ap);
            if pap == V::Scalar::zero() {
                debug!(iteration = self.state.iteration(), "zero curvature direction, stopping");
                self.zero_gradient = true;
                return Ok(());
            }
            self.x.axpy(*rzold / pap, dir);
            (ap, pap)
        };
        let alpha = *rzold / pap;

        if !last {
            if let Some(p) = p.as_mut() {
                r.axpy(-alpha, &ap);
                let rznew = match self.pc.as_ref() {
                    Some(pc) => {
                        let z = pc.apply(&*r)?;
                        let rznew = r.dot(&z);
                        p.xpay(rznew / *rzold, &z);
                        rznew
                    }
                    None => {
                        let rznew = r.dot(&*r);
                        p.xpay(rznew / *rzold, &*r);
                        rznew
                    }
                };
                *rzold = rznew;
            }
        }

        self.residual = rzold.sqrt();
        Ok(())
    }

    fn converged(&self) -> bool {
        self.residual == V::Scalar::zero()
    }

    fn should_stop(&self) -> bool {
        self.state.exhausted() || self.zero_gradient || self.converged()
    }

    fn release(&mut self) {
        self.work = None;
    }

    fn diagnostics(&self) -> Diagnostics {
        vec![("resid", diag(self.residual))]
    }
}
