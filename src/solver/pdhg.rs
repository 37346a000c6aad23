//! Primal-dual hybrid gradient (Chambolle–Pock).
//!
//! Solves `min_x max_u g(x) − f*(u) + ⟨Ax, u⟩`, equivalently `min_x f(Ax) + g(x)`.
//! When exactly one of `g` or `f*` is strongly convex (`gamma_primal` or
//! `gamma_dual` positive) the step sizes `τ` and `σ` are adapted in place every
//! iteration; otherwise `θ = 1` and the steps never change. Diagonal
//! preconditioning is applied upstream by passing array-valued steps.
//!
//! The two strong convexity parameters are mutually exclusive. Instead of
//! silently falling back to `θ = 1` when both are positive (or when either is
//! negative), `init()` rejects the configuration with
//! [`AlgError::InvalidParameter`].
//!
//! # References
//! - Chambolle, A., & Pock, T. (2011). A first-order primal-dual algorithm for
//!   convex problems with applications to imaging. J. Math. Imaging Vis., 40(1), 120-145.

use num_traits::{Float, One, Zero};

use crate::core::{StepSize, Vector};
use crate::error::AlgError;
use crate::solver::{diag, IterState, IterativeAlgorithm, Operator, Prox};
use crate::utils::convergence::Diagnostics;

struct PdhgWork<V> {
    /// Extrapolated primal point fed to `A`.
    x_ext: V,
    u_old: V,
    x_old: V,
}

pub struct PrimalDualHybridGradient<'a, V: Vector> {
    proxfc: Prox<'a, V>,
    proxg: Prox<'a, V>,
    a: Operator<'a, V>,
    ah: Operator<'a, V>,
    x: &'a mut V,
    u: &'a mut V,
    tau: StepSize<V>,
    sigma: StepSize<V>,
    gamma_primal: V::Scalar,
    gamma_dual: V::Scalar,
    theta: V::Scalar,
    work: Option<PdhgWork<V>>,
    state: IterState,
}

impl<'a, V: Vector> PrimalDualHybridGradient<'a, V> {
    #[allow(clippy::too_many_arguments)]
    pub fn new<FC, G, A, AH>(
        proxfc: FC,
        proxg: G,
        a: A,
        ah: AH,
        x: &'a mut V,
        u: &'a mut V,
        tau: StepSize<V>,
        sigma: StepSize<V>,
    ) -> Self
    where
        FC: Fn(&StepSize<V>, &V) -> Result<V, AlgError> + 'a,
        G: Fn(&StepSize<V>, &V) -> Result<V, AlgError> + 'a,
        A: Fn(&V) -> Result<V, AlgError> + 'a,
        AH: Fn(&V) -> Result<V, AlgError> + 'a,
    {
        let state = IterState::new(100, x.device());
        Self {
            proxfc: Box::new(proxfc),
            proxg: Box::new(proxg),
            a: Box::new(a),
            ah: Box::new(ah),
            x,
            u,
            tau,
            sigma,
            gamma_primal: V::Scalar::zero(),
            gamma_dual: V::Scalar::zero(),
            theta: V::Scalar::one(),
            work: None,
            state,
        }
    }

    /// Strong convexity of `g`.
    pub fn with_gamma_primal(mut self, gamma: V::Scalar) -> Self {
        self.gamma_primal = gamma;
        self
    }

    /// Strong convexity of `f*`.
    pub fn with_gamma_dual(mut self, gamma: V::Scalar) -> Self {
        self.gamma_dual = gamma;
        self
    }

    pub fn x(&self) -> &V {
        self.x
    }

    pub fn u(&self) -> &V {
        self.u
    }

    pub fn tau(&self) -> &StepSize<V> {
        &self.tau
    }

    pub fn sigma(&self) -> &StepSize<V> {
        &self.sigma
    }

    /// Extrapolation weight used by the last update.
    pub fn theta(&self) -> V::Scalar {
        self.theta
    }

    fn adapt_steps(&mut self) {
        let zero = V::Scalar::zero();
        let one = V::Scalar::one();
        let two = one + one;
        self.theta = if self.gamma_primal > zero && self.gamma_dual == zero {
            let theta = (one + two * self.gamma_primal * self.tau.min_abs()).sqrt().recip();
            self.tau.mul_scalar(theta);
            self.sigma.div_scalar(theta);
            theta
        } else if self.gamma_primal == zero && self.gamma_dual > zero {
            let theta = (one + two * self.gamma_dual * self.sigma.min_abs()).sqrt().recip();
            self.tau.div_scalar(theta);
            self.sigma.mul_scalar(theta);
            theta
        } else {
            one
        };
    }
}

impl<'a, V: Vector> IterativeAlgorithm for PrimalDualHybridGradient<'a, V> {
    fn name(&self) -> &'static str {
        "PrimalDualHybridGradient"
    }

    fn state(&self) -> &IterState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IterState {
        &mut self.state
    }

    fn init_state(&mut self) -> Result<(), AlgError> {
        let zero = V::Scalar::zero();
        for (name, gamma) in [("gamma_primal", self.gamma_primal), ("gamma_dual", self.gamma_dual)] {
            if gamma < zero {
                return Err(AlgError::InvalidParameter {
                    name,
                    reason: format!("strong convexity must be non-negative, got {gamma:?}"),
                });
            }
        }
        if self.gamma_primal > zero && self.gamma_dual > zero {
            return Err(AlgError::InvalidParameter {
                name: "gamma_dual",
                reason: "at most one of gamma_primal and gamma_dual may be positive".into(),
            });
        }
        self.theta = V::Scalar::one();
        self.work = Some(PdhgWork {
            x_ext: self.x.clone(),
            u_old: self.u.clone(),
            x_old: self.x.clone(),
        });
        Ok(())
    }

    fn step(&mut self) -> Result<(), AlgError> {
        let one = V::Scalar::one();
        let work = self
            .work
            .as_mut()
            .ok_or(AlgError::NotInitialized("PrimalDualHybridGradient"))?;
        work.u_old.move_from(self.u);
        work.x_old.move_from(self.x);

        // u ← proxfc(σ, u + σ·A(x_ext))
        let mut v = self.u.clone();
        v.axpy(one, &self.sigma.apply(&(self.a)(&work.x_ext)?));
        let u_next = (self.proxfc)(&self.sigma, &v)?;
        self.u.move_from(&u_next);

        // x ← proxg(τ, x − τ·AH(u))
        let mut w = self.x.clone();
        w.axpy(-one, &self.tau.apply(&(self.ah)(self.u)?));
        let x_next = (self.proxg)(&self.tau, &w)?;
        self.x.move_from(&x_next);

        self.adapt_steps();

        // x_ext ← x + θ·(x − x_old)
        let work = self
            .work
            .as_mut()
            .ok_or(AlgError::NotInitialized("PrimalDualHybridGradient"))?;
        let mut diff = self.x.clone();
        diff.axpy(-one, &work.x_old);
        work.x_ext.move_from(self.x);
        work.x_ext.axpy(self.theta, &diff);
        Ok(())
    }

    fn release(&mut self) {
        self.work = None;
    }

    fn diagnostics(&self) -> Diagnostics {
        vec![("theta", diag(self.theta))]
    }
}
