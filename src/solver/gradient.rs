//! First-order (proximal, optionally accelerated) gradient method.
//!
//! Minimizes `f(x) + g(x)` where `f` is smooth with gradient `gradf` and `g`
//! has a cheap proximal operator `proxg`. Without `proxg` this is plain
//! gradient descent. With `accelerate` the iterates follow Nesterov's
//! momentum sequence (FISTA when `proxg` is present).
//!
//! # References
//! - Nesterov, Y. E. (1983). A method for solving the convex programming problem
//!   with convergence rate O(1/k²). Dokl. Akad. Nauk SSSR, 269, 543-547.
//! - Beck, A., & Teboulle, M. (2009). A fast iterative shrinkage-thresholding
//!   algorithm for linear inverse problems. SIAM J. Imaging Sci., 2(1), 183-202.

use num_traits::{Float, One, Zero};
use tracing::debug;

use crate::core::{StepSize, Vector};
use crate::error::AlgError;
use crate::solver::{diag, IterState, IterativeAlgorithm, Operator, Prox};
use crate::utils::convergence::Diagnostics;

/// Momentum state, present only when accelerating.
struct Momentum<V: Vector> {
    /// Extrapolated point.
    z: V,
    t: V::Scalar,
}

struct GradientWork<V: Vector> {
    momentum: Option<Momentum<V>>,
    /// Previous iterate, kept when accelerating or taking a proximal step.
    x_old: Option<V>,
}

pub struct GradientMethod<'a, V: Vector> {
    gradf: Operator<'a, V>,
    proxg: Option<Prox<'a, V>>,
    alpha: V::Scalar,
    accelerate: bool,
    x: &'a mut V,
    work: Option<GradientWork<V>>,
    residual: V::Scalar,
    state: IterState,
}

impl<'a, V: Vector> GradientMethod<'a, V> {
    pub fn new<G>(gradf: G, x: &'a mut V, alpha: V::Scalar) -> Self
    where
        G: Fn(&V) -> Result<V, AlgError> + 'a,
    {
        let state = IterState::new(100, x.device());
        Self {
            gradf: Box::new(gradf),
            proxg: None,
            alpha,
            accelerate: false,
            x,
            work: None,
            residual: V::Scalar::infinity(),
            state,
        }
    }

    /// Add the proximal step for the non-smooth term `g`.
    pub fn with_prox<P>(mut self, proxg: P) -> Self
    where
        P: Fn(&StepSize<V>, &V) -> Result<V, AlgError> + 'a,
    {
        self.proxg = Some(Box::new(proxg));
        self
    }

    pub fn accelerated(mut self, accelerate: bool) -> Self {
        self.accelerate = accelerate;
        self
    }

    pub fn residual(&self) -> V::Scalar {
        self.residual
    }

    pub fn x(&self) -> &V {
        self.x
    }

    fn tracks_old_iterate(&self) -> bool {
        self.accelerate || self.proxg.is_some()
    }
}

impl<'a, V: Vector> IterativeAlgorithm for GradientMethod<'a, V> {
    fn name(&self) -> &'static str {
        "GradientMethod"
    }

    fn state(&self) -> &IterState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IterState {
        &mut self.state
    }

    fn init_state(&mut self) -> Result<(), AlgError> {
        if !(self.alpha > V::Scalar::zero()) {
            return Err(AlgError::InvalidParameter {
                name: "alpha",
                reason: format!("step size must be positive, got {:?}", self.alpha),
            });
        }
        let momentum = self.accelerate.then(|| Momentum {
            z: self.x.clone(),
            t: V::Scalar::one(),
        });
        let x_old = self.tracks_old_iterate().then(|| self.x.clone());
        self.work = Some(GradientWork { momentum, x_old });
        self.residual = V::Scalar::infinity();
        Ok(())
    }

    fn step(&mut self) -> Result<(), AlgError> {
        let work = self.work.as_mut().ok_or(AlgError::NotInitialized("GradientMethod"))?;
        if let Some(x_old) = work.x_old.as_mut() {
            x_old.move_from(self.x);
        }
        if let Some(momentum) = work.momentum.as_ref() {
            self.x.move_from(&momentum.z);
        }

        let gradf_x = (self.gradf)(self.x)?;
        self.x.axpy(-self.alpha, &gradf_x);

        if let Some(proxg) = self.proxg.as_ref() {
            let next = proxg(&StepSize::Scalar(self.alpha), self.x)?;
            self.x.move_from(&next);
        }

        self.residual = match work.x_old.as_ref() {
            Some(x_old) => {
                let mut diff = self.x.clone();
                diff.axpy(-V::Scalar::one(), x_old);
                if let Some(momentum) = work.momentum.as_mut() {
                    let one = V::Scalar::one();
                    let two = one + one;
                    let t_old = momentum.t;
                    let t_new = (one + (one + two * two * t_old * t_old).sqrt()) / two;
                    momentum.z.move_from(self.x);
                    momentum.z.axpy((t_old - one) / t_new, &diff);
                    momentum.t = t_new;
                }
                diff.norm() / self.alpha.sqrt()
            }
            None => gradf_x.norm(),
        };
        if self.residual == V::Scalar::zero() {
            debug!(iteration = self.state.iteration(), "gradient method reached an exact fixed point");
        }
        Ok(())
    }

    fn converged(&self) -> bool {
        self.residual == V::Scalar::zero()
    }

    fn release(&mut self) {
        self.work = None;
    }

    fn diagnostics(&self) -> Diagnostics {
        vec![("resid", diag(self.residual))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn identity_grad(x: &Vec<f64>) -> Result<Vec<f64>, AlgError> {
        Ok(x.clone())
    }

    // prox of λ‖x‖₁: soft thresholding
    fn soft_threshold(lambda: f64) -> impl Fn(&StepSize<Vec<f64>>, &Vec<f64>) -> Result<Vec<f64>, AlgError> {
        move |alpha: &StepSize<Vec<f64>>, v: &Vec<f64>| -> Result<Vec<f64>, AlgError> {
            let t = lambda * alpha.min_abs();
            Ok(v.iter().map(|vi| vi.signum() * (vi.abs() - t).max(0.0)).collect())
        }
    }

    #[test]
    fn plain_descent_is_geometric() {
        let x0 = vec![3.0, -1.0, 0.5];
        let mut x = x0.clone();
        let alpha = 0.25;
        let mut alg = GradientMethod::new(identity_grad, &mut x, alpha).with_max_iter(12);
        alg.init().unwrap();
        for k in 1..=12 {
            alg.update().unwrap();
            let factor = (1.0f64 - alpha).powi(k);
            for (xi, x0i) in alg.x().iter().zip(&x0) {
                assert_relative_eq!(*xi, factor * x0i, max_relative = 1e-12);
            }
        }
        assert!(alg.done());
        alg.cleanup();
    }

    #[test]
    fn unstable_step_diverges() {
        let mut x = vec![1.0, 1.0];
        let mut alg = GradientMethod::new(identity_grad, &mut x, 2.5).with_max_iter(20);
        alg.init().unwrap();
        alg.update().unwrap();
        for _ in 0..19 {
            let last = alg.residual();
            alg.update().unwrap();
            assert!(alg.residual() > last);
        }
        assert!(alg.residual() > 1e3);
    }

    #[test]
    fn exact_minimizer_stops_on_zero_residual() {
        let mut x = vec![4.0, -2.0];
        let mut alg = GradientMethod::new(identity_grad, &mut x, 1.0).with_max_iter(50);
        let stats = alg.run().unwrap();
        // one step of length 1 lands on zero, the next reports a zero gradient
        assert_eq!(stats.iterations, 2);
        assert!(stats.converged);
    }

    #[test]
    fn zero_residual_on_last_step_counts_as_converged() {
        let mut x = vec![4.0, -2.0];
        let mut alg = GradientMethod::new(identity_grad, &mut x, 1.0).with_max_iter(2);
        let stats = alg.run().unwrap();
        assert_eq!(stats.iterations, 2);
        assert!(stats.converged);
        assert_eq!(stats.diagnostic("resid"), Some(0.0));
    }

    #[test]
    fn ista_and_fista_agree_on_lasso_solution() {
        // min ½‖x − b‖² + ‖x‖₁ has solution soft(b, 1)
        let b = vec![3.0, -0.5, -2.0];
        let grad = |x: &Vec<f64>| -> Result<Vec<f64>, AlgError> {
            Ok(x.iter().zip(&b).map(|(xi, bi)| xi - bi).collect())
        };
        let expected = [2.0, 0.0, -1.0];

        for accelerate in [false, true] {
            let mut x = vec![0.0; 3];
            let mut alg = GradientMethod::new(grad, &mut x, 0.5)
                .with_prox(soft_threshold(1.0))
                .accelerated(accelerate)
                .with_max_iter(200);
            alg.run().unwrap();
            drop(alg);
            for (xi, ei) in x.iter().zip(&expected) {
                assert_relative_eq!(*xi, *ei, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn nesterov_extrapolation_follows_momentum_sequence() {
        // f = ½‖x‖², α = ½: each gradient step halves the extrapolated point z
        let x0 = [4.0, -2.0];
        let mut x = x0.to_vec();
        let alpha = 0.5;
        let mut alg = GradientMethod::new(identity_grad, &mut x, alpha).accelerated(true);
        alg.init().unwrap();

        // t₁ = 1 gives zero momentum, z₁ = x₁ = x₀/2
        alg.update().unwrap();
        for (xi, x0i) in alg.x().iter().zip(&x0) {
            assert_relative_eq!(*xi, 0.5 * x0i, max_relative = 1e-15);
        }
        let x0_norm = (x0[0] * x0[0] + x0[1] * x0[1]).sqrt();
        assert_relative_eq!(alg.residual(), 0.5 * x0_norm / alpha.sqrt(), max_relative = 1e-14);

        alg.update().unwrap();
        for (xi, x0i) in alg.x().iter().zip(&x0) {
            assert_relative_eq!(*xi, 0.25 * x0i, max_relative = 1e-15);
        }

        // z₂ = x₂ + ((t₁ − 1)/t₂)(x₂ − x₁), x₃ = z₂/2
        let t1 = (1.0 + 5f64.sqrt()) / 2.0;
        let t2 = (1.0 + (1.0 + 4.0 * t1 * t1).sqrt()) / 2.0;
        let z2 = 0.25 - (t1 - 1.0) / t2 * 0.25;
        alg.update().unwrap();
        for (xi, x0i) in alg.x().iter().zip(&x0) {
            assert_relative_eq!(*xi, 0.5 * z2 * x0i, max_relative = 1e-14);
        }
        let step = (0.25 - 0.5 * z2) * x0_norm;
        assert_relative_eq!(alg.residual(), step / alpha.sqrt(), max_relative = 1e-14);
    }

    #[test]
    fn momentum_buffers_follow_configuration() {
        let mut x = vec![1.0];
        let mut alg = GradientMethod::new(identity_grad, &mut x, 0.1);
        alg.init().unwrap();
        let work = alg.work.as_ref().unwrap();
        assert!(work.momentum.is_none() && work.x_old.is_none());
        alg.cleanup();
        assert!(alg.work.is_none());

        let mut y = vec![1.0];
        let mut alg = GradientMethod::new(identity_grad, &mut y, 0.1).accelerated(true);
        alg.init().unwrap();
        let work = alg.work.as_ref().unwrap();
        assert!(work.momentum.is_some() && work.x_old.is_some());
        alg.cleanup();
        assert!(alg.work.is_none());
        assert_eq!(alg.update(), Err(AlgError::NotInitialized("GradientMethod")));
    }
}
