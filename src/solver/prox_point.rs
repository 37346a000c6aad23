//! Proximal point method: `x ← prox_{αf}(x)`.

use crate::core::{StepSize, Vector};
use crate::error::AlgError;
use crate::solver::{IterState, IterativeAlgorithm, Prox};

pub struct ProximalPointMethod<'a, V: Vector> {
    proxf: Prox<'a, V>,
    alpha: StepSize<V>,
    x: &'a mut V,
    state: IterState,
}

impl<'a, V: Vector> ProximalPointMethod<'a, V> {
    pub fn new<P>(proxf: P, alpha: StepSize<V>, x: &'a mut V) -> Self
    where
        P: Fn(&StepSize<V>, &V) -> Result<V, AlgError> + 'a,
    {
        let state = IterState::new(100, x.device());
        Self {
            proxf: Box::new(proxf),
            alpha,
            x,
            state,
        }
    }

    pub fn x(&self) -> &V {
        self.x
    }

    pub fn alpha(&self) -> &StepSize<V> {
        &self.alpha
    }
}

impl<'a, V: Vector> IterativeAlgorithm for ProximalPointMethod<'a, V> {
    fn name(&self) -> &'static str {
        "ProximalPointMethod"
    }

    fn state(&self) -> &IterState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IterState {
        &mut self.state
    }

    fn step(&mut self) -> Result<(), AlgError> {
        let next = (self.proxf)(&self.alpha, self.x)?;
        self.x.move_from(&next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // prox of f(x) = ½‖x − c‖²: (v + α c) / (1 + α)
    fn prox_quadratic(c: Vec<f64>) -> impl Fn(&StepSize<Vec<f64>>, &Vec<f64>) -> Result<Vec<f64>, AlgError> {
        move |alpha: &StepSize<Vec<f64>>, v: &Vec<f64>| -> Result<Vec<f64>, AlgError> {
            let a = alpha.as_scalar().ok_or(AlgError::Unsupported("array step"))?;
            Ok(v.iter().zip(&c).map(|(vi, ci)| (vi + a * ci) / (1.0 + a)).collect())
        }
    }

    #[test]
    fn contracts_towards_minimizer() {
        let mut x = vec![10.0, -10.0];
        let mut alg = ProximalPointMethod::new(prox_quadratic(vec![1.0, 2.0]), StepSize::Scalar(1.0), &mut x)
            .with_max_iter(60);
        let stats = alg.run().unwrap();
        assert_eq!(stats.iterations, 60);
        drop(alg);
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn operator_error_propagates_without_counting() {
        let mut x = vec![0.0];
        let mut alg = ProximalPointMethod::new(prox_quadratic(vec![0.0]), StepSize::Array(vec![1.0]), &mut x);
        alg.init().unwrap();
        assert_eq!(alg.update(), Err(AlgError::Unsupported("array step")));
        assert_eq!(alg.iteration(), 0);
    }
}
