//! Step sizes that are either a single scalar or one value per entry.

use num_traits::Float;

use crate::core::traits::{InnerProduct, VectorOps};

/// A step size such as `α`, `τ` or `σ`.
#[derive(Clone, Debug, PartialEq)]
pub enum StepSize<V: InnerProduct> {
    Scalar(V::Scalar),
    Array(V),
}

impl<V: VectorOps> StepSize<V> {
    /// Returns `step · v` (elementwise for array steps).
    pub fn apply(&self, v: &V) -> V {
        let mut out = v.clone();
        match self {
            StepSize::Scalar(s) => out.scale(*s),
            StepSize::Array(a) => out.mul_elementwise(a),
        }
        out
    }

    /// `min |step|`
    pub fn min_abs(&self) -> V::Scalar {
        match self {
            StepSize::Scalar(s) => s.abs(),
            StepSize::Array(a) => a.min_abs(),
        }
    }

    /// step ← step · factor, in place.
    pub fn mul_scalar(&mut self, factor: V::Scalar) {
        match self {
            StepSize::Scalar(s) => *s = *s * factor,
            StepSize::Array(a) => a.scale(factor),
        }
    }

    /// step ← step / factor, in place.
    pub fn div_scalar(&mut self, factor: V::Scalar) {
        match self {
            StepSize::Scalar(s) => *s = *s / factor,
            StepSize::Array(a) => a.scale(factor.recip()),
        }
    }

    pub fn as_scalar(&self) -> Option<V::Scalar> {
        match self {
            StepSize::Scalar(s) => Some(*s),
            StepSize::Array(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_step_scales_elementwise() {
        let step: StepSize<Vec<f64>> = StepSize::Array(vec![1.0, 0.5, -2.0]);
        assert_eq!(step.apply(&vec![2.0, 2.0, 2.0]), vec![2.0, 1.0, -4.0]);
        assert_eq!(step.min_abs(), 0.5);
    }

    #[test]
    fn scalar_step_adapts_in_place() {
        let mut step: StepSize<Vec<f64>> = StepSize::Scalar(2.0);
        step.mul_scalar(0.5);
        assert_eq!(step.as_scalar(), Some(1.0));
        step.div_scalar(0.25);
        assert_eq!(step.as_scalar(), Some(4.0));
    }
}
