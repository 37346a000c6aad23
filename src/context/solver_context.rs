//! Tagged union over the concrete solvers.
//!
//! Each variant wraps one solver; the [`IterativeAlgorithm`] impl forwards
//! every hook to it, so the engine's `init`/`update`/`done`/`cleanup`/`run`
//! behave exactly as on the wrapped solver.

use crate::core::Vector;
use crate::error::AlgError;
use crate::solver::{
    AltMin, ConjugateGradient, GradientMethod, IterState, IterativeAlgorithm, NewtonsMethod,
    PowerMethod, PrimalDualHybridGradient, ProximalPointMethod,
};
use crate::utils::convergence::Diagnostics;

/// Enum representing the available algorithm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    /// Dominant eigenpair by power iteration
    PowerMethod,
    /// Fixed-point iteration of a proximal operator
    ProximalPoint,
    /// (Accelerated, proximal) gradient descent
    Gradient,
    /// Preconditioned conjugate gradient
    ConjugateGradient,
    /// Damped Newton for composite self-concordant objectives
    Newton,
    /// Primal-dual hybrid gradient
    Pdhg,
    /// Two-block alternating minimization
    AltMin,
}

/// Any solver in the crate.
pub enum Solver<'a, V: Vector> {
    PowerMethod(PowerMethod<'a, V>),
    ProximalPoint(ProximalPointMethod<'a, V>),
    Gradient(GradientMethod<'a, V>),
    ConjugateGradient(ConjugateGradient<'a, V>),
    Newton(NewtonsMethod<'a, V>),
    Pdhg(PrimalDualHybridGradient<'a, V>),
    AltMin(AltMin<'a>),
}

macro_rules! dispatch {
    ($self:expr, $alg:ident => $body:expr) => {
        match $self {
            Solver::PowerMethod($alg) => $body,
            Solver::ProximalPoint($alg) => $body,
            Solver::Gradient($alg) => $body,
            Solver::ConjugateGradient($alg) => $body,
            Solver::Newton($alg) => $body,
            Solver::Pdhg($alg) => $body,
            Solver::AltMin($alg) => $body,
        }
    };
}

impl<'a, V: Vector> Solver<'a, V> {
    pub fn kind(&self) -> SolverKind {
        match self {
            Solver::PowerMethod(_) => SolverKind::PowerMethod,
            Solver::ProximalPoint(_) => SolverKind::ProximalPoint,
            Solver::Gradient(_) => SolverKind::Gradient,
            Solver::ConjugateGradient(_) => SolverKind::ConjugateGradient,
            Solver::Newton(_) => SolverKind::Newton,
            Solver::Pdhg(_) => SolverKind::Pdhg,
            Solver::AltMin(_) => SolverKind::AltMin,
        }
    }
}

impl<'a, V: Vector> IterativeAlgorithm for Solver<'a, V> {
    fn name(&self) -> &'static str {
        dispatch!(self, alg => alg.name())
    }

    fn state(&self) -> &IterState {
        dispatch!(self, alg => alg.state())
    }

    fn state_mut(&mut self) -> &mut IterState {
        dispatch!(self, alg => alg.state_mut())
    }

    fn init_state(&mut self) -> Result<(), AlgError> {
        dispatch!(self, alg => alg.init_state())
    }

    fn step(&mut self) -> Result<(), AlgError> {
        dispatch!(self, alg => alg.step())
    }

    fn converged(&self) -> bool {
        dispatch!(self, alg => alg.converged())
    }

    fn should_stop(&self) -> bool {
        dispatch!(self, alg => alg.should_stop())
    }

    fn release(&mut self) {
        dispatch!(self, alg => alg.release())
    }

    fn diagnostics(&self) -> Diagnostics {
        dispatch!(self, alg => alg.diagnostics())
    }
}

macro_rules! impl_from {
    ($variant:ident, $ty:ty) => {
        impl<'a, V: Vector> From<$ty> for Solver<'a, V> {
            fn from(alg: $ty) -> Self {
                Solver::$variant(alg)
            }
        }
    };
}

impl_from!(PowerMethod, PowerMethod<'a, V>);
impl_from!(ProximalPoint, ProximalPointMethod<'a, V>);
impl_from!(Gradient, GradientMethod<'a, V>);
impl_from!(ConjugateGradient, ConjugateGradient<'a, V>);
impl_from!(Newton, NewtonsMethod<'a, V>);
impl_from!(Pdhg, PrimalDualHybridGradient<'a, V>);
impl_from!(AltMin, AltMin<'a>);
