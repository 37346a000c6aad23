//! Iteration engine & solver implementations.
//!
//! Every solver is a state machine driven through the same four phases:
//! `init`, then `update` until `done`, then `cleanup`. The phases are provided
//! methods of [`IterativeAlgorithm`]; a solver only supplies the hooks
//! (`init_state`, `step`, `converged`/`should_stop`, `release`) and its
//! named diagnostics. The engine owns iteration counting, progress reporting
//! and device scoping.

use num_traits::Float;
use tracing::{trace, warn};

use crate::config::AlgOptions;
use crate::core::StepSize;
use crate::device::Device;
use crate::error::AlgError;
use crate::utils::convergence::{Diagnostics, Progress, SolveStats};
use crate::utils::progress::{ProgressSink, TracingProgress};

/// Unary operator: linear map, adjoint, gradient or Hessian action.
pub type Operator<'a, V> = Box<dyn Fn(&V) -> Result<V, AlgError> + 'a>;

/// Proximal operator `(step, v) ↦ prox_{step·h}(v)`.
pub type Prox<'a, V> = Box<dyn Fn(&StepSize<V>, &V) -> Result<V, AlgError> + 'a>;

/// Engine-owned bookkeeping shared by every solver.
pub struct IterState {
    iteration: usize,
    max_iter: usize,
    device: Device,
    progress: Option<Box<dyn ProgressSink>>,
    /// Set by `begin`, cleared by `end`.
    started: bool,
}

impl IterState {
    pub fn new(max_iter: usize, device: Device) -> Self {
        Self {
            iteration: 0,
            max_iter,
            device,
            progress: Some(Box::new(TracingProgress::default())),
            started: false,
        }
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// `iteration >= max_iter`
    pub fn exhausted(&self) -> bool {
        self.iteration >= self.max_iter
    }

    /// True while running the final permitted update.
    pub fn is_last_iteration(&self) -> bool {
        self.iteration + 1 >= self.max_iter
    }

    fn apply_options(&mut self, options: AlgOptions) {
        if let Some(max_iter) = options.max_iter {
            self.max_iter = max_iter;
        }
        if let Some(device) = options.device {
            self.device = device;
        }
        self.progress = if options.progress {
            Some(Box::new(TracingProgress::default()))
        } else {
            None
        };
    }

    fn begin(&mut self, algorithm: &'static str) {
        self.iteration = 0;
        self.started = true;
        if let Some(sink) = self.progress.as_mut() {
            sink.start(algorithm, self.max_iter);
        }
    }

    fn advance(&mut self, algorithm: &'static str, diagnostics: Diagnostics) {
        self.iteration += 1;
        if let Some((name, value)) = diagnostics.iter().find(|(_, v)| !v.is_finite()) {
            warn!(algorithm, iteration = self.iteration, name, value, "non-finite diagnostic");
        }
        if let Some(sink) = self.progress.as_mut() {
            sink.report(&Progress {
                algorithm,
                iteration: self.iteration,
                max_iter: self.max_iter,
                diagnostics,
            });
        }
    }

    fn end(&mut self) {
        if !std::mem::take(&mut self.started) {
            return;
        }
        if let Some(sink) = self.progress.as_mut() {
            sink.finish();
        }
    }
}

impl std::fmt::Debug for IterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IterState")
            .field("iteration", &self.iteration)
            .field("max_iter", &self.max_iter)
            .field("device", &self.device)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Lossy conversion of a solver scalar for diagnostics.
pub(crate) fn diag<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// The four-phase lifecycle every solver honors.
pub trait IterativeAlgorithm {
    fn name(&self) -> &'static str;
    fn state(&self) -> &IterState;
    fn state_mut(&mut self) -> &mut IterState;

    /// Allocate auxiliary state. Runs under the device scope.
    fn init_state(&mut self) -> Result<(), AlgError> {
        Ok(())
    }

    /// One step of the recurrence. Runs under the device scope.
    fn step(&mut self) -> Result<(), AlgError>;

    /// Solver-specific numerical stopping criterion.
    fn converged(&self) -> bool {
        false
    }

    /// Termination predicate.
    fn should_stop(&self) -> bool {
        self.state().exhausted() || self.converged()
    }

    /// Drop auxiliary state allocated by `init_state`.
    fn release(&mut self) {}

    /// Named scalars reported to the progress sink.
    fn diagnostics(&self) -> Diagnostics {
        Vec::new()
    }

    fn iteration(&self) -> usize {
        self.state().iteration()
    }

    fn max_iter(&self) -> usize {
        self.state().max_iter()
    }

    fn device(&self) -> Device {
        self.state().device()
    }

    fn init(&mut self) -> Result<(), AlgError> {
        let name = self.name();
        if self.state().max_iter == 0 {
            return Err(AlgError::InvalidParameter {
                name: "max_iter",
                reason: "must be positive".into(),
            });
        }
        self.state_mut().begin(name);
        let _guard = self.device().enter();
        trace!(algorithm = name, "init");
        self.init_state()
    }

    fn update(&mut self) -> Result<(), AlgError> {
        let _guard = self.device().enter();
        self.step()?;
        let name = self.name();
        let diagnostics = self.diagnostics();
        self.state_mut().advance(name, diagnostics);
        trace!(algorithm = name, iteration = self.iteration(), "update");
        Ok(())
    }

    fn done(&self) -> bool {
        let _guard = self.device().enter();
        self.should_stop()
    }

    fn cleanup(&mut self) {
        self.state_mut().end();
        let _guard = self.device().enter();
        trace!(algorithm = self.name(), "cleanup");
        self.release();
    }

    /// `init`, `update` until `done`, `cleanup`. Cleanup also runs when a
    /// phase fails; the error is returned unchanged.
    fn run(&mut self) -> Result<SolveStats, AlgError> {
        if let Err(e) = self.init() {
            self.cleanup();
            return Err(e);
        }
        while !self.done() {
            if let Err(e) = self.update() {
                self.cleanup();
                return Err(e);
            }
        }
        let stats = SolveStats {
            iterations: self.iteration(),
            converged: self.converged(),
            diagnostics: self.diagnostics(),
        };
        self.cleanup();
        Ok(stats)
    }

    fn with_options(mut self, options: AlgOptions) -> Self
    where
        Self: Sized,
    {
        self.state_mut().apply_options(options);
        self
    }

    fn with_max_iter(mut self, max_iter: usize) -> Self
    where
        Self: Sized,
    {
        self.state_mut().max_iter = max_iter;
        self
    }

    /// Replace the progress sink.
    fn with_monitor<S: ProgressSink + 'static>(mut self, sink: S) -> Self
    where
        Self: Sized,
    {
        self.state_mut().progress = Some(Box::new(sink));
        self
    }
}

pub mod alt_min;
pub use alt_min::AltMin;

pub mod cg;
pub use cg::ConjugateGradient;

pub mod gradient;
pub use gradient::GradientMethod;

pub mod newton;
pub use newton::NewtonsMethod;

pub mod pdhg;
pub use pdhg::PrimalDualHybridGradient;

pub mod power;
pub use power::PowerMethod;

pub mod prox_point;
pub use prox_point::ProximalPointMethod;
