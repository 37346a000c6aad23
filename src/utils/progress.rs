//! Progress sinks.
//!
//! A sink is started by `init()`, fed one [`Progress`] per `update()`, and
//! finished by `cleanup()`. Closures taking `&Progress` are sinks, which is
//! the usual way to collect a residual history in tests.

use tracing::{debug, info};

use crate::utils::convergence::Progress;

pub trait ProgressSink {
    fn start(&mut self, _algorithm: &'static str, _max_iter: usize) {}
    fn report(&mut self, progress: &Progress);
    fn finish(&mut self) {}
}

impl<F: FnMut(&Progress)> ProgressSink for F {
    fn report(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Default sink: emits progress as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingProgress {
    algorithm: &'static str,
    last_iteration: usize,
}

impl ProgressSink for TracingProgress {
    fn start(&mut self, algorithm: &'static str, max_iter: usize) {
        self.algorithm = algorithm;
        self.last_iteration = 0;
        info!(algorithm, max_iter, "starting");
    }

    fn report(&mut self, progress: &Progress) {
        self.last_iteration = progress.iteration;
        debug!(
            algorithm = progress.algorithm,
            iteration = progress.iteration,
            max_iter = progress.max_iter,
            diagnostics = ?progress.diagnostics,
            "update"
        );
    }

    fn finish(&mut self) {
        info!(algorithm = self.algorithm, iterations = self.last_iteration, "finished");
    }
}
