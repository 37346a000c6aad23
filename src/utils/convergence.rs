//! Convergence reporting for iterative algorithms.

/// Named diagnostic scalars reported by a solver, e.g. `("resid", 1e-3)`.
pub type Diagnostics = Vec<(&'static str, f64)>;

/// Snapshot passed to a progress sink after every update.
#[derive(Clone, Debug, PartialEq)]
pub struct Progress {
    pub algorithm: &'static str,
    pub iteration: usize,
    pub max_iter: usize,
    pub diagnostics: Diagnostics,
}

/// Outcome of a full `init → update* → cleanup` run.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveStats {
    pub iterations: usize,
    /// True when the solver's own criterion holds at the end of the run,
    /// including when it first holds on the last permitted update.
    pub converged: bool,
    pub diagnostics: Diagnostics,
}

impl SolveStats {
    /// Look up a diagnostic by name.
    pub fn diagnostic(&self, name: &str) -> Option<f64> {
        self.diagnostics
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }
}
