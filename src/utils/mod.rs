pub mod convergence;
pub mod progress;

pub use convergence::{Diagnostics, Progress, SolveStats};
pub use progress::{ProgressSink, TracingProgress};
