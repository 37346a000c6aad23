//! iteralg: iterative optimization algorithms over a pluggable vector backend
//!
//! This crate provides a uniform `init → update* → done → cleanup` engine and a set of
//! solvers built on it: power iteration, proximal point, (accelerated, proximal) gradient
//! descent, preconditioned conjugate gradient, damped Newton, primal-dual hybrid gradient
//! and alternating minimization. Solvers only see arrays through the traits in [`core`],
//! and every phase runs bound to the device the solver's variables live on.

pub mod config;
pub mod context;
pub mod core;
pub mod device;
pub mod error;
pub mod matrix;
pub mod preconditioner;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use self::core::*;
pub use device::*;
pub use error::*;
pub use preconditioner::*;
pub use solver::*;
pub use utils::*;

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::SolveStats;
