//! Context module for iteralg.
//!
//! This module provides [`Solver`], a closed set of every algorithm in the
//! crate behind one type, so that drivers can hold and run any of them
//! uniformly through [`IterativeAlgorithm`](crate::solver::IterativeAlgorithm).
//!
//! # Example
//! ```rust
//! use iteralg::{AlgError, IterativeAlgorithm, PowerMethod, Solver, SolverKind};
//!
//! let mut x = vec![1.0, 1.0];
//! let a = |v: &Vec<f64>| -> Result<Vec<f64>, AlgError> { Ok(vec![3.0 * v[0], v[1]]) };
//! let mut solver = Solver::from(PowerMethod::new(a, &mut x).with_max_iter(50));
//! assert_eq!(solver.kind(), SolverKind::PowerMethod);
//! solver.run().unwrap();
//! ```

pub mod solver_context;
pub use solver_context::{Solver, SolverKind};
