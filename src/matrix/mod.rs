//! Matrix module: dense matrices as operators.

pub mod dense;
pub use dense::{adjoint_operator, operator};
