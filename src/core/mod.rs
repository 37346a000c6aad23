//! Numeric operation interface and its stock implementations.

pub mod step;
pub mod traits;
pub mod wrappers;

pub use step::StepSize;
pub use traits::{InnerProduct, MatTransVec, MatVec, Vector, VectorOps};
