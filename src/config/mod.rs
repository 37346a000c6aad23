pub mod options;
pub use options::AlgOptions;
