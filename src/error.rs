use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

// Unified error type for iteralg

#[derive(Error, Debug, Clone)]
pub enum AlgError {
    /// Raised by a caller-supplied operator; passed through `update()` untouched.
    #[error("operator error: {0}")]
    Operator(String),
    /// Caller operator failure that keeps its original error as the source.
    #[error("operator error: {0}")]
    External(#[source] Arc<dyn StdError + Send + Sync>),
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("{0} used before init() or after cleanup()")]
    NotInitialized(&'static str),
    #[error("right-hand side already consumed by a previous init()")]
    RhsConsumed,
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl AlgError {
    /// Wrap an operator's own error type.
    pub fn external<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        AlgError::External(Arc::new(err))
    }
}

/// `External` errors compare by identity.
impl PartialEq for AlgError {
    fn eq(&self, other: &Self) -> bool {
        use AlgError::*;
        match (self, other) {
            (Operator(a), Operator(b)) => a == b,
            (External(a), External(b)) => Arc::ptr_eq(a, b),
            (
                DimensionMismatch { expected: e1, found: f1 },
                DimensionMismatch { expected: e2, found: f2 },
            ) => e1 == e2 && f1 == f2,
            (
                InvalidParameter { name: n1, reason: r1 },
                InvalidParameter { name: n2, reason: r2 },
            ) => n1 == n2 && r1 == r2,
            (NotInitialized(a), NotInitialized(b)) => a == b,
            (RhsConsumed, RhsConsumed) => true,
            (Unsupported(a), Unsupported(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn external_keeps_source() {
        let err = AlgError::external(io::Error::new(io::ErrorKind::Other, "device lost"));
        assert_eq!(err.to_string(), "operator error: device lost");
        assert_eq!(err.source().unwrap().to_string(), "device lost");
        assert_eq!(err.clone(), err);
        assert_ne!(err, AlgError::external(io::Error::new(io::ErrorKind::Other, "device lost")));
    }
}
