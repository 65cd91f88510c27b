//! Unified error type for the multigrid engine.
//!
//! Two fatal error kinds: configuration problems, caught before a single
//! V-cycle runs, and MPI communication failures, which abort the process
//! group. There is deliberately no `ConvergenceWarning` variant here — an
//! exhausted `vcCount` is a successful return (see [`crate::SolveOutcome`]),
//! not an `Err`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MgError {
    /// Inconsistent configuration: rank-count mismatch, `vcDepth` too deep
    /// for the local extents, a malformed domain/periodicity combination,
    /// or a tolerance too tight for the build's precision.
    #[error("configuration error: {0}")]
    Config(String),

    /// MPI failure during halo exchange or a collective reduction. Fatal;
    /// there is no retry policy.
    #[error("MPI communication error: {0}")]
    Comm(String),
}

pub type MgResult<T> = Result<T, MgError>;

impl From<String> for MgError {
    fn from(s: String) -> Self {
        MgError::Config(s)
    }
}

impl From<&str> for MgError {
    fn from(s: &str) -> Self {
        MgError::Config(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = MgError::Config("vcDepth too deep for local extent".into());
        assert!(err.to_string().contains("configuration error"));
        assert!(err.to_string().contains("vcDepth"));
    }

    #[test]
    fn comm_error_display() {
        let err = MgError::Comm("MPI_Allreduce failed".into());
        assert!(err.to_string().contains("MPI communication error"));
    }

    #[test]
    fn question_mark_propagates() {
        fn inner() -> MgResult<()> {
            Err(MgError::Config("bad".into()))
        }
        fn outer() -> MgResult<()> {
            inner()?;
            Ok(())
        }
        assert!(outer().is_err());
    }
}
