//! Error types for the generation pipeline.
//!
//! Only hard failures live here. Format drift and structural non-compliance
//! are recovered inside the revision loop and surface as data (a
//! `RevisionOutcome` with an `Exhausted` verdict), never as errors.

use thiserror::Error;

use lectern_abstraction::ModelError;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// A hard failure of one pipeline invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An oracle failed at the transport level (network, quota, timeout).
    /// Fatal to the invocation; never retried by the pipeline.
    #[error("Oracle error: {0}")]
    Model(#[from] ModelError),

    /// The extraction collaborator failed to supply content segments.
    #[error("Content source error: {0}")]
    Source(String),

    /// The persistence collaborator rejected the assembled plan.
    #[error("Plan store error: {0}")]
    Store(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_converts() {
        let err: PipelineError = ModelError::RequestError("timeout".to_string()).into();
        assert!(matches!(err, PipelineError::Model(_)));
        assert!(err.to_string().contains("timeout"));
    }
}
