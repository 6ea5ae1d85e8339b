//! Error types for the scaling engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while building or driving a `ScalingEngine`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Construction-time misconfiguration. Detected once, at build.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// A caller broke the call contract. Detected synchronously and
    /// never retried — the caller must correct the input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
