//! Error types for the cost simulator.

use thiserror::Error;

use fleetgrid_engine::EngineError;

/// Result type alias for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A caller supplied unusable parameters. Never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying engine rejected its configuration or an input.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
