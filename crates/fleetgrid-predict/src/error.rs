//! Error types for load forecasting.

use thiserror::Error;

/// Errors that can occur while building or running a predictor.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The identifier does not name any registered model.
    #[error("unknown model {0:?}")]
    UnknownModel(String),

    /// The model exists but cannot serve forecasts right now, typically
    /// because its artifact is missing or unreadable.
    #[error("model {model:?} is unavailable: {reason}")]
    Unavailable { model: String, reason: String },

    /// Forecasting needs at least one history point.
    #[error("history is empty")]
    EmptyHistory,
}
