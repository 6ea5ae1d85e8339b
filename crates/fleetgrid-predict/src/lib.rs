//! fleetgrid-predict — the load forecasting capability interface.
//!
//! A [`Predictor`] turns load history into a short forecast on a
//! one-minute grid. Two model families exist:
//!
//! - **statistical** (`moving_average`, `linear_trend`) — computed
//!   directly from the history, always available;
//! - **learned** (`arima`, `prophet`, `lstm`) — backed by an artifact
//!   trained offline. A missing or unreadable artifact is an explicit
//!   [`PredictError::Unavailable`], never a silent fall-back to
//!   fabricated numbers.
//!
//! The scaling engine never depends on this crate: it consumes a single
//! scalar load. Wiring a forecast into a decision is the caller's job.

pub mod error;
pub mod learned;
pub mod model;
pub mod statistical;

pub use error::PredictError;
pub use learned::LearnedPredictor;
pub use model::{Forecast, ForecastPoint, MODEL_IDS, Predictor, predictor_for, FORECAST_STEP_SECS};
pub use statistical::{LinearTrendPredictor, MovingAveragePredictor};
