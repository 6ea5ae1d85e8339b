//! The `Predictor` trait and model registry.

use std::path::Path;

use serde::{Deserialize, Serialize};

use fleetgrid_core::{LoadSample, Timestamp};

use crate::error::PredictError;
use crate::learned::LearnedPredictor;
use crate::statistical::{LinearTrendPredictor, MovingAveragePredictor};

/// Seconds between consecutive forecast points.
pub const FORECAST_STEP_SECS: u64 = 60;

/// One forecasted point on the one-minute grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: Timestamp,
    pub predicted_load: f64,
}

/// A forecast plus the metadata callers display alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub model: String,
    pub points: Vec<ForecastPoint>,
}

/// Capability interface for load forecasting.
pub trait Predictor {
    /// Model identifier, as accepted by [`predictor_for`].
    fn name(&self) -> &str;

    /// Forecast `horizon` one-minute steps past the newest history point.
    ///
    /// A zero horizon yields an empty forecast; an empty history is
    /// [`PredictError::EmptyHistory`]. Forecasts are clamped at zero —
    /// a negative load is never predicted.
    fn predict(
        &self,
        history: &[LoadSample],
        horizon: u32,
    ) -> Result<Vec<ForecastPoint>, PredictError>;
}

/// Model identifiers the registry accepts.
pub const MODEL_IDS: &[&str] = &["moving_average", "linear_trend", "arima", "prophet", "lstm"];

/// Build a predictor for `model_id`.
///
/// Learned-family models resolve their artifact under `model_dir`; the
/// artifact is only opened at predict time, so construction always
/// succeeds for known identifiers.
pub fn predictor_for(
    model_id: &str,
    model_dir: &Path,
) -> Result<Box<dyn Predictor>, PredictError> {
    match model_id.to_ascii_lowercase().as_str() {
        "moving_average" => Ok(Box::new(MovingAveragePredictor::default())),
        "linear_trend" => Ok(Box::new(LinearTrendPredictor)),
        "arima" => Ok(Box::new(LearnedPredictor::new(
            "arima",
            model_dir.join("arima_model.json"),
        ))),
        "prophet" => Ok(Box::new(LearnedPredictor::new(
            "prophet",
            model_dir.join("prophet_model.json"),
        ))),
        "lstm" => Ok(Box::new(LearnedPredictor::new(
            "lstm",
            model_dir.join("lstm_model.json"),
        ))),
        other => Err(PredictError::UnknownModel(other.to_string())),
    }
}

/// Sort history by timestamp, rejecting empty input.
pub(crate) fn sorted_history(history: &[LoadSample]) -> Result<Vec<LoadSample>, PredictError> {
    if history.is_empty() {
        return Err(PredictError::EmptyHistory);
    }
    let mut sorted = history.to_vec();
    sorted.sort_by_key(|s| s.timestamp);
    Ok(sorted)
}

/// Lay `values` out on the minute grid after `last_timestamp`.
pub(crate) fn on_minute_grid(
    last_timestamp: Timestamp,
    values: impl IntoIterator<Item = f64>,
) -> Vec<ForecastPoint> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, predicted_load)| ForecastPoint {
            timestamp: last_timestamp + (i as u64 + 1) * FORECAST_STEP_SECS,
            predicted_load: predicted_load.max(0.0),
        })
        .collect()
}
