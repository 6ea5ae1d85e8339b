//! Learned-family predictors — artifact-backed autoregressive models.
//!
//! Artifacts are trained offline and shipped as JSON next to the
//! deployment: a set of autoregressive coefficients plus an intercept.
//! The artifact is opened lazily at predict time, and any problem with
//! it — missing file, malformed JSON, no coefficients — surfaces as
//! [`PredictError::Unavailable`] rather than degrading to made-up data.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use fleetgrid_core::LoadSample;

use crate::error::PredictError;
use crate::model::{ForecastPoint, Predictor, on_minute_grid, sorted_history};

/// On-disk shape of a trained model artifact.
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    /// Autoregressive coefficients, most recent lag first.
    coefficients: Vec<f64>,
    #[serde(default)]
    intercept: f64,
}

/// A predictor backed by a trained artifact on disk.
pub struct LearnedPredictor {
    model: &'static str,
    artifact_path: PathBuf,
}

impl LearnedPredictor {
    pub fn new(model: &'static str, artifact_path: PathBuf) -> Self {
        Self {
            model,
            artifact_path,
        }
    }

    fn load_artifact(&self) -> Result<ModelArtifact, PredictError> {
        let unavailable = |reason: String| PredictError::Unavailable {
            model: self.model.to_string(),
            reason,
        };

        let content = std::fs::read_to_string(&self.artifact_path).map_err(|e| {
            unavailable(format!(
                "artifact not found at {}: {e}",
                self.artifact_path.display()
            ))
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&content)
            .map_err(|e| unavailable(format!("artifact is malformed: {e}")))?;

        if artifact.coefficients.is_empty() {
            return Err(unavailable("artifact has no coefficients".to_string()));
        }

        debug!(
            model = self.model,
            path = %self.artifact_path.display(),
            lags = artifact.coefficients.len(),
            "loaded model artifact"
        );
        Ok(artifact)
    }
}

impl Predictor for LearnedPredictor {
    fn name(&self) -> &str {
        self.model
    }

    fn predict(
        &self,
        history: &[LoadSample],
        horizon: u32,
    ) -> Result<Vec<ForecastPoint>, PredictError> {
        let sorted = sorted_history(history)?;
        let artifact = self.load_artifact()?;

        // Roll the AR recursion forward, feeding each prediction back in
        // as the newest lag. Lags older than the history reuse its
        // earliest value.
        let mut series: Vec<f64> = sorted.iter().map(|s| s.requests as f64).collect();
        for _ in 0..horizon {
            let mut value = artifact.intercept;
            for (i, coefficient) in artifact.coefficients.iter().enumerate() {
                let lag = series
                    .len()
                    .checked_sub(i + 1)
                    .map(|idx| series[idx])
                    .unwrap_or(series[0]);
                value += coefficient * lag;
            }
            series.push(value.max(0.0));
        }

        let last = sorted[sorted.len() - 1].timestamp;
        let predicted = series.split_off(series.len() - horizon as usize);
        Ok(on_minute_grid(last, predicted))
    }
}
