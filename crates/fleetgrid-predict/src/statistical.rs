//! Statistical predictors — computed directly from history.

use fleetgrid_core::LoadSample;

use crate::error::PredictError;
use crate::model::{ForecastPoint, Predictor, on_minute_grid, sorted_history};

/// Mean of the trailing window, projected flat across the horizon.
#[derive(Debug, Clone)]
pub struct MovingAveragePredictor {
    /// How many trailing samples the mean is taken over.
    pub window: usize,
}

impl Default for MovingAveragePredictor {
    fn default() -> Self {
        Self { window: 10 }
    }
}

impl Predictor for MovingAveragePredictor {
    fn name(&self) -> &str {
        "moving_average"
    }

    fn predict(
        &self,
        history: &[LoadSample],
        horizon: u32,
    ) -> Result<Vec<ForecastPoint>, PredictError> {
        let sorted = sorted_history(history)?;
        let window = self.window.max(1);
        let tail = &sorted[sorted.len().saturating_sub(window)..];
        let mean = tail.iter().map(|s| s.requests as f64).sum::<f64>() / tail.len() as f64;

        let last = sorted[sorted.len() - 1].timestamp;
        Ok(on_minute_grid(last, (0..horizon).map(|_| mean)))
    }
}

/// Least-squares line over the full history, extrapolated forward.
#[derive(Debug, Clone)]
pub struct LinearTrendPredictor;

impl Predictor for LinearTrendPredictor {
    fn name(&self) -> &str {
        "linear_trend"
    }

    fn predict(
        &self,
        history: &[LoadSample],
        horizon: u32,
    ) -> Result<Vec<ForecastPoint>, PredictError> {
        let sorted = sorted_history(history)?;
        let first = sorted[0].timestamp;
        let last = sorted[sorted.len() - 1].timestamp;

        // Fit load = slope * minutes + intercept over the history.
        let n = sorted.len() as f64;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xx = 0.0;
        let mut sum_xy = 0.0;
        for sample in &sorted {
            let x = (sample.timestamp - first) as f64 / 60.0;
            let y = sample.requests as f64;
            sum_x += x;
            sum_y += y;
            sum_xx += x * x;
            sum_xy += x * y;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        let (slope, intercept) = if denominator.abs() < f64::EPSILON {
            // Single point, or all samples at one instant: flat line.
            (0.0, sum_y / n)
        } else {
            let slope = (n * sum_xy - sum_x * sum_y) / denominator;
            (slope, (sum_y - slope * sum_x) / n)
        };

        let last_x = (last - first) as f64 / 60.0;
        Ok(on_minute_grid(
            last,
            (1..=horizon).map(|step| slope * (last_x + step as f64) + intercept),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(loads: &[u64]) -> Vec<LoadSample> {
        loads
            .iter()
            .enumerate()
            .map(|(i, &requests)| LoadSample {
                timestamp: 6000 + i as u64 * 60,
                requests,
                bytes: 0,
            })
            .collect()
    }

    #[test]
    fn moving_average_projects_the_window_mean() {
        let predictor = MovingAveragePredictor { window: 3 };
        // Window covers the trailing 300, 400, 500.
        let points = predictor.predict(&samples(&[100, 9999, 300, 400, 500]), 2).unwrap();

        assert_eq!(points.len(), 2);
        assert!((points[0].predicted_load - 400.0).abs() < 1e-9);
        assert_eq!(points[0].predicted_load, points[1].predicted_load);
    }

    #[test]
    fn moving_average_window_larger_than_history() {
        let predictor = MovingAveragePredictor { window: 50 };
        let points = predictor.predict(&samples(&[100, 200]), 1).unwrap();
        assert!((points[0].predicted_load - 150.0).abs() < 1e-9);
    }

    #[test]
    fn linear_trend_extrapolates_a_rising_series() {
        let predictor = LinearTrendPredictor;
        let points = predictor.predict(&samples(&[100, 200, 300]), 2).unwrap();

        // Perfect +100/minute trend continues.
        assert!((points[0].predicted_load - 400.0).abs() < 1e-6);
        assert!((points[1].predicted_load - 500.0).abs() < 1e-6);
    }

    #[test]
    fn linear_trend_clamps_at_zero() {
        let predictor = LinearTrendPredictor;
        let points = predictor.predict(&samples(&[300, 200, 100]), 5).unwrap();

        // A falling trend bottoms out at zero instead of going negative.
        assert_eq!(points[4].predicted_load, 0.0);
    }

    #[test]
    fn single_point_history_is_a_flat_line() {
        let predictor = LinearTrendPredictor;
        let points = predictor.predict(&samples(&[250]), 3).unwrap();
        assert!(points.iter().all(|p| (p.predicted_load - 250.0).abs() < 1e-9));
    }

    #[test]
    fn unsorted_history_is_sorted_before_fitting() {
        let predictor = LinearTrendPredictor;
        let mut shuffled = samples(&[100, 200, 300]);
        shuffled.swap(0, 2);

        let points = predictor.predict(&shuffled, 1).unwrap();
        assert!((points[0].predicted_load - 400.0).abs() < 1e-6);
        // Grid starts after the newest timestamp regardless of order.
        assert_eq!(points[0].timestamp, 6000 + 2 * 60 + 60);
    }

    #[test]
    fn empty_history_is_rejected_and_zero_horizon_is_empty() {
        let predictor = MovingAveragePredictor::default();
        assert!(matches!(
            predictor.predict(&[], 5),
            Err(PredictError::EmptyHistory)
        ));
        assert!(predictor.predict(&samples(&[100]), 0).unwrap().is_empty());
    }
}
