use std::path::Path;

use fleetgrid_predict::{Forecast, predictor_for};

use super::simulate::load_samples;

pub fn run(
    samples_path: &str,
    model: &str,
    horizon: u32,
    model_dir: &str,
    format: &str,
) -> anyhow::Result<()> {
    let history = load_samples(Path::new(samples_path))?;
    let predictor = predictor_for(model, Path::new(model_dir))?;
    let points = predictor.predict(&history, horizon)?;

    let forecast = Forecast {
        model: predictor.name().to_string(),
        points,
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&forecast)?);
        }
        _ => {
            println!("model: {}", forecast.model);
            for point in &forecast.points {
                println!("  [{}] {:.1} req/min", point.timestamp, point.predicted_load);
            }
        }
    }

    Ok(())
}
