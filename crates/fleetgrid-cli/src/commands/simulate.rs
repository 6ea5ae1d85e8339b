use std::path::Path;

use anyhow::Context;

use fleetgrid_core::{FleetConfig, LoadSample};
use fleetgrid_sim::{SimulationParams, Simulator};

pub fn run(
    config: &FleetConfig,
    samples_path: &str,
    static_servers: Option<u32>,
    initial_servers: Option<u32>,
    interval_minutes: Option<f64>,
    format: &str,
) -> anyhow::Result<()> {
    let samples = load_samples(Path::new(samples_path))?;

    let defaults = &config.simulation;
    let params = SimulationParams {
        static_servers: static_servers.unwrap_or(defaults.static_servers),
        initial_auto_servers: initial_servers.unwrap_or(defaults.initial_auto_servers),
        interval_minutes: interval_minutes.unwrap_or(defaults.interval_minutes),
        event_display_limit: defaults.event_display_limit,
    };

    let report = Simulator::new(config.engine.clone()).run(&samples, &params)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!("samples:        {}", samples.len());
            println!(
                "static fleet:   {} servers → ${:.2}",
                params.static_servers, report.static_cost
            );
            println!(
                "autoscaled:     ${:.2} (ended at {} servers)",
                report.auto_cost, report.final_servers
            );
            println!(
                "savings:        ${:.2} ({:.1}%)",
                report.savings, report.savings_percentage
            );
            println!("scaling events: {}", report.total_events);
            for event in &report.events {
                println!(
                    "  [{}] {} {} → {} (load {})",
                    event.timestamp,
                    event.action.label(),
                    event.from_servers,
                    event.to_servers,
                    event.load
                );
            }
            let hidden = report.total_events - report.events.len();
            if hidden > 0 {
                println!("  ({hidden} more not shown)");
            }
        }
    }

    Ok(())
}

/// Parse a JSON array of load samples.
pub fn load_samples(path: &Path) -> anyhow::Result<Vec<LoadSample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read samples file {}", path.display()))?;
    let samples: Vec<LoadSample> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse samples file {}", path.display()))?;
    Ok(samples)
}
