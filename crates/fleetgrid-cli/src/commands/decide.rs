use fleetgrid_core::{Decision, FleetConfig};
use fleetgrid_engine::ScalingEngine;

/// A decision plus the projected hourly cost of the target fleet.
#[derive(serde::Serialize)]
struct Advice<'a> {
    #[serde(flatten)]
    decision: &'a Decision,
    estimated_cost_per_hour: f64,
}

pub fn run(
    config: &FleetConfig,
    servers: u32,
    load: f64,
    at: Option<u64>,
    format: &str,
) -> anyhow::Result<()> {
    let mut engine = ScalingEngine::new(&config.engine)?;
    let decision = match at {
        Some(timestamp) => engine.decide(servers, load, timestamp)?,
        None => engine.decide_now(servers, load)?,
    };
    let estimated_cost_per_hour = engine.estimate_cost(decision.target_servers, 1.0);

    match format {
        "json" => {
            let advice = Advice {
                decision: &decision,
                estimated_cost_per_hour,
            };
            println!("{}", serde_json::to_string_pretty(&advice)?);
        }
        _ => {
            println!("action:       {}", decision.action.label());
            println!("target fleet: {} servers", decision.target_servers);
            println!("est. cost:    ${estimated_cost_per_hour:.2}/hour");
            println!("reason:       {}", decision.reason);
        }
    }

    Ok(())
}
