use fleetgrid_core::FleetConfig;
use fleetgrid_engine::ScalingEngine;

pub fn run(config: &FleetConfig, servers: u32, hours: f64) -> anyhow::Result<()> {
    let engine = ScalingEngine::new(&config.engine)?;
    let cost = engine.estimate_cost(servers, hours);
    println!("${cost:.2} for {servers} servers over {hours} hour(s)");
    Ok(())
}
