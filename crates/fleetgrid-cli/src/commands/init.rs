use std::path::Path;

use fleetgrid_core::FleetConfig;

pub fn run(path: &str) -> anyhow::Result<()> {
    let config = FleetConfig::scaffold();
    let output = Path::new(path).join("fleetgrid.toml");
    std::fs::write(&output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_is_parseable_back() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path().to_str().unwrap()).unwrap();

        let config = FleetConfig::from_file(&dir.path().join("fleetgrid.toml")).unwrap();
        assert_eq!(config.engine.max_capacity_per_server, 1000);
        assert_eq!(config.engine.cooldown, "5m");
    }
}
