use std::path::Path;

use fleetgrid_core::FleetConfig;

pub mod cost;
pub mod decide;
pub mod forecast;
pub mod init;
pub mod simulate;

/// Load fleetgrid.toml from an explicit path, from the working
/// directory if one is present there, or fall back to defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<FleetConfig> {
    match path {
        Some(p) => FleetConfig::from_file(Path::new(p)),
        None => {
            let default = Path::new("fleetgrid.toml");
            if default.exists() {
                FleetConfig::from_file(default)
            } else {
                Ok(FleetConfig::default())
            }
        }
    }
}
