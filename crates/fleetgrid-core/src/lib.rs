pub mod config;
pub mod types;

pub use config::{ConfigError, EngineConfig, FleetConfig, SimulationDefaults, Thresholds};
pub use types::*;
