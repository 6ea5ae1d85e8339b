//! fleetgrid.toml configuration parser.
//!
//! Every tunable has a serde default reproducing the reference policy, so
//! an empty file (or no file at all) yields a working advisor. Durations
//! are human-readable strings ("30s", "5m", "1h"); a malformed duration is
//! a construction-time error, never a silent fallback.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while interpreting fleetgrid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid duration {0:?}: expected forms like \"30s\", \"5m\", \"1h\"")]
    InvalidDuration(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub simulation: SimulationDefaults,
}

/// Construction-time engine tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Requests per minute one server can sustain.
    #[serde(default = "default_max_capacity")]
    pub max_capacity_per_server: u32,
    /// Minimum wait between two committed scaling actions (e.g. "5m").
    #[serde(default = "default_cooldown")]
    pub cooldown: String,
    /// Dollars per server per hour.
    #[serde(default = "default_cost_per_server_hour")]
    pub cost_per_server_hour: f64,
    /// When true (the reference policy), even an extreme overload waits
    /// out the cooldown. When false, scale-up may override the gate.
    #[serde(default = "default_true")]
    pub strict_cooldown: bool,
    /// Servers added per iteration of the scale-up loop.
    #[serde(default = "default_growth_step")]
    pub growth_step: u32,
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_capacity_per_server: default_max_capacity(),
            cooldown: default_cooldown(),
            cost_per_server_hour: default_cost_per_server_hour(),
            strict_cooldown: default_true(),
            growth_step: default_growth_step(),
            thresholds: Thresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Cooldown parsed into a concrete duration.
    pub fn cooldown_duration(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.cooldown)
    }
}

/// Utilization thresholds driving the hysteresis band.
///
/// Defaults reproduce the reference policy: scale up above 85%, scale
/// down below 30%, grow toward a 70% band, and refuse a scale-down that
/// would land above 80%.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Thresholds {
    /// Scale up when utilization exceeds this.
    #[serde(default = "default_scale_up")]
    pub scale_up: f64,
    /// Scale down when utilization falls below this.
    #[serde(default = "default_scale_down")]
    pub scale_down: f64,
    /// Utilization the scale-up loop grows the fleet toward.
    #[serde(default = "default_scale_up_target")]
    pub scale_up_target: f64,
    /// A scale-down that would push utilization above this is rolled back.
    #[serde(default = "default_scale_down_ceiling")]
    pub scale_down_ceiling: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            scale_up: default_scale_up(),
            scale_down: default_scale_down(),
            scale_up_target: default_scale_up_target(),
            scale_down_ceiling: default_scale_down_ceiling(),
        }
    }
}

/// Defaults for simulation runs, overridable per invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationDefaults {
    /// Fixed fleet size the cost baseline is charged at.
    #[serde(default = "default_static_servers")]
    pub static_servers: u32,
    /// Fleet size the autoscaled strategy starts from.
    #[serde(default = "default_initial_auto_servers")]
    pub initial_auto_servers: u32,
    /// Wall-clock minutes each sample covers.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: f64,
    /// Most events carried in a report; the full count is still reported.
    #[serde(default = "default_event_display_limit")]
    pub event_display_limit: usize,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            static_servers: default_static_servers(),
            initial_auto_servers: default_initial_auto_servers(),
            interval_minutes: default_interval_minutes(),
            event_display_limit: default_event_display_limit(),
        }
    }
}

fn default_max_capacity() -> u32 {
    1000
}
fn default_cooldown() -> String {
    "5m".to_string()
}
fn default_cost_per_server_hour() -> f64 {
    0.45
}
fn default_true() -> bool {
    true
}
fn default_growth_step() -> u32 {
    1
}
fn default_scale_up() -> f64 {
    0.85
}
fn default_scale_down() -> f64 {
    0.30
}
fn default_scale_up_target() -> f64 {
    0.70
}
fn default_scale_down_ceiling() -> f64 {
    0.80
}
fn default_static_servers() -> u32 {
    10
}
fn default_initial_auto_servers() -> u32 {
    2
}
fn default_interval_minutes() -> f64 {
    1.0
}
fn default_event_display_limit() -> usize {
    20
}

impl FleetConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FleetConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a fleetgrid.toml carrying the reference policy.
    pub fn scaffold() -> Self {
        FleetConfig::default()
    }
}

/// Parse a duration string like "30s", "5m", "1h" into a `Duration`.
///
/// Bare numbers are seconds.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();
    let (digits, multiplier) = if let Some(rest) = s.strip_suffix('s') {
        (rest, 1)
    } else if let Some(rest) = s.strip_suffix('m') {
        (rest, 60)
    } else if let Some(rest) = s.strip_suffix('h') {
        (rest, 3600)
    } else {
        (s, 1)
    };

    digits
        .parse::<u64>()
        .map(|value| Duration::from_secs(value * multiplier))
        .map_err(|_| ConfigError::InvalidDuration(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_reference_policy() {
        let config: FleetConfig = toml::from_str("").unwrap();
        assert_eq!(config.engine.max_capacity_per_server, 1000);
        assert_eq!(config.engine.cooldown, "5m");
        assert_eq!(config.engine.cost_per_server_hour, 0.45);
        assert!(config.engine.strict_cooldown);
        assert_eq!(config.engine.thresholds.scale_up, 0.85);
        assert_eq!(config.engine.thresholds.scale_down, 0.30);
        assert_eq!(config.engine.thresholds.scale_up_target, 0.70);
        assert_eq!(config.engine.thresholds.scale_down_ceiling, 0.80);
        assert_eq!(config.simulation.static_servers, 10);
        assert_eq!(config.simulation.initial_auto_servers, 2);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let toml_str = r#"
[engine]
max_capacity_per_server = 2000
cooldown = "30s"

[engine.thresholds]
scale_up = 0.90
"#;
        let config: FleetConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.max_capacity_per_server, 2000);
        assert_eq!(config.engine.cooldown, "30s");
        assert_eq!(config.engine.thresholds.scale_up, 0.90);
        assert_eq!(config.engine.thresholds.scale_down, 0.30);
    }

    #[test]
    fn scaffold_roundtrips() {
        let config = FleetConfig::scaffold();
        let toml_str = config.to_toml_string().unwrap();
        let back: FleetConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.engine.max_capacity_per_server, 1000);
        assert_eq!(back.simulation.event_display_limit, 20);
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleetgrid.toml");
        std::fs::write(&path, "[engine]\ncost_per_server_hour = 1.25\n").unwrap();

        let config = FleetConfig::from_file(&path).unwrap();
        assert_eq!(config.engine.cost_per_server_hour, 1.25);
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("0s").unwrap(), Duration::from_secs(0));
        assert_eq!(parse_duration("45").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration(" 2m ").unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("-5s").is_err());
        assert!(parse_duration("5x").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn cooldown_duration_surfaces_parse_errors() {
        let config = EngineConfig {
            cooldown: "soon".to_string(),
            ..EngineConfig::default()
        };
        assert!(config.cooldown_duration().is_err());
    }
}
