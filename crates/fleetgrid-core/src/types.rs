//! Domain types shared across fleetgrid crates.
//!
//! Decisions, load samples, and simulation reports are all serializable
//! to/from JSON so callers (the CLI today, an API layer tomorrow) can move
//! them across process boundaries unchanged.

use serde::{Deserialize, Serialize};

/// Unix timestamp in seconds.
pub type Timestamp = u64;

// ── Decisions ─────────────────────────────────────────────────────

/// What the engine wants done with the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingAction {
    ScaleUp,
    ScaleDown,
    Maintain,
}

impl ScalingAction {
    pub fn label(&self) -> &'static str {
        match self {
            ScalingAction::ScaleUp => "scale_up",
            ScalingAction::ScaleDown => "scale_down",
            ScalingAction::Maintain => "maintain",
        }
    }
}

/// A single scaling decision.
///
/// Immutable once produced. `predicted_load` and `timestamp` echo the
/// inputs so a decision is self-describing in logs and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: ScalingAction,
    /// Fleet size the caller should converge to. Never below 1.
    pub target_servers: u32,
    pub predicted_load: f64,
    /// Human-readable explanation of the decision.
    pub reason: String,
    /// The instant the decision was evaluated at.
    pub timestamp: Timestamp,
}

impl Decision {
    /// True for committed scale_up/scale_down, false for maintain.
    pub fn is_action(&self) -> bool {
        self.action != ScalingAction::Maintain
    }
}

// ── Load samples ──────────────────────────────────────────────────

/// One observed traffic interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSample {
    pub timestamp: Timestamp,
    /// Requests observed during the interval.
    pub requests: u64,
    /// Bytes transferred during the interval.
    pub bytes: u64,
}

// ── Simulation ────────────────────────────────────────────────────

/// A committed scaling action recorded during a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingEvent {
    pub timestamp: Timestamp,
    pub action: ScalingAction,
    pub from_servers: u32,
    pub to_servers: u32,
    /// Load the decision was made against.
    pub load: f64,
}

/// Cost comparison between a fixed-size fleet and the autoscaled fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub static_cost: f64,
    pub auto_cost: f64,
    pub savings: f64,
    pub savings_percentage: f64,
    /// Leading committed actions, in replay order, bounded for display.
    pub events: Vec<ScalingEvent>,
    /// Total committed actions across the whole run.
    pub total_events: usize,
    /// Fleet size the autoscaled strategy ended the run with.
    pub final_servers: u32,
}
