//! fleetgrid-sim — deterministic cost simulation.
//!
//! Replays an ordered load history through a fresh `ScalingEngine` and
//! accumulates dollar cost under two strategies: a fixed baseline fleet
//! and the dynamically-scaled fleet. Each run owns a private engine, so
//! simulations are isolated from live state and from each other.

pub mod driver;
pub mod error;

pub use driver::{SimulationParams, Simulator};
pub use error::{SimError, SimResult};
