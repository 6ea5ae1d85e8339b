//! fleetgrid-engine — the scaling decision engine.
//!
//! Owns the cooldown clock, computes utilization, applies hysteresis
//! thresholds, grows the fleet toward a target band on overload, and
//! refuses scale-downs that would land in the danger band.
//!
//! # Decision algorithm
//!
//! ```text
//! elapsed < cooldown              → maintain ("cooldown active")
//! utilization = load / (servers * capacity_per_server)
//!
//! utilization > scale_up (0.85)   → grow until load/(n*cap) ≤ 0.70
//! utilization < scale_down (0.30) → shed one server, unless the result
//!                                   would sit above 0.80 (rollback)
//! otherwise                       → maintain
//! ```
//!
//! The cooldown clock advances only on committed scale_up/scale_down,
//! which is what prevents flapping on noisy load signals.

pub mod engine;
pub mod error;

pub use engine::ScalingEngine;
pub use error::{EngineError, EngineResult};
