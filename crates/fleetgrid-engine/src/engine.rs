//! Scaling engine — load-driven fleet sizing with cooldown windows.
//!
//! One `ScalingEngine` owns exactly one piece of hidden state: the
//! timestamp of the last committed scaling action. Everything else is
//! recomputed per call, so the engine can be re-evaluated speculatively
//! as long as the cooldown clock is not shared. Instances are
//! single-owner; callers that need shared access wrap the engine in a
//! mutex or actor so the cooldown check and update stay atomic.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use fleetgrid_core::config::{EngineConfig, Thresholds};
use fleetgrid_core::{Decision, ScalingAction, Timestamp};

use crate::error::{EngineError, EngineResult};

/// The scaling decision engine.
pub struct ScalingEngine {
    max_capacity_per_server: u32,
    cooldown_secs: u64,
    cost_per_server_hour: f64,
    strict_cooldown: bool,
    growth_step: u32,
    thresholds: Thresholds,
    /// Instant of the last committed action. `None` until the first one,
    /// so a fresh engine is never cooldown-blocked.
    last_scale_time: Option<Timestamp>,
}

impl ScalingEngine {
    /// Build an engine, validating the configuration.
    ///
    /// Misconfiguration fails here, once, rather than per-call.
    pub fn new(config: &EngineConfig) -> EngineResult<Self> {
        if config.max_capacity_per_server == 0 {
            return Err(EngineError::InvalidConfig(
                "max_capacity_per_server must be at least 1".to_string(),
            ));
        }
        if config.growth_step == 0 {
            return Err(EngineError::InvalidConfig(
                "growth_step must be at least 1".to_string(),
            ));
        }
        if !config.cost_per_server_hour.is_finite() || config.cost_per_server_hour < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "cost_per_server_hour must be non-negative, got {}",
                config.cost_per_server_hour
            )));
        }

        let t = config.thresholds;
        for (name, value) in [
            ("scale_up", t.scale_up),
            ("scale_down", t.scale_down),
            ("scale_up_target", t.scale_up_target),
            ("scale_down_ceiling", t.scale_down_ceiling),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "threshold {name} must be in (0, 1], got {value}"
                )));
            }
        }
        if t.scale_down >= t.scale_up {
            return Err(EngineError::InvalidConfig(format!(
                "scale_down threshold ({}) must sit below scale_up ({})",
                t.scale_down, t.scale_up
            )));
        }

        let cooldown = config
            .cooldown_duration()
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            max_capacity_per_server: config.max_capacity_per_server,
            cooldown_secs: cooldown.as_secs(),
            cost_per_server_hour: config.cost_per_server_hour,
            strict_cooldown: config.strict_cooldown,
            growth_step: config.growth_step,
            thresholds: t,
            last_scale_time: None,
        })
    }

    /// Decide what to do with a fleet of `current_servers` given
    /// `predicted_load` requests per minute at instant `now`.
    ///
    /// State is mutated only when an action is committed; maintain
    /// decisions (including cooldown holds and rollbacks) leave the
    /// cooldown clock untouched.
    pub fn decide(
        &mut self,
        current_servers: u32,
        predicted_load: f64,
        now: Timestamp,
    ) -> EngineResult<Decision> {
        if current_servers < 1 {
            return Err(EngineError::InvalidArgument(format!(
                "current_servers must be at least 1, got {current_servers}"
            )));
        }
        if !predicted_load.is_finite() || predicted_load < 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "predicted_load must be a non-negative number, got {predicted_load}"
            )));
        }

        // Cooldown gate. Strict mode returns before any utilization math.
        // Non-strict mode lets an overload past the gate, scale-up only.
        if let Some(last) = self.last_scale_time {
            let elapsed = now.saturating_sub(last);
            if elapsed < self.cooldown_secs {
                let overload = !self.strict_cooldown
                    && self.utilization(current_servers, predicted_load) > self.thresholds.scale_up;
                if !overload {
                    return Ok(Decision {
                        action: ScalingAction::Maintain,
                        target_servers: current_servers,
                        predicted_load,
                        reason: format!(
                            "cooldown active: {elapsed}s of {}s since last action",
                            self.cooldown_secs
                        ),
                        timestamp: now,
                    });
                }
            }
        }

        let utilization = self.utilization(current_servers, predicted_load);
        let t = self.thresholds;

        if utilization > t.scale_up {
            // Grow until the load sits at or below the target band. The
            // loop terminates: capacity is positive and grows every
            // iteration while the load is fixed for the call.
            let mut target = current_servers;
            while self.utilization(target, predicted_load) > t.scale_up_target {
                target += self.growth_step;
            }

            self.commit(now);
            debug!(
                from = current_servers,
                to = target,
                utilization,
                load = predicted_load,
                "scaling up"
            );
            return Ok(Decision {
                action: ScalingAction::ScaleUp,
                target_servers: target,
                predicted_load,
                reason: format!(
                    "high load: predicted {predicted_load:.1} req/min exceeds {:.0}% of {current_servers}-server capacity",
                    t.scale_up * 100.0
                ),
                timestamp: now,
            });
        }

        if utilization < t.scale_down && current_servers > 1 {
            let potential = current_servers - 1;
            let new_utilization = self.utilization(potential, predicted_load);

            if new_utilization > t.scale_down_ceiling {
                // Rollback: shedding a server would immediately push the
                // fleet into the danger band. No action, clock untouched.
                debug!(
                    servers = current_servers,
                    new_utilization, "scale-down rolled back"
                );
                return Ok(Decision {
                    action: ScalingAction::Maintain,
                    target_servers: current_servers,
                    predicted_load,
                    reason: format!(
                        "scale-down aborted: utilization would reach {:.0}%, above the {:.0}% ceiling",
                        new_utilization * 100.0,
                        t.scale_down_ceiling * 100.0
                    ),
                    timestamp: now,
                });
            }

            self.commit(now);
            debug!(
                from = current_servers,
                to = potential,
                utilization,
                load = predicted_load,
                "scaling down"
            );
            return Ok(Decision {
                action: ScalingAction::ScaleDown,
                target_servers: potential,
                predicted_load,
                reason: format!(
                    "low load: predicted {predicted_load:.1} req/min is below {:.0}% of capacity",
                    t.scale_down * 100.0
                ),
                timestamp: now,
            });
        }

        Ok(Decision {
            action: ScalingAction::Maintain,
            target_servers: current_servers,
            predicted_load,
            reason: format!(
                "load within the optimal range ({:.0}%-{:.0}%)",
                t.scale_down * 100.0,
                t.scale_up * 100.0
            ),
            timestamp: now,
        })
    }

    /// [`decide`](Self::decide) at wall-clock time.
    pub fn decide_now(&mut self, current_servers: u32, predicted_load: f64) -> EngineResult<Decision> {
        self.decide(current_servers, predicted_load, epoch_secs())
    }

    /// Dollar cost of running `server_count` servers for `duration_hours`.
    pub fn estimate_cost(&self, server_count: u32, duration_hours: f64) -> f64 {
        server_count as f64 * self.cost_per_server_hour * duration_hours
    }

    /// Instant of the last committed action, if any.
    pub fn last_scale_time(&self) -> Option<Timestamp> {
        self.last_scale_time
    }

    /// Record a committed action. The clock never moves backward, even
    /// when a zero cooldown lets an out-of-order timestamp through.
    fn commit(&mut self, now: Timestamp) {
        self.last_scale_time = Some(self.last_scale_time.map_or(now, |last| last.max(now)));
    }

    fn utilization(&self, servers: u32, load: f64) -> f64 {
        let total_capacity = servers as f64 * self.max_capacity_per_server as f64;
        if total_capacity == 0.0 {
            // An empty fleet reads as saturated, not as a division error:
            // the advisor must always produce an actionable decision.
            return 1.0;
        }
        load / total_capacity
    }
}

fn epoch_secs() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
