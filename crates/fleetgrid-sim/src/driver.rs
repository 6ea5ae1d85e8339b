//! Simulation driver — static vs. autoscaled cost comparison.

use tracing::debug;

use fleetgrid_core::config::{EngineConfig, SimulationDefaults};
use fleetgrid_core::{LoadSample, ScalingEvent, SimulationReport};
use fleetgrid_engine::ScalingEngine;

use crate::error::{SimError, SimResult};

/// Parameters for one simulation run.
#[derive(Debug, Clone, Copy)]
pub struct SimulationParams {
    /// Fixed fleet size the cost baseline is charged at.
    pub static_servers: u32,
    /// Fleet size the autoscaled strategy starts from.
    pub initial_auto_servers: u32,
    /// Wall-clock minutes each sample covers.
    pub interval_minutes: f64,
    /// Most events kept in the report; the full count is still reported.
    pub event_display_limit: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::from(&SimulationDefaults::default())
    }
}

impl From<&SimulationDefaults> for SimulationParams {
    fn from(defaults: &SimulationDefaults) -> Self {
        Self {
            static_servers: defaults.static_servers,
            initial_auto_servers: defaults.initial_auto_servers,
            interval_minutes: defaults.interval_minutes,
            event_display_limit: defaults.event_display_limit,
        }
    }
}

/// Replays load samples through a fresh `ScalingEngine` per run.
pub struct Simulator {
    config: EngineConfig,
}

impl Simulator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Run the comparison.
    ///
    /// Samples are sorted by timestamp (stable, so ties keep their input
    /// order) before replay. Cost is charged at the fleet sizes held
    /// during the interval that just elapsed; a scaling decision only
    /// takes effect for the next interval. The savings calculation
    /// assumes exactly this ordering.
    pub fn run(
        &self,
        samples: &[LoadSample],
        params: &SimulationParams,
    ) -> SimResult<SimulationReport> {
        if params.static_servers < 1 {
            return Err(SimError::InvalidArgument(
                "static_servers must be at least 1".to_string(),
            ));
        }
        if params.initial_auto_servers < 1 {
            return Err(SimError::InvalidArgument(
                "initial_auto_servers must be at least 1".to_string(),
            ));
        }
        if !params.interval_minutes.is_finite() || params.interval_minutes <= 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "interval_minutes must be positive, got {}",
                params.interval_minutes
            )));
        }

        let mut engine = ScalingEngine::new(&self.config)?;

        let mut sorted = samples.to_vec();
        sorted.sort_by_key(|s| s.timestamp);

        let cost_per_interval =
            self.config.cost_per_server_hour * params.interval_minutes / 60.0;

        let mut auto_servers = params.initial_auto_servers;
        let mut static_cost = 0.0;
        let mut auto_cost = 0.0;
        let mut events: Vec<ScalingEvent> = Vec::new();
        let mut total_events = 0;

        for sample in &sorted {
            static_cost += params.static_servers as f64 * cost_per_interval;
            auto_cost += auto_servers as f64 * cost_per_interval;

            let decision = engine.decide(auto_servers, sample.requests as f64, sample.timestamp)?;

            if decision.is_action() {
                total_events += 1;
                if events.len() < params.event_display_limit {
                    events.push(ScalingEvent {
                        timestamp: sample.timestamp,
                        action: decision.action,
                        from_servers: auto_servers,
                        to_servers: decision.target_servers,
                        load: sample.requests as f64,
                    });
                }
            }

            auto_servers = decision.target_servers;
        }

        let savings = static_cost - auto_cost;
        let savings_percentage = if static_cost == 0.0 {
            0.0
        } else {
            savings / static_cost * 100.0
        };

        debug!(
            samples = sorted.len(),
            total_events,
            static_cost,
            auto_cost,
            final_servers = auto_servers,
            "simulation complete"
        );

        Ok(SimulationReport {
            static_cost,
            auto_cost,
            savings,
            savings_percentage,
            events,
            total_events,
            final_servers: auto_servers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetgrid_core::ScalingAction;

    const T0: u64 = 1_700_000_000;

    fn test_config() -> EngineConfig {
        EngineConfig {
            max_capacity_per_server: 1000,
            cooldown: "5m".to_string(),
            cost_per_server_hour: 0.45,
            ..EngineConfig::default()
        }
    }

    fn minute_samples(loads: &[u64]) -> Vec<LoadSample> {
        loads
            .iter()
            .enumerate()
            .map(|(i, &requests)| LoadSample {
                timestamp: T0 + i as u64 * 60,
                requests,
                bytes: requests * 512,
            })
            .collect()
    }

    #[test]
    fn quiet_history_beats_the_static_baseline() {
        let simulator = Simulator::new(test_config());
        let samples = minute_samples(&[100; 12]);
        let report = simulator.run(&samples, &SimulationParams::default()).unwrap();

        // First interval: 2→1 scale-down; the fleet then idles at 1.
        assert_eq!(report.total_events, 1);
        assert_eq!(report.events[0].action, ScalingAction::ScaleDown);
        assert_eq!(report.events[0].from_servers, 2);
        assert_eq!(report.events[0].to_servers, 1);
        assert_eq!(report.final_servers, 1);

        assert!(report.auto_cost < report.static_cost);
        assert!((report.savings - (report.static_cost - report.auto_cost)).abs() < 1e-12);
        assert!(report.savings_percentage > 0.0 && report.savings_percentage < 100.0);

        // 12 minutes of a 10-server baseline at $0.45/hr.
        let expected_static = 12.0 * 10.0 * 0.45 / 60.0;
        assert!((report.static_cost - expected_static).abs() < 1e-9);
    }

    #[test]
    fn cost_is_charged_before_scaling_takes_effect() {
        let simulator = Simulator::new(test_config());
        // One overloaded sample: the decision scales 2→4, but the interval
        // is billed at the 2 servers actually held during it.
        let samples = minute_samples(&[5000]);
        let report = simulator.run(&samples, &SimulationParams::default()).unwrap();

        let expected_auto = 2.0 * 0.45 / 60.0;
        assert!((report.auto_cost - expected_auto).abs() < 1e-12);
        assert_eq!(report.final_servers, 8); // 5000/(8×1000) = 0.625
    }

    #[test]
    fn unordered_input_is_replayed_in_timestamp_order() {
        let simulator = Simulator::new(test_config());
        let mut shuffled = minute_samples(&[100, 100, 100, 5000, 100, 100, 100, 100, 100, 100]);
        shuffled.swap(0, 3);
        shuffled.swap(2, 9);

        let ordered = minute_samples(&[100, 100, 100, 5000, 100, 100, 100, 100, 100, 100]);
        let from_shuffled = simulator.run(&shuffled, &SimulationParams::default()).unwrap();
        let from_ordered = simulator.run(&ordered, &SimulationParams::default()).unwrap();

        assert_eq!(from_shuffled, from_ordered);
    }

    #[test]
    fn empty_history_reports_zero_savings() {
        let simulator = Simulator::new(test_config());
        let report = simulator.run(&[], &SimulationParams::default()).unwrap();

        assert_eq!(report.static_cost, 0.0);
        assert_eq!(report.auto_cost, 0.0);
        assert_eq!(report.savings, 0.0);
        // Division-by-zero guard: 0% rather than NaN.
        assert_eq!(report.savings_percentage, 0.0);
        assert!(report.events.is_empty());
        assert_eq!(report.final_servers, 2);
    }

    #[test]
    fn event_log_is_bounded_but_fully_counted() {
        let config = EngineConfig {
            cooldown: "0s".to_string(),
            ..test_config()
        };
        let simulator = Simulator::new(config);

        // Alternating feast and famine with no cooldown: an action on
        // nearly every sample.
        let loads: Vec<u64> = (0..30).map(|i| if i % 2 == 0 { 5000 } else { 50 }).collect();
        let samples = minute_samples(&loads);

        let params = SimulationParams {
            event_display_limit: 5,
            ..SimulationParams::default()
        };
        let report = simulator.run(&samples, &params).unwrap();

        assert_eq!(report.events.len(), 5);
        assert!(report.total_events > 5);
        // The kept events are the leading ones, still in replay order.
        for pair in report.events.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn runs_are_deterministic_and_isolated() {
        let simulator = Simulator::new(test_config());
        let samples = minute_samples(&[100, 4000, 300, 80, 80, 80, 80, 2500]);

        let first = simulator.run(&samples, &SimulationParams::default()).unwrap();
        let second = simulator.run(&samples, &SimulationParams::default()).unwrap();

        // A fresh engine per run: no cooldown state leaks across runs.
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_unusable_parameters() {
        let simulator = Simulator::new(test_config());
        let samples = minute_samples(&[100]);

        let params = SimulationParams {
            static_servers: 0,
            ..SimulationParams::default()
        };
        assert!(matches!(
            simulator.run(&samples, &params),
            Err(SimError::InvalidArgument(_))
        ));

        let params = SimulationParams {
            initial_auto_servers: 0,
            ..SimulationParams::default()
        };
        assert!(simulator.run(&samples, &params).is_err());

        let params = SimulationParams {
            interval_minutes: 0.0,
            ..SimulationParams::default()
        };
        assert!(simulator.run(&samples, &params).is_err());
    }

    #[test]
    fn misconfigured_engine_fails_the_run() {
        let config = EngineConfig {
            max_capacity_per_server: 0,
            ..test_config()
        };
        let simulator = Simulator::new(config);
        assert!(matches!(
            simulator.run(&[], &SimulationParams::default()),
            Err(SimError::Engine(_))
        ));
    }

    #[test]
    fn interval_size_scales_the_ledger() {
        let simulator = Simulator::new(test_config());
        let samples = minute_samples(&[100; 6]);

        let per_minute = simulator.run(&samples, &SimulationParams::default()).unwrap();
        let params = SimulationParams {
            interval_minutes: 5.0,
            ..SimulationParams::default()
        };
        let per_five = simulator.run(&samples, &params).unwrap();

        assert!((per_five.static_cost - per_minute.static_cost * 5.0).abs() < 1e-9);
    }
}
