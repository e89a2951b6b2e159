//! Time-stepping driver for one capacitance.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::state::{SimulationState, StepModel, StepOutcome};
use crate::device::DeviceParameters;
use crate::error::{CamsimError, Result};
use crate::trace::VoltageTrace;

/// How a simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// Workload finished at the cutoff step at `time` seconds
    Completed { time: f64 },
    /// Net energy went negative at the cutoff step at `time` seconds
    Infeasible { time: f64 },
    /// Trace ended before the workload finished
    TraceExhausted,
}

/// Outcome of simulating one capacitance over a trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub capacitance: f64,
    pub v_check_thres: f64,
    pub total_energy_consumed: f64,
    pub total_energy_required: f64,
    /// Only meaningful when [`completed`](Self::completed) is true
    pub checkpoint_count: u64,
    pub termination: Termination,
    /// Number of trace samples processed, including the terminating one
    pub steps: usize,
    /// Capacitor voltage after each processed step (empty if not recorded)
    pub voltage: Vec<f64>,
    pub checkpoint_times: Vec<f64>,
}

impl SimulationResult {
    /// True if the workload's energy requirement was met.
    pub fn completed(&self) -> bool {
        matches!(self.termination, Termination::Completed { .. })
    }

    /// True if checkpointing could not be paid for at some cutoff.
    pub fn infeasible(&self) -> bool {
        matches!(self.termination, Termination::Infeasible { .. })
    }

    /// Checkpoint count if the run completed.
    pub fn completed_checkpoints(&self) -> Option<u64> {
        self.completed().then_some(self.checkpoint_count)
    }
}

/// Simulator for a single capacitance value.
///
/// Each call to [`run`](Self::run) starts from an empty capacitor, so a
/// simulator can be reused across traces.
#[derive(Debug, Clone)]
pub struct CapacitorSimulator {
    capacitance: f64,
    params: DeviceParameters,
    record_voltage: bool,
}

impl CapacitorSimulator {
    /// Create a simulator after validating the capacitance and parameters.
    pub fn new(capacitance: f64, params: &DeviceParameters) -> Result<Self> {
        if !(capacitance.is_finite() && capacitance > 0.0) {
            return Err(CamsimError::InvalidCapacitance { value: capacitance });
        }
        params.validate()?;

        Ok(Self {
            capacitance,
            params: params.clone(),
            record_voltage: true,
        })
    }

    /// Enable or disable the per-step voltage series (enabled by default).
    pub fn with_voltage_recording(mut self, record: bool) -> Self {
        self.record_voltage = record;
        self
    }

    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }

    /// Run the state machine over `trace` until completion, infeasibility,
    /// or the end of the trace.
    pub fn run(&self, trace: &VoltageTrace) -> SimulationResult {
        let model = StepModel::new(self.capacitance, trace.dt(), &self.params);
        let mut state = SimulationState::new();
        let mut voltage = if self.record_voltage {
            Vec::with_capacity(trace.len())
        } else {
            Vec::new()
        };

        debug!(
            capacitance = self.capacitance,
            v_check_thres = model.v_check_thres,
            samples = trace.len(),
            "starting simulation"
        );

        let mut termination = Termination::TraceExhausted;
        let mut steps = 0;

        for (i, &v_max) in trace.samples().iter().enumerate() {
            let time = trace.time_at(i);
            let outcome = state.step(v_max, time, &model);
            steps = i + 1;

            if self.record_voltage {
                voltage.push(state.voltage);
            }

            match outcome {
                StepOutcome::Running => {}
                StepOutcome::Completed => {
                    termination = Termination::Completed { time };
                    break;
                }
                StepOutcome::Infeasible => {
                    termination = Termination::Infeasible { time };
                    break;
                }
            }
        }

        match termination {
            Termination::Completed { time } => info!(
                capacitance = self.capacitance,
                time,
                checkpoints = state.checkpoint_count,
                "workload completed"
            ),
            Termination::Infeasible { time } => warn!(
                capacitance = self.capacitance,
                time,
                "checkpointing not possible: energy budget negative at cutoff"
            ),
            Termination::TraceExhausted => debug!(
                capacitance = self.capacitance,
                total_energy = state.total_energy_consumed,
                "trace exhausted before workload completed"
            ),
        }

        SimulationResult {
            capacitance: self.capacitance,
            v_check_thres: model.v_check_thres,
            total_energy_consumed: state.total_energy_consumed,
            total_energy_required: model.energy_required,
            checkpoint_count: state.checkpoint_count,
            termination,
            steps,
            voltage,
            checkpoint_times: state.checkpoint_times,
        }
    }
}

/// Simulate one capacitance over a trace.
pub fn simulate(
    capacitance: f64,
    trace: &VoltageTrace,
    params: &DeviceParameters,
) -> Result<SimulationResult> {
    Ok(CapacitorSimulator::new(capacitance, params)?.run(trace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::laws::checkpoint_threshold;
    use approx::assert_relative_eq;

    /// 5 V source, 100 ohm MCU load: about 240 ms to charge from empty,
    /// about 15 ms per discharge and 140 ms per recharge.
    fn params() -> DeviceParameters {
        DeviceParameters {
            r_charging: 1000.0,
            r_discharging: 100.0,
            v_start: 3.3,
            v_cutoff: 1.8,
            energy_per_cycle: 2e-4,
            checkpoint_energy: 1.28e-7,
            restore_energy: 1.28e-7,
            total_cycles_required: 10,
        }
    }

    fn trace() -> VoltageTrace {
        VoltageTrace::constant(5.0, 10_000).unwrap()
    }

    #[test]
    fn test_workload_completes() {
        let result = simulate(220e-6, &trace(), &params()).unwrap();

        assert!(result.completed());
        assert!(result.checkpoint_count >= 1);
        assert!(result.total_energy_consumed >= result.total_energy_required);
        assert_relative_eq!(result.total_energy_required, 2e-3, max_relative = 1e-12);
        assert_eq!(result.voltage.len(), result.steps);
        assert!(result.steps < 10_000);
    }

    #[test]
    fn test_unaffordable_checkpoint_is_infeasible() {
        let mut p = params();
        p.checkpoint_energy = 1e-2;
        let result = simulate(220e-6, &trace(), &p).unwrap();

        assert!(!result.completed());
        assert!(result.infeasible());
        assert!(result.total_energy_consumed < 0.0);
        assert_eq!(result.checkpoint_count, 0);
        assert_eq!(result.completed_checkpoints(), None);
    }

    #[test]
    fn test_feasibility_boundary() {
        // Dynamics do not depend on checkpoint costs, so the first cycle's
        // gross energy can be measured with zero overhead.
        let mut probe = params();
        probe.checkpoint_energy = 0.0;
        probe.restore_energy = 0.0;
        probe.energy_per_cycle = 1e-12;
        probe.total_cycles_required = 1;
        let first = simulate(220e-6, &trace(), &probe).unwrap();
        assert!(first.completed());
        assert_eq!(first.checkpoint_count, 0);
        let gross = first.total_energy_consumed;

        let mut above = params();
        above.checkpoint_energy = gross / 2.0;
        above.restore_energy = gross / 2.0 + 1e-9;
        let result = simulate(220e-6, &trace(), &above).unwrap();
        assert!(result.infeasible());
        assert_eq!(result.checkpoint_count, 0);

        let mut below = params();
        below.checkpoint_energy = gross / 2.0;
        below.restore_energy = gross / 2.0 - 1e-9;
        below.total_cycles_required = 1_000_000;
        // long enough for the first cutoff only
        let result = simulate(220e-6, &VoltageTrace::constant(5.0, 300).unwrap(), &below).unwrap();
        assert!(!result.infeasible());
        assert_eq!(result.termination, Termination::TraceExhausted);
        assert_eq!(result.checkpoint_count, 1);
        assert!(result.total_energy_consumed > 0.0);
    }

    #[test]
    fn test_trace_exhausted() {
        let short = VoltageTrace::constant(5.0, 100).unwrap();
        let result = simulate(220e-6, &short, &params()).unwrap();

        assert_eq!(result.termination, Termination::TraceExhausted);
        assert!(!result.completed());
        assert_eq!(result.steps, 100);
        assert_eq!(result.voltage.len(), 100);
        assert_eq!(result.total_energy_consumed, 0.0);
    }

    #[test]
    fn test_source_at_startup_voltage_never_starts() {
        // Charging toward exactly V_start only approaches it asymptotically
        let flat = VoltageTrace::constant(3.3, 10_000).unwrap();
        let result = simulate(220e-6, &flat, &params()).unwrap();

        assert_eq!(result.termination, Termination::TraceExhausted);
        assert!(result.voltage.iter().all(|&v| v < 3.3));
        assert!(result.checkpoint_times.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let a = simulate(220e-6, &trace(), &params()).unwrap();
        let b = simulate(220e-6, &trace(), &params()).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.total_energy_consumed.to_bits(),
            b.total_energy_consumed.to_bits()
        );
    }

    #[test]
    fn test_checkpoint_times_first_crossing_per_cycle() {
        let mut p = params();
        // threshold near 2.04 V, well above cutoff
        p.checkpoint_energy = 1e-4;
        let result = simulate(220e-6, &trace(), &p).unwrap();
        assert!(result.completed());

        let thres = checkpoint_threshold(220e-6, 1.8, 1e-4);
        assert_relative_eq!(result.v_check_thres, thres, max_relative = 1e-12);

        // one entry per discharge cycle: every cutoff plus the completing one
        assert_eq!(result.checkpoint_times.len() as u64, result.checkpoint_count + 1);

        for &t in &result.checkpoint_times {
            let k = (t / 1e-3).round() as usize;
            assert!(result.voltage[k] <= thres);
            assert!(result.voltage[k - 1] > thres);
        }
    }

    #[test]
    fn test_larger_capacitor_needs_fewer_checkpoints() {
        let counts: Vec<u64> = [100e-6, 220e-6, 470e-6]
            .iter()
            .map(|&c| {
                let r = simulate(c, &trace(), &params()).unwrap();
                assert!(r.completed(), "C = {c} did not complete");
                r.checkpoint_count
            })
            .collect();

        assert!(counts.windows(2).all(|w| w[1] <= w[0]), "counts: {counts:?}");
    }

    #[test]
    fn test_without_voltage_recording() {
        let sim = CapacitorSimulator::new(220e-6, &params())
            .unwrap()
            .with_voltage_recording(false);
        let result = sim.run(&trace());
        assert!(result.voltage.is_empty());
        assert!(result.steps > 0);
        assert!(result.completed());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            simulate(0.0, &trace(), &params()),
            Err(CamsimError::InvalidCapacitance { .. })
        ));
        assert!(matches!(
            simulate(-1e-6, &trace(), &params()),
            Err(CamsimError::InvalidCapacitance { .. })
        ));

        let mut p = params();
        p.v_cutoff = 3.5;
        assert!(matches!(
            simulate(220e-6, &trace(), &p),
            Err(CamsimError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_empty_trace() {
        let empty = VoltageTrace::from_samples(Vec::new()).unwrap();
        let result = simulate(220e-6, &empty, &params()).unwrap();
        assert_eq!(result.termination, Termination::TraceExhausted);
        assert_eq!(result.steps, 0);
    }
}
