//! Per-run charge/discharge state machine.
//!
//! ```text
//!            V >= V_start
//!   Charging ------------> Discharging
//!      ^                       |
//!      |   V <= V_cutoff       |  (energy booked; may end the run)
//!      +-----------------------+
//! ```
//!
//! While charging, the capacitor only moves toward a *higher* ambient
//! voltage; no leakage is modelled in this mode. While discharging, load
//! decay and ambient recharge are both applied within each step.

use tracing::trace;

use super::laws::{charge_toward, checkpoint_threshold, decay, stored_energy};
use crate::device::DeviceParameters;

/// Operating mode of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// MCU off, capacitor harvesting
    Charging,
    /// MCU running from the capacitor
    Discharging,
}

/// Result of advancing the state by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Keep stepping
    Running,
    /// The workload's energy requirement has been met
    Completed,
    /// The energy budget went negative at a cutoff
    Infeasible,
}

/// Constants for one capacitance, derived once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct StepModel {
    pub capacitance: f64,
    pub dt: f64,
    pub r_charging: f64,
    pub r_discharging: f64,
    pub v_start: f64,
    pub v_cutoff: f64,
    pub v_check_thres: f64,
    /// Checkpoint plus restore energy, paid once per discharge cycle
    pub overhead: f64,
    pub energy_required: f64,
}

impl StepModel {
    /// Derive the per-run constants. Inputs are assumed validated.
    pub fn new(capacitance: f64, dt: f64, params: &DeviceParameters) -> Self {
        Self {
            capacitance,
            dt,
            r_charging: params.r_charging,
            r_discharging: params.r_discharging,
            v_start: params.v_start,
            v_cutoff: params.v_cutoff,
            v_check_thres: checkpoint_threshold(
                capacitance,
                params.v_cutoff,
                params.checkpoint_energy,
            ),
            overhead: params.checkpoint_overhead(),
            energy_required: params.total_energy_required(),
        }
    }
}

/// Mutable state owned by a single simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub mode: Mode,
    /// Capacitor voltage after the last step
    pub voltage: f64,
    /// Starting voltage of the next exponential update
    pub v_initial: f64,
    /// Stored energy when the current discharge began
    pub e_initial: f64,
    /// Net usable energy delivered so far, after checkpoint/restore costs
    pub total_energy_consumed: f64,
    /// Discharge cycles that ended in a checkpoint and a return to charging
    pub checkpoint_count: u64,
    /// Set once a checkpoint time has been recorded in this discharge cycle
    pub checkpoint_event_pending: bool,
    /// Seconds at which each discharge cycle first reached the checkpoint threshold
    pub checkpoint_times: Vec<f64>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationState {
    /// Empty capacitor, charging.
    pub fn new() -> Self {
        Self {
            mode: Mode::Charging,
            voltage: 0.0,
            v_initial: 0.0,
            e_initial: 0.0,
            total_energy_consumed: 0.0,
            checkpoint_count: 0,
            checkpoint_event_pending: false,
            checkpoint_times: Vec::new(),
        }
    }

    /// Advance by one step with ambient voltage `v_max` at `time` seconds.
    pub fn step(&mut self, v_max: f64, time: f64, model: &StepModel) -> StepOutcome {
        match self.mode {
            Mode::Charging => {
                self.charge(v_max, model);
                StepOutcome::Running
            }
            Mode::Discharging => self.discharge(v_max, time, model),
        }
    }

    fn charge(&mut self, v_max: f64, model: &StepModel) {
        if v_max > self.voltage {
            self.voltage = charge_toward(
                self.v_initial,
                v_max,
                model.dt,
                model.r_charging,
                model.capacitance,
            );
            self.v_initial = self.voltage;
        }

        if self.voltage >= model.v_start {
            self.begin_discharge(model);
        }
    }

    fn begin_discharge(&mut self, model: &StepModel) {
        self.mode = Mode::Discharging;
        self.v_initial = self.voltage;
        self.e_initial = stored_energy(model.capacitance, self.voltage);
        self.checkpoint_event_pending = false;
        trace!(voltage = self.voltage, e_initial = self.e_initial, "discharge started");
    }

    fn discharge(&mut self, v_max: f64, time: f64, model: &StepModel) -> StepOutcome {
        let leaked = decay(
            self.v_initial,
            model.dt,
            model.r_discharging,
            model.capacitance,
        );
        self.voltage = charge_toward(
            leaked,
            v_max,
            model.dt,
            model.r_charging,
            model.capacitance,
        );
        self.v_initial = self.voltage;

        if self.voltage <= model.v_check_thres && !self.checkpoint_event_pending {
            self.checkpoint_times.push(time);
            self.checkpoint_event_pending = true;
        }

        if self.voltage <= model.v_cutoff {
            return self.cut_off(model);
        }

        StepOutcome::Running
    }

    /// Book the energy of the finished discharge and decide how the run continues.
    fn cut_off(&mut self, model: &StepModel) -> StepOutcome {
        let e_final = stored_energy(model.capacitance, self.voltage);
        self.total_energy_consumed += (self.e_initial - e_final) - model.overhead;
        self.mode = Mode::Charging;

        if self.total_energy_consumed < 0.0 {
            return StepOutcome::Infeasible;
        }

        if self.total_energy_consumed >= model.energy_required {
            return StepOutcome::Completed;
        }

        self.v_initial = self.voltage;
        self.checkpoint_count += 1;
        trace!(
            voltage = self.voltage,
            total_energy = self.total_energy_consumed,
            checkpoints = self.checkpoint_count,
            "cutoff reached, charging"
        );
        StepOutcome::Running
    }
}
