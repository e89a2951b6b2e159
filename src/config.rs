//! Run configuration and one-time input resolution.
//!
//! [`RunConfig`] collects the user-facing scalars and file locations.
//! [`RunConfig::resolve`] is the only place input files are read: it loads
//! the MCU table and the voltage trace once and hands the solver plain
//! values.

use std::path::PathBuf;

use tracing::debug;

use crate::device::{DeviceParameters, McuProfile, McuTable};
use crate::error::{CamsimError, Result};
use crate::trace::VoltageTrace;

/// Default capacitance in farads.
pub const DEFAULT_CAPACITANCE: f64 = 220e-6;

/// Default charging resistance in ohms.
pub const DEFAULT_R_CHARGING: f64 = 1000.0;

/// Default MCU startup voltage.
pub const DEFAULT_V_START: f64 = 3.3;

/// Default MCU minimum operating voltage.
pub const DEFAULT_V_CUTOFF: f64 = 1.8;

/// Default workload size in MCU cycles.
pub const DEFAULT_TOTAL_CYCLES: u64 = 100_000;

/// Default checkpoint and restore size in bytes.
pub const DEFAULT_STATE_SIZE: u64 = 128;

/// Default MCU profile name.
pub const DEFAULT_MCU: &str = "stm32l152re_32Mhz";

/// Default MCU profile table.
pub const DEFAULT_MCU_TABLE: &str = "mcu.csv";

/// Default voltage trace file.
pub const DEFAULT_TRACE: &str = "traces/RF_2.csv";

/// User inputs for a batch of simulations.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Capacitance values to simulate, in farads
    pub capacitances: Vec<f64>,
    pub r_charging: f64,
    pub v_start: f64,
    pub v_cutoff: f64,
    pub total_cycles_required: u64,
    /// Bytes written per checkpoint
    pub checkpoint_size: u64,
    /// Bytes read per restore
    pub restore_size: u64,
    pub trace_path: PathBuf,
    pub mcu_table_path: PathBuf,
    pub mcu: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            capacitances: vec![DEFAULT_CAPACITANCE],
            r_charging: DEFAULT_R_CHARGING,
            v_start: DEFAULT_V_START,
            v_cutoff: DEFAULT_V_CUTOFF,
            total_cycles_required: DEFAULT_TOTAL_CYCLES,
            checkpoint_size: DEFAULT_STATE_SIZE,
            restore_size: DEFAULT_STATE_SIZE,
            trace_path: PathBuf::from(DEFAULT_TRACE),
            mcu_table_path: PathBuf::from(DEFAULT_MCU_TABLE),
            mcu: DEFAULT_MCU.to_string(),
        }
    }
}

/// Everything the solver needs, loaded and validated.
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub parameters: DeviceParameters,
    pub trace: VoltageTrace,
    pub capacitances: Vec<f64>,
}

impl RunConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacitance values to simulate.
    pub fn with_capacitances(mut self, capacitances: Vec<f64>) -> Self {
        self.capacitances = capacitances;
        self
    }

    /// Set the charging resistance (ohms).
    pub fn with_r_charging(mut self, r_charging: f64) -> Self {
        self.r_charging = r_charging;
        self
    }

    /// Set the startup and cutoff voltages.
    pub fn with_voltages(mut self, v_start: f64, v_cutoff: f64) -> Self {
        self.v_start = v_start;
        self.v_cutoff = v_cutoff;
        self
    }

    /// Set the workload size in MCU cycles.
    pub fn with_total_cycles(mut self, total_cycles_required: u64) -> Self {
        self.total_cycles_required = total_cycles_required;
        self
    }

    /// Set the checkpoint and restore sizes in bytes.
    pub fn with_state_sizes(mut self, checkpoint_size: u64, restore_size: u64) -> Self {
        self.checkpoint_size = checkpoint_size;
        self.restore_size = restore_size;
        self
    }

    /// Set the voltage trace file.
    pub fn with_trace_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.trace_path = path.into();
        self
    }

    /// Set the MCU table file and the profile to use from it.
    pub fn with_mcu(mut self, table: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        self.mcu_table_path = table.into();
        self.mcu = name.into();
        self
    }

    /// Combine an MCU profile with the user scalars.
    pub fn device_parameters(&self, profile: &McuProfile) -> Result<DeviceParameters> {
        let params = DeviceParameters {
            r_charging: self.r_charging,
            r_discharging: profile.effective_resistance,
            v_start: self.v_start,
            v_cutoff: self.v_cutoff,
            energy_per_cycle: profile.energy_per_cycle,
            checkpoint_energy: self.checkpoint_size as f64 * profile.write_energy_per_byte,
            restore_energy: self.restore_size as f64 * profile.read_energy_per_byte,
            total_cycles_required: self.total_cycles_required,
        };
        params.validate()?;
        Ok(params)
    }

    /// Resolve against an already-loaded MCU table and trace.
    pub fn resolve_with(&self, table: &McuTable, trace: VoltageTrace) -> Result<ResolvedRun> {
        if self.capacitances.is_empty() {
            return Err(CamsimError::invalid_parameter(
                "capacitances",
                "at least one capacitance is required",
            ));
        }

        let profile = table.get(&self.mcu)?;
        let parameters = self.device_parameters(profile)?;
        debug!(mcu = %profile.name, ?parameters, "resolved device parameters");

        Ok(ResolvedRun {
            parameters,
            trace,
            capacitances: self.capacitances.clone(),
        })
    }

    /// Load the MCU table and trace from disk and resolve.
    pub fn resolve(&self) -> Result<ResolvedRun> {
        let table = McuTable::from_path(&self.mcu_table_path)?;
        let trace = VoltageTrace::from_csv_path(&self.trace_path)?;
        self.resolve_with(&table, trace)
    }
}
