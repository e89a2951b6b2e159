//! Resolved device parameters.

use serde::Serialize;

use crate::error::{CamsimError, Result};

/// Electrical and energy constants for one simulated device.
///
/// All quantities are SI: ohms, volts, joules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceParameters {
    /// Series resistance between the ambient source and the capacitor
    pub r_charging: f64,
    /// Effective load resistance of the running MCU
    pub r_discharging: f64,
    /// Startup voltage: discharge (useful work) begins at or above this
    pub v_start: f64,
    /// Minimum operating voltage: power is lost at or below this
    pub v_cutoff: f64,
    /// Energy cost of one MCU clock cycle
    pub energy_per_cycle: f64,
    /// Energy to write one checkpoint to non-volatile memory
    pub checkpoint_energy: f64,
    /// Energy to read the checkpoint back after power returns
    pub restore_energy: f64,
    /// Size of the workload in MCU cycles
    pub total_cycles_required: u64,
}

impl DeviceParameters {
    /// Check every range constraint.
    ///
    /// Resistances, `v_start`, `energy_per_cycle` and the workload must be
    /// positive, checkpoint/restore energies non-negative, and
    /// `0 <= v_cutoff < v_start`.
    pub fn validate(&self) -> Result<()> {
        positive("r_charging", self.r_charging)?;
        positive("r_discharging", self.r_discharging)?;
        positive("v_start", self.v_start)?;
        positive("energy_per_cycle", self.energy_per_cycle)?;
        non_negative("v_cutoff", self.v_cutoff)?;
        non_negative("checkpoint_energy", self.checkpoint_energy)?;
        non_negative("restore_energy", self.restore_energy)?;

        if self.v_cutoff >= self.v_start {
            return Err(CamsimError::invalid_parameter(
                "v_cutoff",
                format!(
                    "cutoff voltage {} V must be below startup voltage {} V",
                    self.v_cutoff, self.v_start
                ),
            ));
        }

        if self.total_cycles_required == 0 {
            return Err(CamsimError::invalid_parameter(
                "total_cycles_required",
                "workload must be at least one cycle",
            ));
        }

        Ok(())
    }

    /// Energy needed to finish the workload.
    pub fn total_energy_required(&self) -> f64 {
        self.total_cycles_required as f64 * self.energy_per_cycle
    }

    /// Energy lost to one checkpoint plus one restore.
    pub fn checkpoint_overhead(&self) -> f64 {
        self.checkpoint_energy + self.restore_energy
    }
}

fn positive(param: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CamsimError::invalid_parameter(
            param,
            format!("must be finite and greater than zero (got {value})"),
        ))
    }
}

fn non_negative(param: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CamsimError::invalid_parameter(
            param,
            format!("must be finite and not negative (got {value})"),
        ))
    }
}
