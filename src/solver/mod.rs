//! Charge/discharge simulation core.
//!
//! The device alternates between two modes:
//!
//! - **Charging**: the MCU is off and the capacitor charges from the ambient
//!   source through `R_charging`.
//! - **Discharging**: once the capacitor reaches `V_start` the MCU runs,
//!   drawing it down through `R_discharging` while the source keeps
//!   topping it up. At `V_check_thres` the device commits to a checkpoint;
//!   at `V_cutoff` power is lost, the discharged energy minus the
//!   checkpoint and restore costs is booked, and charging resumes.
//!
//! A run ends when the booked energy covers the workload, when it goes
//! negative (checkpointing cannot be paid for), or when the trace ends.
//!
//! For each step `dt` both voltage updates use the exact single-RC solution:
//!
//! ```text
//! decay:         V' = V exp(-dt / (R_discharging C))
//! charge toward: V' = V + (V_max - V) (1 - exp(-dt / (R_charging C)))
//! ```

mod laws;
mod simulator;
mod state;
mod sweep;

pub use laws::{charge_toward, checkpoint_threshold, decay, stored_energy};
pub use simulator::{simulate, CapacitorSimulator, SimulationResult, Termination};
pub use state::{Mode, SimulationState, StepModel, StepOutcome};
pub use sweep::simulate_sweep;
