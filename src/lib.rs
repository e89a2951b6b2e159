//! # Camsim Core
//!
//! A checkpoint-aware capacitor simulator for energy-harvesting devices.
//!
//! An intermittently powered MCU charges a capacitor from an ambient source,
//! runs until the capacitor drops to its cutoff voltage, and must write a
//! checkpoint before losing power. Given an ambient voltage trace and the
//! device's electrical and energy parameters, this crate determines whether
//! a fixed workload can be finished, how many checkpoint cycles it takes,
//! and when each checkpoint happens.
//!
//! This library provides:
//! - A per-step charge/discharge state machine with energy accounting
//! - Loaders for MCU profile tables and ambient voltage traces (CSV)
//! - Text and JSON reports, and SVG charts (feature `plot`)
//!
//! ## Architecture
//!
//! - [`device`] - Device parameters and MCU profiles
//! - [`trace`] - Ambient voltage traces
//! - [`config`] - User inputs and one-time input resolution
//! - [`solver`] - The simulation core
//! - [`report`] - Text and JSON output
//! - [`units`] - Engineering-notation parsing
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! camsim --cap 100u,220u,470u --trace traces/RF_2.csv --mcu stm32l152re_32Mhz --json
//! ```
//!
//! ### Library
//!
//! ```
//! use camsim_core::{simulate, DeviceParameters, VoltageTrace};
//!
//! let params = DeviceParameters {
//!     r_charging: 1000.0,
//!     r_discharging: 100.0,
//!     v_start: 3.3,
//!     v_cutoff: 1.8,
//!     energy_per_cycle: 2e-4,
//!     checkpoint_energy: 1.28e-7,
//!     restore_energy: 1.28e-7,
//!     total_cycles_required: 10,
//! };
//! let trace = VoltageTrace::constant(5.0, 10_000)?;
//! let result = simulate(220e-6, &trace, &params)?;
//! assert!(result.completed());
//! # Ok::<(), camsim_core::CamsimError>(())
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod report;
pub mod solver;
pub mod trace;
pub mod units;

#[cfg(feature = "plot")]
pub mod plot;

// Re-export main types for convenience
pub use config::{ResolvedRun, RunConfig};
pub use device::{DeviceParameters, McuProfile, McuTable};
pub use error::{CamsimError, Result};
pub use report::Report;
pub use solver::{simulate, simulate_sweep, CapacitorSimulator, SimulationResult, Termination};
pub use trace::VoltageTrace;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCamSim;

/// Trace sampling step in seconds (1 ms)
pub const DEFAULT_TIME_STEP: f64 = 1e-3;
