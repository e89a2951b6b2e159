//! Device description: electrical and energy constants of the harvester
//! and its microcontroller.
//!
//! [`DeviceParameters`] is the fully resolved bundle the solver consumes.
//! [`McuTable`] holds the per-MCU profiles (effective load resistance and
//! per-cycle / per-byte energy costs) that parameters are resolved from.

mod mcu;
mod params;

pub use mcu::{McuProfile, McuTable};
pub use params::DeviceParameters;
