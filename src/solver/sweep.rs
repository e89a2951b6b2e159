//! Independent runs over several capacitance values.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::simulator::{CapacitorSimulator, SimulationResult};
use crate::device::DeviceParameters;
use crate::error::Result;
use crate::trace::VoltageTrace;

/// Simulate every capacitance in `capacitances` against the same trace.
///
/// Runs share nothing but read-only inputs. Results are returned in input
/// order; an invalid capacitance only fails its own entry.
pub fn simulate_sweep(
    capacitances: &[f64],
    trace: &VoltageTrace,
    params: &DeviceParameters,
    record_voltage: bool,
) -> Vec<Result<SimulationResult>> {
    let run = |&c: &f64| {
        CapacitorSimulator::new(c, params)
            .map(|sim| sim.with_voltage_recording(record_voltage).run(trace))
    };

    #[cfg(feature = "parallel")]
    let results = capacitances.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let results = capacitances.iter().map(run).collect();

    results
}
