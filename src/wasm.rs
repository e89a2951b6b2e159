//! WASM bindings for Camsim Core.
//!
//! This module provides JavaScript-friendly bindings so a browser page can
//! run the simulator on a trace it already holds in memory.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCamSim } from 'camsim_core';
//!
//! await init();
//!
//! const sim = new WasmCamSim(1000, 330, 3.3, 1.8, 9.4e-10, 1.9e-6, 2.4e-7, 100000);
//! const report = JSON.parse(sim.simulate(220e-6, traceSamples));
//! const voltage = sim.voltage_series(220e-6, traceSamples);
//! ```

use wasm_bindgen::prelude::*;

use crate::device::DeviceParameters;
use crate::error::CamsimError;
use crate::report::Report;
use crate::solver::{simulate, SimulationResult};
use crate::trace::VoltageTrace;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: CamsimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible harvester simulator for a fixed device.
#[wasm_bindgen]
pub struct WasmCamSim {
    params: DeviceParameters,
}

#[wasm_bindgen]
impl WasmCamSim {
    /// Create a simulator for a device.
    ///
    /// # Arguments
    /// * `r_charging` - Source resistance in ohms
    /// * `r_discharging` - MCU effective load resistance in ohms
    /// * `v_start` - Startup voltage
    /// * `v_cutoff` - Minimum operating voltage
    /// * `energy_per_cycle` - Joules per MCU cycle
    /// * `checkpoint_energy` - Joules per checkpoint
    /// * `restore_energy` - Joules per restore
    /// * `total_cycles_required` - Workload size in MCU cycles
    #[wasm_bindgen(constructor)]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        r_charging: f64,
        r_discharging: f64,
        v_start: f64,
        v_cutoff: f64,
        energy_per_cycle: f64,
        checkpoint_energy: f64,
        restore_energy: f64,
        total_cycles_required: u32,
    ) -> Result<WasmCamSim, JsValue> {
        let params = DeviceParameters {
            r_charging,
            r_discharging,
            v_start,
            v_cutoff,
            energy_per_cycle,
            checkpoint_energy,
            restore_energy,
            total_cycles_required: u64::from(total_cycles_required),
        };
        params.validate().map_err(to_js)?;
        Ok(WasmCamSim { params })
    }

    fn run(&self, capacitance: f64, trace: &[f64]) -> Result<SimulationResult, JsValue> {
        let trace = VoltageTrace::from_samples(trace.to_vec()).map_err(to_js)?;
        simulate(capacitance, &trace, &self.params).map_err(to_js)
    }

    /// Simulate one capacitance over a 1 ms trace and return the JSON report.
    #[wasm_bindgen]
    pub fn simulate(&self, capacitance: f64, trace: &[f64]) -> Result<String, JsValue> {
        let result = self.run(capacitance, trace)?;
        Report::from(&result).to_json().map_err(to_js)
    }

    /// Capacitor voltage after each processed step.
    #[wasm_bindgen]
    pub fn voltage_series(&self, capacitance: f64, trace: &[f64]) -> Result<Vec<f64>, JsValue> {
        Ok(self.run(capacitance, trace)?.voltage)
    }

    /// Seconds at which each discharge cycle reached the checkpoint threshold.
    #[wasm_bindgen]
    pub fn checkpoint_times(&self, capacitance: f64, trace: &[f64]) -> Result<Vec<f64>, JsValue> {
        Ok(self.run(capacitance, trace)?.checkpoint_times)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the trace step in seconds.
#[wasm_bindgen]
pub fn default_time_step() -> f64 {
    crate::DEFAULT_TIME_STEP
}
