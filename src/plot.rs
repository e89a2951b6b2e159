//! SVG charts of a simulation run.
//!
//! The chart shows the ambient trace and the capacitor voltage up to the
//! step where the run ended, the startup/cutoff/checkpoint reference levels,
//! and a numbered marker at every checkpoint time.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::debug;

use crate::device::DeviceParameters;
use crate::error::{CamsimError, Result};
use crate::solver::SimulationResult;
use crate::trace::VoltageTrace;

/// Chart size in pixels.
pub const CHART_SIZE: (u32, u32) = (1200, 250);

const TRACE_COLOR: RGBColor = RGBColor(0xB9, 0xB9, 0xB9);
const VOLTAGE_COLOR: RGBColor = RGBColor(0x00, 0x00, 0x00);
const START_COLOR: RGBColor = RGBColor(0x48, 0xA3, 0x00);
const CUTOFF_COLOR: RGBColor = RGBColor(0xB8, 0x21, 0x00);
const THRESHOLD_COLOR: RGBColor = RGBColor(0xB7, 0x48, 0xFF);
const CHECKPOINT_COLOR: RGBColor = RGBColor(0xF0, 0x71, 0x00);

/// Render the chart for one run as an SVG document.
///
/// # Errors
/// Returns [`CamsimError::PlotError`] if the run has no recorded voltage
/// series or drawing fails.
pub fn render_svg(
    result: &SimulationResult,
    trace: &VoltageTrace,
    params: &DeviceParameters,
) -> Result<String> {
    if result.voltage.is_empty() {
        return Err(CamsimError::PlotError {
            message: "run has no recorded voltage series".to_string(),
        });
    }

    draw(result, trace, params).map_err(|e| CamsimError::PlotError {
        message: e.to_string(),
    })
}

/// Render the chart and write it to `<dir>/camsim_<C>F.svg`.
pub fn write_svg(
    dir: &Path,
    result: &SimulationResult,
    trace: &VoltageTrace,
    params: &DeviceParameters,
) -> Result<PathBuf> {
    let svg = render_svg(result, trace, params)?;
    let path = dir.join(format!("camsim_{}F.svg", result.capacitance));
    std::fs::write(&path, svg).map_err(|e| CamsimError::PlotError {
        message: format!("failed to write '{}': {e}", path.display()),
    })?;
    debug!(path = %path.display(), "wrote chart");
    Ok(path)
}

fn draw(
    result: &SimulationResult,
    trace: &VoltageTrace,
    params: &DeviceParameters,
) -> std::result::Result<String, Box<dyn std::error::Error>> {
    let steps = result.voltage.len().min(trace.len());
    let ambient = &trace.samples()[..steps];
    let t_end = trace.time_at(steps.saturating_sub(1)).max(trace.dt());
    let y_max = ambient
        .iter()
        .chain(&result.voltage)
        .copied()
        .fold(params.v_start, f64::max)
        * 1.1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(0.0..t_end, 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Time (s)")
            .y_desc("Voltage (V)")
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                ambient.iter().enumerate().map(|(i, &v)| (trace.time_at(i), v)),
                &TRACE_COLOR,
            ))?
            .label("Voltage Trace")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TRACE_COLOR));

        let capacitance = result.capacitance;
        chart
            .draw_series(LineSeries::new(
                result
                    .voltage
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (trace.time_at(i), v)),
                &VOLTAGE_COLOR,
            ))?
            .label(format!("Capacitor Voltage (C = {capacitance} F)"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], VOLTAGE_COLOR));

        let levels = [
            (params.v_start, START_COLOR, "Startup Voltage", 0.04),
            (params.v_cutoff, CUTOFF_COLOR, "Minimum Operating Voltage", -0.25),
            (result.v_check_thres, THRESHOLD_COLOR, "Checkpointing Threshold", -0.25),
        ];
        for (level, color, label, offset) in levels {
            chart.draw_series(LineSeries::new(vec![(0.0, level), (t_end, level)], &color))?;
            chart.draw_series(std::iter::once(Text::new(
                label.to_string(),
                (t_end * 0.01, level + offset),
                ("sans-serif", 11).into_font(),
            )))?;
        }

        for (idx, &t) in result.checkpoint_times.iter().enumerate() {
            let marker = chart.draw_series(LineSeries::new(
                vec![(t, 0.0), (t, y_max)],
                &CHECKPOINT_COLOR,
            ))?;
            if idx == 0 {
                marker
                    .label("Checkpoint Location")
                    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CHECKPOINT_COLOR));
            }
            chart.draw_series(std::iter::once(Text::new(
                (idx + 1).to_string(),
                (t, y_max * 0.95),
                ("sans-serif", 10).into_font(),
            )))?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }

    Ok(svg)
}
