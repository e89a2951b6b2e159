//! Camsim - Energy-Harvesting Checkpoint Simulator
//!
//! Simulates capacitor charge/discharge cycles of an intermittently powered
//! MCU and reports whether a workload finishes and how many checkpoints it
//! needs.
//!
//! # Usage
//!
//! ```bash
//! camsim --cap 100u,220u --trace traces/RF_2.csv --mcu stm32l152re_32Mhz -j
//! ```

use std::path::PathBuf;

use clap::Parser;
use camsim_core::{
    config::{
        RunConfig, DEFAULT_MCU, DEFAULT_MCU_TABLE, DEFAULT_R_CHARGING, DEFAULT_STATE_SIZE,
        DEFAULT_TOTAL_CYCLES, DEFAULT_TRACE, DEFAULT_V_CUTOFF, DEFAULT_V_START,
    },
    error::Result,
    simulate_sweep, units, Report,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Simulate capacitor charging and discharging with checkpointing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Comma-separated capacitance values in farads (e.g. 220e-6,470u)
    #[arg(long, default_value = "220e-6")]
    cap: String,

    /// Resistance during charging in ohms
    #[arg(long, default_value_t = DEFAULT_R_CHARGING)]
    r_charging: f64,

    /// Startup voltage of the MCU
    #[arg(long, default_value_t = DEFAULT_V_START)]
    v_start: f64,

    /// Minimum operating voltage of the MCU
    #[arg(long, default_value_t = DEFAULT_V_CUTOFF)]
    v_cutoff: f64,

    /// Total MCU cycles required by the application
    #[arg(long, default_value_t = DEFAULT_TOTAL_CYCLES)]
    total_cycles_required: u64,

    /// Bytes written per checkpoint
    #[arg(long, default_value_t = DEFAULT_STATE_SIZE)]
    total_checkpoint_size: u64,

    /// Bytes read per restore
    #[arg(long, default_value_t = DEFAULT_STATE_SIZE)]
    total_restore_size: u64,

    /// CSV file with one ambient voltage sample per millisecond
    #[arg(long, default_value = DEFAULT_TRACE)]
    trace: PathBuf,

    /// MCU profile name
    #[arg(long, default_value = DEFAULT_MCU)]
    mcu: String,

    /// CSV table of MCU profiles
    #[arg(long, default_value = DEFAULT_MCU_TABLE)]
    mcu_table: PathBuf,

    /// Write an SVG chart per capacitance
    #[arg(short, long)]
    graph: bool,

    /// Directory for SVG charts
    #[arg(long, default_value = ".")]
    graph_dir: PathBuf,

    /// Output results as JSON
    #[arg(short, long)]
    json: bool,

    /// Log simulation progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "camsim=debug,camsim_core=debug"
    } else {
        "camsim=warn,camsim_core=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Resolve inputs once
    let config = RunConfig::new()
        .with_capacitances(units::parse_value_list(&args.cap)?)
        .with_r_charging(args.r_charging)
        .with_voltages(args.v_start, args.v_cutoff)
        .with_total_cycles(args.total_cycles_required)
        .with_state_sizes(args.total_checkpoint_size, args.total_restore_size)
        .with_trace_path(args.trace)
        .with_mcu(args.mcu_table, args.mcu);
    let run = config.resolve()?;

    if args.graph && !cfg!(feature = "plot") {
        warn!("charts requested but camsim was built without the 'plot' feature");
    }

    // Simulate
    let results = simulate_sweep(&run.capacitances, &run.trace, &run.parameters, args.graph);

    // Report in input order
    for result in results {
        let result = result?;
        let report = Report::from(&result);
        if args.json {
            println!("{}", report.to_json()?);
        } else {
            println!("{report}");
        }

        #[cfg(feature = "plot")]
        if args.graph {
            if let Err(e) =
                camsim_core::plot::write_svg(&args.graph_dir, &result, &run.trace, &run.parameters)
            {
                tracing::error!("{e}");
            }
        }
    }

    Ok(())
}
