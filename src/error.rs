//! Error types for the Camsim simulator.
//!
//! This module provides a unified error type [`CamsimError`] that covers
//! all error conditions that can occur while resolving device parameters,
//! loading input files, simulating, and rendering results.
//!
//! Running out of energy at a cutoff or running out of trace are *not*
//! errors: they are reported through [`crate::solver::Termination`].

use thiserror::Error;

/// Result type alias using [`CamsimError`].
pub type Result<T> = std::result::Result<T, CamsimError>;

/// Unified error type for all Camsim operations.
#[derive(Error, Debug)]
pub enum CamsimError {
    // ============ Parameter Errors ============
    /// A device parameter is out of range
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    /// Capacitance must be finite and positive
    #[error("Invalid capacitance {value:e} F: must be finite and greater than zero")]
    InvalidCapacitance { value: f64 },

    /// A trace sample or the trace step is unusable
    #[error("Invalid voltage trace at sample {index}: {message}")]
    InvalidTrace { index: usize, message: String },

    /// A numeric value in engineering notation could not be parsed
    #[error("Invalid value '{text}' (expected a number such as 220e-6 or 220u)")]
    InvalidValue { text: String },

    /// MCU name not present in the profile table
    #[error("Unknown MCU '{name}' (not found in the MCU profile table)")]
    UnknownMcu { name: String },

    // ============ I/O Errors ============
    /// Error opening an input file
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content
    #[error("Malformed CSV in '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },

    // ============ Output Errors ============
    /// Report serialisation failed
    #[error("Report error: {message}")]
    ReportError { message: String },

    /// Chart rendering failed
    #[cfg(feature = "plot")]
    #[error("Plot error: {message}")]
    PlotError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl CamsimError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an invalid trace error
    pub fn invalid_trace(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidTrace {
            index,
            message: message.into(),
        }
    }

    /// Create a CSV error tagged with the source it came from
    pub fn csv(path: impl Into<String>, source: csv::Error) -> Self {
        Self::CsvError {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CamsimError::invalid_parameter("v_cutoff", "must be below v_start");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'v_cutoff': must be below v_start"
        );

        let err = CamsimError::UnknownMcu {
            name: "atmega".to_string(),
        };
        assert!(err.to_string().contains("atmega"));
    }
}
