//! Ambient voltage traces.
//!
//! A trace is one voltage sample per fixed time step. Trace files are
//! headerless CSV: the first column of each row is the sample in volts,
//! one row per [`DEFAULT_TIME_STEP`](crate::DEFAULT_TIME_STEP).

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{CamsimError, Result};
use crate::DEFAULT_TIME_STEP;

/// An immutable, evenly sampled ambient voltage series.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageTrace {
    samples: Vec<f64>,
    dt: f64,
}

impl VoltageTrace {
    /// Create a trace from samples taken every `dt` seconds.
    ///
    /// Samples must be finite and non-negative; `dt` must be positive.
    pub fn new(samples: Vec<f64>, dt: f64) -> Result<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(CamsimError::invalid_trace(
                0,
                format!("time step must be positive (got {dt})"),
            ));
        }

        if let Some((index, &v)) = samples
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v >= 0.0))
        {
            return Err(CamsimError::invalid_trace(
                index,
                format!("sample must be finite and not negative (got {v})"),
            ));
        }

        Ok(Self { samples, dt })
    }

    /// Create a trace sampled at the default 1 ms step.
    pub fn from_samples(samples: Vec<f64>) -> Result<Self> {
        Self::new(samples, DEFAULT_TIME_STEP)
    }

    /// A trace holding `voltage` for `len` steps of 1 ms.
    pub fn constant(voltage: f64, len: usize) -> Result<Self> {
        Self::from_samples(vec![voltage; len])
    }

    /// Load a trace from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| CamsimError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let trace = Self::read(file, &path.display().to_string())?;
        debug!(path = %path.display(), samples = trace.len(), "loaded voltage trace");
        Ok(trace)
    }

    /// Load a trace from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::read(reader, "<reader>")
    }

    fn read<R: Read>(reader: R, origin: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut samples = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| CamsimError::csv(origin, e))?;
            let field = record.get(0).unwrap_or_default();
            let v = field.parse::<f64>().map_err(|_| {
                CamsimError::invalid_trace(index, format!("'{field}' is not a voltage"))
            })?;
            samples.push(v);
        }

        Self::from_samples(samples)
    }

    /// Sample values in volts.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Step duration in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Elapsed time at sample `index`, in seconds.
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.dt
    }

    /// Total covered time in seconds.
    pub fn duration(&self) -> f64 {
        self.time_at(self.samples.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_reader_first_column() {
        let csv = "0.5\n1.25,ignored\n 2.0 \n";
        let trace = VoltageTrace::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(trace.samples(), &[0.5, 1.25, 2.0]);
        assert_relative_eq!(trace.dt(), 1e-3);
    }

    #[test]
    fn test_time_axis() {
        let trace = VoltageTrace::constant(3.3, 2500).unwrap();
        assert_relative_eq!(trace.time_at(1000), 1.0);
        assert_relative_eq!(trace.duration(), 2.5);
    }

    #[test]
    fn test_negative_sample_rejected() {
        let err = VoltageTrace::from_samples(vec![1.0, -0.1]).unwrap_err();
        assert!(matches!(err, CamsimError::InvalidTrace { index: 1, .. }));
    }

    #[test]
    fn test_unparseable_sample() {
        let err = VoltageTrace::from_reader("1.0\nvolts\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CamsimError::InvalidTrace { index: 1, .. }));
    }

    #[test]
    fn test_bad_time_step() {
        assert!(VoltageTrace::new(vec![1.0], 0.0).is_err());
    }
}
