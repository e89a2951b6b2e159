//! Human-readable and JSON reports for simulation results.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{CamsimError, Result};
use crate::solver::SimulationResult;

/// Summary of one capacitance run, in report form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(rename = "Capacitance")]
    pub capacitance: f64,
    #[serde(rename = "Checkpointing Voltage Threshold")]
    pub v_check_thres: f64,
    #[serde(rename = "Total energy consumed")]
    pub total_energy_consumed: f64,
    #[serde(rename = "Total energy required")]
    pub total_energy_required: f64,
    /// `None` unless the workload completed; serialised as `"N/A"`
    #[serde(rename = "Total number of checkpoints", serialize_with = "count_or_na")]
    pub checkpoints: Option<u64>,
    #[serde(rename = "Execution completed")]
    pub completed: bool,
}

fn count_or_na<S: Serializer>(count: &Option<u64>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match count {
        Some(n) => serializer.serialize_u64(*n),
        None => serializer.serialize_str("N/A"),
    }
}

impl From<&SimulationResult> for Report {
    fn from(result: &SimulationResult) -> Self {
        Self {
            capacitance: result.capacitance,
            v_check_thres: result.v_check_thres,
            total_energy_consumed: result.total_energy_consumed,
            total_energy_required: result.total_energy_required,
            checkpoints: result.completed_checkpoints(),
            completed: result.completed(),
        }
    }
}

impl Report {
    /// Pretty-printed JSON with 4-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| CamsimError::ReportError {
                message: e.to_string(),
            })?;
        String::from_utf8(out).map_err(|e| CamsimError::ReportError {
            message: e.to_string(),
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results for Capacitance: {} F", self.capacitance)?;
        writeln!(f, "Checkpointing Voltage Threshold: {} V", self.v_check_thres)?;
        writeln!(f, "Total energy consumed: {} Joules", self.total_energy_consumed)?;
        writeln!(f, "Total energy required: {} Joules", self.total_energy_required)?;
        match self.checkpoints {
            Some(n) => writeln!(f, "Total number of checkpoints: {n}")?,
            None => writeln!(f, "Application execution not completed")?,
        }
        write!(f, "-------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Termination;

    fn result(termination: Termination) -> SimulationResult {
        SimulationResult {
            capacitance: 220e-6,
            v_check_thres: 1.85,
            total_energy_consumed: 2.5e-3,
            total_energy_required: 2e-3,
            checkpoint_count: 2,
            termination,
            steps: 600,
            voltage: Vec::new(),
            checkpoint_times: vec![0.25, 0.41, 0.57],
        }
    }

    #[test]
    fn test_completed_text() {
        let report = Report::from(&result(Termination::Completed { time: 0.6 }));
        let text = report.to_string();
        assert!(text.starts_with("Results for Capacitance: 0.00022 F\n"));
        assert!(text.contains("Total number of checkpoints: 2\n"));
        assert!(text.ends_with("-------"));
    }

    #[test]
    fn test_incomplete_text() {
        let report = Report::from(&result(Termination::TraceExhausted));
        let text = report.to_string();
        assert!(text.contains("Application execution not completed"));
        assert!(!text.contains("Total number of checkpoints"));
    }

    #[test]
    fn test_json_keys() {
        let json = Report::from(&result(Termination::Completed { time: 0.6 }))
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["Total number of checkpoints"], 2);
        assert_eq!(value["Execution completed"], true);
        assert_eq!(value["Capacitance"], 220e-6);
        assert!(json.contains("\n    \"Capacitance\""));
    }

    #[test]
    fn test_json_not_available() {
        let json = Report::from(&result(Termination::Infeasible { time: 0.3 }))
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["Total number of checkpoints"], "N/A");
        assert_eq!(value["Execution completed"], false);
    }
}
