//! MCU profile table.
//!
//! Profiles are stored as CSV with a header row:
//!
//! ```text
//! name,effective_resistance,energy_per_cycle,write_energy_per_byte,read_energy_per_byte
//! stm32l152re_32Mhz,330,9.4e-10,1.5e-8,1.9e-9
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CamsimError, Result};

/// Energy characteristics of one microcontroller configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct McuProfile {
    pub name: String,
    /// Load seen by the capacitor while the MCU runs (ohms)
    pub effective_resistance: f64,
    /// Joules per clock cycle
    pub energy_per_cycle: f64,
    /// Joules per byte written to non-volatile memory
    pub write_energy_per_byte: f64,
    /// Joules per byte read back from non-volatile memory
    pub read_energy_per_byte: f64,
}

/// An ordered collection of MCU profiles.
#[derive(Debug, Clone, Default)]
pub struct McuTable {
    profiles: Vec<McuProfile>,
}

impl McuTable {
    /// Build a table from already-parsed profiles.
    pub fn new(profiles: Vec<McuProfile>) -> Self {
        Self { profiles }
    }

    /// Load a table from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| CamsimError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let table = Self::read(file, &path.display().to_string())?;
        debug!(path = %path.display(), profiles = table.len(), "loaded MCU table");
        Ok(table)
    }

    /// Load a table from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::read(reader, "<reader>")
    }

    fn read<R: Read>(reader: R, origin: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let profiles = reader
            .deserialize()
            .collect::<std::result::Result<Vec<McuProfile>, _>>()
            .map_err(|e| CamsimError::csv(origin, e))?;

        Ok(Self { profiles })
    }

    /// Look up a profile by exact name. The first matching row wins.
    pub fn get(&self, name: &str) -> Result<&McuProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CamsimError::UnknownMcu {
                name: name.to_string(),
            })
    }

    /// Names of all profiles, in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
