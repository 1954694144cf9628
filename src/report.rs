//! Per-pass run logs.
//!
//! A `RunReport` collects what each training pass saw and produced, renders it as a
//! readable log, and can write that log to disk.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One training pass as seen from outside the network.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PassRecord {
    /// 1-based pass number.
    pub pass: usize,
    pub inputs: Vec<f64>,
    pub outputs: Vec<f64>,
    pub targets: Vec<f64>,
    pub error: f64,
    pub recent_average_error: f64,
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    passes: Vec<PassRecord>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pass: PassRecord) {
        self.passes.push(pass);
    }

    #[inline]
    pub fn passes(&self) -> &[PassRecord] {
        &self.passes
    }

    #[inline]
    pub fn last(&self) -> Option<&PassRecord> {
        self.passes.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Writes the text rendering to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.to_string())
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn save_json(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

impl fmt::Display for PassRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pass {}", self.pass)?;
        write_values(f, "Inputs:", &self.inputs)?;
        write_values(f, "Outputs:", &self.outputs)?;
        write_values(f, "Targets:", &self.targets)?;
        writeln!(f, "Net recent average error: {:.6}", self.recent_average_error)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pass in &self.passes {
            writeln!(f)?;
            write!(f, "{pass}")?;
        }
        Ok(())
    }
}

fn write_values(f: &mut fmt::Formatter<'_>, label: &str, values: &[f64]) -> fmt::Result {
    write!(f, "{label}")?;
    for v in values {
        write!(f, " {v:.6}")?;
    }
    writeln!(f)
}
