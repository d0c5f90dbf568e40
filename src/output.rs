//! Command results and the `CLOUDBEES_OUTPUTS` file sink

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{FmError, Result};

pub const OUTPUTS_ENV: &str = "CLOUDBEES_OUTPUTS";

/// What a command produced: named output values plus console text.
///
/// `summary` lines are always printed; `details` only with `--verbose`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandReport {
    pub outputs: Vec<(String, String)>,
    pub summary: Vec<String>,
    pub details: Vec<String>,
}

impl CommandReport {
    pub fn output(&mut self, name: &str, value: impl Into<String>) {
        self.outputs.push((name.to_string(), value.into()));
    }

    pub fn output_json<S: Serialize + ?Sized>(&mut self, name: &str, value: &S) -> Result<()> {
        let text = to_json(name, value)?;
        self.output(name, text);
        Ok(())
    }

    pub fn summary(&mut self, line: impl Into<String>) {
        self.summary.push(line.into());
    }

    pub fn detail(&mut self, line: impl Into<String>) {
        self.details.push(line.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.outputs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

pub(crate) fn to_json<S: Serialize + ?Sized>(what: &str, value: &S) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|source| FmError::Encode { what: what.to_string(), source })
}

/// Writes each output value to a file named after its key.
///
/// Without a target directory, or when a write fails, a warning is logged and
/// the command still succeeds.
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    dir: Option<PathBuf>,
}

impl OutputWriter {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn from_env() -> Self {
        let dir = std::env::var_os(OUTPUTS_ENV).filter(|v| !v.is_empty()).map(PathBuf::from);
        Self::new(dir)
    }

    pub fn write(&self, name: &str, value: &str) {
        let Some(dir) = &self.dir else {
            tracing::warn!("{OUTPUTS_ENV} environment variable not set, skipping output {name}={value}");
            return;
        };
        if let Err(e) = write_output_file(&dir.join(name), value) {
            tracing::warn!("failed to write output {}: {}", name, e);
        }
    }

    pub fn write_report(&self, report: &CommandReport) {
        for (name, value) in &report.outputs {
            self.write(name, value);
        }
    }
}

fn write_output_file(path: &Path, value: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o640);
    }
    let mut file = options.open(path)?;
    file.write_all(value.as_bytes())
}
