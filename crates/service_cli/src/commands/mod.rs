//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Numeric results are
//! collected into a [`Table`] and rendered in the configured format.

pub mod check;
pub mod envelope;
pub mod grid;
pub mod interp;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::OutputFormat;
use crate::{CliError, Result};

/// Read and parse a JSON input file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Column-labelled numeric rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Empty table with the given column headers.
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; it must have one value per header.
    pub fn push(&mut self, row: Vec<f64>) {
        debug_assert_eq!(row.len(), self.headers.len(), "row width differs from header");
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Render in `format`.
    ///
    /// JSON writes one object per row; non-finite values become `null`.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                let records: Vec<serde_json::Map<String, serde_json::Value>> = self
                    .rows
                    .iter()
                    .map(|row| {
                        self.headers
                            .iter()
                            .cloned()
                            .zip(row.iter().map(|&v| serde_json::Value::from(v)))
                            .collect()
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&records)?)
            }
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                writer.write_record(&self.headers)?;
                for row in &self.rows {
                    writer.write_record(row.iter().map(|v| v.to_string()))?;
                }
                let bytes = writer.into_inner().map_err(|e| CliError::Io(e.into_error()))?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            OutputFormat::Table => {
                const WIDTH: usize = 14;
                let bar = |left: &str, mid: &str, right: &str| {
                    let segments: Vec<String> =
                        self.headers.iter().map(|_| "─".repeat(WIDTH)).collect();
                    format!("{}{}{}\n", left, segments.join(mid), right)
                };

                let mut out = bar("┌", "┬", "┐");
                let header: Vec<String> = self
                    .headers
                    .iter()
                    .map(|h| format!(" {:<w$} ", h, w = WIDTH - 2))
                    .collect();
                out.push_str(&format!("│{}│\n", header.join("│")));
                out.push_str(&bar("├", "┼", "┤"));
                for row in &self.rows {
                    let cells: Vec<String> = row
                        .iter()
                        .map(|v| format!(" {:>w$.6} ", v, w = WIDTH - 2))
                        .collect();
                    out.push_str(&format!("│{}│\n", cells.join("│")));
                }
                out.push_str(&bar("└", "┴", "┘"));
                Ok(out)
            }
        }
    }
}
