//! Grid command implementation
//!
//! Prints a non-uniform grid built by `egm_core::math::grids`.

use clap::ValueEnum;
use egm_core::math::grids::{equilogspace, nonlinspace};
use tracing::info;

use super::Table;
use crate::config::OutputFormat;
use crate::Result;

/// Grid constructor selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GridKind {
    /// Spacing widening towards the upper bound, controlled by `phi`
    Nonlinspace,
    /// Close to equidistant in logs
    Equilogspace,
}

/// Build the requested grid.
pub fn build(kind: GridKind, min: f64, max: f64, n: usize, phi: f64) -> Result<Vec<f64>> {
    let grid = match kind {
        GridKind::Nonlinspace => nonlinspace(min, max, n, phi)?,
        GridKind::Equilogspace => equilogspace(min, max, n)?,
    };
    Ok(grid)
}

/// Run the grid command
pub fn run(
    kind: GridKind,
    min: f64,
    max: f64,
    n: usize,
    phi: f64,
    format: OutputFormat,
) -> Result<()> {
    info!(?kind, min, max, n, phi, "Building grid");

    let grid = build(kind, min, max, n, phi)?;
    let mut table = Table::new(&["i", "x"]);
    for (i, &x) in grid.iter().enumerate() {
        table.push(vec![i as f64, x]);
    }
    println!("{}", table.render(format)?);
    Ok(())
}
