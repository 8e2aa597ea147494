//! Interp command implementation
//!
//! Evaluates a multilinear interpolant described by a JSON file:
//!
//! ```json
//! { "grids": [[0, 1, 2], [0, 1]], "values": [0, 1, 1, 2, 2, 3], "points": [[0.5, 0.5]] }
//! ```
//!
//! The rank is the number of grids (1 to 5); `values` is row-major.

use std::path::Path;

use egm_core::math::interpolators::MultilinearInterpolator;
use serde::Deserialize;
use tracing::{debug, info};

use super::{read_json, Table};
use crate::config::OutputFormat;
use crate::{CliError, Result};

/// Interpolation problem read from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct InterpInput {
    /// One strictly increasing grid per axis
    pub grids: Vec<Vec<f64>>,
    /// Row-major value tensor
    pub values: Vec<f64>,
    /// Query points, one coordinate per axis
    pub points: Vec<Vec<f64>>,
}

/// Run the interp command
pub fn run(input: &Path, format: OutputFormat) -> Result<()> {
    info!("Starting interpolation...");
    info!("  Input: {}", input.display());

    let problem: InterpInput = read_json(input)?;
    let table = evaluate(&problem)?;

    println!("{}", table.render(format)?);
    info!(points = table.len(), "Interpolation complete");
    Ok(())
}

/// Evaluate every query point and tabulate coordinates with the result.
pub fn evaluate(problem: &InterpInput) -> Result<Table> {
    let rank = problem.grids.len();
    debug!(rank, points = problem.points.len(), "Dispatching on rank");

    let values = match rank {
        1 => evaluate_rank::<1>(problem)?,
        2 => evaluate_rank::<2>(problem)?,
        3 => evaluate_rank::<3>(problem)?,
        4 => evaluate_rank::<4>(problem)?,
        5 => evaluate_rank::<5>(problem)?,
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unsupported rank: {}. Supported: 1 to 5 grids",
                other
            )));
        }
    };

    let mut headers: Vec<String> = (1..=rank).map(|axis| format!("x{}", axis)).collect();
    headers.push("value".to_string());
    let mut table = Table::new(&headers);
    for (point, value) in problem.points.iter().zip(values) {
        let mut row = point.clone();
        row.push(value);
        table.push(row);
    }
    Ok(table)
}

fn evaluate_rank<const D: usize>(problem: &InterpInput) -> Result<Vec<f64>> {
    let grids: [&[f64]; D] = std::array::from_fn(|axis| problem.grids[axis].as_slice());
    let interp = MultilinearInterpolator::new(grids, &problem.values)?;

    if let Some((i, point)) = problem
        .points
        .iter()
        .enumerate()
        .find(|(_, p)| p.len() != D)
    {
        return Err(CliError::InvalidArgument(format!(
            "Point {} has {} coordinates, expected {}",
            i,
            point.len(),
            D
        )));
    }

    // Column layout: one slice per axis
    let columns: Vec<Vec<f64>> = (0..D)
        .map(|axis| problem.points.iter().map(|p| p[axis]).collect())
        .collect();
    let xi: [&[f64]; D] = std::array::from_fn(|axis| columns[axis].as_slice());

    let mut out = vec![0.0; problem.points.len()];
    interp.evaluate_vec(xi, &mut out)?;
    Ok(out)
}
