//! Envelope command implementation
//!
//! Runs the upper envelope on EGM knots read from JSON, using a CRRA
//! utility `u(c) = c^(1 - rho) / (1 - rho)` (`ln c` when `rho = 1`).
//!
//! ```json
//! {
//!   "grid_a": [0, 1, 2], "m_vec": [1, 3, 2], "c_vec": [1, 2, 1.5],
//!   "w_vec": [0, -1, -0.5], "grid_m": [0.5, 1.5],
//!   "use_inv_w": false, "crra": 2.0
//! }
//! ```
//!
//! `use_inv_w` and `crra` are resolved from the command line flag first, then
//! the input file, then the configuration.

use std::path::Path;

use egm_core::math::upper_envelope::{
    upper_envelope, EgmKnots, EnvelopeSummary, PostDecisionTransform,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::{read_json, Table};
use crate::config::{EgmConfig, OutputFormat};
use crate::{CliError, Result};

/// EGM knots and target grid read from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopeInput {
    /// End-of-period assets
    pub grid_a: Vec<f64>,
    /// Implied cash-on-hand
    pub m_vec: Vec<f64>,
    /// Implied consumption
    pub c_vec: Vec<f64>,
    /// Post-decision value terms
    #[serde(alias = "inv_w_vec")]
    pub w_vec: Vec<f64>,
    /// Target cash-on-hand grid, non-decreasing
    pub grid_m: Vec<f64>,
    /// Overrides the configured transform
    #[serde(default)]
    pub use_inv_w: Option<bool>,
    /// Overrides the configured risk aversion
    #[serde(default)]
    pub crra: Option<f64>,
}

/// CRRA utility with relative risk aversion `rho`.
pub fn crra_utility(c: f64, rho: &f64) -> f64 {
    if (rho - 1.0).abs() < 1e-12 {
        c.ln()
    } else {
        c.powf(1.0 - rho) / (1.0 - rho)
    }
}

/// `--crra` and `--use-inv-w` as given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeFlags {
    /// Relative risk aversion
    pub crra: Option<f64>,
    /// Negative-inverse post-decision values
    pub use_inv_w: Option<bool>,
}

/// Policy and value on the target grid.
#[derive(Debug, Clone)]
pub struct EnvelopeRun {
    /// Optimal consumption per target point
    pub c_ast: Vec<f64>,
    /// Value of choice per target point
    pub v_ast: Vec<f64>,
    /// Coverage report
    pub summary: EnvelopeSummary,
}

/// Run the envelope command
pub fn run(
    input: &Path,
    config: &EgmConfig,
    flags: &EnvelopeFlags,
    format: OutputFormat,
) -> Result<()> {
    info!("Starting upper envelope...");
    info!("  Input: {}", input.display());

    let problem: EnvelopeInput = read_json(input)?;
    let result = solve(&problem, config, flags)?;

    let mut table = Table::new(&["m", "c", "v"]);
    for (im, &m) in problem.grid_m.iter().enumerate() {
        table.push(vec![m, result.c_ast[im], result.v_ast[im]]);
    }
    println!("{}", table.render(format)?);

    if !result.summary.is_complete() {
        warn!(
            uncovered = result.summary.uncovered,
            "Some target points have no valid policy (v = -inf)"
        );
    }
    info!(
        constrained = result.summary.constrained,
        uncovered = result.summary.uncovered,
        "Upper envelope complete"
    );
    Ok(())
}

/// Validate the input and compute the envelope.
pub fn solve(
    problem: &EnvelopeInput,
    config: &EgmConfig,
    flags: &EnvelopeFlags,
) -> Result<EnvelopeRun> {
    if let Some(i) = problem.grid_m.windows(2).position(|w| !(w[0] <= w[1])) {
        return Err(CliError::InvalidArgument(format!(
            "grid_m must be non-decreasing; violated at index {}",
            i + 1
        )));
    }

    let rho = flags.crra.or(problem.crra).unwrap_or(config.crra);
    if !(rho.is_finite() && rho > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "crra must be finite and positive, got {}",
            rho
        )));
    }
    let use_inv_w = flags
        .use_inv_w
        .or(problem.use_inv_w)
        .unwrap_or(config.use_inv_w);
    let transform = PostDecisionTransform::from_use_inv_w(use_inv_w);

    let knots = EgmKnots::new(&problem.grid_a, &problem.m_vec, &problem.c_vec, &problem.w_vec)?;

    let nm = problem.grid_m.len();
    let mut c_ast = vec![0.0; nm];
    let mut v_ast = vec![0.0; nm];
    let summary = upper_envelope(
        crra_utility,
        transform,
        &knots,
        &problem.grid_m,
        &mut c_ast,
        &mut v_ast,
        &rho,
    )?;

    Ok(EnvelopeRun {
        c_ast,
        v_ast,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fold_input() -> EnvelopeInput {
        serde_json::from_str(
            r#"{
                "grid_a": [0, 1, 2],
                "m_vec": [1, 3, 2],
                "c_vec": [1, 2, 1.5],
                "inv_w_vec": [0, -1, -0.5],
                "grid_m": [0.5, 1.5]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_crra_utility() {
        assert_relative_eq!(crra_utility(2.0, &1.0), 2.0_f64.ln(), epsilon = 1e-14);
        assert_relative_eq!(crra_utility(2.0, &2.0), -0.5, epsilon = 1e-14);
        assert_relative_eq!(crra_utility(4.0, &0.5), 4.0, epsilon = 1e-14);
    }

    #[test]
    fn test_solve_fold_with_log_utility() {
        let mut problem = fold_input();
        problem.crra = Some(1.0);
        let run = solve(&problem, &EgmConfig::default(), &EnvelopeFlags::default()).unwrap();

        // Constrained point: consume everything
        assert_eq!(run.c_ast[0], 0.5);
        assert_relative_eq!(run.v_ast[0], 0.5_f64.ln(), epsilon = 1e-14);
        // Folded point
        assert_relative_eq!(run.c_ast[1], 1.25, epsilon = 1e-14);
        assert_relative_eq!(run.v_ast[1], 1.25_f64.ln() - 0.25, epsilon = 1e-14);
        assert_eq!(run.summary.constrained, 1);
        assert!(run.summary.is_complete());
    }

    #[test]
    fn test_config_supplies_defaults() {
        let problem = fold_input();
        let config = EgmConfig {
            crra: 2.0,
            use_inv_w: true,
            ..Default::default()
        };
        let run = solve(&problem, &config, &EnvelopeFlags::default()).unwrap();
        // -1 / w at a = 0.25 is 4
        assert_relative_eq!(run.v_ast[1], -1.0 / 1.25 + 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flags_override_input_file() {
        let mut problem = fold_input();
        problem.crra = Some(2.0);
        problem.use_inv_w = Some(false);
        let config = EgmConfig::default();

        // Input file alone: rho = 2, level transform
        let run = solve(&problem, &config, &EnvelopeFlags::default()).unwrap();
        assert_relative_eq!(run.v_ast[0], -2.0, epsilon = 1e-12);

        // Flags win: log utility, and -1 / w is -inf at w_vec[0] = 0
        let flags = EnvelopeFlags {
            crra: Some(1.0),
            use_inv_w: Some(true),
        };
        let run = solve(&problem, &config, &flags).unwrap();
        assert_relative_eq!(run.v_ast[1], 1.25_f64.ln() + 4.0, epsilon = 1e-12);
        assert_eq!(run.v_ast[0], f64::NEG_INFINITY);
    }

    #[test]
    fn test_flag_can_disable_inverse_transform() {
        let mut problem = fold_input();
        problem.use_inv_w = Some(true);
        let config = EgmConfig {
            use_inv_w: true,
            ..Default::default()
        };
        let flags = EnvelopeFlags {
            crra: Some(1.0),
            use_inv_w: Some(false),
        };
        let run = solve(&problem, &config, &flags).unwrap();
        assert_relative_eq!(run.v_ast[1], 1.25_f64.ln() - 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_unsorted_target_grid_rejected() {
        let mut problem = fold_input();
        problem.grid_m = vec![1.5, 0.5];
        assert!(matches!(
            solve(&problem, &EgmConfig::default(), &EnvelopeFlags::default()),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_knot_length_mismatch_reported() {
        let mut problem = fold_input();
        problem.c_vec.pop();
        assert!(matches!(
            solve(&problem, &EgmConfig::default(), &EnvelopeFlags::default()),
            Err(CliError::Envelope(_))
        ));
    }

    #[test]
    fn test_invalid_crra_rejected() {
        let mut problem = fold_input();
        problem.crra = Some(-2.0);
        assert!(solve(&problem, &EgmConfig::default(), &EnvelopeFlags::default()).is_err());
    }
}
