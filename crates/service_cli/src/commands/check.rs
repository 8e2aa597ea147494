//! Check command implementation
//!
//! Prints the resolved configuration and runs a smoke test of the kernels.

use egm_core::math::interpolators::interp_1d;
use egm_core::math::upper_envelope::PostDecisionTransform;
use tracing::info;

use crate::config::{EgmConfig, OutputFormat};
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &EgmConfig) -> Result<()> {
    info!("Checking configuration...");

    println!("{}", render(config)?);

    smoke_test()?;
    info!("Kernel smoke test passed");
    Ok(())
}

/// Render the configuration in its own `output_format`.
fn render(config: &EgmConfig) -> Result<String> {
    let transform = format!(
        "{:?}",
        PostDecisionTransform::from_use_inv_w(config.use_inv_w)
    );
    let entries = [
        ("log_level", config.log_level.to_string()),
        ("output_format", config.output_format.to_string()),
        ("crra", config.crra.to_string()),
        ("transform", transform),
    ];

    match config.output_format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["key", "value"])?;
            for (key, value) in &entries {
                writer.write_record([*key, value.as_str()])?;
            }
            let bytes = writer.into_inner().map_err(|e| CliError::Io(e.into_error()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        OutputFormat::Table => {
            let lines: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{:<13} = {}", key, value))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// Evaluate a known interpolant to confirm the kernel links and behaves.
fn smoke_test() -> Result<()> {
    let grid = [0.0_f64, 1.0, 2.0, 3.0];
    let value = [0.0_f64, 1.0, 4.0, 9.0];
    let y = interp_1d(&grid, &value, 1.5);
    if (y - 2.5).abs() > 1e-12 {
        return Err(CliError::InvalidArgument(format!(
            "Kernel smoke test failed: expected 2.5, got {}",
            y
        )));
    }
    Ok(())
}
