//! Error types for the CLI.

use egm_core::types::{EnvelopeError, GridError, InterpolationError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `egm` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command argument or input field is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading an input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input or output JSON could not be processed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output could not be written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Interpolation inputs were rejected.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),

    /// Upper-envelope inputs were rejected.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// Grid parameters were rejected.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Result alias used by every command.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_errors_convert() {
        let err: CliError = EnvelopeError::InsufficientKnots { got: 1 }.into();
        assert!(matches!(err, CliError::Envelope(_)));
        assert_eq!(
            err.to_string(),
            "Upper envelope needs at least 2 EGM knots, got 1"
        );

        let err: CliError = GridError::InsufficientPoints(0).into();
        assert!(err.to_string().contains("at least 2 points"));
    }

    #[test]
    fn test_file_not_found_display() {
        let err = CliError::FileNotFound("knots.json".to_string());
        assert_eq!(err.to_string(), "File not found: knots.json");
    }
}
