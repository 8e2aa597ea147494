//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables,
//! and command line flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "egm.toml";

/// Errors raised while resolving an [`EgmConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown log level '{0}' (expected trace, debug, info, warn or error)")]
    InvalidLogLevel(String),

    #[error("Unknown output format '{0}' (expected table, json or csv)")]
    InvalidOutputFormat(String),

    #[error("Invalid CRRA coefficient: {0}. Must be finite and positive")]
    InvalidCrra(String),

    #[error("Config file: {0}")]
    FileError(String),
}

/// Verbosity of the `egm` log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Directive understood by `EnvFilter`
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_filter_str() == wanted)
            .ok_or_else(|| ConfigError::InvalidLogLevel(s.to_string()))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, ConfigError> {
        s.parse()
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OutputFormat {
    /// Box-drawn table
    #[default]
    Table,
    /// Array of JSON objects
    Json,
    /// CSV with a header row
    Csv,
}

impl OutputFormat {
    const ALL: [OutputFormat; 3] = [OutputFormat::Table, OutputFormat::Json, OutputFormat::Csv];

    /// Lowercase name used in flags, env vars and config files
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.name() == wanted)
            .ok_or_else(|| ConfigError::InvalidOutputFormat(s.to_string()))
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, ConfigError> {
        s.parse()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved configuration for one `egm` invocation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EgmConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Output format for command results
    pub output_format: OutputFormat,
    /// Relative risk aversion of the CRRA utility used by `envelope`
    pub crra: f64,
    /// Treat post-decision values as negative inverses by default
    pub use_inv_w: bool,
}

impl Default for EgmConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            output_format: OutputFormat::default(),
            crra: 2.0,
            use_inv_w: false,
        }
    }
}

fn parse_crra(s: &str) -> Result<f64, ConfigError> {
    s.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidCrra(s.to_string()))
}

impl EgmConfig {
    /// Defaults overridden by any `EGM_*` variables that are set
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(log_level) = std::env::var("EGM_LOG_LEVEL") {
            config.log_level = LogLevel::from_str(&log_level)?;
        }

        if let Ok(format) = std::env::var("EGM_OUTPUT_FORMAT") {
            config.output_format = OutputFormat::from_str(&format)?;
        }

        if let Ok(crra) = std::env::var("EGM_CRRA") {
            config.crra = parse_crra(&crra)?;
        }

        if let Ok(flag) = std::env::var("EGM_USE_INV_W") {
            config.use_inv_w = flag.to_lowercase() == "true";
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;

        let config: EgmConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject a non-positive or non-finite `crra`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.crra.is_finite() && self.crra > 0.0) {
            return Err(ConfigError::InvalidCrra(self.crra.to_string()));
        }
        Ok(())
    }

    /// Apply command line overrides on top of this configuration
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        } else if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(format) = &cli.output_format {
            self.output_format = OutputFormat::from_str(format)?;
        }
        Ok(())
    }
}

/// CLI arguments that feed the configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Raise the log level to debug unless `log_level` is given
    pub verbose: bool,
    /// Output format override
    pub output_format: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. Global CLI flags (`--log-level`, `--verbose`, `--format`)
/// 2. Environment variables
/// 3. Config file (`--config`, else `egm.toml` if present)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<EgmConfig, ConfigError> {
    let default_file = Path::new(DEFAULT_CONFIG_FILE);
    let mut config = match &cli.config_file {
        Some(path) => EgmConfig::from_file(path)?,
        None if default_file.exists() => EgmConfig::from_file(default_file)?,
        None => EgmConfig::default(),
    };

    // Only variables that are actually set override the file
    let env_config = EgmConfig::from_env()?;
    if std::env::var("EGM_LOG_LEVEL").is_ok() {
        config.log_level = env_config.log_level;
    }
    if std::env::var("EGM_OUTPUT_FORMAT").is_ok() {
        config.output_format = env_config.output_format;
    }
    if std::env::var("EGM_CRRA").is_ok() {
        config.crra = env_config.crra;
    }
    if std::env::var("EGM_USE_INV_W").is_ok() {
        config.use_inv_w = env_config.use_inv_w;
    }

    config.merge_with_cli(cli)?;

    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EgmConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.crra, 2.0);
        assert!(!config.use_inv_w);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_output_format_parsing_and_display() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_str("xml").is_err());
        assert_eq!(format!("{}", OutputFormat::Table), "table");
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_validate_crra() {
        let mut config = EgmConfig::default();
        config.crra = 0.0;
        assert!(config.validate().is_err());
        config.crra = f64::NAN;
        assert!(config.validate().is_err());
        config.crra = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "warn"
            output_format = "csv"
            crra = 1.5
            use_inv_w = true
        "#;

        let config: EgmConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert_eq!(config.crra, 1.5);
        assert!(config.use_inv_w);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: EgmConfig = toml::from_str("crra = 3.0").unwrap();
        assert_eq!(config.crra, 3.0);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_invalid_toml_value_rejected() {
        let result: Result<EgmConfig, _> = toml::from_str(r#"output_format = "xml""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_values_are_case_insensitive() {
        let config: EgmConfig = toml::from_str(r#"log_level = "DEBUG""#).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir()
            .join(format!("egm_config_test_{}.toml", std::process::id()));
        std::fs::write(&path, "crra = 4.0\noutput_format = \"json\"\n").unwrap();

        let config = EgmConfig::from_file(&path).unwrap();
        assert_eq!(config.crra, 4.0);
        assert_eq!(config.output_format, OutputFormat::Json);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            EgmConfig::from_file(&path),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = EgmConfig::default();
        let cli = CliArgs {
            log_level: Some("error".to_string()),
            verbose: true,
            output_format: Some("json".to_string()),
            config_file: None,
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.crra, 2.0);
        assert!(!config.use_inv_w);
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let mut config = EgmConfig::default();
        let cli = CliArgs {
            verbose: true,
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_cli_merge_rejects_bad_format() {
        let mut config = EgmConfig::default();
        let cli = CliArgs {
            output_format: Some("yaml".to_string()),
            ..Default::default()
        };
        assert!(config.merge_with_cli(&cli).is_err());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidCrra("-1".to_string());
        assert!(err.to_string().contains("Invalid CRRA"));

        let err = ConfigError::InvalidOutputFormat("xml".to_string());
        assert!(err.to_string().contains("table, json or csv"));
    }
}
