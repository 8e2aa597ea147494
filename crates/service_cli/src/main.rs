//! egm CLI - Command Line Front End for the EGM Kernel
//!
//! Runs the egm_core interpolation and upper envelope kernels on JSON inputs.
//!
//! # Commands
//!
//! - `egm interp --input <file>` - Evaluate a 1 to 5 dimensional multilinear interpolant
//! - `egm envelope --input <file>` - Run the upper envelope on EGM knots with CRRA utility
//! - `egm grid --kind <kind>` - Print a non-uniform grid
//! - `egm check` - Print the resolved configuration and smoke-test the kernel
//!
//! # Configuration
//!
//! Settings come from `egm.toml` (or `--config`), then `EGM_*` environment
//! variables, then command line flags. `RUST_LOG` overrides the log filter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::grid::GridKind;
use config::{build_config, CliArgs};

/// EGM kernel CLI
#[derive(Parser)]
#[command(name = "egm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a multilinear interpolant at query points
    Interp {
        /// Path to JSON input with grids, values and points
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Compute the upper envelope of EGM knots on a target grid
    Envelope {
        /// Path to JSON input with grid_a, m_vec, c_vec, w_vec and grid_m
        #[arg(short, long)]
        input: PathBuf,

        /// Relative risk aversion of the CRRA utility (overrides the input file)
        #[arg(long)]
        crra: Option<f64>,

        /// Whether post-decision values are stored as negative inverses
        /// (overrides the input file)
        #[arg(long, value_name = "BOOL")]
        use_inv_w: Option<bool>,
    },

    /// Print a non-uniform grid
    Grid {
        /// Grid constructor
        #[arg(short, long, value_enum, default_value = "nonlinspace")]
        kind: GridKind,

        /// First grid point
        #[arg(long, default_value = "0.0")]
        min: f64,

        /// Last grid point
        #[arg(long, default_value = "10.0")]
        max: f64,

        /// Number of points
        #[arg(short, long, default_value = "10")]
        n: usize,

        /// Curvature for nonlinspace
        #[arg(long, default_value = "1.1")]
        phi: f64,
    },

    /// Check system configuration
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            verbose: self.verbose,
            output_format: self.format.clone(),
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    // Initialise tracing
    init_tracing(config.log_level.as_filter_str());

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    info!(
        log_level = %config.log_level,
        output_format = %config.output_format,
        crra = config.crra,
        use_inv_w = config.use_inv_w,
        "Configuration loaded"
    );

    let format = config.output_format;
    match cli.command {
        Commands::Interp { input } => commands::interp::run(&input, format),
        Commands::Envelope {
            input,
            crra,
            use_inv_w,
        } => {
            let flags = commands::envelope::EnvelopeFlags { crra, use_inv_w };
            commands::envelope::run(&input, &config, &flags, format)
        }
        Commands::Grid {
            kind,
            min,
            max,
            n,
            phi,
        } => commands::grid::run(kind, min, max, n, phi, format),
        Commands::Check => commands::check::run(&config),
    }
}
