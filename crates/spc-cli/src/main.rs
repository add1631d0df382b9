//! # spc CLI entry point
//!
//! Parses command-line arguments, resolves configuration from the
//! environment and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spc_cli::config::{CliConfig, OutputFormat};
use spc_cli::inspect::{run_inspect, InspectArgs};
use spc_cli::reference::{run_reference, ReferenceArgs};
use spc_cli::render::{run_render, RenderArgs};
use spc_cli::validate::{run_validate, ValidateArgs};
use spc_cli::EXIT_FAILURE;

/// Swiss Payments Code toolchain.
///
/// Validates, re-renders and inspects QR-bill payloads (versions 1.0 and
/// 2.0) and computes Modulo-10 check digits for QR references.
#[derive(Parser, Debug)]
#[command(name = "spc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Report format. Overrides SPC_OUTPUT.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report every error found in a payload.
    Validate(ValidateArgs),

    /// Print the canonical rendering of a payload.
    Render(RenderArgs),

    /// List the fields of a parsed payload.
    Inspect(InspectArgs),

    /// QR reference check digit operations.
    Reference(ReferenceArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = CliConfig::from_env();

    // -v wins over SPC_LOG.
    let filter = match cli.verbose {
        0 => config
            .as_ref()
            .ok()
            .and_then(|c| c.log_filter.as_deref())
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let json_logs = matches!(
        config.as_ref().map(|c| c.log_format),
        Ok(OutputFormat::Json)
    );
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = match config {
        Ok(config) => config.with_format(cli.format),
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    tracing::debug!(format = ?config.output, "spc CLI starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, config.output),
        Commands::Render(args) => run_render(&args, config.output),
        Commands::Inspect(args) => run_inspect(&args, config.output),
        Commands::Reference(args) => run_reference(&args, config.output),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
