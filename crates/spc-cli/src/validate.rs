//! # Validate Subcommand
//!
//! Parses a payload and reports the verdict with every error found, in
//! the order the parser reports them. Exit code 0 when the payload is
//! valid, 1 otherwise.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use spc_core::{parse, Parsed};

use crate::config::OutputFormat;

/// Arguments for the `spc validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Payload file; `-` or omitted reads stdin.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, format: OutputFormat) -> Result<u8> {
    let payload = crate::read_payload(args.path.as_deref())?;
    let parsed = parse(&payload);

    tracing::info!(
        version = %parsed.record.version(),
        errors = parsed.errors.len(),
        "validated payload"
    );

    print!("{}", validation_report(&parsed, format)?);
    Ok(crate::exit_code(parsed.is_valid()))
}

/// Build the validation report for `parsed`.
pub fn validation_report(parsed: &Parsed, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let doc = json!({
                "valid": parsed.is_valid(),
                "version": parsed.record.version().code(),
                "errors": crate::error_entries(&parsed.errors),
            });
            Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
        }
        OutputFormat::Text => {
            let mut out = String::new();
            if parsed.is_valid() {
                writeln!(out, "VALID (version {})", parsed.record.version())?;
            } else {
                writeln!(out, "INVALID: {} error(s)", parsed.errors.len())?;
                for error in &parsed.errors {
                    writeln!(out, "  [{}] {}", error.code(), error)?;
                }
            }
            Ok(out)
        }
    }
}
