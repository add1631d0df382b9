//! # Reference Subcommand
//!
//! Modulo-10 recursive check digits for 27-digit QR references.
//!
//! - `spc reference check <REF>` — exit 0 when the check digit matches.
//! - `spc reference complete <BODY>` — prints the 26-digit body with its
//!   check digit appended. Whitespace in either argument is ignored.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::json;

use spc_core::Modulo10;

use crate::config::OutputFormat;

/// Arguments for the `spc reference` subcommand.
#[derive(Args, Debug)]
pub struct ReferenceArgs {
    #[command(subcommand)]
    pub command: ReferenceCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReferenceCommand {
    /// Validate the check digit of a QR reference.
    Check {
        /// The reference, 27 digits, spaces allowed.
        reference: String,
    },
    /// Append the check digit to a 26-digit reference body.
    Complete {
        /// The body, 26 digits, spaces allowed.
        body: String,
    },
}

/// Execute the reference subcommand.
pub fn run_reference(args: &ReferenceArgs, format: OutputFormat) -> Result<u8> {
    let (output, ok) = match &args.command {
        ReferenceCommand::Check { reference } => check(reference, format)?,
        ReferenceCommand::Complete { body } => complete(body, format)?,
    };
    println!("{output}");
    Ok(crate::exit_code(ok))
}

/// Check report and verdict for `reference`.
pub fn check(reference: &str, format: OutputFormat) -> Result<(String, bool)> {
    let valid = Modulo10::validate(reference);
    tracing::debug!(valid, "checked reference");
    let output = match format {
        OutputFormat::Text if valid => "valid".to_string(),
        OutputFormat::Text => "invalid".to_string(),
        OutputFormat::Json => serde_json::to_string(&json!({
            "reference": strip_whitespace(reference),
            "valid": valid,
        }))?,
    };
    Ok((output, valid))
}

/// Completed reference, or a diagnostic when `body` is not 26 digits.
pub fn complete(body: &str, format: OutputFormat) -> Result<(String, bool)> {
    let compact = strip_whitespace(body);
    let completed = Modulo10::complete(&compact);
    if completed.is_none() {
        tracing::warn!(body = %compact, "reference body must be exactly 26 digits");
    }
    let output = match (format, &completed) {
        (OutputFormat::Text, Some(reference)) => reference.clone(),
        (OutputFormat::Text, None) => format!("malformed body {compact:?}: expected 26 digits"),
        (OutputFormat::Json, _) => serde_json::to_string(&json!({
            "body": compact,
            "reference": completed,
        }))?,
    };
    Ok((output, completed.is_some()))
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "210000000003139471430009017";

    #[test]
    fn check_accepts_spaced_reference() {
        let (out, ok) = check("21 00000 00003 13947 14300 09017", OutputFormat::Text).unwrap();
        assert!(ok);
        assert_eq!(out, "valid");
    }

    #[test]
    fn check_rejects_wrong_digit() {
        let (out, ok) = check("210000000003139471430009018", OutputFormat::Json).unwrap();
        assert!(!ok);
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["valid"], false);
    }

    #[test]
    fn complete_appends_check_digit() {
        let (out, ok) = complete(&REFERENCE[..26], OutputFormat::Text).unwrap();
        assert!(ok);
        assert_eq!(out, REFERENCE);
    }

    #[test]
    fn complete_rejects_short_body() {
        let (out, ok) = complete("1234", OutputFormat::Json).unwrap();
        assert!(!ok);
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(doc["reference"].is_null());
    }

    #[test]
    fn run_reference_exit_codes() {
        let args = ReferenceArgs {
            command: ReferenceCommand::Check {
                reference: REFERENCE.to_string(),
            },
        };
        assert_eq!(run_reference(&args, OutputFormat::Text).unwrap(), 0);
        let args = ReferenceArgs {
            command: ReferenceCommand::Complete {
                body: "12a".to_string(),
            },
        };
        assert_eq!(run_reference(&args, OutputFormat::Text).unwrap(), 1);
    }
}
