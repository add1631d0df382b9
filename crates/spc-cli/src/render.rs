//! # Render Subcommand
//!
//! Parses a payload and prints its canonical rendering: fields normalized
//! by their setters, rejected values blanked, trailing blank lines removed.
//! Errors go to the log, not to stdout, so the output can be piped.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use spc_core::{parse, Parsed};

use crate::config::OutputFormat;

/// Arguments for the `spc render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Payload file; `-` or omitted reads stdin.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute the render subcommand.
pub fn run_render(args: &RenderArgs, format: OutputFormat) -> Result<u8> {
    let payload = crate::read_payload(args.path.as_deref())?;
    let parsed = parse(&payload);

    for error in &parsed.errors {
        tracing::warn!(code = error.code(), "{error}");
    }

    println!("{}", rendered_output(&parsed, format)?);
    Ok(crate::exit_code(parsed.is_valid()))
}

/// Canonical payload text, or a JSON document carrying it.
pub fn rendered_output(parsed: &Parsed, format: OutputFormat) -> Result<String> {
    let text = parsed.record.render();
    match format {
        OutputFormat::Text => Ok(text),
        OutputFormat::Json => {
            let doc = json!({
                "valid": parsed.is_valid(),
                "payload": text,
                "errors": crate::error_entries(&parsed.errors),
            });
            Ok(serde_json::to_string_pretty(&doc)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{payload_file, sample_payload};

    #[test]
    fn canonical_payload_renders_unchanged() {
        let payload = sample_payload();
        let out = rendered_output(&parse(&payload), OutputFormat::Text).unwrap();
        assert_eq!(out, payload);
    }

    #[test]
    fn crlf_and_spaced_iban_are_normalized() {
        let payload = sample_payload()
            .replace("CH5800791123000889012", "ch58 0079 1123 0008 8901 2")
            .replace('\n', "\r\n");
        let out = rendered_output(&parse(&payload), OutputFormat::Text).unwrap();
        assert_eq!(out, sample_payload());
    }

    #[test]
    fn json_carries_payload_and_verdict() {
        let out = rendered_output(&parse(&sample_payload()), OutputFormat::Json).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["valid"], true);
        assert_eq!(doc["payload"], sample_payload());
        assert_eq!(doc["errors"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn invalid_payload_exits_one() {
        let file = payload_file(&sample_payload().replace("EUR", "USD"));
        let args = RenderArgs {
            path: Some(file.path().to_path_buf()),
        };
        assert_eq!(run_render(&args, OutputFormat::Text).unwrap(), 1);
    }
}
