//! # Inspect Subcommand
//!
//! Prints the parsed record. The text form lists every layout line with
//! its field label and canonical value; the JSON form carries the verdict,
//! the error list and the serialized record.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use spc_core::serialize::render_field;
use spc_core::{parse, Parsed};

use crate::config::OutputFormat;

/// Arguments for the `spc inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Payload file; `-` or omitted reads stdin.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Omit blank lines from the text listing.
    #[arg(long)]
    pub skip_blank: bool,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs, format: OutputFormat) -> Result<u8> {
    let payload = crate::read_payload(args.path.as_deref())?;
    let parsed = parse(&payload);
    print!("{}", inspection(&parsed, format, args.skip_blank)?);
    Ok(crate::exit_code(parsed.is_valid()))
}

/// Build the inspection output for `parsed`.
pub fn inspection(parsed: &Parsed, format: OutputFormat, skip_blank: bool) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let doc = json!({
                "valid": parsed.is_valid(),
                "errors": crate::error_entries(&parsed.errors),
                "record": serde_json::to_value(&parsed.record)?,
            });
            Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
        }
        OutputFormat::Text => {
            let record = &parsed.record;
            let mut out = String::new();
            for (i, field) in record.layout().iter().enumerate() {
                let value = render_field(record, *field);
                if skip_blank && value.trim().is_empty() {
                    continue;
                }
                writeln!(out, "{:>2}  {:<32} {}", i + 1, field.to_string(), value)?;
            }
            for error in &parsed.errors {
                writeln!(out, "error [{}] {}", error.code(), error)?;
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{payload_file, sample_payload};

    #[test]
    fn text_listing_labels_every_line() {
        let out = inspection(&parse(&sample_payload()), OutputFormat::Text, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        // 2.0 layout has 34 lines.
        assert_eq!(lines.len(), 34);
        assert!(lines[0].starts_with(" 1  QR type"));
        assert!(lines[0].ends_with("SPC"));
        assert!(lines[21].contains("ultimate debtor name"));
        assert!(lines[21].ends_with("Pia Rutschmann"));
    }

    #[test]
    fn skip_blank_drops_empty_lines() {
        let out = inspection(&parse(&sample_payload()), OutputFormat::Text, true).unwrap();
        assert!(out.lines().all(|l| !l.ends_with(' ')));
        assert!(out.contains("reference type"));
        assert!(!out.contains("ultimate creditor"));
    }

    #[test]
    fn text_listing_appends_errors() {
        let payload = sample_payload().replace("CH5800791123000889012", "DE89370400440532013000");
        let out = inspection(&parse(&payload), OutputFormat::Text, true).unwrap();
        assert!(out.lines().last().unwrap().starts_with("error [7] IBAN invalid or missing"));
    }

    #[test]
    fn json_carries_record() {
        let out = inspection(&parse(&sample_payload()), OutputFormat::Json, false).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["valid"], true);
        assert_eq!(doc["record"]["iban"], "CH5800791123000889012");
        assert_eq!(doc["record"]["reference"], "RF18539007547034");
    }

    #[test]
    fn run_inspect_reports_verdict() {
        let file = payload_file(&sample_payload());
        let args = InspectArgs {
            path: Some(file.path().to_path_buf()),
            skip_blank: false,
        };
        assert_eq!(run_inspect(&args, OutputFormat::Json).unwrap(), 0);
    }
}
