//! # spc-cli — CLI Tool for Swiss Payments Code Payloads
//!
//! Provides the `spc` command-line interface over [`spc_core`].
//!
//! ## Subcommands
//!
//! - `spc validate` — Verdict plus every `[code] message` found in a payload.
//! - `spc render` — Canonical re-rendering of a payload.
//! - `spc inspect` — Field-by-field listing or JSON dump of the parsed record.
//! - `spc reference` — Modulo-10 check and completion of QR references.
//!
//! Payloads are read from a file path, or from stdin when the path is `-`
//! or omitted:
//!
//! ```bash
//! spc validate bill.txt
//! cat bill.txt | spc --format json inspect
//! spc reference complete "21 00000 00003 13947 14300 0901"
//! ```
//!
//! ## Exit codes
//!
//! `0` valid, `1` invalid, `2` operational failure (unreadable input,
//! bad configuration).

pub mod config;
pub mod inspect;
pub mod reference;
pub mod render;
pub mod validate;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use spc_core::ValidationErrors;

/// Exit code for a valid payload or reference.
pub const EXIT_VALID: u8 = 0;
/// Exit code for an invalid payload or reference.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for operational failures.
pub const EXIT_FAILURE: u8 = 2;

/// Read a payload from `path`, or from stdin when `path` is absent or `-`.
pub fn read_payload(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read payload from {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read payload from stdin")?;
            Ok(buf)
        }
    }
}

/// Map a verdict to its exit code.
pub fn exit_code(valid: bool) -> u8 {
    if valid {
        EXIT_VALID
    } else {
        EXIT_INVALID
    }
}

/// JSON list of `{code, message}` objects, in report order.
pub fn error_entries(errors: &ValidationErrors) -> Value {
    Value::Array(
        errors
            .iter()
            .map(|e| json!({ "code": e.code(), "message": e.to_string() }))
            .collect(),
    )
}

/// Valid 2.0 payload shared by the subcommand tests.
#[cfg(test)]
pub(crate) fn sample_payload() -> String {
    [
        "SPC",
        "0200",
        "1",
        "CH5800791123000889012",
        "S",
        "Robert Schneider AG",
        "Rue du Lac",
        "1268",
        "2501",
        "Biel",
        "CH",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "EUR",
        "K",
        "Pia Rutschmann",
        "Marktgasse 28",
        "9400 Rorschach",
        "",
        "",
        "CH",
        "SCOR",
        "RF18539007547034",
        "",
        "EPD",
    ]
    .join("\n")
}

/// Write `text` to a temporary file for path-based subcommand tests.
#[cfg(test)]
pub(crate) fn payload_file(text: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}
