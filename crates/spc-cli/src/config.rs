//! CLI configuration.
//!
//! Defaults come from environment variables; command-line flags override
//! them. Variables:
//!
//! - `SPC_OUTPUT`: report format, `text` (default) or `json`.
//! - `SPC_LOG`: tracing filter directive used when no `-v` flag is given.
//! - `SPC_LOG_FORMAT`: log line format on stderr, `text` (default) or `json`.

use std::str::FromStr;

/// Environment variable selecting the default report format.
pub const OUTPUT_VAR: &str = "SPC_OUTPUT";
/// Environment variable carrying the tracing filter directive.
pub const LOG_VAR: &str = "SPC_LOG";
/// Environment variable selecting the log line format.
pub const LOG_FORMAT_VAR: &str = "SPC_LOG_FORMAT";

/// Report format for subcommand output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

/// Settings resolved from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    pub output: OutputFormat,
    pub log_filter: Option<String>,
    pub log_format: OutputFormat,
}

impl CliConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let output = match lookup(OUTPUT_VAR) {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => OutputFormat::default(),
        };
        let log_filter = lookup(LOG_VAR).filter(|s| !s.trim().is_empty());
        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) if !raw.trim().is_empty() => raw
                .parse()
                .map_err(|_| ConfigError::InvalidLogFormat(raw))?,
            _ => OutputFormat::default(),
        };
        Ok(Self {
            output,
            log_filter,
            log_format,
        })
    }

    /// Apply a `--format` flag, which wins over `SPC_OUTPUT`.
    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        if let Some(format) = format {
            self.output = format;
        }
        self
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid SPC_OUTPUT value {0:?}: expected \"text\" or \"json\"")]
    InvalidOutputFormat(String),

    #[error("invalid SPC_LOG_FORMAT value {0:?}: expected \"text\" or \"json\"")]
    InvalidLogFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_without_environment() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn reads_output_and_log() {
        let config =
            CliConfig::from_lookup(lookup(&[("SPC_OUTPUT", "JSON"), ("SPC_LOG", "spc_core=debug")]))
                .unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_filter.as_deref(), Some("spc_core=debug"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            CliConfig::from_lookup(lookup(&[("SPC_OUTPUT", " "), ("SPC_LOG", "")])).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn invalid_output_is_rejected() {
        let err = CliConfig::from_lookup(lookup(&[("SPC_OUTPUT", "yaml")])).unwrap_err();
        assert!(err.to_string().contains("SPC_OUTPUT"));
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn reads_log_format() {
        let config = CliConfig::from_lookup(lookup(&[("SPC_LOG_FORMAT", "json")])).unwrap();
        assert_eq!(config.log_format, OutputFormat::Json);
        assert_eq!(config.output, OutputFormat::Text);

        let err = CliConfig::from_lookup(lookup(&[("SPC_LOG_FORMAT", "logfmt")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogFormat(ref v) if v == "logfmt"));
        assert!(err.to_string().contains("SPC_LOG_FORMAT"));
    }

    #[test]
    fn flag_overrides_environment() {
        let config = CliConfig::from_lookup(lookup(&[("SPC_OUTPUT", "json")]))
            .unwrap()
            .with_format(Some(OutputFormat::Text));
        assert_eq!(config.output, OutputFormat::Text);
        let config = config.with_format(None);
        assert_eq!(config.output, OutputFormat::Text);
    }
}
