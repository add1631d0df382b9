//! # Error Types — Structured Validation Errors
//!
//! Defines the error taxonomy raised by the parse/validate path. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every [`SpcError`] variant carries a stable numeric code
//!   ([`SpcError::code`]) so downstream systems can match on it without
//!   parsing messages.
//! - Errors are never short-circuited: one parse attempt collects every
//!   defect into a [`ValidationErrors`] list, in the order encountered.
//! - Setters on an existing record return `bool`; only the text entry
//!   points surface a [`ValidationErrors`] value.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actor::ActorField;
use crate::domain::ActorRole;

/// A single defect found while validating an SPC payload.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpcError {
    /// The input was empty.
    #[error("input data empty")]
    EmptyInput,

    /// The input exceeds the maximum payload length.
    #[error("input data exceeds maximum allowed length ({len} > {max} characters)")]
    InputTooLong {
        /// Character count of the input.
        len: usize,
        /// Maximum accepted character count.
        max: usize,
    },

    /// The input has fewer lines than any supported layout requires.
    #[error("malformed data: insufficient fields ({found} lines, at least {required} required)")]
    InsufficientFields {
        /// Number of lines found.
        found: usize,
        /// Minimum number of lines.
        required: usize,
    },

    /// The version line is not a supported version code.
    #[error("version invalid or not supported: {value:?}")]
    UnsupportedVersion {
        /// Raw version line.
        value: String,
    },

    /// The QR type line is not `SPC`.
    #[error("QR type invalid or not supported: {value:?}")]
    UnsupportedQrType {
        /// Raw QR type line.
        value: String,
    },

    /// The coding type line is not a supported character set.
    #[error("coding type invalid or missing: {value:?}")]
    UnsupportedCodingType {
        /// Raw coding type line.
        value: String,
    },

    /// The account line is not an acceptable CH/LI IBAN.
    #[error("IBAN invalid or missing: {value:?}")]
    InvalidIban {
        /// Raw account line.
        value: String,
    },

    /// The currency line is not CHF or EUR.
    #[error("currency invalid or missing: {value:?}")]
    InvalidCurrency {
        /// Raw currency line.
        value: String,
    },

    /// The reference type is unknown, or the reference fails its length or check-digit rule.
    #[error("reference invalid or missing: type {reference_type:?}, reference {value:?}")]
    InvalidReference {
        /// Raw reference type line.
        reference_type: String,
        /// Raw reference line.
        value: String,
    },

    /// One or more actors are partially filled without their mandatory fields,
    /// or the creditor is missing.
    #[error("mandatory actor dependencies not met: {}", format_faults(.faults))]
    ActorDependencies {
        /// One entry per failing actor.
        faults: Vec<ActorFault>,
    },

    /// The trailer line is not `EPD`.
    #[error("trailer invalid or missing: {value:?}")]
    InvalidTrailer {
        /// Raw trailer line.
        value: String,
    },

    /// A builder step supplied a value its setter dropped or coerced to
    /// blank. Never produced by [`parse`](crate::parse::parse), which
    /// drops such values silently.
    #[error("{field} rejected: {value:?}")]
    RejectedValue {
        /// Field the value was meant for.
        field: String,
        /// Value as supplied.
        value: String,
    },
}

impl SpcError {
    /// Stable numeric error code.
    pub fn code(&self) -> u16 {
        match self {
            Self::EmptyInput => 1,
            Self::InputTooLong { .. } => 2,
            Self::InsufficientFields { .. } => 3,
            Self::UnsupportedVersion { .. } => 4,
            Self::UnsupportedQrType { .. } => 5,
            Self::UnsupportedCodingType { .. } => 6,
            Self::InvalidIban { .. } => 7,
            Self::InvalidCurrency { .. } => 8,
            Self::InvalidReference { .. } => 9,
            Self::ActorDependencies { .. } => 10,
            Self::InvalidTrailer { .. } => 11,
            Self::RejectedValue { .. } => 12,
        }
    }

    /// Whether the error concerns the payload's overall shape rather than one field.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::InputTooLong { .. } | Self::InsufficientFields { .. }
        )
    }
}

/// Mandatory-field failure for one actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorFault {
    /// Role of the failing actor.
    pub role: ActorRole,
    /// Fields that are required but blank or invalid.
    pub missing: Vec<ActorField>,
}

impl fmt::Display for ActorFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.role)?;
        for (i, field) in self.missing.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(field.as_str())?;
        }
        f.write_str(")")
    }
}

fn format_faults(faults: &[ActorFault]) -> String {
    faults
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ordered collection of validation errors from one parse attempt.
///
/// An empty collection means the payload is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<SpcError>,
}

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error.
    pub fn push(&mut self, error: SpcError) {
        self.errors.push(error);
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all errors.
    pub fn errors(&self) -> &[SpcError] {
        &self.errors
    }

    /// Iterate over the errors in the order they were found.
    pub fn iter(&self) -> std::slice::Iter<'_, SpcError> {
        self.errors.iter()
    }

    /// Numeric codes of all errors, in order.
    pub fn codes(&self) -> Vec<u16> {
        self.errors.iter().map(SpcError::code).collect()
    }

    /// Whether an error with the given code is present.
    pub fn contains_code(&self, code: u16) -> bool {
        self.errors.iter().any(|e| e.code() == code)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<SpcError> {
        self.errors
    }
}

impl From<Vec<SpcError>> for ValidationErrors {
    fn from(errors: Vec<SpcError>) -> Self {
        Self { errors }
    }
}

impl Extend<SpcError> for ValidationErrors {
    fn extend<T: IntoIterator<Item = SpcError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = SpcError;
    type IntoIter = std::vec::IntoIter<SpcError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a SpcError;
    type IntoIter = std::slice::Iter<'a, SpcError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{}] {e}", e.code())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
