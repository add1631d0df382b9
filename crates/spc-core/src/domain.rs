//! # Enumerated Codes — Single Source of Truth
//!
//! Every closed set of values that appears on an SPC line is defined here
//! exactly once: guideline version, character set, currency, reference
//! type, address type, and the three actor roles. Each code knows its wire
//! text (`as_str`) and parses case-insensitively (`FromStr`).
//!
//! Exhaustive `match` on these enums is what keeps the serializer and the
//! parser aligned: adding a variant forces every consumer to handle it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SpcError;
use crate::field::{ADDRESS_LINE_2_COMBINED_MAX, ADDRESS_LINE_2_MAX};

/// Supported SPC implementation guideline versions.
///
/// The wire form is a four-digit code of hundredths (`0100`, `0200`).
/// Version selects the active [`Layout`](crate::layout::Layout); any other
/// value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Version {
    /// Implementation guidelines 1.0 (combined street/house-number fields, due date).
    #[serde(rename = "0100")]
    V1_0,
    /// Implementation guidelines 2.0 (address types, trailer, bill information).
    #[serde(rename = "0200")]
    V2_0,
}

impl Version {
    /// Highest supported version.
    pub const LATEST: Version = Version::V2_0;

    /// Returns all supported versions, oldest first.
    pub fn all() -> &'static [Version] {
        &[Self::V1_0, Self::V2_0]
    }

    /// Version number in hundredths (`100`, `200`).
    pub fn hundredths(&self) -> u32 {
        match self {
            Self::V1_0 => 100,
            Self::V2_0 => 200,
        }
    }

    /// Version as a decimal number (`1.0`, `2.0`).
    pub fn as_f64(&self) -> f64 {
        f64::from(self.hundredths()) / 100.0
    }

    /// Four-digit, zero-padded wire code (`"0100"`, `"0200"`).
    pub fn code(&self) -> String {
        format!("{:04}", self.hundredths())
    }

    /// Resolve a version from its hundredths value.
    pub fn from_hundredths(hundredths: u32) -> Option<Self> {
        match hundredths {
            100 => Some(Self::V1_0),
            200 => Some(Self::V2_0),
            _ => None,
        }
    }

    /// Resolve a version from its four-digit wire code.
    ///
    /// The code must be exactly four ASCII digits; `"0200"` is accepted,
    /// `"200"`, `"02.0"` and `"0300"` are not.
    pub fn from_code(code: &str) -> Option<Self> {
        if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        code.parse::<u32>().ok().and_then(Self::from_hundredths)
    }

    /// Resolve a version from a decimal number, rounded to hundredths.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let hundredths = (value * 100.0).round();
        if hundredths > f64::from(u32::MAX) {
            return None;
        }
        Self::from_hundredths(hundredths as u32)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::LATEST
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.hundredths() / 100, self.hundredths() % 100)
    }
}

impl FromStr for Version {
    type Err = SpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim()).ok_or_else(|| SpcError::UnsupportedVersion {
            value: s.to_string(),
        })
    }
}

/// Character set of the payload. Only Latin-1 is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum CodingType {
    /// ISO-8859-1, wire value `1`.
    Latin1,
}

impl CodingType {
    /// Numeric wire value.
    pub fn value(&self) -> u32 {
        match self {
            Self::Latin1 => 1,
        }
    }

    /// Resolve a coding type from its numeric wire value.
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Latin1),
            _ => None,
        }
    }
}

impl From<CodingType> for u32 {
    fn from(coding: CodingType) -> u32 {
        coding.value()
    }
}

impl TryFrom<u32> for CodingType {
    type Error = SpcError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or_else(|| SpcError::UnsupportedCodingType {
            value: value.to_string(),
        })
    }
}

/// Payment currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Swiss francs.
    Chf,
    /// Euro.
    Eur,
}

impl Currency {
    /// Returns all accepted currencies.
    pub fn all() -> &'static [Currency] {
        &[Self::Chf, Self::Eur]
    }

    /// ISO 4217 code as written on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chf => "CHF",
            Self::Eur => "EUR",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = SpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SpcError::InvalidCurrency {
                value: s.to_string(),
            })
    }
}

/// Kind of payment reference.
///
/// Determines the reference's length ceiling and whether the Modulo-10
/// check digit applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReferenceType {
    /// QR reference: 27 digits, Modulo-10 check digit.
    Qrr,
    /// Creditor reference (ISO 11649), up to 25 characters.
    Scor,
    /// No reference; the reference line stays blank.
    #[default]
    Non,
}

impl ReferenceType {
    /// Returns all reference types.
    pub fn all() -> &'static [ReferenceType] {
        &[Self::Qrr, Self::Scor, Self::Non]
    }

    /// Wire text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qrr => "QRR",
            Self::Scor => "SCOR",
            Self::Non => "NON",
        }
    }

    /// Maximum reference length for this type (`0` for [`ReferenceType::Non`]).
    pub fn max_len(&self) -> usize {
        match self {
            Self::Qrr => 27,
            Self::Scor => 25,
            Self::Non => 0,
        }
    }
}

impl std::fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceType {
    type Err = SpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SpcError::InvalidReference {
                reference_type: s.to_string(),
                value: String::new(),
            })
    }
}

/// Address format of an actor (version 2.0 onwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressType {
    /// Structured: street and building number, then postcode and town in own lines.
    #[serde(rename = "S")]
    Structured,
    /// Combined: two free address lines, the second holding postcode and town.
    #[serde(rename = "K")]
    Combined,
}

impl AddressType {
    /// Single-letter wire code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structured => "S",
            Self::Combined => "K",
        }
    }

    /// Length ceiling of address line 2 under this address type.
    pub fn address_line_2_max(&self) -> usize {
        match self {
            Self::Structured => ADDRESS_LINE_2_MAX,
            Self::Combined => ADDRESS_LINE_2_COMBINED_MAX,
        }
    }
}

impl std::fmt::Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("S") {
            Ok(Self::Structured)
        } else if s.eq_ignore_ascii_case("K") {
            Ok(Self::Combined)
        } else {
            Err(())
        }
    }
}

/// The three parties named on a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Account holder receiving the payment. Always mandatory.
    Creditor,
    /// Final beneficiary, if different from the creditor.
    UltimateCreditor,
    /// Payer.
    UltimateDebtor,
}

impl ActorRole {
    /// Returns all roles in record order.
    pub fn all() -> &'static [ActorRole] {
        &[Self::Creditor, Self::UltimateCreditor, Self::UltimateDebtor]
    }

    /// Position of the role in the record's actor array.
    pub fn index(&self) -> usize {
        match self {
            Self::Creditor => 0,
            Self::UltimateCreditor => 1,
            Self::UltimateDebtor => 2,
        }
    }

    /// Whether an actor in this role must always be present.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Self::Creditor)
    }

    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creditor => "creditor",
            Self::UltimateCreditor => "ultimate creditor",
            Self::UltimateDebtor => "ultimate debtor",
        }
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_codes() {
        assert_eq!(Version::V1_0.code(), "0100");
        assert_eq!(Version::V2_0.code(), "0200");
        assert_eq!(Version::from_code("0100"), Some(Version::V1_0));
        assert_eq!(Version::from_code("0200"), Some(Version::V2_0));
    }

    #[test]
    fn version_rejects_unsupported_and_malformed_codes() {
        assert_eq!(Version::from_code("0300"), None);
        assert_eq!(Version::from_code("0150"), None);
        assert_eq!(Version::from_code("200"), None);
        assert_eq!(Version::from_code("02.0"), None);
        assert_eq!(Version::from_code(""), None);
        assert_eq!(Version::from_code("+200"), None);
    }

    #[test]
    fn version_from_f64_rounds_to_hundredths() {
        assert_eq!(Version::from_f64(2.0), Some(Version::V2_0));
        assert_eq!(Version::from_f64(1.0), Some(Version::V1_0));
        assert_eq!(Version::from_f64(1.999_999), Some(Version::V2_0));
        assert_eq!(Version::from_f64(2.01), None);
        assert_eq!(Version::from_f64(f64::NAN), None);
        assert_eq!(Version::from_f64(-1.0), None);
    }

    #[test]
    fn version_display_and_default() {
        assert_eq!(Version::V1_0.to_string(), "1.00");
        assert_eq!(Version::default(), Version::V2_0);
        assert!(Version::V1_0 < Version::V2_0);
    }

    #[test]
    fn currency_parse_is_case_insensitive() {
        assert_eq!("chf".parse::<Currency>().unwrap(), Currency::Chf);
        assert_eq!("EuR".parse::<Currency>().unwrap(), Currency::Eur);
        assert!("USD".parse::<Currency>().is_err());
        assert!("".parse::<Currency>().is_err());
    }

    #[test]
    fn reference_type_parse_and_limits() {
        assert_eq!("qrr".parse::<ReferenceType>().unwrap(), ReferenceType::Qrr);
        assert_eq!("SCOR".parse::<ReferenceType>().unwrap(), ReferenceType::Scor);
        assert_eq!("non".parse::<ReferenceType>().unwrap(), ReferenceType::Non);
        assert!("IBAN".parse::<ReferenceType>().is_err());
        assert_eq!(ReferenceType::Qrr.max_len(), 27);
        assert_eq!(ReferenceType::Scor.max_len(), 25);
        assert_eq!(ReferenceType::default(), ReferenceType::Non);
    }

    #[test]
    fn address_type_codes() {
        assert_eq!("s".parse::<AddressType>(), Ok(AddressType::Structured));
        assert_eq!("K".parse::<AddressType>(), Ok(AddressType::Combined));
        assert!("X".parse::<AddressType>().is_err());
        assert_eq!(AddressType::Structured.address_line_2_max(), 16);
        assert_eq!(AddressType::Combined.address_line_2_max(), 70);
    }

    #[test]
    fn actor_roles_are_indexed_in_record_order() {
        let indices: Vec<usize> = ActorRole::all().iter().map(|r| r.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(ActorRole::Creditor.is_mandatory());
        assert!(!ActorRole::UltimateDebtor.is_mandatory());
    }

    #[test]
    fn coding_type_values() {
        assert_eq!(CodingType::from_value(1), Some(CodingType::Latin1));
        assert_eq!(CodingType::from_value(2), None);
        assert_eq!(u32::from(CodingType::Latin1), 1);
    }

    #[test]
    fn serde_uses_wire_text() {
        assert_eq!(serde_json::to_string(&Version::V2_0).unwrap(), "\"0200\"");
        assert_eq!(serde_json::to_string(&Currency::Eur).unwrap(), "\"EUR\"");
        assert_eq!(serde_json::to_string(&ReferenceType::Scor).unwrap(), "\"SCOR\"");
        assert_eq!(serde_json::to_string(&AddressType::Combined).unwrap(), "\"K\"");
        assert_eq!(serde_json::to_string(&CodingType::Latin1).unwrap(), "1");
        assert_eq!(
            serde_json::to_string(&ActorRole::UltimateDebtor).unwrap(),
            "\"ultimate_debtor\""
        );
    }
}
