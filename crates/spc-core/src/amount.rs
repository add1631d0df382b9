//! # Amount — Two-Decimal Fixed Point
//!
//! Monetary amounts are held as integer hundredths ([`Amount`]) so that a
//! stored value renders back to exactly the text it was read from. The
//! wire form has exactly two fraction digits and at most 12 characters,
//! decimal point included (`999999999.99`).
//!
//! Conversion from text or from a float truncates extra fraction digits
//! instead of rounding: `12.345` becomes `12.34`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::AMOUNT_TEXT_MAX;

/// Reasons an amount is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Text is not an unsigned decimal number.
    #[error("malformed amount: {0:?}")]
    Malformed(String),

    /// Negative or non-finite numeric input.
    #[error("amount must be a finite, non-negative number")]
    OutOfDomain,

    /// Rendered text would exceed the wire ceiling.
    #[error("amount {0} exceeds the 12-character ceiling")]
    TooLong(String),
}

/// A non-negative monetary amount in hundredths of the currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Amount(u64);

impl Amount {
    /// Largest representable amount, `999999999.99`.
    pub const MAX: Amount = Amount(99_999_999_999);

    /// Zero.
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from hundredths.
    pub fn from_cents(cents: u64) -> Result<Self, AmountError> {
        let amount = Amount(cents);
        if amount > Self::MAX {
            return Err(AmountError::TooLong(amount.to_string()));
        }
        Ok(amount)
    }

    /// Create an amount from a float, truncating past two fraction digits.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        let text = format_amount(value).ok_or(AmountError::OutOfDomain)?;
        text.parse()
    }

    /// The amount in hundredths.
    pub fn cents(&self) -> u64 {
        self.0
    }

    /// The amount as a float. Lossy for very large values.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parse an unsigned decimal such as `12`, `12.5` or `12.345`.
    ///
    /// Signs, exponents and thousands separators are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let malformed = || AmountError::Malformed(s.to_string());
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let int_digits = int_part.trim_start_matches('0');
        // Nine integer digits plus ".dd" is the 12-character ceiling.
        if int_digits.len() > AMOUNT_TEXT_MAX - 3 {
            return Err(AmountError::TooLong(text.to_string()));
        }
        let units: u64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| malformed())?
        };

        let mut frac = frac_part.bytes().take(2).map(|b| u64::from(b - b'0'));
        let tenths = frac.next().unwrap_or(0);
        let hundredths = frac.next().unwrap_or(0);

        Self::from_cents(units * 100 + tenths * 10 + hundredths)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> String {
        amount.to_string()
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Render a float with exactly two fraction digits.
///
/// The fraction is padded with zeros or truncated, never rounded.
/// Negative and non-finite values have no textual form and return `None`;
/// callers treat that as an absent amount.
pub fn format_amount(value: f64) -> Option<String> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    // -0.0 passes the sign check but displays as "-0".
    let value = if value == 0.0 { 0.0 } else { value };
    // f64's Display never uses exponent notation.
    let text = value.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut out = String::with_capacity(int_part.len() + 3);
    out.push_str(int_part);
    out.push('.');
    out.extend(frac_part.chars().chain(std::iter::repeat('0')).take(2));
    Some(out)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn display_parse_is_identity(cents in 0u64..=99_999_999_999) {
            let amount = Amount::from_cents(cents).unwrap();
            let text = amount.to_string();
            prop_assert!(text.len() <= AMOUNT_TEXT_MAX);
            prop_assert_eq!(text.parse::<Amount>().unwrap(), amount);
        }

        #[test]
        fn formatted_floats_have_two_fraction_digits(value in 0.0f64..1e9) {
            let text = format_amount(value).unwrap();
            let (_, frac) = text.split_once('.').unwrap();
            prop_assert_eq!(frac.len(), 2);
        }
    }
}
