//! # Temporal Types — Due Date
//!
//! Defines [`DueDate`], the optional payment deadline carried by version
//! 1.0 payloads. The wire form is `YYYY-MM-DD`; valid years are
//! 2018..=9999 and day/month combinations are checked against the Gregorian
//! calendar (29 February only in leap years).
//!
//! Invalid dates are rejected at construction. The record treats a rejected
//! date as absent, so there is no partially valid `DueDate`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a due date is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DueDateError {
    /// Text is not `YYYY-MM-DD`, or names a day that does not exist.
    #[error("malformed due date: {0:?}")]
    Malformed(String),

    /// Year outside 2018..=9999.
    #[error("due date year {0} outside 2018..=9999")]
    YearOutOfRange(i32),
}

/// A payment due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "NaiveDate", try_from = "NaiveDate")]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Earliest accepted year.
    pub const MIN_YEAR: i32 = 2018;
    /// Latest accepted year.
    pub const MAX_YEAR: i32 = 9999;

    /// Create a due date from calendar components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DueDateError> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DueDateError::Malformed(format!("{year:04}-{month:02}-{day:02}")))?;
        Self::from_naive(date)
    }

    /// Wrap a `chrono::NaiveDate`, enforcing the year range.
    pub fn from_naive(date: NaiveDate) -> Result<Self, DueDateError> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&date.year()) {
            return Err(DueDateError::YearOutOfRange(date.year()));
        }
        Ok(Self(date))
    }

    /// Parse the `YYYY-MM-DD` wire form.
    ///
    /// Exactly ten characters with zero-padded month and day; surrounding
    /// whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, DueDateError> {
        let text = s.trim();
        let well_formed = text.len() == 10
            && text.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(DueDateError::Malformed(s.to_string()));
        }
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|_| DueDateError::Malformed(s.to_string()))?;
        Self::from_naive(date)
    }

    /// Access the inner date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl std::fmt::Display for DueDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for DueDate {
    type Err = DueDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DueDate> for NaiveDate {
    fn from(date: DueDate) -> NaiveDate {
        date.0
    }
}

impl TryFrom<NaiveDate> for DueDate {
    type Error = DueDateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_naive(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Construction ----

    #[test]
    fn from_ymd_accepts_valid_dates() {
        let d = DueDate::from_ymd(2019, 10, 31).unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2019, 10, 31));
        assert!(DueDate::from_ymd(2018, 1, 1).is_ok());
        assert!(DueDate::from_ymd(9999, 12, 31).is_ok());
    }

    #[test]
    fn from_ymd_rejects_years_out_of_range() {
        assert_eq!(
            DueDate::from_ymd(2017, 12, 31),
            Err(DueDateError::YearOutOfRange(2017))
        );
        assert_eq!(
            DueDate::from_ymd(10000, 1, 1),
            Err(DueDateError::YearOutOfRange(10000))
        );
    }

    #[test]
    fn from_ymd_rejects_impossible_days() {
        assert!(DueDate::from_ymd(2019, 0, 1).is_err());
        assert!(DueDate::from_ymd(2019, 13, 1).is_err());
        assert!(DueDate::from_ymd(2019, 4, 31).is_err());
        assert!(DueDate::from_ymd(2019, 1, 0).is_err());
    }

    // ---- Leap years ----

    #[test]
    fn february_29_only_in_leap_years() {
        assert!(DueDate::from_ymd(2020, 2, 29).is_ok());
        assert!(DueDate::from_ymd(2000, 2, 29).is_err()); // below MIN_YEAR
        assert!(DueDate::from_ymd(2400, 2, 29).is_ok());
        assert!(DueDate::from_ymd(2019, 2, 29).is_err());
        assert!(DueDate::from_ymd(2100, 2, 29).is_err());
    }

    // ---- Wire form ----

    #[test]
    fn parse_and_display_round_trip() {
        let d = DueDate::parse("2019-03-05").unwrap();
        assert_eq!(d.to_string(), "2019-03-05");
        assert_eq!(" 2019-03-05 ".parse::<DueDate>().unwrap(), d);
    }

    #[test]
    fn parse_rejects_non_canonical_text() {
        for bad in ["", "2019-3-5", "20190305", "2019/03/05", "05.03.2019", "2019-03-05T00:00"] {
            assert!(DueDate::parse(bad).is_err(), "accepted {bad:?}");
        }
        assert!(DueDate::parse("2019-02-30").is_err());
        assert!(DueDate::parse("2017-06-01").is_err());
    }

    #[test]
    fn serde_uses_wire_form() {
        let d = DueDate::from_ymd(2021, 7, 1).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2021-07-01\"");
        let back: DueDate = serde_json::from_str("\"2021-07-01\"").unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<DueDate>("\"2001-07-01\"").is_err());
    }
}
