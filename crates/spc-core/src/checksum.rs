//! # Modulo-10 Recursive Check Digit
//!
//! QR references (`QRR`) are 27 digits whose last digit is a recursive
//! Modulo-10 check digit over the first 26. The computation is a small
//! state machine: a carry in `0..=9` starts at zero and every body digit
//! moves it through [`PATTERN`]; the final carry selects the check digit
//! from [`CHECK_DIGITS`].
//!
//! Everything here is total. Malformed input yields `false` or `None`,
//! never a panic.

/// Carry transition table, indexed `PATTERN[carry][digit]`.
pub const PATTERN: [[u8; 10]; 10] = [
    [0, 9, 4, 6, 8, 2, 7, 1, 3, 5],
    [9, 4, 6, 8, 2, 7, 1, 3, 5, 0],
    [4, 6, 8, 2, 7, 1, 3, 5, 0, 9],
    [6, 8, 2, 7, 1, 3, 5, 0, 9, 4],
    [8, 2, 7, 1, 3, 5, 0, 9, 4, 6],
    [2, 7, 1, 3, 5, 0, 9, 4, 6, 8],
    [7, 1, 3, 5, 0, 9, 4, 6, 8, 2],
    [1, 3, 5, 0, 9, 4, 6, 8, 2, 7],
    [3, 5, 0, 9, 4, 6, 8, 2, 7, 1],
    [5, 0, 9, 4, 6, 8, 2, 7, 1, 3],
];

/// Check digit for each final carry value.
pub const CHECK_DIGITS: [u8; 10] = [0, 9, 8, 7, 6, 5, 4, 3, 2, 1];

/// The Modulo-10 recursive check-digit engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modulo10;

impl Modulo10 {
    /// Length of a complete QR reference, check digit included.
    pub const CODE_LENGTH: usize = 27;

    /// Length of a QR reference body, check digit excluded.
    pub const BODY_LENGTH: usize = Self::CODE_LENGTH - 1;

    /// Compute the check digit over a string of ASCII digits.
    ///
    /// Returns `None` for an empty body or any non-digit character.
    pub fn check_digit(body: &str) -> Option<u8> {
        if body.is_empty() {
            return None;
        }
        let mut carry = 0usize;
        for b in body.bytes() {
            if !b.is_ascii_digit() {
                return None;
            }
            carry = usize::from(PATTERN[carry][usize::from(b - b'0')]);
        }
        Some(CHECK_DIGITS[carry])
    }

    /// Validate a complete 27-digit QR reference.
    ///
    /// Whitespace anywhere in the input is ignored. Fails on empty input,
    /// a length other than 27 digits, or any non-digit character.
    pub fn validate(input: &str) -> bool {
        let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != Self::CODE_LENGTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        let (body, check) = digits.split_at(Self::BODY_LENGTH);
        match (Self::check_digit(body), check.bytes().next()) {
            (Some(expected), Some(actual)) => expected == actual - b'0',
            _ => false,
        }
    }

    /// Append the check digit to a 26-digit reference body.
    ///
    /// Whitespace is ignored. Returns `None` unless the body is exactly
    /// 26 digits.
    pub fn complete(body: &str) -> Option<String> {
        let mut digits: String = body.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != Self::BODY_LENGTH {
            return None;
        }
        let check = Self::check_digit(&digits)?;
        digits.push(char::from(b'0' + check));
        Some(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "210000000003139471430009017";

    #[test]
    fn sample_reference_validates() {
        assert!(Modulo10::validate(SAMPLE));
        assert!(Modulo10::validate("21 00000 00003 13947 14300 09017"));
    }

    #[test]
    fn known_check_digits() {
        assert_eq!(Modulo10::check_digit("21000000000313947143000901"), Some(7));
        assert_eq!(Modulo10::check_digit("00000000000000000000000000"), Some(0));
        assert_eq!(Modulo10::check_digit("12345678901234567890123456"), Some(7));
        assert_eq!(Modulo10::check_digit("11000190000000000000000000"), Some(4));
        assert_eq!(Modulo10::check_digit("18518900000000000000000000"), Some(3));
        assert_eq!(Modulo10::check_digit("31000000000313947143000901"), Some(0));
    }

    #[test]
    fn check_digit_rejects_non_digits() {
        assert_eq!(Modulo10::check_digit(""), None);
        assert_eq!(Modulo10::check_digit("12a4"), None);
        assert_eq!(Modulo10::check_digit("-1"), None);
    }

    #[test]
    fn validate_rejects_malformed_input() {
        assert!(!Modulo10::validate(""));
        assert!(!Modulo10::validate("   "));
        assert!(!Modulo10::validate("21000000000313947143000901"));
        assert!(!Modulo10::validate("2100000000031394714300090170"));
        assert!(!Modulo10::validate("21000000000313947143000901X"));
        assert!(!Modulo10::validate("RF18539007547034"));
    }

    #[test]
    fn wrong_check_digit_fails() {
        assert!(!Modulo10::validate("210000000003139471430009016"));
        assert!(!Modulo10::validate("210000000003139471430009010"));
    }

    #[test]
    fn every_single_digit_mutation_is_detected() {
        let bytes = SAMPLE.as_bytes();
        for pos in 0..Modulo10::BODY_LENGTH {
            for d in b'0'..=b'9' {
                if d == bytes[pos] {
                    continue;
                }
                let mut mutated = bytes.to_vec();
                mutated[pos] = d;
                let text = String::from_utf8(mutated).unwrap();
                assert!(!Modulo10::validate(&text), "mutation undetected: {text}");
            }
        }
    }

    #[test]
    fn complete_appends_check_digit() {
        assert_eq!(
            Modulo10::complete("21000000000313947143000901").as_deref(),
            Some(SAMPLE)
        );
        assert_eq!(
            Modulo10::complete("11 00019 00000 00000 00000 0000").as_deref(),
            Some("110001900000000000000000004")
        );
        assert_eq!(Modulo10::complete("123"), None);
        assert_eq!(Modulo10::complete(SAMPLE), None);
        assert_eq!(Modulo10::complete("2100000000031394714300090A"), None);
    }
}
