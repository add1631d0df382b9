//! # Field Validator
//!
//! One gate decides whether a scalar value is acceptable for a field:
//! [`validate_field`]. Every setter in the crate routes through it with the
//! field's length ceiling from this module, so no caller performs its own
//! length arithmetic.
//!
//! Lengths are counted in characters, not bytes; SPC payloads are Latin-1
//! text and a multi-byte UTF-8 umlaut is still one character on the wire.

/// Maximum length of an actor name.
pub const NAME_MAX: usize = 70;
/// Maximum length of address line 1 (street, or combined line).
pub const ADDRESS_LINE_1_MAX: usize = 70;
/// Maximum length of address line 2 for structured or v1 addresses.
pub const ADDRESS_LINE_2_MAX: usize = 16;
/// Maximum length of address line 2 for combined (`K`) addresses.
pub const ADDRESS_LINE_2_COMBINED_MAX: usize = 70;
/// Maximum length of a postcode.
pub const POSTCODE_MAX: usize = 16;
/// Maximum length of a town name.
pub const LOCATION_MAX: usize = 35;
/// Length of an ISO 3166 country code.
pub const COUNTRY_MAX: usize = 2;
/// Maximum length of an address type code.
pub const ADDRESS_TYPE_MAX: usize = 1;
/// Maximum length of an IBAN after whitespace removal.
pub const IBAN_MAX: usize = 21;
/// Maximum length of the unstructured message.
pub const MESSAGE_MAX: usize = 140;
/// Maximum length of the structured bill information.
pub const BILL_INFO_MAX: usize = 140;
/// Maximum length of one alternative scheme line.
pub const ALTERNATIVE_SCHEME_MAX: usize = 100;
/// Maximum length of a rendered amount, decimal point included.
pub const AMOUNT_TEXT_MAX: usize = 12;
/// Maximum length of a whole payload.
pub const PAYLOAD_MAX: usize = 997;
/// Minimum number of lines of any supported layout.
pub const MIN_LINES: usize = 25;

/// Accept, coerce, or reject a field value.
///
/// - Empty value: `None` if `required`, otherwise `Some("")`.
/// - Within `max_len` characters (or `max_len == 0`, meaning unbounded):
///   the value unchanged.
/// - Too long: `None` if `required`, otherwise `Some("")`.
///
/// `None` means the value is rejected; `Some` carries the text to store.
pub fn validate_field(value: &str, required: bool, max_len: usize) -> Option<&str> {
    let acceptable = !value.is_empty() && (max_len == 0 || value.chars().count() <= max_len);
    if acceptable {
        Some(value)
    } else if required {
        None
    } else {
        Some("")
    }
}

/// Whether a value fits on one payload line.
pub(crate) fn is_single_line(value: &str) -> bool {
    !value.contains(['\n', '\r'])
}

/// Whether a value is blank after trimming.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
