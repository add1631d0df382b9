//! # Payment Record
//!
//! [`PaymentRecord`] is the aggregate: account, amount, reference, free
//! text, alternative schemes and the three actors. It is built either from
//! defaults through validating setters, in one pass by a
//! [`PaymentRecordBuilder`], or by parsing text ([`PaymentRecord::from_text`]).
//!
//! ## Setter contract
//!
//! Every setter returns `bool`. On `false` the field is either left
//! unchanged (closed code sets such as currency, IBAN, trailer) or coerced
//! to blank (free text that exceeds its ceiling). Setters never panic and
//! never return errors; numbered errors come only from the parser.
//!
//! ## Validity
//!
//! Validity is not stored. [`PaymentRecord::validate`] renders the record
//! and parses the text back; the record is valid iff that yields no errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::actor::ActorRecord;
use crate::amount::Amount;
use crate::checksum::Modulo10;
use crate::domain::{ActorRole, CodingType, Currency, ReferenceType, Version};
use crate::error::{SpcError, ValidationErrors};
use crate::field::{
    self, validate_field, ALTERNATIVE_SCHEME_MAX, BILL_INFO_MAX, IBAN_MAX, MESSAGE_MAX,
};
use crate::layout::Layout;
use crate::parse;
use crate::serialize;
use crate::temporal::DueDate;

/// The only QR type defined.
pub const QR_TYPE: &str = "SPC";

/// The only trailer defined.
pub const TRAILER: &str = "EPD";

/// A Swiss Payments Code payment instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub(crate) qr_type: String,
    pub(crate) version: Version,
    pub(crate) coding_type: Option<CodingType>,
    pub(crate) iban: String,
    pub(crate) amount: Option<Amount>,
    pub(crate) currency: Option<Currency>,
    pub(crate) due_date: Option<DueDate>,
    pub(crate) reference_type: ReferenceType,
    pub(crate) reference: String,
    pub(crate) unstructured_message: String,
    pub(crate) trailer: String,
    pub(crate) bill_info: String,
    pub(crate) alternative_schemes: [String; 2],
    pub(crate) actors: [ActorRecord; 3],
}

impl Default for PaymentRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentRecord {
    /// A record with defaults: version 2.0, Latin-1, CHF, trailer `EPD`,
    /// reference type `NON`, everything else blank.
    pub fn new() -> Self {
        Self {
            qr_type: QR_TYPE.to_string(),
            version: Version::LATEST,
            coding_type: Some(CodingType::Latin1),
            iban: String::new(),
            amount: None,
            currency: Some(Currency::Chf),
            due_date: None,
            reference_type: ReferenceType::Non,
            reference: String::new(),
            unstructured_message: String::new(),
            trailer: TRAILER.to_string(),
            bill_info: String::new(),
            alternative_schemes: Default::default(),
            actors: Default::default(),
        }
    }

    /// Start a builder from defaults.
    pub fn builder() -> PaymentRecordBuilder {
        PaymentRecordBuilder::new()
    }

    /// Parse raw text, failing with every error found.
    pub fn from_text(raw: &str) -> Result<Self, ValidationErrors> {
        parse::parse(raw).into_result()
    }

    // ---- Getters ----

    pub fn qr_type(&self) -> &str {
        &self.qr_type
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// The layout selected by the current version.
    pub fn layout(&self) -> Layout {
        Layout::for_version(self.version)
    }

    pub fn coding_type(&self) -> Option<CodingType> {
        self.coding_type
    }

    pub fn iban(&self) -> &str {
        &self.iban
    }

    /// The amount, or `None` when the payer chooses it.
    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    pub fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    pub fn reference_type(&self) -> ReferenceType {
        self.reference_type
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn unstructured_message(&self) -> &str {
        &self.unstructured_message
    }

    pub fn trailer(&self) -> &str {
        &self.trailer
    }

    pub fn bill_info(&self) -> &str {
        &self.bill_info
    }

    /// Both raw alternative scheme lines.
    pub fn alternative_schemes(&self) -> &[String; 2] {
        &self.alternative_schemes
    }

    /// Decomposed alternative scheme line `index` (`0` or `1`), if present
    /// and at least three characters long.
    pub fn alternative_scheme(&self, index: usize) -> Option<AlternativeScheme> {
        self.alternative_schemes
            .get(index)
            .and_then(|line| AlternativeScheme::parse(line))
    }

    pub fn actor(&self, role: ActorRole) -> &ActorRecord {
        &self.actors[role.index()]
    }

    /// All actors in role order: creditor, ultimate creditor, ultimate debtor.
    pub fn actors(&self) -> &[ActorRecord; 3] {
        &self.actors
    }

    // ---- Setters ----

    /// Set the QR type. Only `SPC` (any case) is accepted.
    pub fn set_qr_type(&mut self, qr_type: &str) -> bool {
        if !qr_type.trim().eq_ignore_ascii_case(QR_TYPE) {
            return false;
        }
        self.qr_type = QR_TYPE.to_string();
        true
    }

    /// Switch version and normalize version-dependent fields.
    ///
    /// Moving to 1.0 drops bill information, address types and restores
    /// the default trailer; moving to 2.0 drops the due date. Actors are
    /// re-sanitized for the new ceilings.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
        match version {
            Version::V1_0 => {
                self.bill_info.clear();
                self.trailer = TRAILER.to_string();
            }
            Version::V2_0 => {
                self.due_date = None;
            }
        }
        for actor in self.actors.iter_mut() {
            let (clean, _) = actor.sanitized(version);
            *actor = clean;
        }
    }

    /// Set the version from its four-digit wire code (`0100`, `0200`).
    pub fn set_version_code(&mut self, code: &str) -> bool {
        match Version::from_code(code.trim()) {
            Some(version) => {
                self.set_version(version);
                true
            }
            None => false,
        }
    }

    /// Set the version from a decimal number (`1.0`, `2.0`).
    pub fn set_version_number(&mut self, number: f64) -> bool {
        match Version::from_f64(number) {
            Some(version) => {
                self.set_version(version);
                true
            }
            None => false,
        }
    }

    /// Set the coding type. Only `1` (Latin-1) is accepted.
    pub fn set_coding_type(&mut self, value: u32) -> bool {
        match CodingType::from_value(value) {
            Some(coding) => {
                self.coding_type = Some(coding);
                true
            }
            None => false,
        }
    }

    /// Set the account IBAN.
    ///
    /// Whitespace is removed and the result uppercased; it must be
    /// alphanumeric, at most 21 characters and start with `CH` or `LI`.
    /// On failure the stored IBAN is unchanged.
    pub fn set_iban(&mut self, iban: &str) -> bool {
        let compact: String = iban
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if !compact.chars().all(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        let Some(accepted) = validate_field(&compact, true, IBAN_MAX) else {
            return false;
        };
        if !(accepted.starts_with("CH") || accepted.starts_with("LI")) {
            return false;
        }
        self.iban = accepted.to_string();
        true
    }

    /// Set the amount from a float, truncated to two fraction digits.
    ///
    /// A negative value clears the amount (payer chooses) and succeeds.
    /// Non-finite values and amounts over `999999999.99` are rejected and
    /// leave the amount unchanged.
    pub fn set_amount(&mut self, amount: f64) -> bool {
        if amount < 0.0 {
            self.amount = None;
            return true;
        }
        match Amount::from_f64(amount) {
            Ok(value) => {
                self.amount = Some(value);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "amount rejected");
                false
            }
        }
    }

    /// Set the amount from its wire text. Blank text clears the amount.
    pub fn set_amount_text(&mut self, text: &str) -> bool {
        if field::is_blank(text) {
            self.amount = None;
            return true;
        }
        match text.parse::<Amount>() {
            Ok(value) => {
                self.amount = Some(value);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "amount rejected");
                false
            }
        }
    }

    /// Set an exact amount.
    pub fn set_amount_value(&mut self, amount: Option<Amount>) {
        self.amount = amount;
    }

    /// Remove the amount.
    pub fn clear_amount(&mut self) {
        self.amount = None;
    }

    /// Set the currency (`CHF` or `EUR`, any case). Unchanged on failure.
    pub fn set_currency(&mut self, currency: &str) -> bool {
        match currency.trim().parse::<Currency>() {
            Ok(c) => {
                self.currency = Some(c);
                true
            }
            Err(_) => false,
        }
    }

    /// Set the due date. Only version 1.0 carries one.
    ///
    /// An invalid date clears the due date and returns `false`.
    pub fn set_due_date(&mut self, year: i32, month: u32, day: u32) -> bool {
        if self.version != Version::V1_0 {
            return false;
        }
        match DueDate::from_ymd(year, month, day) {
            Ok(date) => {
                self.due_date = Some(date);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "due date rejected");
                self.due_date = None;
                false
            }
        }
    }

    /// Set the due date from `YYYY-MM-DD` text. Blank text clears it.
    pub fn set_due_date_text(&mut self, text: &str) -> bool {
        if field::is_blank(text) {
            self.due_date = None;
            return true;
        }
        if self.version != Version::V1_0 {
            return false;
        }
        match DueDate::parse(text) {
            Ok(date) => {
                self.due_date = Some(date);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "due date rejected");
                self.due_date = None;
                false
            }
        }
    }

    pub fn clear_due_date(&mut self) {
        self.due_date = None;
    }

    /// Set reference type and reference together.
    ///
    /// Spaces are removed from the reference. An unknown type leaves the
    /// record unchanged. `NON` always stores an empty reference. `QRR`
    /// requires at most 27 digits with a valid check digit, `SCOR` at most
    /// 25 characters; a failing reference is stored as far as the length
    /// ceiling accepts it and `false` is returned.
    pub fn set_reference(&mut self, reference_type: &str, reference: &str) -> bool {
        let Ok(kind) = reference_type.trim().parse::<ReferenceType>() else {
            return false;
        };
        let compact: String = reference.chars().filter(|c| *c != ' ').collect();
        self.reference_type = kind;
        if kind == ReferenceType::Non {
            self.reference.clear();
            return true;
        }
        if !field::is_single_line(&compact) {
            self.reference.clear();
            return false;
        }
        match validate_field(&compact, true, kind.max_len()) {
            Some(accepted) => {
                self.reference = accepted.to_string();
                kind != ReferenceType::Qrr || Modulo10::validate(accepted)
            }
            None => {
                self.reference.clear();
                false
            }
        }
    }

    /// Set reference type `NON` with no reference.
    pub fn set_no_reference(&mut self) {
        self.reference_type = ReferenceType::Non;
        self.reference.clear();
    }

    /// Set the unstructured message (at most 140 characters).
    pub fn set_unstructured_message(&mut self, message: &str) -> bool {
        store_text(&mut self.unstructured_message, message, MESSAGE_MAX)
    }

    /// Set the structured bill information (version 2.0 only, at most 140
    /// characters).
    pub fn set_bill_info(&mut self, info: &str) -> bool {
        if self.version == Version::V1_0 {
            return field::is_blank(info);
        }
        store_text(&mut self.bill_info, info, BILL_INFO_MAX)
    }

    /// Set the trailer. Only `EPD` (any case) is accepted.
    pub fn set_trailer(&mut self, trailer: &str) -> bool {
        if !trailer.trim().eq_ignore_ascii_case(TRAILER) {
            return false;
        }
        self.trailer = TRAILER.to_string();
        true
    }

    /// Set alternative scheme line `index` (`0` or `1`, at most 100 characters).
    pub fn set_alternative_scheme(&mut self, index: usize, line: &str) -> bool {
        match self.alternative_schemes.get_mut(index) {
            Some(slot) => store_text(slot, line, ALTERNATIVE_SCHEME_MAX),
            None => false,
        }
    }

    /// Replace both alternative scheme lines. Missing entries are cleared;
    /// more than two entries are rejected without change.
    pub fn set_alternative_schemes(&mut self, lines: &[&str]) -> bool {
        if lines.len() > self.alternative_schemes.len() {
            return false;
        }
        self.clear_alternative_schemes();
        let mut ok = true;
        for (i, line) in lines.iter().enumerate() {
            ok &= self.set_alternative_scheme(i, line);
        }
        ok
    }

    pub fn clear_alternative_schemes(&mut self) {
        for line in self.alternative_schemes.iter_mut() {
            line.clear();
        }
    }

    /// Store an actor after passing each field through the field validator,
    /// then check its mandatory-field dependencies.
    ///
    /// Returns `false` if any field was rejected or dependencies are unmet;
    /// the sanitized actor is stored either way.
    pub fn set_actor(&mut self, role: ActorRole, actor: ActorRecord) -> bool {
        let (clean, rejected) = actor.sanitized(self.version);
        let dependencies = clean.validate(role, self.version);
        if !rejected.is_empty() {
            tracing::debug!(%role, ?rejected, "actor fields rejected");
        }
        self.actors[role.index()] = clean;
        rejected.is_empty() && dependencies.is_ok()
    }

    /// Reset an actor to blank.
    pub fn clear_actor(&mut self, role: ActorRole) {
        self.actors[role.index()] = ActorRecord::default();
    }

    // ---- Rendering and validation ----

    /// Render the payload text. Never fails.
    pub fn render(&self) -> String {
        serialize::render(self)
    }

    /// Every error the rendered payload produces when parsed back.
    pub fn validate(&self) -> ValidationErrors {
        parse::parse(&self.render()).errors
    }

    /// Whether the rendered payload parses back without errors.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Store free text that may end the rendered payload; trailing whitespace
/// would not survive rendering, so it is dropped here.
fn store_text(slot: &mut String, value: &str, max_len: usize) -> bool {
    if !field::is_single_line(value) {
        slot.clear();
        return false;
    }
    let value = value.trim_end();
    match validate_field(value, false, max_len) {
        Some(accepted) => {
            *slot = accepted.to_string();
            !(accepted.is_empty() && !value.is_empty())
        }
        None => {
            slot.clear();
            false
        }
    }
}

impl fmt::Display for PaymentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for PaymentRecord {
    type Err = ValidationErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

/// A self-describing alternative scheme line: two-character token, one
/// delimiter character, delimiter-separated values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeScheme {
    pub token: String,
    pub delimiter: char,
    pub values: Vec<String>,
}

impl AlternativeScheme {
    /// Decompose a raw line. Lines shorter than three characters have no
    /// token and delimiter and yield `None`.
    ///
    /// Values are split on the literal delimiter; an empty remainder has no
    /// values.
    pub fn parse(line: &str) -> Option<Self> {
        let mut chars = line.chars();
        let token: String = chars.by_ref().take(2).collect();
        if token.chars().count() < 2 {
            return None;
        }
        let delimiter = chars.next()?;
        let rest = chars.as_str();
        let values = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split(delimiter).map(str::to_string).collect()
        };
        Some(Self {
            token,
            delimiter,
            values,
        })
    }

    /// Render back to a single line.
    pub fn render(&self) -> String {
        let mut line = format!("{}{}", self.token, self.delimiter);
        line.push_str(&self.values.join(&self.delimiter.to_string()));
        line
    }
}

impl fmt::Display for AlternativeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// One-pass construction of a [`PaymentRecord`].
///
/// Each step applies the matching setter and remembers failures; nothing
/// is checked across fields until [`build`](Self::build), which runs the
/// full validation once. Set the version first: due date and bill
/// information depend on it.
#[derive(Debug, Clone, Default)]
pub struct PaymentRecordBuilder {
    record: PaymentRecord,
    errors: ValidationErrors,
}

impl PaymentRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: Version) -> Self {
        self.record.set_version(version);
        self
    }

    pub fn coding_type(mut self, value: u32) -> Self {
        if !self.record.set_coding_type(value) {
            self.errors.push(SpcError::UnsupportedCodingType {
                value: value.to_string(),
            });
        }
        self
    }

    pub fn iban(mut self, iban: &str) -> Self {
        if !self.record.set_iban(iban) {
            self.errors.push(SpcError::InvalidIban {
                value: iban.to_string(),
            });
        }
        self
    }

    /// Amount as a float; negative means no amount.
    pub fn amount(mut self, amount: f64) -> Self {
        if !self.record.set_amount(amount) {
            self.reject("amount", amount.to_string());
        }
        self
    }

    pub fn currency(mut self, currency: &str) -> Self {
        if !self.record.set_currency(currency) {
            self.errors.push(SpcError::InvalidCurrency {
                value: currency.to_string(),
            });
        }
        self
    }

    pub fn due_date(mut self, year: i32, month: u32, day: u32) -> Self {
        if !self.record.set_due_date(year, month, day) {
            self.reject("due date", format!("{year:04}-{month:02}-{day:02}"));
        }
        self
    }

    pub fn reference(mut self, reference_type: &str, reference: &str) -> Self {
        if !self.record.set_reference(reference_type, reference) {
            self.errors.push(SpcError::InvalidReference {
                reference_type: reference_type.to_string(),
                value: reference.to_string(),
            });
        }
        self
    }

    pub fn unstructured_message(mut self, message: &str) -> Self {
        if !self.record.set_unstructured_message(message) {
            self.reject("unstructured message", message);
        }
        self
    }

    pub fn bill_info(mut self, info: &str) -> Self {
        if !self.record.set_bill_info(info) {
            self.reject("bill information", info);
        }
        self
    }

    pub fn trailer(mut self, trailer: &str) -> Self {
        if !self.record.set_trailer(trailer) {
            self.errors.push(SpcError::InvalidTrailer {
                value: trailer.to_string(),
            });
        }
        self
    }

    pub fn alternative_scheme(mut self, index: usize, line: &str) -> Self {
        if !self.record.set_alternative_scheme(index, line) {
            self.reject(format!("alternative scheme {}", index + 1), line);
        }
        self
    }

    /// Store an actor. Rejected field values are reported here; dependency
    /// failures surface from [`build`](Self::build).
    pub fn actor(mut self, role: ActorRole, actor: ActorRecord) -> Self {
        let (_, rejected) = actor.sanitized(self.record.version());
        for field in rejected {
            self.reject(format!("{role} {field}"), actor.field_text(field));
        }
        self.record.set_actor(role, actor);
        self
    }

    fn reject(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.errors.push(SpcError::RejectedValue {
            field: field.into(),
            value: value.into(),
        });
    }

    /// Run the validation pass.
    ///
    /// Setter failures come first, followed by validation errors whose
    /// code was not already reported.
    pub fn build(self) -> Result<PaymentRecord, ValidationErrors> {
        let mut errors = self.errors;
        for error in self.record.validate() {
            if !errors.contains_code(error.code()) {
                errors.push(error);
            }
        }
        if errors.is_empty() {
            Ok(self.record)
        } else {
            Err(errors)
        }
    }
}
