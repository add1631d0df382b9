//! # Parser/Validator
//!
//! Turns payload text into a [`PaymentRecord`] plus every defect found.
//! Parsing never stops at the first problem: structural checks (empty,
//! too long, too few lines) are reported and processing continues with
//! whatever lines exist, so one call surfaces the complete error list.
//!
//! ## Line handling
//!
//! The input is split on `\n` as is and one trailing `\r` is stripped per
//! line, so trailing blank lines count towards the minimum. Line positions are
//! looked up through the [`Layout`] of the version on line 2; a line past
//! the end of input reads as blank, lines beyond the layout are ignored.
//!
//! ## Field handling
//!
//! Each field is cleared before its line is applied through the record's
//! setter, so a rejected line never leaves a default behind. The reference
//! is applied together with the reference type read on the line before it.
//! Actor dependencies are checked once all lines are consumed.

use crate::actor::ActorRecord;
use crate::domain::{ActorRole, ReferenceType, Version};
use crate::error::{SpcError, ValidationErrors};
use crate::field::{MIN_LINES, PAYLOAD_MAX};
use crate::layout::{Field, Layout};
use crate::record::PaymentRecord;

/// Zero-based line index of the version code.
const VERSION_LINE: usize = 1;

/// Result of parsing a payload: the populated record and every error found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub record: PaymentRecord,
    pub errors: ValidationErrors,
}

impl Parsed {
    /// Whether no errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The record if no errors were found, otherwise the errors.
    pub fn into_result(self) -> Result<PaymentRecord, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(self.record)
        } else {
            Err(self.errors)
        }
    }
}

/// Parse payload text.
pub fn parse(raw: &str) -> Parsed {
    let mut errors = ValidationErrors::new();

    if raw.trim().is_empty() {
        errors.push(SpcError::EmptyInput);
        return Parsed {
            record: PaymentRecord::new(),
            errors,
        };
    }

    let len = raw.chars().count();
    if len > PAYLOAD_MAX {
        errors.push(SpcError::InputTooLong {
            len,
            max: PAYLOAD_MAX,
        });
    }

    // Trailing blank lines still count: a blank final actor block is part of the payload.
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.len() < MIN_LINES {
        errors.push(SpcError::InsufficientFields {
            found: lines.len(),
            required: MIN_LINES,
        });
    }

    let line = |i: usize| lines.get(i).copied().unwrap_or("");

    let version_text = line(VERSION_LINE);
    let version = Version::from_code(version_text.trim()).unwrap_or_else(|| {
        errors.push(SpcError::UnsupportedVersion {
            value: version_text.to_string(),
        });
        Version::LATEST
    });
    let layout = Layout::for_version(version);
    tracing::debug!(%version, lines = lines.len(), layout_lines = layout.len(), "parsing payload");

    let mut record = PaymentRecord::new();
    record.set_version(version);
    record.actors = Default::default();

    let mut pending_reference_type = "";
    for (i, field) in layout.iter().enumerate() {
        let text = line(i);
        if let Some(error) = apply(&mut record, *field, text, &mut pending_reference_type) {
            tracing::debug!(line = i + 1, %field, code = error.code(), "field rejected");
            errors.push(error);
        }
    }
    if lines.len() > layout.len() {
        tracing::trace!(
            ignored = lines.len() - layout.len(),
            "lines beyond layout ignored"
        );
    }

    let faults: Vec<_> = ActorRole::all()
        .iter()
        .filter_map(|role| record.actor(*role).validate(*role, version).err())
        .collect();
    if !faults.is_empty() {
        errors.push(SpcError::ActorDependencies { faults });
    }

    tracing::debug!(errors = errors.len(), codes = ?errors.codes(), "payload parsed");
    Parsed { record, errors }
}

/// Clear the target of `field`, then apply `text` through its setter.
///
/// Returns the error to report, if the field has a numbered error.
fn apply<'a>(
    record: &mut PaymentRecord,
    field: Field,
    text: &'a str,
    pending_reference_type: &mut &'a str,
) -> Option<SpcError> {
    match field {
        // Resolved before the walk.
        Field::Version => None,
        Field::QrType => {
            record.qr_type.clear();
            (!record.set_qr_type(text)).then(|| SpcError::UnsupportedQrType {
                value: text.to_string(),
            })
        }
        Field::CodingType => {
            record.coding_type = None;
            let accepted = text
                .trim()
                .parse::<u32>()
                .map(|value| record.set_coding_type(value))
                .unwrap_or(false);
            (!accepted).then(|| SpcError::UnsupportedCodingType {
                value: text.to_string(),
            })
        }
        Field::Iban => {
            record.iban.clear();
            (!record.set_iban(text)).then(|| SpcError::InvalidIban {
                value: text.to_string(),
            })
        }
        Field::Actor(role, actor_field) => {
            let version = record.version;
            let actor: &mut ActorRecord = &mut record.actors[role.index()];
            if !actor.assign(actor_field, text, version) {
                tracing::trace!(%role, field = %actor_field, "actor value not accepted");
            }
            None
        }
        Field::Amount => {
            record.amount = None;
            if !record.set_amount_text(text) {
                tracing::debug!(value = text, "amount ignored");
            }
            None
        }
        Field::Currency => {
            record.currency = None;
            (!record.set_currency(text)).then(|| SpcError::InvalidCurrency {
                value: text.to_string(),
            })
        }
        Field::DueDate => {
            record.due_date = None;
            if !record.set_due_date_text(text) {
                tracing::debug!(value = text, "due date ignored");
            }
            None
        }
        Field::ReferenceType => {
            *pending_reference_type = text;
            None
        }
        Field::Reference => {
            record.reference_type = ReferenceType::Non;
            record.reference.clear();
            let reference_type = *pending_reference_type;
            // A payload that ends before its reference block carries no reference.
            if reference_type.trim().is_empty() && text.trim().is_empty() {
                record.set_no_reference();
                return None;
            }
            (!record.set_reference(reference_type, text)).then(|| SpcError::InvalidReference {
                reference_type: reference_type.to_string(),
                value: text.to_string(),
            })
        }
        Field::UnstructuredMessage => {
            record.unstructured_message.clear();
            if !record.set_unstructured_message(text) {
                tracing::debug!("unstructured message dropped");
            }
            None
        }
        Field::Trailer => {
            record.trailer.clear();
            (!record.set_trailer(text)).then(|| SpcError::InvalidTrailer {
                value: text.to_string(),
            })
        }
        Field::BillInfo => {
            record.bill_info.clear();
            if !record.set_bill_info(text) {
                tracing::debug!("bill information dropped");
            }
            None
        }
        Field::AlternativeScheme(index) => {
            if let Some(slot) = record.alternative_schemes.get_mut(index) {
                slot.clear();
            }
            if !record.set_alternative_scheme(index, text) {
                tracing::debug!(index, "alternative scheme dropped");
            }
            None
        }
    }
}
