//! # Serializer
//!
//! Renders a [`PaymentRecord`] as payload text by walking its active
//! [`Layout`](crate::layout::Layout): one line per field, joined with `\n`,
//! trailing whitespace of the whole payload removed.
//!
//! Rendering never fails. Absent values (no amount, no due date, no
//! coding type after a failed parse) render as blank lines.

use std::borrow::Cow;

use crate::layout::Field;
use crate::record::PaymentRecord;

/// Canonical text of one field.
pub fn render_field(record: &PaymentRecord, field: Field) -> Cow<'_, str> {
    match field {
        Field::QrType => Cow::Borrowed(record.qr_type.as_str()),
        Field::Version => Cow::Owned(record.version.code()),
        Field::CodingType => record
            .coding_type
            .map_or(Cow::Borrowed(""), |c| Cow::Owned(c.value().to_string())),
        Field::Iban => Cow::Borrowed(record.iban.as_str()),
        Field::Actor(role, actor_field) => {
            Cow::Borrowed(record.actors[role.index()].field_text(actor_field))
        }
        Field::Amount => record
            .amount
            .map_or(Cow::Borrowed(""), |a| Cow::Owned(a.to_string())),
        Field::Currency => Cow::Borrowed(record.currency.map_or("", |c| c.as_str())),
        Field::DueDate => record
            .due_date
            .map_or(Cow::Borrowed(""), |d| Cow::Owned(d.to_string())),
        Field::ReferenceType => Cow::Borrowed(record.reference_type.as_str()),
        Field::Reference => Cow::Borrowed(record.reference.as_str()),
        Field::UnstructuredMessage => Cow::Borrowed(record.unstructured_message.as_str()),
        Field::Trailer => Cow::Borrowed(record.trailer.as_str()),
        Field::BillInfo => Cow::Borrowed(record.bill_info.as_str()),
        Field::AlternativeScheme(i) => record
            .alternative_schemes
            .get(i)
            .map_or(Cow::Borrowed(""), |line| Cow::Borrowed(line.as_str())),
    }
}

/// Render the whole payload.
pub fn render(record: &PaymentRecord) -> String {
    let layout = record.layout();
    let mut out = String::with_capacity(256);
    for (i, field) in layout.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_field(record, *field));
    }
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}
