//! # Layout Registry
//!
//! A layout is the ordered list of [`Field`] identifiers that makes up a
//! payload of one version. The serializer walks it to produce lines and the
//! parser walks it to consume them, so both directions share one table and
//! cannot drift apart.
//!
//! | Version | Lines | Differences |
//! |---------|-------|-------------|
//! | 1.0 | 30 | six-line actor blocks, due date after the currency |
//! | 2.0 | 34 | address type leads each actor block, no due date, trailer after the message |

use crate::actor::ActorField;
use crate::domain::{ActorRole, Version};

/// Identifier of one payload line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    QrType,
    Version,
    CodingType,
    Iban,
    Actor(ActorRole, ActorField),
    Amount,
    Currency,
    DueDate,
    ReferenceType,
    Reference,
    UnstructuredMessage,
    Trailer,
    BillInfo,
    /// Alternative scheme line, zero-based index `0` or `1`.
    AlternativeScheme(usize),
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QrType => f.write_str("QR type"),
            Self::Version => f.write_str("version"),
            Self::CodingType => f.write_str("coding type"),
            Self::Iban => f.write_str("IBAN"),
            Self::Actor(role, field) => write!(f, "{role} {field}"),
            Self::Amount => f.write_str("amount"),
            Self::Currency => f.write_str("currency"),
            Self::DueDate => f.write_str("due date"),
            Self::ReferenceType => f.write_str("reference type"),
            Self::Reference => f.write_str("reference"),
            Self::UnstructuredMessage => f.write_str("unstructured message"),
            Self::Trailer => f.write_str("trailer"),
            Self::BillInfo => f.write_str("bill information"),
            Self::AlternativeScheme(i) => write!(f, "alternative scheme {}", i + 1),
        }
    }
}

use ActorField as A;
use ActorRole::{Creditor as CR, UltimateCreditor as UCR, UltimateDebtor as UDR};

static LAYOUT_V1: [Field; 30] = [
    Field::QrType,
    Field::Version,
    Field::CodingType,
    Field::Iban,
    Field::Actor(CR, A::Name),
    Field::Actor(CR, A::AddressLine1),
    Field::Actor(CR, A::AddressLine2),
    Field::Actor(CR, A::Postcode),
    Field::Actor(CR, A::Location),
    Field::Actor(CR, A::Country),
    Field::Actor(UCR, A::Name),
    Field::Actor(UCR, A::AddressLine1),
    Field::Actor(UCR, A::AddressLine2),
    Field::Actor(UCR, A::Postcode),
    Field::Actor(UCR, A::Location),
    Field::Actor(UCR, A::Country),
    Field::Amount,
    Field::Currency,
    Field::DueDate,
    Field::Actor(UDR, A::Name),
    Field::Actor(UDR, A::AddressLine1),
    Field::Actor(UDR, A::AddressLine2),
    Field::Actor(UDR, A::Postcode),
    Field::Actor(UDR, A::Location),
    Field::Actor(UDR, A::Country),
    Field::ReferenceType,
    Field::Reference,
    Field::UnstructuredMessage,
    Field::AlternativeScheme(0),
    Field::AlternativeScheme(1),
];

static LAYOUT_V2: [Field; 34] = [
    Field::QrType,
    Field::Version,
    Field::CodingType,
    Field::Iban,
    Field::Actor(CR, A::AddressType),
    Field::Actor(CR, A::Name),
    Field::Actor(CR, A::AddressLine1),
    Field::Actor(CR, A::AddressLine2),
    Field::Actor(CR, A::Postcode),
    Field::Actor(CR, A::Location),
    Field::Actor(CR, A::Country),
    Field::Actor(UCR, A::AddressType),
    Field::Actor(UCR, A::Name),
    Field::Actor(UCR, A::AddressLine1),
    Field::Actor(UCR, A::AddressLine2),
    Field::Actor(UCR, A::Postcode),
    Field::Actor(UCR, A::Location),
    Field::Actor(UCR, A::Country),
    Field::Amount,
    Field::Currency,
    Field::Actor(UDR, A::AddressType),
    Field::Actor(UDR, A::Name),
    Field::Actor(UDR, A::AddressLine1),
    Field::Actor(UDR, A::AddressLine2),
    Field::Actor(UDR, A::Postcode),
    Field::Actor(UDR, A::Location),
    Field::Actor(UDR, A::Country),
    Field::ReferenceType,
    Field::Reference,
    Field::UnstructuredMessage,
    Field::Trailer,
    Field::BillInfo,
    Field::AlternativeScheme(0),
    Field::AlternativeScheme(1),
];

/// The active line layout of a record, selected by version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    version: Version,
    fields: &'static [Field],
}

impl Layout {
    /// The layout for `version`.
    pub fn for_version(version: Version) -> Self {
        let fields: &'static [Field] = match version {
            Version::V1_0 => &LAYOUT_V1,
            Version::V2_0 => &LAYOUT_V2,
        };
        Self { version, fields }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Field identifiers in line order.
    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Zero-based line index of `field`, if the layout carries it.
    pub fn position(&self, field: Field) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }

    /// Whether the layout carries `field`.
    pub fn contains(&self, field: Field) -> bool {
        self.position(field).is_some()
    }

    /// Iterate over field identifiers in line order.
    pub fn iter(&self) -> std::slice::Iter<'static, Field> {
        self.fields.iter()
    }
}

impl IntoIterator for Layout {
    type Item = &'static Field;
    type IntoIter = std::slice::Iter<'static, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn layout_sizes() {
        assert_eq!(Layout::for_version(Version::V1_0).len(), 30);
        assert_eq!(Layout::for_version(Version::V2_0).len(), 34);
    }

    #[test]
    fn both_layouts_exceed_minimum_line_count() {
        for version in Version::all() {
            assert!(Layout::for_version(*version).len() >= crate::field::MIN_LINES);
        }
    }

    #[test]
    fn header_lines_are_shared() {
        for version in Version::all() {
            let layout = Layout::for_version(*version);
            assert_eq!(
                &layout.fields()[..4],
                &[Field::QrType, Field::Version, Field::CodingType, Field::Iban]
            );
        }
    }

    #[test]
    fn every_field_appears_once() {
        for version in Version::all() {
            let layout = Layout::for_version(*version);
            let unique: HashSet<_> = layout.iter().collect();
            assert_eq!(unique.len(), layout.len(), "duplicate in {version} layout");
        }
    }

    #[test]
    fn reference_type_precedes_reference() {
        for version in Version::all() {
            let layout = Layout::for_version(*version);
            let ty = layout.position(Field::ReferenceType).unwrap();
            let reference = layout.position(Field::Reference).unwrap();
            assert_eq!(ty + 1, reference);
        }
    }

    #[test]
    fn version_specific_fields() {
        let v1 = Layout::for_version(Version::V1_0);
        let v2 = Layout::for_version(Version::V2_0);

        assert!(v1.contains(Field::DueDate));
        assert!(!v1.contains(Field::Trailer));
        assert!(!v1.contains(Field::BillInfo));
        assert!(!v1.contains(Field::Actor(ActorRole::Creditor, ActorField::AddressType)));

        assert!(!v2.contains(Field::DueDate));
        assert_eq!(v2.position(Field::Trailer), Some(30));
        assert_eq!(v2.position(Field::BillInfo), Some(31));
    }

    #[test]
    fn actor_blocks_follow_actor_field_order() {
        for version in Version::all() {
            let layout = Layout::for_version(*version);
            for role in ActorRole::all() {
                let block: Vec<ActorField> = layout
                    .iter()
                    .filter_map(|f| match f {
                        Field::Actor(r, af) if r == role => Some(*af),
                        _ => None,
                    })
                    .collect();
                assert_eq!(block, ActorField::order(*version));
            }
        }
    }

    #[test]
    fn field_labels() {
        assert_eq!(
            Field::Actor(ActorRole::UltimateDebtor, ActorField::Postcode).to_string(),
            "ultimate debtor postcode"
        );
        assert_eq!(Field::AlternativeScheme(1).to_string(), "alternative scheme 2");
    }
}
