//! # Actor Record — Payment Parties
//!
//! An [`ActorRecord`] is the name-and-address bundle of one payment party.
//! Which of its fields are mandatory depends on the version and, from
//! version 2.0, on the actor's own address type:
//!
//! | Version | Address type | Required when the actor is not blank |
//! |---------|--------------|--------------------------------------|
//! | 1.0     | (none)       | name, postcode, location, country |
//! | 2.0     | `S`          | address type, name, address line 1, postcode, location, country |
//! | 2.0     | `K`          | address type, name, address lines 1 and 2 |
//!
//! A blank actor (every field except the address type empty) is valid for
//! the optional roles. The creditor is never allowed to be blank.
//!
//! Validation is a pure function over the whole actor
//! ([`ActorRecord::validate`]); per-field acceptance goes through
//! [`validate_field`](crate::field::validate_field) in
//! [`ActorRecord::assign`].

use serde::{Deserialize, Serialize};

use crate::domain::{ActorRole, AddressType, Version};
use crate::error::ActorFault;
use crate::field::{
    self, validate_field, ADDRESS_LINE_1_MAX, ADDRESS_TYPE_MAX, COUNTRY_MAX, LOCATION_MAX,
    NAME_MAX, POSTCODE_MAX,
};

/// One line of an actor block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorField {
    /// `S` or `K` (version 2.0 only).
    AddressType,
    Name,
    /// Street (`S`), street and number (v1.0 and `K`).
    AddressLine1,
    /// Building number (`S`, v1.0), or postcode and town (`K`).
    AddressLine2,
    Postcode,
    Location,
    /// ISO 3166-1 alpha-2 code.
    Country,
}

impl ActorField {
    /// Line order of an actor block under version 1.0.
    pub const V1_ORDER: [ActorField; 6] = [
        Self::Name,
        Self::AddressLine1,
        Self::AddressLine2,
        Self::Postcode,
        Self::Location,
        Self::Country,
    ];

    /// Line order of an actor block under version 2.0.
    pub const V2_ORDER: [ActorField; 7] = [
        Self::AddressType,
        Self::Name,
        Self::AddressLine1,
        Self::AddressLine2,
        Self::Postcode,
        Self::Location,
        Self::Country,
    ];

    /// Line order of an actor block for the given version.
    pub fn order(version: Version) -> &'static [ActorField] {
        match version {
            Version::V1_0 => &Self::V1_ORDER,
            Version::V2_0 => &Self::V2_ORDER,
        }
    }

    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddressType => "address type",
            Self::Name => "name",
            Self::AddressLine1 => "address line 1",
            Self::AddressLine2 => "address line 2",
            Self::Postcode => "postcode",
            Self::Location => "location",
            Self::Country => "country",
        }
    }
}

impl std::fmt::Display for ActorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and address of one payment party.
///
/// Fields are public for construction; a record only stores actors that
/// went through [`ActorRecord::sanitized`], so stored text always respects
/// the length ceilings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub address_type: Option<AddressType>,
    pub name: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub postcode: String,
    pub location: String,
    pub country: String,
}

impl ActorRecord {
    /// A structured (`S`) address: street, building number, postcode, town.
    pub fn structured(
        name: impl Into<String>,
        street: impl Into<String>,
        building_number: impl Into<String>,
        postcode: impl Into<String>,
        location: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            address_type: Some(AddressType::Structured),
            name: name.into(),
            address_line_1: street.into(),
            address_line_2: building_number.into(),
            postcode: postcode.into(),
            location: location.into(),
            country: country.into(),
        }
    }

    /// A combined (`K`) address: two free lines, the second holding postcode and town.
    pub fn combined(
        name: impl Into<String>,
        address_line_1: impl Into<String>,
        address_line_2: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            address_type: Some(AddressType::Combined),
            name: name.into(),
            address_line_1: address_line_1.into(),
            address_line_2: address_line_2.into(),
            country: country.into(),
            ..Self::default()
        }
    }

    /// Wire text of one field. A missing address type is blank.
    pub fn field_text(&self, field: ActorField) -> &str {
        match field {
            ActorField::AddressType => self.address_type.map(|t| t.as_str()).unwrap_or(""),
            ActorField::Name => &self.name,
            ActorField::AddressLine1 => &self.address_line_1,
            ActorField::AddressLine2 => &self.address_line_2,
            ActorField::Postcode => &self.postcode,
            ActorField::Location => &self.location,
            ActorField::Country => &self.country,
        }
    }

    /// Store one field through the field validator.
    ///
    /// A rejected value is stored blank (or as no address type) and `false`
    /// is returned; the dependency check decides later whether the blank
    /// matters. Address type is ignored under version 1.0. Address line 2's
    /// ceiling follows the address type already stored, so assign the
    /// address type first.
    pub fn assign(&mut self, field: ActorField, value: &str, version: Version) -> bool {
        if !field::is_single_line(value) {
            self.clear_field(field);
            return false;
        }
        match field {
            ActorField::AddressType => {
                if version == Version::V1_0 {
                    self.address_type = None;
                    return true;
                }
                let code = value.trim().to_ascii_uppercase();
                self.address_type = validate_field(&code, true, ADDRESS_TYPE_MAX)
                    .and_then(|c| c.parse::<AddressType>().ok());
                self.address_type.is_some()
            }
            ActorField::Name => store(&mut self.name, value, true, NAME_MAX),
            ActorField::AddressLine1 => {
                store(&mut self.address_line_1, value, false, ADDRESS_LINE_1_MAX)
            }
            ActorField::AddressLine2 => {
                let max = address_line_2_max(self.address_type, version);
                store(&mut self.address_line_2, value, false, max)
            }
            ActorField::Postcode => store(&mut self.postcode, value, true, POSTCODE_MAX),
            ActorField::Location => store(&mut self.location, value, true, LOCATION_MAX),
            ActorField::Country => {
                let code = value.to_ascii_uppercase();
                store(&mut self.country, &code, true, COUNTRY_MAX)
            }
        }
    }

    fn clear_field(&mut self, field: ActorField) {
        match field {
            ActorField::AddressType => self.address_type = None,
            ActorField::Name => self.name.clear(),
            ActorField::AddressLine1 => self.address_line_1.clear(),
            ActorField::AddressLine2 => self.address_line_2.clear(),
            ActorField::Postcode => self.postcode.clear(),
            ActorField::Location => self.location.clear(),
            ActorField::Country => self.country.clear(),
        }
    }

    /// Copy of this actor with every field passed through [`assign`](Self::assign)
    /// in line order for `version`.
    ///
    /// Returns the sanitized actor and the fields whose values were
    /// rejected. Blank optional fields are not reported.
    pub fn sanitized(&self, version: Version) -> (ActorRecord, Vec<ActorField>) {
        let mut clean = ActorRecord::default();
        let mut rejected = Vec::new();
        for &field in ActorField::order(version) {
            let text = self.field_text(field);
            let accepted = clean.assign(field, text, version);
            // Blank is a matter for `validate`, not a rejection.
            if !accepted && !field::is_blank(text) {
                rejected.push(field);
            }
        }
        (clean, rejected)
    }

    /// Whether every field other than the address type is blank.
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.address_line_1,
            &self.address_line_2,
            &self.postcode,
            &self.location,
            &self.country,
        ]
        .iter()
        .all(|v| field::is_blank(v))
    }

    /// Fields that must be filled for this actor under `version`.
    ///
    /// Under version 2.0 the set depends on the stored address type; with
    /// no address type only the address type and name are listed.
    pub fn required_fields(&self, version: Version) -> &'static [ActorField] {
        use ActorField as F;
        match (version, self.address_type) {
            (Version::V1_0, _) => &[F::Name, F::Postcode, F::Location, F::Country],
            (Version::V2_0, None) => &[F::AddressType, F::Name],
            (Version::V2_0, Some(AddressType::Structured)) => &[
                F::AddressType,
                F::Name,
                F::AddressLine1,
                F::Postcode,
                F::Location,
                F::Country,
            ],
            (Version::V2_0, Some(AddressType::Combined)) => {
                &[F::AddressType, F::Name, F::AddressLine1, F::AddressLine2]
            }
        }
    }

    /// Required fields that are currently blank.
    pub fn missing_fields(&self, version: Version) -> Vec<ActorField> {
        self.required_fields(version)
            .iter()
            .copied()
            .filter(|&f| field::is_blank(self.field_text(f)))
            .collect()
    }

    /// Check the mandatory-field dependencies of this actor in `role`.
    ///
    /// A blank actor passes unless the role is mandatory; any other actor
    /// must have every field [`required_fields`](Self::required_fields) lists.
    pub fn validate(&self, role: ActorRole, version: Version) -> Result<(), ActorFault> {
        if self.is_blank() && !role.is_mandatory() {
            return Ok(());
        }
        let missing = self.missing_fields(version);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ActorFault { role, missing })
        }
    }
}

fn address_line_2_max(address_type: Option<AddressType>, version: Version) -> usize {
    match (version, address_type) {
        (Version::V2_0, Some(t)) => t.address_line_2_max(),
        _ => field::ADDRESS_LINE_2_MAX,
    }
}

fn store(slot: &mut String, value: &str, required: bool, max_len: usize) -> bool {
    match validate_field(value, required, max_len) {
        Some(accepted) => {
            let coerced = accepted.is_empty() && !value.is_empty();
            *slot = accepted.to_string();
            !coerced
        }
        None => {
            slot.clear();
            false
        }
    }
}
