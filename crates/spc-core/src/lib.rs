//! # spc-core — Swiss Payments Code Data Model
//!
//! Encodes and decodes the Swiss Payments Code (SPC), the line-delimited
//! payment instruction carried in a Swiss QR-bill. A [`PaymentRecord`]
//! renders to payload text and payload text parses back into a record plus
//! every validation error found, for versions 1.0 and 2.0.
//!
//! ## Key Design Principles
//!
//! 1. **One layout table per version.** [`Layout`] lists the line fields
//!    in order. The serializer and the parser both walk it, so
//!    `parse(render(r)) == r` for every valid record.
//!
//! 2. **One field gate.** [`validate_field`] decides acceptance of every
//!    scalar value against its ceiling from [`field`]. Nothing else does
//!    length arithmetic.
//!
//! 3. **Validity is derived, not stored.** [`PaymentRecord::validate`]
//!    renders and re-parses; setters only report whether their own value
//!    was accepted.
//!
//! 4. **Fixed point money.** [`Amount`] is integer hundredths; float input
//!    is truncated to two fraction digits, never rounded.
//!
//! 5. **Errors accumulate.** [`parse()`] never stops at the first defect;
//!    every [`SpcError`] carries a stable numeric code.
//!
//! ## Crate Policy
//!
//! - No I/O. Input is `&str`, output is `String`, `bool` or error lists.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests; malformed input is reported.
//! - Logging goes through `tracing` at `debug`/`trace`; no subscriber is installed.
//!
//! ## Example
//!
//! ```
//! use spc_core::{ActorRecord, ActorRole, PaymentRecord};
//!
//! let mut record = PaymentRecord::new();
//! assert!(record.set_iban("CH44 3199 9123 0008 8901 2"));
//! assert!(record.set_actor(
//!     ActorRole::Creditor,
//!     ActorRecord::structured("Robert Schneider AG", "Rue du Lac", "1268", "2501", "Biel", "CH"),
//! ));
//! assert!(record.set_amount(1949.75));
//! assert!(record.is_valid());
//!
//! let text = record.render();
//! let back: PaymentRecord = text.parse().unwrap();
//! assert_eq!(back, record);
//! ```

pub mod actor;
pub mod amount;
pub mod checksum;
pub mod domain;
pub mod error;
pub mod field;
pub mod layout;
pub mod parse;
pub mod record;
pub mod serialize;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use actor::{ActorField, ActorRecord};
pub use amount::{format_amount, Amount, AmountError};
pub use checksum::Modulo10;
pub use domain::{ActorRole, AddressType, CodingType, Currency, ReferenceType, Version};
pub use error::{ActorFault, SpcError, ValidationErrors};
pub use field::validate_field;
pub use layout::{Field, Layout};
pub use parse::{parse, Parsed};
pub use record::{AlternativeScheme, PaymentRecord, PaymentRecordBuilder};
pub use serialize::render;
pub use temporal::{DueDate, DueDateError};
