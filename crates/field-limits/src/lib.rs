//! Field Length Limits
//!
//! Declares minimum and maximum lengths for the fields of a record type and
//! checks record instances against them. Text fields are measured in
//! characters, collection fields in elements. A check reports the first
//! offending field in declared order.
//!
//! Limits are registered once per record type as a [`FieldLimits`] table,
//! either with numeric [`FieldBounds`] or with struct-tag style text such as
//! `json:"email" max:"64"`. Malformed metadata is rejected when the table is
//! built, never while checking data.

mod bounds;
mod error;
mod limits;
mod measure;
mod record;
pub mod tag;

pub use bounds::{Bound, FieldBounds};
pub use error::{MetadataError, Result, Violation};
pub use limits::{FieldLimits, FieldLimitsBuilder, FieldRule};
pub use measure::{Measure, Unit};
pub use record::{check, Record};
