//! Error types for field limit checks

use crate::bounds::Bound;
use crate::measure::Unit;
use serde::Serialize;
use std::fmt;

/// A record field whose length falls outside its declared bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub bound: Bound,
    pub limit: usize,
    /// Measured length of the field at check time
    pub actual: usize,
    pub unit: Unit,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound {
            Bound::Minimum => write!(
                f,
                "value for '{}' requires at least {} {}",
                self.field, self.limit, self.unit
            ),
            Bound::Maximum => write!(
                f,
                "value for '{}' exceeds maximum {} {}",
                self.field, self.limit, self.unit
            ),
        }
    }
}

impl std::error::Error for Violation {}

/// Defects in the declared constraint metadata of a record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A bound's text is not a non-negative integer
    MalformedBound {
        field: String,
        bound: Bound,
        raw: String,
    },
    /// A struct-tag string could not be split into `key:"value"` pairs
    MalformedTag { field: String, tag: String },
}

impl MetadataError {
    /// Attach the field name once the owning rule is known
    pub(crate) fn for_field(self, name: &str) -> Self {
        match self {
            Self::MalformedBound { bound, raw, .. } => Self::MalformedBound {
                field: name.to_string(),
                bound,
                raw,
            },
            Self::MalformedTag { tag, .. } => Self::MalformedTag {
                field: name.to_string(),
                tag,
            },
        }
    }
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBound { field, bound, raw } => {
                write!(f, "Invalid {bound} length for '{field}': {raw:?}")
            }
            Self::MalformedTag { field, tag } => {
                write!(f, "Invalid field tag for '{field}': {tag:?}")
            }
        }
    }
}

impl std::error::Error for MetadataError {}

pub type Result<T> = std::result::Result<T, Violation>;
