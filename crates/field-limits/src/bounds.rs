//! Per-field length bounds and their textual metadata

use crate::error::MetadataError;
use crate::tag;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Which side of a field's range was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Minimum,
    Maximum,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Minimum => write!(f, "minimum"),
            Bound::Maximum => write!(f, "maximum"),
        }
    }
}

/// Optional minimum and maximum length of one field (both inclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct FieldBounds {
    #[serde(default, deserialize_with = "deserialize_limit")]
    pub min: Option<usize>,
    #[serde(default, deserialize_with = "deserialize_limit")]
    pub max: Option<usize>,
}

impl FieldBounds {
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn range(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Parse bounds declared as text. Empty text counts as not declared.
    pub fn parse(min: Option<&str>, max: Option<&str>) -> Result<Self, MetadataError> {
        Ok(Self {
            min: parse_limit(Bound::Minimum, min)?,
            max: parse_limit(Bound::Maximum, max)?,
        })
    }

    /// Parse the `min` and `max` keys of a struct-tag string such as
    /// `json:"email" max:"64"`
    pub fn from_tag(tag: &str) -> Result<Self, MetadataError> {
        Self::parse(tag::lookup(tag, "min")?, tag::lookup(tag, "max")?)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

fn parse_limit(bound: Bound, raw: Option<&str>) -> Result<Option<usize>, MetadataError> {
    match raw {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<usize>()
            .map(Some)
            .map_err(|_| MetadataError::MalformedBound {
                field: String::new(),
                bound,
                raw: text.to_string(),
            }),
    }
}

/// Accepts `30` as well as `"30"`
fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLimit {
        Number(usize),
        Text(String),
    }

    match Option::<RawLimit>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawLimit::Number(n)) => Ok(Some(n)),
        Some(RawLimit::Text(text)) if text.is_empty() => Ok(None),
        Some(RawLimit::Text(text)) => text.parse().map(Some).map_err(|_| {
            <D::Error as serde::de::Error>::custom(format!(
                "length limit must be a non-negative integer, got {text:?}"
            ))
        }),
    }
}
