//! Struct-tag style field metadata
//!
//! A tag is a space separated list of `key:"value"` pairs, e.g.
//! `json:"password" max:"128"`. Only the keys asked for are interpreted.

use crate::error::MetadataError;

/// Return the value stored under `key`, or `None` if the tag does not declare it.
pub fn lookup<'a>(tag: &'a str, key: &str) -> Result<Option<&'a str>, MetadataError> {
    for pair in pairs(tag) {
        let (name, value) = pair?;
        if name == key {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Iterate over the `(key, value)` pairs of a tag in declaration order
pub fn pairs(tag: &str) -> Pairs<'_> {
    Pairs { tag, rest: tag }
}

pub struct Pairs<'a> {
    tag: &'a str,
    rest: &'a str,
}

impl Pairs<'_> {
    fn malformed(&mut self) -> MetadataError {
        self.rest = "";
        MetadataError::MalformedTag {
            field: String::new(),
            tag: self.tag.to_string(),
        }
    }
}

impl<'a> Iterator for Pairs<'a> {
    type Item = Result<(&'a str, &'a str), MetadataError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.trim_start_matches(' ');
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }

        let key_end = rest
            .find(|c: char| c == ':' || c == '"' || c == ' ' || c.is_control())
            .unwrap_or(rest.len());
        let (key, after_key) = rest.split_at(key_end);
        let Some(quoted) = after_key.strip_prefix(":\"") else {
            return Some(Err(self.malformed()));
        };
        if key.is_empty() {
            return Some(Err(self.malformed()));
        }

        // Values never contain an unescaped quote
        let mut escaped = false;
        let mut value_end = None;
        for (i, c) in quoted.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    value_end = Some(i);
                    break;
                }
                _ => {}
            }
        }
        let Some(value_end) = value_end else {
            return Some(Err(self.malformed()));
        };

        self.rest = &quoted[value_end + 1..];
        Some(Ok((key, &quoted[..value_end])))
    }
}
