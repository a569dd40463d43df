use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldPathError {
    #[error("field path is empty")]
    Empty,
    #[error("field path '{path}' contains an empty segment")]
    EmptySegment { path: String },
    #[error("field path '{path}' segment '{segment}' is not a valid identifier")]
    InvalidSegment { path: String, segment: String },
}

/// A dotted path addressing a (possibly nested) field, e.g. `address.city`.
///
/// Segments are validated at construction so downstream resolution never has
/// to deal with malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
}

impl FieldPath {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldPathError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(FieldPathError::Empty);
        }
        for segment in raw.split('.') {
            if segment.is_empty() {
                return Err(FieldPathError::EmptySegment { path: raw });
            }
            if !is_identifier(segment) {
                return Err(FieldPathError::InvalidSegment {
                    path: raw.clone(),
                    segment: segment.to_string(),
                });
            }
        }
        Ok(Self { raw })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }

    pub fn first_segment(&self) -> &str {
        self.raw.split('.').next().unwrap_or(&self.raw)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
