//! Property paths addressing values inside a record

use serde::{Deserialize, Serialize};

/// Separator between nested property names
pub const PROPERTY_SEPARATOR: char = '/';

/// A path to a property inside a record, optionally nested
///
/// Examples:
/// - "endpoint" -> top-level property
/// - "remote/endpoint" -> `endpoint` key inside the `remote` object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyPath {
    segments: Vec<String>,
}

/// Error when parsing a property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyPathError {
    /// Path is empty
    Empty,
    /// One of the segments is empty (e.g. "a//b" or "a/")
    EmptySegment { position: usize },
}

impl std::fmt::Display for PropertyPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyPathError::Empty => write!(f, "property path cannot be empty"),
            PropertyPathError::EmptySegment { position } => {
                write!(f, "property path has an empty segment at position {}", position)
            }
        }
    }
}

impl std::error::Error for PropertyPathError {}

impl PropertyPath {
    /// Parse a property path from a string
    ///
    /// Validates that the path is not empty and has no empty segments.
    pub fn parse(path: &str) -> Result<Self, PropertyPathError> {
        if path.is_empty() {
            return Err(PropertyPathError::Empty);
        }

        let segments: Vec<String> = path
            .split(PROPERTY_SEPARATOR)
            .map(|s| s.to_string())
            .collect();

        if let Some(position) = segments.iter().position(|s| s.is_empty()) {
            return Err(PropertyPathError::EmptySegment { position });
        }

        Ok(PropertyPath { segments })
    }

    /// Create a single-segment path (no validation needed)
    pub fn simple(property: impl Into<String>) -> Self {
        PropertyPath {
            segments: vec![property.into()],
        }
    }

    /// Get all segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl std::fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = PROPERTY_SEPARATOR.to_string();
        write!(f, "{}", self.segments.join(&separator))
    }
}

impl TryFrom<&str> for PropertyPath {
    type Error = PropertyPathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PropertyPath::parse(value)
    }
}

impl TryFrom<String> for PropertyPath {
    type Error = PropertyPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PropertyPath::parse(&value)
    }
}

impl From<PropertyPath> for String {
    fn from(path: PropertyPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_path() {
        let path = PropertyPath::parse("endpoint").unwrap();
        assert_eq!(path.segments(), &["endpoint".to_string()]);
    }

    #[test]
    fn test_parse_nested_path() {
        let path = PropertyPath::parse("remote/api/url").unwrap();
        assert_eq!(path.segments(), &["remote", "api", "url"]);
        assert_eq!(path.to_string(), "remote/api/url");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(PropertyPath::parse(""), Err(PropertyPathError::Empty));
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert_eq!(
            PropertyPath::parse("remote//url"),
            Err(PropertyPathError::EmptySegment { position: 1 })
        );
        assert_eq!(
            PropertyPath::parse("/url"),
            Err(PropertyPathError::EmptySegment { position: 0 })
        );
        assert_eq!(
            PropertyPath::parse("remote/"),
            Err(PropertyPathError::EmptySegment { position: 1 })
        );
    }

    #[test]
    fn test_dots_are_part_of_a_segment() {
        let path = PropertyPath::parse("field.name").unwrap();
        assert_eq!(path.segments(), &["field.name".to_string()]);
    }

    #[test]
    fn test_serde_as_string() {
        let path: PropertyPath = serde_json::from_str("\"a/b\"").unwrap();
        assert_eq!(path, PropertyPath::parse("a/b").unwrap());
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"a/b\"");

        let err = serde_json::from_str::<PropertyPath>("\"\"");
        assert!(err.is_err());
    }
}
