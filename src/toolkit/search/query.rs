use serde::Serialize;

use crate::core::error::{PortalSearchError, Result};


/// Search-box text that has passed the submission checks: trimmed,
/// non-empty and within the configured length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: &str, max_chars: usize) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PortalSearchError::EmptyQuery);
        }

        let length = trimmed.chars().count();
        if length > max_chars {
            return Err(PortalSearchError::QueryTooLong {
                length,
                max: max_chars,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let query = SearchQuery::parse("  Helth \n", 256).unwrap();
        assert_eq!(query.as_str(), "Helth");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(matches!(SearchQuery::parse("", 256), Err(PortalSearchError::EmptyQuery)));
        assert!(matches!(SearchQuery::parse(" \t ", 256), Err(PortalSearchError::EmptyQuery)));
    }

    #[test]
    fn test_parse_bounds_length_in_chars() {
        assert!(SearchQuery::parse("ñññ", 3).is_ok());
        match SearchQuery::parse("ññññ", 3) {
            Err(PortalSearchError::QueryTooLong { length, max }) => {
                assert_eq!(length, 4);
                assert_eq!(max, 3);
            }
            other => panic!("expected QueryTooLong, got {other:?}"),
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let query = SearchQuery::parse("events", 10).unwrap();
        assert_eq!(serde_json::to_string(&query).unwrap(), "\"events\"");
    }
}
