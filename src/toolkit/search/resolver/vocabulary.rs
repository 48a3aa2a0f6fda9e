use std::collections::HashSet;
use std::sync::Arc;

use lazy_static::lazy_static;
use tracing::warn;

use crate::core::error::{PortalSearchError, Result};


pub const DEFAULT_KNOWN_TERMS: &[&str] = &[
    "events",
    "announcements",
    "news",
    "services",
    "rescue",
    "emergency",
    "barangay",
    "officials",
    "hotlines",
    "health",
    "community",
];

lazy_static! {
    static ref DEFAULT_VOCABULARY: Vocabulary = Vocabulary {
        terms: DEFAULT_KNOWN_TERMS.iter().map(|t| t.to_string()).collect(),
    };
}


/// Ordered, immutable list of known search terms.
///
/// Order matters: when two terms score the same against a query, the one
/// listed first wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Arc<[String]>,
}

impl Vocabulary {
    /// Trims and lowercases each entry. Blank entries are rejected, later
    /// duplicates are dropped.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();

        for (position, raw) in terms.into_iter().enumerate() {
            let term = raw.as_ref().trim().to_lowercase();
            if term.is_empty() {
                return Err(PortalSearchError::Vocabulary(format!(
                    "known term #{} is blank",
                    position + 1
                )));
            }
            if !seen.insert(term.clone()) {
                warn!("Dropping duplicate known term '{}'", term);
                continue;
            }
            normalized.push(term);
        }

        Ok(Self {
            terms: normalized.into(),
        })
    }


    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        DEFAULT_VOCABULARY.clone()
    }
}
