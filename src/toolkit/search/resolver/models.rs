use serde::{Deserialize, Serialize};

use crate::toolkit::search::fuzzy::{MatchKind, SimilarityScore};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTerm {
    pub term: String,
    pub score: f64,
    pub kind: MatchKind,
}

impl ScoredTerm {
    pub fn new(term: impl Into<String>, similarity: SimilarityScore) -> Self {
        Self {
            term: term.into(),
            score: similarity.score,
            kind: similarity.kind,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {

    pub query: String,

    pub resolved_term: String,

    pub score: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_term: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_kind: Option<MatchKind>,
}

impl Resolution {
    /// No known term cleared the threshold; the lowercased query stands.
    pub fn fallback(query_lower: &str) -> Self {
        Self {
            query: query_lower.to_string(),
            resolved_term: query_lower.to_string(),
            score: 0.0,
            matched_term: None,
            match_kind: None,
        }
    }


    pub fn matched(query_lower: &str, best: ScoredTerm) -> Self {
        Self {
            query: query_lower.to_string(),
            resolved_term: best.term.clone(),
            score: best.score,
            matched_term: Some(best.term),
            match_kind: Some(best.kind),
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched_term.is_some()
    }
}
