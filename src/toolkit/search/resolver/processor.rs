use std::cmp::Ordering;

use tracing::debug;

use super::models::{Resolution, ScoredTerm};
use super::vocabulary::Vocabulary;
use crate::core::config::PortalSearchConfig;
use crate::core::error::Result;
use crate::toolkit::search::fuzzy::{score_similarity, similarity};
use crate::DEFAULT_MATCH_THRESHOLD;


/// Snaps a query onto `known_terms` using the default threshold.
///
/// The query must already be trimmed and non-empty. Terms are compared as
/// given; only the query is lowercased.
pub fn resolve<S: AsRef<str>>(query: &str, known_terms: &[S]) -> String {
    let query_lower = query.to_lowercase();
    let mut best_match = query_lower.as_str();
    let mut best_score = 0.0;

    for term in known_terms {
        let term = term.as_ref();
        let score = similarity(&query_lower, term);
        if score > best_score && score > DEFAULT_MATCH_THRESHOLD {
            best_match = term;
            best_score = score;
        }
    }

    best_match.to_string()
}


#[derive(Debug, Clone)]
pub struct SearchTermResolver {
    vocabulary: Vocabulary,
    threshold: f64,
}

impl SearchTermResolver {
    pub fn new(vocabulary: Vocabulary, threshold: f64) -> Self {
        Self {
            vocabulary,
            threshold,
        }
    }

    /// Expects a config that already passed [`PortalSearchConfig::validate`].
    pub fn from_config(config: &PortalSearchConfig) -> Result<Self> {
        let vocabulary = Vocabulary::new(&config.known_terms)?;
        Ok(Self::new(vocabulary, config.match_threshold))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }


    pub fn resolve(&self, query: &str) -> String {
        self.resolve_detailed(query).resolved_term
    }

    /// Same decision as [`resolve`](Self::resolve), with the winning score.
    ///
    /// Scores must beat both the running best and the threshold strictly, so
    /// the earliest term wins a tie.
    pub fn resolve_detailed(&self, query: &str) -> Resolution {
        let query_lower = query.to_lowercase();
        let mut best: Option<ScoredTerm> = None;
        let mut best_score = 0.0;

        for term in self.vocabulary.iter() {
            let scored = score_similarity(&query_lower, term);
            if scored.score > best_score && scored.score > self.threshold {
                best_score = scored.score;
                best = Some(ScoredTerm::new(term, scored));
            }
        }

        let resolution = match best {
            Some(best) => Resolution::matched(&query_lower, best),
            None => Resolution::fallback(&query_lower),
        };

        debug!(
            "Resolved '{}' -> '{}' (score {:.3})",
            resolution.query, resolution.resolved_term, resolution.score
        );

        resolution
    }

    /// Known terms above the threshold, best first; equal scores keep
    /// vocabulary order.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<ScoredTerm> {
        let query_lower = query.to_lowercase();

        let mut candidates: Vec<ScoredTerm> = self
            .vocabulary
            .iter()
            .filter_map(|term| {
                let scored = score_similarity(&query_lower, term);
                (scored.score > 0.0 && scored.score > self.threshold)
                    .then(|| ScoredTerm::new(term, scored))
            })
            .collect();

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        candidates.truncate(limit);
        candidates
    }
}

impl Default for SearchTermResolver {
    fn default() -> Self {
        Self::new(Vocabulary::default(), DEFAULT_MATCH_THRESHOLD)
    }
}
