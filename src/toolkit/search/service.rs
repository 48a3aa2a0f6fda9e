use serde::Serialize;
use tracing::{debug, info};

use super::navigation::SearchRoute;
use super::query::SearchQuery;
use super::resolver::{Resolution, ScoredTerm, SearchTermResolver, Vocabulary};
use crate::core::config::PortalSearchConfig;
use crate::core::error::Result;
use crate::utils::safe_truncate;


#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: SearchQuery,
    pub resolution: Resolution,
    pub destination: String,
}


/// Search-box submission: validate the text, resolve it, build the link.
///
/// Holds no mutable state, so one instance can be shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SearchService {
    config: PortalSearchConfig,
    resolver: SearchTermResolver,
    route: SearchRoute,
}

impl SearchService {
    pub fn new(config: PortalSearchConfig) -> Result<Self> {
        config.validate()?;
        let resolver = SearchTermResolver::from_config(&config)?;
        let route = SearchRoute::from_config(&config)?;

        info!(
            "Search service ready: {} known terms, threshold {}, route {}",
            resolver.vocabulary().len(),
            resolver.threshold(),
            route.path()
        );

        Ok(Self {
            config,
            resolver,
            route,
        })
    }


    pub fn submit(&self, raw: &str) -> Result<SearchOutcome> {
        let query = SearchQuery::parse(raw, self.config.max_query_chars)?;
        let resolution = self.resolver.resolve_detailed(query.as_str());
        let destination = self.route.destination(&resolution.resolved_term);

        info!(
            "Search '{}' -> '{}'",
            safe_truncate(query.as_str(), 50),
            resolution.resolved_term
        );

        Ok(SearchOutcome {
            query,
            resolution,
            destination,
        })
    }

    /// `limit` defaults to the configured suggestion limit.
    pub fn suggest(&self, raw: &str, limit: Option<usize>) -> Result<Vec<ScoredTerm>> {
        let query = SearchQuery::parse(raw, self.config.max_query_chars)?;
        let limit = limit.unwrap_or(self.config.suggestion_limit);
        let suggestions = self.resolver.suggest(query.as_str(), limit);

        debug!(
            "{} suggestions for '{}'",
            suggestions.len(),
            safe_truncate(query.as_str(), 50)
        );

        Ok(suggestions)
    }

    pub fn config(&self) -> &PortalSearchConfig {
        &self.config
    }

    pub fn resolver(&self) -> &SearchTermResolver {
        &self.resolver
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.resolver.vocabulary()
    }

    pub fn route(&self) -> &SearchRoute {
        &self.route
    }
}
