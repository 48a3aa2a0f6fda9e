

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use super::error::{PortalSearchError, Result};
use crate::toolkit::search::navigation::SearchRoute;
use crate::toolkit::search::resolver::DEFAULT_KNOWN_TERMS;
use crate::{
    DEFAULT_MATCH_THRESHOLD, DEFAULT_MAX_QUERY_CHARS, DEFAULT_SEARCH_ROUTE,
    DEFAULT_SUGGESTION_LIMIT,
};


pub const ENV_PREFIX: &str = "PORTAL_SEARCH";


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortalSearchConfig {

    pub known_terms: Vec<String>,

    pub match_threshold: f64,


    pub search_route: String,

    pub site_url: Option<String>,


    pub max_query_chars: usize,
    pub suggestion_limit: usize,
}

impl PortalSearchConfig {

    pub fn new(known_terms: Vec<String>) -> Self {
        Self {
            known_terms,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            search_route: DEFAULT_SEARCH_ROUTE.to_string(),
            site_url: None,
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Layers defaults, an optional config file and `PORTAL_SEARCH_*`
    /// environment variables, in that order of precedence.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("known_terms"),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }


    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }


    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.match_threshold) {
            return Err(PortalSearchError::Config(format!(
                "match_threshold must be in [0, 1), got {}",
                self.match_threshold
            )));
        }
        if self.max_query_chars == 0 {
            return Err(PortalSearchError::Config(
                "max_query_chars must be positive".to_string(),
            ));
        }
        SearchRoute::new(&self.search_route, self.site_url.as_deref())?;
        Ok(())
    }
}

impl Default for PortalSearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_KNOWN_TERMS.iter().map(|t| t.to_string()).collect())
    }
}
