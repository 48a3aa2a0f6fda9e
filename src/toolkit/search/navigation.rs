use url::{form_urlencoded, Url};

use crate::core::config::PortalSearchConfig;
use crate::core::error::{PortalSearchError, Result};


pub const QUERY_PARAM: &str = "q";


/// Where a resolved term sends the user: the results route plus `q=<term>`.
///
/// Without a site URL destinations are root-relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoute {
    path: String,
    site: Option<Url>,
}

impl SearchRoute {
    pub fn new(path: &str, site_url: Option<&str>) -> Result<Self> {
        if !path.starts_with('/') {
            return Err(PortalSearchError::Config(format!(
                "search route must start with '/', got '{}'",
                path
            )));
        }
        // `q=` is appended here, and `set_path` would escape these.
        if path.contains(['?', '#']) {
            return Err(PortalSearchError::Config(format!(
                "search route must be a bare path without query or fragment, got '{}'",
                path
            )));
        }

        let site = site_url.map(Url::parse).transpose()?;
        if let Some(site) = &site {
            if site.cannot_be_a_base() {
                return Err(PortalSearchError::Config(format!(
                    "site URL cannot carry a path: {}",
                    site
                )));
            }
        }

        Ok(Self {
            path: path.to_string(),
            site,
        })
    }


    pub fn from_config(config: &PortalSearchConfig) -> Result<Self> {
        Self::new(&config.search_route, config.site_url.as_deref())
    }

    pub fn path(&self) -> &str {
        &self.path
    }


    pub fn destination(&self, term: &str) -> String {
        match &self.site {
            Some(site) => {
                let mut url = site.clone();
                url.set_path(&self.path);
                url.set_query(None);
                url.set_fragment(None);
                url.query_pairs_mut().append_pair(QUERY_PARAM, term);
                url.to_string()
            }
            None => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(QUERY_PARAM, term)
                    .finish();
                format!("{}?{}", self.path, query)
            }
        }
    }
}

impl Default for SearchRoute {
    fn default() -> Self {
        Self {
            path: crate::DEFAULT_SEARCH_ROUTE.to_string(),
            site: None,
        }
    }
}
