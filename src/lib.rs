

pub mod core;
pub mod mcp;
pub mod toolkit;
pub mod utils;

pub use crate::utils::safe_truncate;


pub use crate::core::config::PortalSearchConfig;
pub use crate::core::error::{PortalSearchError, Result};
pub use crate::toolkit::search::{
    edit_distance, resolve, similarity, SearchOutcome, SearchService, SearchTermResolver,
    Vocabulary,
};


pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.5;


pub const DEFAULT_SEARCH_ROUTE: &str = "/search";


pub const DEFAULT_MAX_QUERY_CHARS: usize = 256;


pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;
