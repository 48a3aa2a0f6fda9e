

use thiserror::Error;


#[derive(Error, Debug)]
pub enum PortalSearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Search query is too long: {length} chars (max {max})")]
    QueryTooLong { length: usize, max: usize },

    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl PortalSearchError {
    /// True for errors caused by caller input rather than by the deployment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuery | Self::QueryTooLong { .. } | Self::Vocabulary(_)
        )
    }
}


pub type Result<T> = std::result::Result<T, PortalSearchError>;
