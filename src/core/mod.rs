

pub mod config;
pub mod error;

pub use self::config::PortalSearchConfig;
pub use self::error::{PortalSearchError, Result};
