

pub mod models;
pub mod processor;
pub mod vocabulary;

pub use models::{Resolution, ScoredTerm};
pub use processor::{resolve, SearchTermResolver};
pub use vocabulary::{Vocabulary, DEFAULT_KNOWN_TERMS};
