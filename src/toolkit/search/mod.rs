

pub mod fuzzy;
pub mod navigation;
pub mod query;
pub mod resolver;
pub mod service;

pub use fuzzy::{edit_distance, score_similarity, similarity, MatchKind, SimilarityScore};
pub use navigation::SearchRoute;
pub use query::SearchQuery;
pub use resolver::{resolve, Resolution, ScoredTerm, SearchTermResolver, Vocabulary};
pub use service::{SearchOutcome, SearchService};
