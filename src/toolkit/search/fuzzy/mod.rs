

pub mod distance;
pub mod similarity;

pub use distance::edit_distance;
pub use similarity::{
    score_similarity, similarity, MatchKind, SimilarityScore, SUBSTRING_MATCH_SCORE,
};
