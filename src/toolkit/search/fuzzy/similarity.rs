use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use super::distance::edit_distance;


/// Score returned whenever the longer string contains the shorter one.
///
/// Applies to identical non-empty strings too, so `similarity(s, s)` is `0.8`.
pub const SUBSTRING_MATCH_SCORE: f64 = 0.8;


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchKind {
    /// Both strings empty.
    Empty,

    Substring,

    EditDistance,
}


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub score: f64,
    pub kind: MatchKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
}


pub fn similarity(str1: &str, str2: &str) -> f64 {
    score_similarity(str1, str2).score
}


pub fn score_similarity(str1: &str, str2: &str) -> SimilarityScore {
    let len1 = str1.chars().count();
    let len2 = str2.chars().count();

    let (longer, shorter, longer_len) = if len1 >= len2 {
        (str1, str2, len1)
    } else {
        (str2, str1, len2)
    };

    if longer_len == 0 {
        return SimilarityScore {
            score: 1.0,
            kind: MatchKind::Empty,
            distance: None,
        };
    }

    if longer.contains(shorter) {
        return SimilarityScore {
            score: SUBSTRING_MATCH_SCORE,
            kind: MatchKind::Substring,
            distance: None,
        };
    }

    let distance = edit_distance(str1, str2);
    let score = (longer_len as f64 - distance as f64) / longer_len as f64;

    SimilarityScore {
        score: score.clamp(0.0, 1.0),
        kind: MatchKind::EditDistance,
        distance: Some(distance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_identical_strings_score_substring_bonus() {
        for s in ["events", "a", "barangay hall", "日本語"] {
            assert_eq!(similarity(s, s), 0.8, "similarity({s:?}, {s:?})");
            assert_eq!(score_similarity(s, s).kind, MatchKind::Substring);
        }
    }

    #[test]
    fn test_both_empty_is_one() {
        let result = score_similarity("", "");
        assert_eq!(result.score, 1.0);
        assert_eq!(result.kind, MatchKind::Empty);
    }

    #[test]
    fn test_empty_against_non_empty_is_substring() {
        assert_eq!(similarity("", "events"), 0.8);
        assert_eq!(similarity("events", ""), 0.8);
    }

    #[test]
    fn test_containment_short_circuits() {
        assert_eq!(similarity("cat", "cats"), 0.8);
        assert_eq!(similarity("cats", "cat"), 0.8);
        assert_eq!(similarity("event", "events"), 0.8);
        assert_eq!(similarity("ent", "announcements"), 0.8);
    }

    #[test]
    fn test_containment_is_case_sensitive() {
        let result = score_similarity("EVENT", "events");
        assert_eq!(result.kind, MatchKind::EditDistance);
        assert!(result.score < 0.5);
    }

    #[test]
    fn test_edit_distance_formula() {
        let result = score_similarity("evnts", "events");
        assert_eq!(result.kind, MatchKind::EditDistance);
        assert_eq!(result.distance, Some(1));
        assert!((result.score - 5.0 / 6.0).abs() < EPS);

        assert!((similarity("helth", "health") - 5.0 / 6.0).abs() < EPS);
        assert!((similarity("kitten", "sitting") - 4.0 / 7.0).abs() < EPS);
    }

    #[test]
    fn test_score_is_symmetric_and_bounded() {
        let samples = ["", "a", "xyz", "events", "evnts", "rescue", "résumé", "community"];
        for a in samples {
            for b in samples {
                let s = similarity(a, b);
                assert!((0.0..=1.0).contains(&s), "similarity({a:?}, {b:?}) = {s}");
                assert!((s - similarity(b, a)).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_completely_different_scores_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_match_kind_strings() {
        let name: &'static str = MatchKind::EditDistance.into();
        assert_eq!(name, "edit_distance");
        assert_eq!(MatchKind::from_str("substring").unwrap(), MatchKind::Substring);
        assert_eq!(
            serde_json::to_string(&MatchKind::Empty).unwrap(),
            "\"empty\""
        );
    }
}
