//! Keyword-count sentiment tagging for display.
//!
//! Deliberately approximate: lower-cased substring containment against two
//! fixed keyword sets, no word boundaries ("bad" matches inside "badge").
//! Never persisted; consumers recompute it on render.

use serde::Serialize;

const POSITIVE_KEYWORDS: [&str; 19] = [
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "love",
    "good",
    "awesome",
    "brilliant",
    "perfect",
    "outstanding",
    "superb",
    "thank",
    "appreciate",
    "helpful",
    "best",
    "impressed",
    "happy",
    "pleased",
];

const NEGATIVE_KEYWORDS: [&str; 19] = [
    "bad",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "hate",
    "poor",
    "disappointing",
    "disappointed",
    "frustrated",
    "angry",
    "useless",
    "broken",
    "problem",
    "issue",
    "bug",
    "error",
    "slow",
    "difficult",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Each keyword scores at most once per text; the strictly higher side
/// wins and ties (including no hits at all) are neutral.
pub fn analyze(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();

    let positive = POSITIVE_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count();
    let negative = NEGATIVE_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count();

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
