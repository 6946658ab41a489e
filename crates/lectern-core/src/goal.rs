//! Goal keyword extraction and goal-directed segment filtering.

use tracing::debug;

use crate::content::ContentSegment;

/// Tokens never treated as keywords.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "with", "about",
];

/// Separators normalised to spaces before tokenising.
const SEPARATORS: &[char] = &[',', '.', ';', ':', '!', '?'];

/// Extracts lowercase keywords from a freeform goal string.
///
/// Deterministic for identical input. Tokens shorter than three characters
/// and stop words are dropped; an empty goal yields an empty set, which turns
/// the goal filter into a pass-through.
#[must_use]
pub fn extract_goal_keywords(goal: &str) -> Vec<String> {
    let normalised = goal.to_lowercase().replace(SEPARATORS, " ");

    let mut keywords: Vec<String> = Vec::new();
    for token in normalised.split_whitespace() {
        if token.chars().count() < 3 || STOP_WORDS.contains(&token) {
            continue;
        }
        if !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }

    keywords
}

/// Narrows segments to those matching at least one keyword.
///
/// Matching is case-insensitive substring containment. Fail-open policy: when
/// the keyword set is empty the input passes through unchanged, and when
/// filtering would empty a non-empty input the original input is returned so
/// the generator never loses its context to an over-narrow goal.
#[must_use]
pub fn filter_segments_by_goal(
    segments: Vec<ContentSegment>,
    keywords: &[String],
) -> Vec<ContentSegment> {
    if keywords.is_empty() {
        return segments;
    }

    let filtered: Vec<ContentSegment> = segments
        .iter()
        .filter(|segment| {
            let text = segment.text.to_lowercase();
            keywords.iter().any(|keyword| text.contains(keyword.as_str()))
        })
        .cloned()
        .collect();

    if filtered.is_empty() && !segments.is_empty() {
        debug!(
            keywords = keywords.len(),
            segments = segments.len(),
            "goal filter matched nothing, falling back to unfiltered content"
        );
        return segments;
    }

    debug!(kept = filtered.len(), total = segments.len(), "goal filter applied");
    filtered
}
