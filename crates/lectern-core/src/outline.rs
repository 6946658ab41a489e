//! Outline assembly: bounded single-string digest of the source content.

use tracing::debug;

use crate::content::ContentSegment;

/// Hard ceiling on outline size, in characters.
pub const OUTLINE_CHAR_LIMIT: usize = 12_000;

/// Outlines shorter than this are treated as carrying no real content.
const MIN_OUTLINE_CHARS: usize = 20;

/// Appended verbatim when the concatenated content exceeds the ceiling.
const TRUNCATION_NOTICE: &str = "\n\n[Content truncated due to length...]";

/// Emitted when extraction produced nothing usable, so the generator contract
/// stays non-empty and the pipeline still runs end to end.
pub const EMPTY_CONTENT_PLACEHOLDER: &str = "No textual content was successfully extracted. \
     This document may contain primarily images or other non-textual content.";

/// Builds the outline fed to the generation oracle.
///
/// Concatenates segment texts in input order with a separating blank line,
/// truncating at [`OUTLINE_CHAR_LIMIT`] characters with an explicit notice.
/// An empty or all-whitespace input yields [`EMPTY_CONTENT_PLACEHOLDER`].
/// This operation cannot fail.
#[must_use]
pub fn build_outline(segments: &[ContentSegment]) -> String {
    let mut outline = segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    if outline.trim().chars().count() < MIN_OUTLINE_CHARS {
        debug!(segments = segments.len(), "no usable content, using placeholder outline");
        return EMPTY_CONTENT_PLACEHOLDER.to_string();
    }

    if let Some((cut, _)) = outline.char_indices().nth(OUTLINE_CHAR_LIMIT) {
        debug!(chars = OUTLINE_CHAR_LIMIT, "outline exceeds ceiling, truncating");
        outline.truncate(cut);
        outline.push_str(TRUNCATION_NOTICE);
    }

    outline
}
