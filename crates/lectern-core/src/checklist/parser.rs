//! Lenient parser for raw checklist text.
//!
//! Oracle output drifts: extra prose, broken lines, stray markup. The parser
//! extracts every line that matches the item grammar and silently skips the
//! rest; the structural validator catches any resulting shortfall. Hardening
//! the grammar here would trade pipeline resilience for strictness, so keep
//! the skip-unmatched policy.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::ChecklistItem;

/// Grammar: `<N>. <label> — <objective> [<Tag>] <stars>` with an optional
/// `↳ Prompt: <text>` continuation.
static ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\d+)\.\s+([^—]+)—\s+([^\[]+)\s*\[(Core|Practice|Overview|Optional)\]\s+(★+)(?:\s*↳\s*Prompt:\s*([^\n]+))?",
    )
    .expect("checklist item grammar compiles")
});

/// Parses raw checklist text into an ordered item sequence.
///
/// Order-preserving and non-overlapping; idempotent for identical input.
/// Returns an empty sequence when nothing matches.
#[must_use]
pub fn parse_checklist(text: &str) -> Vec<ChecklistItem> {
    let items: Vec<ChecklistItem> = ITEM_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let number = caps[1].parse().ok()?;
            let tag = caps[4].parse().ok()?;
            let effort = u8::try_from(caps[5].chars().count()).unwrap_or(u8::MAX);

            Some(ChecklistItem {
                number,
                label: caps[2].trim().to_string(),
                objective: caps[3].trim().to_string(),
                tag,
                effort,
                prompt: caps.get(6).map(|m| m.as_str().trim().to_string()),
            })
        })
        .collect();

    debug!(items = items.len(), text_len = text.len(), "parsed checklist text");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::{Tag, render_checklist};

    const WELL_FORMED: &str = "\
1. Introduction to Patient Communication — understand the importance of rapport [Core] ★★
   ↳ Prompt: How does communication impact outcomes?

2. Active Listening Techniques — grasp key methods for engagement [Core] ★★★

3. Patient Concerns Exercise — practice identifying hidden concerns [Practice] ★★★★
   ↳ Prompt: What cues might signal an unstated concern?

4. Terminology Review — identify jargon to avoid [Overview] ★★
";

    #[test]
    fn test_parses_well_formed_checklist() {
        let items = parse_checklist(WELL_FORMED);
        assert_eq!(items.len(), 4);

        assert_eq!(items[0].number, 1);
        assert_eq!(items[0].label, "Introduction to Patient Communication");
        assert_eq!(items[0].objective, "understand the importance of rapport");
        assert_eq!(items[0].tag, Tag::Core);
        assert_eq!(items[0].effort, 2);
        assert_eq!(items[0].prompt.as_deref(), Some("How does communication impact outcomes?"));

        assert_eq!(items[1].prompt, None);
        assert_eq!(items[2].tag, Tag::Practice);
        assert_eq!(items[2].effort, 4);
    }

    #[test]
    fn test_unmatched_lines_are_skipped() {
        let text = "Here is your study plan!\n\n\
                    1. Basics — learn the basics [Core] ★★\n\n\
                    This line is commentary the oracle was told not to emit.\n\n\
                    2. Drills — run the drills [Practice] ★★★\n   ↳ Prompt: Which drill first?\n";
        let items = parse_checklist(text);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].prompt.as_deref(), Some("Which drill first?"));
    }

    #[test]
    fn test_unknown_tag_skips_item() {
        let text = "1. Basics — learn the basics [Fundamental] ★★\n";
        assert!(parse_checklist(text).is_empty());
    }

    #[test]
    fn test_missing_stars_skips_item() {
        let text = "1. Basics — learn the basics [Core]\n";
        assert!(parse_checklist(text).is_empty());
    }

    #[test]
    fn test_empty_text_yields_no_items() {
        assert!(parse_checklist("").is_empty());
        assert!(parse_checklist("no checklist here at all").is_empty());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        assert_eq!(parse_checklist(WELL_FORMED), parse_checklist(WELL_FORMED));
    }

    #[test]
    fn test_render_parse_round_trip() {
        let original = parse_checklist(WELL_FORMED);
        let rendered = render_checklist(&original);
        assert_eq!(parse_checklist(&rendered), original);
    }

    #[test]
    fn test_six_stars_parse_as_effort_six() {
        // Out-of-range effort is the validator's problem, not the parser's.
        let text = "1. Marathon — absorb everything [Core] ★★★★★★\n";
        let items = parse_checklist(text);
        assert_eq!(items[0].effort, 6);
    }
}
