//! Checklist schema: the typed output of the generation pipeline.

pub mod parser;
pub mod validator;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use parser::parse_checklist;
pub use validator::{ChecklistViolation, validate};

/// The glyph whose repetition count encodes an item's effort rating.
pub const EFFORT_GLYPH: char = '★';

/// Hard cap on checklist length.
pub const MAX_ITEMS: usize = 15;

/// Preferred checklist length; advisory to the oracle, not enforced.
pub const SOFT_TARGET_ITEMS: usize = 9;

/// Category label on a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// Essential material.
    Core,
    /// Hands-on exercise or worked example.
    Practice,
    /// Orientation or survey material.
    Overview,
    /// Skippable enrichment.
    Optional,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Core => "Core",
            Self::Practice => "Practice",
            Self::Overview => "Overview",
            Self::Optional => "Optional",
        };
        f.write_str(name)
    }
}

impl FromStr for Tag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Core" => Ok(Self::Core),
            "Practice" => Ok(Self::Practice),
            "Overview" => Ok(Self::Overview),
            "Optional" => Ok(Self::Optional),
            _ => Err(()),
        }
    }
}

/// One numbered entry of a study checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// 1-based ordinal; contiguous across the checklist.
    pub number: u32,
    /// Short module/section name.
    pub label: String,
    /// One-line learning objective.
    pub objective: String,
    /// Category label.
    pub tag: Tag,
    /// Effort rating in [1, 5], encoded in raw text as repeated stars.
    pub effort: u8,
    /// Optional reflection question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl ChecklistItem {
    /// Renders this item back into the line grammar the parser accepts.
    #[must_use]
    pub fn render(&self) -> String {
        let stars: String =
            std::iter::repeat_n(EFFORT_GLYPH, usize::from(self.effort)).collect();
        let mut rendered =
            format!("{}. {} — {} [{}] {}", self.number, self.label, self.objective, self.tag, stars);
        if let Some(prompt) = &self.prompt {
            rendered.push_str("\n   ↳ Prompt: ");
            rendered.push_str(prompt);
        }
        rendered
    }
}

/// Renders a full checklist in the line grammar, one blank line between items.
#[must_use]
pub fn render_checklist(items: &[ChecklistItem]) -> String {
    items.iter().map(ChecklistItem::render).collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(number: u32) -> ChecklistItem {
        ChecklistItem {
            number,
            label: "Active Listening".to_string(),
            objective: "grasp key engagement methods".to_string(),
            tag: Tag::Core,
            effort: 3,
            prompt: None,
        }
    }

    #[test]
    fn test_tag_round_trip() {
        for tag in [Tag::Core, Tag::Practice, Tag::Overview, Tag::Optional] {
            assert_eq!(tag.to_string().parse::<Tag>(), Ok(tag));
        }
        assert!("core".parse::<Tag>().is_err());
        assert!("Unknown".parse::<Tag>().is_err());
    }

    #[test]
    fn test_render_without_prompt() {
        let rendered = item(2).render();
        assert_eq!(rendered, "2. Active Listening — grasp key engagement methods [Core] ★★★");
    }

    #[test]
    fn test_render_with_prompt() {
        let mut with_prompt = item(1);
        with_prompt.prompt = Some("Which method is hardest?".to_string());
        let rendered = with_prompt.render();
        assert!(rendered.ends_with("\n   ↳ Prompt: Which method is hardest?"));
    }

    #[test]
    fn test_render_checklist_separates_items() {
        let text = render_checklist(&[item(1), item(2)]);
        assert_eq!(text.matches("Active Listening").count(), 2);
        assert!(text.contains("\n\n"));
    }
}
