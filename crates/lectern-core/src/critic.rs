//! Semantic critique: a second, independent oracle pass over the raw text.
//!
//! The rubric overlaps the structural validator on purpose. The two checks
//! disagree freely; the revision loop treats them as advisory until both
//! pass. The critic sees the raw text (not the parsed items), so it can flag
//! problems the lenient parser skipped over.

use std::sync::Arc;

use lectern_abstraction::{Model, ModelError, ModelParameters};
use tracing::debug;

use crate::checklist::MAX_ITEMS;

/// Verdict from the critique oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Critique {
    /// The checklist meets the rubric.
    Passed,
    /// Free-text list of deviations, verbatim from the oracle.
    Deviations(String),
}

impl Critique {
    /// True when the critic accepted the checklist.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// QA oracle for generated checklists.
pub struct ChecklistCritic {
    model: Arc<dyn Model>,
}

impl ChecklistCritic {
    /// Creates a critic over the given oracle.
    #[must_use]
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model }
    }

    /// Asks the oracle to judge the raw checklist text against the rubric.
    ///
    /// Returns [`Critique::Passed`] only for the literal verdict "OK"; any
    /// other response is passed through unmodified as deviations.
    ///
    /// # Errors
    /// Propagates oracle errors unmodified; no retry happens here.
    pub async fn review(&self, checklist_text: &str) -> Result<Critique, ModelError> {
        debug!(
            model_id = %self.model.model_id(),
            checklist_len = checklist_text.len(),
            "requesting checklist critique"
        );

        let prompt = Self::rubric_prompt(checklist_text);
        let response =
            self.model.generate_text(&prompt, Some(ModelParameters::deterministic())).await?;

        let verdict = response.content.trim();
        if verdict == "OK" {
            debug!("critic accepted checklist");
            Ok(Critique::Passed)
        } else {
            debug!(deviations_len = verdict.len(), "critic reported deviations");
            Ok(Critique::Deviations(verdict.to_string()))
        }
    }

    fn rubric_prompt(checklist_text: &str) -> String {
        format!(
            "You are a QA agent for study plan checklists. Check that:
1. No more than {MAX_ITEMS} items; each formatted as 'n. Label — objective [Tag] ★…'
2. Tags must be one of: Core, Practice, Overview, Optional
3. At least one Practice item is included
4. At least one reflection prompt is included (line starting with '↳ Prompt:')
5. All efforts are represented by 1-5 stars (★)

Return \"OK\" if all criteria are met, or list all deviations.

CHECKLIST:
{checklist_text}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_models::{ScriptedModel, ScriptedReply};

    #[tokio::test]
    async fn test_ok_verdict_passes() {
        let model = Arc::new(ScriptedModel::new("critic", vec![ScriptedReply::text("OK")]));
        let critic = ChecklistCritic::new(model);
        assert_eq!(critic.review("1. A — b [Core] ★").await.unwrap(), Critique::Passed);
    }

    #[tokio::test]
    async fn test_ok_with_surrounding_whitespace_passes() {
        let model = Arc::new(ScriptedModel::new("critic", vec![ScriptedReply::text("  OK\n")]));
        let critic = ChecklistCritic::new(model);
        assert!(critic.review("whatever").await.unwrap().is_passed());
    }

    #[tokio::test]
    async fn test_deviations_are_passed_through() {
        let model = Arc::new(ScriptedModel::new(
            "critic",
            vec![ScriptedReply::text("- no Practice item\n- 17 items")],
        ));
        let critic = ChecklistCritic::new(model);
        match critic.review("...").await.unwrap() {
            Critique::Deviations(text) => assert!(text.contains("no Practice item")),
            Critique::Passed => panic!("Expected deviations"),
        }
    }

    #[tokio::test]
    async fn test_oracle_error_propagates() {
        let model = Arc::new(ScriptedModel::new(
            "critic",
            vec![ScriptedReply::Fail(ModelError::RequestError("down".to_string()))],
        ));
        let critic = ChecklistCritic::new(model);
        assert!(critic.review("...").await.is_err());
    }

    #[test]
    fn test_rubric_embeds_checklist() {
        let prompt = ChecklistCritic::rubric_prompt("1. A — b [Core] ★");
        assert!(prompt.contains("1. A — b [Core] ★"));
        assert!(prompt.contains("Return \"OK\""));
    }
}
