//! Checklist generation: fixed instructional template + oracle invocation.
//!
//! The template enumerates the checklist design rules (item cap, tag
//! taxonomy, star convention, reflection prompts), but those rules are only
//! advisory to the oracle. Enforcement belongs to the structural validator;
//! this module never inspects what comes back and never retries.

use std::sync::Arc;

use lectern_abstraction::{ChatMessage, Model, ModelError, ModelParameters};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checklist::{MAX_ITEMS, SOFT_TARGET_ITEMS};

/// Learner context supplied by the caller; immutable for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProfile {
    /// Self-described familiarity with the subject.
    pub familiarity: Option<String>,
    /// Desired outcome, freeform.
    pub goal: Option<String>,
}

impl LearnerProfile {
    /// Familiarity line for the prompt, with the documented default.
    #[must_use]
    pub fn familiarity_text(&self) -> &str {
        self.familiarity
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("The learner has no prior familiarity with this subject")
    }

    /// Goal line for the prompt, with the documented default.
    #[must_use]
    pub fn goal_text(&self) -> &str {
        self.goal
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Master the material effectively and efficiently")
    }
}

/// Two-shot format exemplar embedded in the instructional template.
const EXAMPLE_CHECKLIST: &str = "\
1. Foundations of Stellar Physics — understand how stars form and burn [Core] ★★
   ↳ Prompt: What keeps a star from collapsing under its own gravity?

2. The Hertzsprung-Russell Diagram — read and interpret the main sequence [Core] ★★★
   ↳ Prompt: Where would our Sun sit on the diagram, and why?

3. Classifying Star Types Exercise — practice sorting spectra into classes [Practice] ★★★★
   ↳ Prompt: Which spectral features are easiest to confuse?

4. Telescope Terminology Review — identify jargon before the observing session [Overview] ★★
";

/// Generates raw checklist text from an outline and a learner profile.
pub struct ChecklistGenerator {
    model: Arc<dyn Model>,
    parameters: ModelParameters,
}

impl ChecklistGenerator {
    /// Creates a generator over the given oracle, running cool (temperature
    /// 0.2) so output stays close to the instructed format.
    #[must_use]
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model, parameters: ModelParameters::default() }
    }

    /// Overrides the generation parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: ModelParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// First attempt: system template plus the request turn.
    ///
    /// # Errors
    /// Propagates oracle errors unmodified; no retry happens here.
    pub async fn generate(
        &self,
        outline: &str,
        profile: &LearnerProfile,
    ) -> Result<String, ModelError> {
        debug!(
            model_id = %self.model.model_id(),
            outline_len = outline.len(),
            "generating checklist"
        );

        let messages = vec![
            ChatMessage::system(Self::system_prompt()),
            ChatMessage::user(Self::request_prompt(outline, profile)),
        ];

        let response =
            self.model.generate_chat_completion(&messages, Some(self.parameters.clone())).await?;
        Ok(response.content)
    }

    /// Revision attempt: the prior checklist is replayed as an assistant turn
    /// and the feedback (structural violation or critique) as a corrective
    /// user turn.
    ///
    /// # Errors
    /// Propagates oracle errors unmodified; no retry happens here.
    pub async fn revise(
        &self,
        outline: &str,
        profile: &LearnerProfile,
        prior_text: &str,
        feedback: &str,
    ) -> Result<String, ModelError> {
        debug!(
            model_id = %self.model.model_id(),
            feedback_len = feedback.len(),
            "revising checklist"
        );

        let messages = vec![
            ChatMessage::system(Self::system_prompt()),
            ChatMessage::user(Self::request_prompt(outline, profile)),
            ChatMessage::assistant(prior_text),
            ChatMessage::user(format!(
                "Your checklist needs revision based on these issues:\n{feedback}\n\n\
                 Please provide a revised checklist that addresses these issues."
            )),
        ];

        let response =
            self.model.generate_chat_completion(&messages, Some(self.parameters.clone())).await?;
        Ok(response.content)
    }

    fn system_prompt() -> String {
        format!(
            "### ROLE
You are an expert instructional designer.
Create a lean, numbered checklist that an interactive tutor can follow and adapt on the fly.
The tutor's objective is to help the learner achieve what they want in a personalized way.
Return only the checklist - no headings, commentary, or metadata.

### CHECKLIST DESIGN PRINCIPLES
- Maximum {MAX_ITEMS} main items (preferably fewer than {SOFT_TARGET_ITEMS} if that is sufficient); each under 20 words
- One item covers one logical chunk (section, chapter, slide cluster)
- Tag each item: Core | Practice | Overview | Optional
- Include a ★-★★★★★ effort rating
- Add one optional reflection prompt (15 words or fewer) per item
- Do not prescribe exact actions - note where the tutor may slow down, skip, or dive deeper

### ADAPTATION GUIDELINES (embed implicitly)
- Beginners: more \"Overview\", glossary first, slower effort estimates
- Intermediate: bridge refreshers to new content, balanced pace
- Advanced: merge basic parts, mark them \"Optional\", faster pace
- Exam goal: tag definitions and tables \"Core\"; add memory hooks
- Practice goal: highlight worked examples; tag them \"Practice\"
- Big-picture goal: add synthesis prompts; emphasize connections
- Quick overview: compress to 4-5 items; many \"Overview\" tags

### ITEM TEMPLATE
<n>. <Module label> — <one-line objective> [Tag] <effort>
   ↳ Prompt: <critical-thinking question> (optional)

### EXAMPLE FORMAT (follow this exactly)
{EXAMPLE_CHECKLIST}
Output the checklist ONLY - no explanations or metadata."
        )
    }

    fn request_prompt(outline: &str, profile: &LearnerProfile) -> String {
        format!(
            "### INPUTS

- DOCUMENT - here is the outline of the material:
{outline}

- FAMILIARITY - {familiarity}

- GOAL - {goal}

Generate a personalized study plan formatted as a numbered checklist.",
            familiarity = profile.familiarity_text(),
            goal = profile.goal_text(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::{parse_checklist, validate};

    #[test]
    fn test_profile_defaults() {
        let profile = LearnerProfile::default();
        assert!(profile.familiarity_text().contains("no prior familiarity"));
        assert!(profile.goal_text().contains("Master the material"));
    }

    #[test]
    fn test_profile_blank_fields_fall_back() {
        let profile =
            LearnerProfile { familiarity: Some("  ".to_string()), goal: Some("".to_string()) };
        assert!(profile.familiarity_text().contains("no prior familiarity"));
        assert!(profile.goal_text().contains("Master the material"));
    }

    #[test]
    fn test_profile_values_pass_through_trimmed() {
        let profile = LearnerProfile {
            familiarity: Some(" beginner ".to_string()),
            goal: Some("exam prep".to_string()),
        };
        assert_eq!(profile.familiarity_text(), "beginner");
        assert_eq!(profile.goal_text(), "exam prep");
    }

    #[test]
    fn test_embedded_example_satisfies_the_grammar() {
        // The exemplar must itself parse and validate, or the oracle is being
        // shown a format the pipeline would reject.
        let items = parse_checklist(EXAMPLE_CHECKLIST);
        assert_eq!(items.len(), 4);
        assert!(validate(&items).is_ok());
    }

    #[test]
    fn test_request_prompt_carries_inputs() {
        let profile = LearnerProfile {
            familiarity: Some("beginner".to_string()),
            goal: Some("exam prep".to_string()),
        };
        let prompt = ChecklistGenerator::request_prompt("THE OUTLINE", &profile);
        assert!(prompt.contains("THE OUTLINE"));
        assert!(prompt.contains("beginner"));
        assert!(prompt.contains("exam prep"));
    }

    #[test]
    fn test_system_prompt_states_the_design_rules() {
        let prompt = ChecklistGenerator::system_prompt();
        assert!(prompt.contains("Maximum 15 main items"));
        assert!(prompt.contains("Core | Practice | Overview | Optional"));
        assert!(prompt.contains("↳ Prompt:"));
        assert!(prompt.contains(EXAMPLE_CHECKLIST));
    }
}
