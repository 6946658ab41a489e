//! Structured plan assembly: the persisted artifact of a pipeline run.

use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistItem;

/// Estimated study minutes per checklist item.
pub const MINUTES_PER_ITEM: u32 = 30;

const ASSESSMENT: &str = "Review all items and answer reflection prompts";

/// One week's block of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBreakdown {
    /// Week ordinal, starting at 1.
    pub week: u32,
    /// Human-readable block title.
    pub title: String,
    /// Estimated total study minutes for the block.
    pub estimated_minutes: u32,
    /// One objective per checklist item.
    pub learning_objectives: Vec<String>,
    /// External resources; currently always empty, the slot is part of the
    /// persisted shape.
    pub resources: Vec<String>,
    /// Rendered activity lines, `"{number}. {label} — {objective}"`.
    pub activities: Vec<String>,
    /// Static self-assessment instruction.
    pub assessment: String,
    /// The full item sequence.
    pub checklist: Vec<ChecklistItem>,
}

/// The persisted study plan document.
///
/// Created once per pipeline run and never mutated; a revision produces a new
/// plan document, not an in-place edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredPlan {
    /// Headline goals, derived from the first few item objectives.
    pub goals: Vec<String>,
    /// Plan horizon; this system only ever produces single-week plans.
    pub duration_weeks: u32,
    /// Per-week blocks; empty when no items were parsed.
    pub weekly_breakdown: Vec<WeeklyBreakdown>,
}

/// Assembles the final plan from the checklist items.
///
/// Total function: an empty item sequence produces a well-typed plan with no
/// goals and no breakdown, never an error.
#[must_use]
pub fn assemble(items: Vec<ChecklistItem>, week_title: &str) -> StructuredPlan {
    let goals: Vec<String> =
        items.iter().take(3).map(|item| item.objective.clone()).collect();

    let weekly_breakdown = if items.is_empty() {
        Vec::new()
    } else {
        let activities: Vec<String> = items
            .iter()
            .map(|item| format!("{}. {} — {}", item.number, item.label, item.objective))
            .collect();

        vec![WeeklyBreakdown {
            week: 1,
            title: week_title.to_string(),
            estimated_minutes: items.len() as u32 * MINUTES_PER_ITEM,
            learning_objectives: items.iter().map(|item| item.objective.clone()).collect(),
            resources: Vec::new(),
            activities,
            assessment: ASSESSMENT.to_string(),
            checklist: items,
        }]
    };

    StructuredPlan { goals, duration_weeks: 1, weekly_breakdown }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::Tag;

    fn items(count: u32) -> Vec<ChecklistItem> {
        (1..=count)
            .map(|number| ChecklistItem {
                number,
                label: format!("Module {number}"),
                objective: format!("objective {number}"),
                tag: Tag::Core,
                effort: 2,
                prompt: None,
            })
            .collect()
    }

    #[test]
    fn test_goals_are_first_three_objectives() {
        let plan = assemble(items(5), "Study Week");
        assert_eq!(plan.goals, vec!["objective 1", "objective 2", "objective 3"]);
    }

    #[test]
    fn test_fewer_than_three_items() {
        let plan = assemble(items(2), "Study Week");
        assert_eq!(plan.goals.len(), 2);
    }

    #[test]
    fn test_single_week_breakdown() {
        let plan = assemble(items(4), "Biology Study Week");
        assert_eq!(plan.duration_weeks, 1);
        assert_eq!(plan.weekly_breakdown.len(), 1);

        let week = &plan.weekly_breakdown[0];
        assert_eq!(week.week, 1);
        assert_eq!(week.title, "Biology Study Week");
        assert_eq!(week.estimated_minutes, 4 * MINUTES_PER_ITEM);
        assert_eq!(week.learning_objectives.len(), 4);
        assert_eq!(week.activities[0], "1. Module 1 — objective 1");
        assert_eq!(week.checklist.len(), 4);
        assert!(week.resources.is_empty());
    }

    #[test]
    fn test_empty_items_produce_empty_plan() {
        let plan = assemble(Vec::new(), "Study Week");
        assert!(plan.goals.is_empty());
        assert!(plan.weekly_breakdown.is_empty());
        assert_eq!(plan.duration_weeks, 1);
    }

    #[test]
    fn test_oversized_checklist_still_assembles() {
        // The assembler is total even over a non-compliant 20-item sequence.
        let plan = assemble(items(20), "Study Week");
        assert_eq!(plan.weekly_breakdown[0].checklist.len(), 20);
        assert_eq!(plan.weekly_breakdown[0].estimated_minutes, 600);
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let plan = assemble(items(1), "Study Week");
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["duration_weeks"], 1);
        assert_eq!(json["weekly_breakdown"][0]["week"], 1);
    }
}
