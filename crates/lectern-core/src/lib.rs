//! Core generation pipeline for Lectern.
//!
//! Turns extracted source content plus a learner profile into a validated,
//! personalized study checklist by driving a text-generation oracle through a
//! bounded generate → validate → critique → revise loop, then assembles the
//! result into a persistable structured plan.
//!
//! The oracles themselves, document extraction, and persistence are external
//! collaborators reached through traits ([`lectern_abstraction::Model`],
//! [`ContentSource`], [`PlanStore`]); everything in between is deterministic
//! and synchronous apart from the oracle calls.

pub mod checklist;
pub mod content;
pub mod critic;
pub mod error;
pub mod generator;
pub mod goal;
pub mod outline;
pub mod pipeline;
pub mod plan;
pub mod revision;
pub mod store;

pub use checklist::{
    ChecklistItem, ChecklistViolation, EFFORT_GLYPH, MAX_ITEMS, Tag, parse_checklist,
    render_checklist, validate,
};
pub use content::{ContentSegment, ContentSource};
pub use critic::{ChecklistCritic, Critique};
pub use error::{PipelineError, Result};
pub use generator::{ChecklistGenerator, LearnerProfile};
pub use goal::{extract_goal_keywords, filter_segments_by_goal};
pub use outline::{EMPTY_CONTENT_PLACEHOLDER, OUTLINE_CHAR_LIMIT, build_outline};
pub use pipeline::{GeneratedPlan, PlanRequest, StudyPlanPipeline};
pub use plan::{MINUTES_PER_ITEM, StructuredPlan, WeeklyBreakdown, assemble};
pub use revision::{DEFAULT_MAX_RETRIES, LoopVerdict, RevisionLoop, RevisionOutcome};
pub use store::{InMemoryPlanStore, PlanId, PlanStore, StoredPlan};
