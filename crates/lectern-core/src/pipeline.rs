//! End-to-end pipeline façade.
//!
//! Wires goal filtering, outline assembly, the revision loop, and plan
//! assembly into one request-scoped flow. Every run owns its own outline,
//! feedback, and item sequence; concurrent runs share nothing mutable, and
//! cancelling a caller simply drops the in-flight future.

use std::sync::Arc;

use lectern_abstraction::Model;
use tracing::{debug, info};
use uuid::Uuid;

use crate::content::{ContentSegment, ContentSource};
use crate::critic::ChecklistCritic;
use crate::error::Result;
use crate::generator::{ChecklistGenerator, LearnerProfile};
use crate::goal::{extract_goal_keywords, filter_segments_by_goal};
use crate::outline::build_outline;
use crate::plan::{StructuredPlan, assemble};
use crate::revision::{LoopVerdict, RevisionLoop};
use crate::store::{PlanId, PlanStore};

/// One plan-generation request.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// Document title, used for the plan and breakdown titles.
    pub title: String,
    /// Learner context.
    pub profile: LearnerProfile,
}

/// The result of a successful pipeline invocation.
///
/// "Successful" includes the budget-exhausted case: the plan may be imperfect
/// but it is always well-typed.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    /// The assembled plan document.
    pub plan: StructuredPlan,
    /// The raw checklist text the plan was assembled from.
    pub raw_text: String,
    /// How the revision loop terminated.
    pub verdict: LoopVerdict,
    /// Generation oracle invocations performed.
    pub attempts: u32,
}

/// The study-checklist generation pipeline.
pub struct StudyPlanPipeline {
    revision: RevisionLoop,
}

impl StudyPlanPipeline {
    /// Creates a pipeline with separate generation and critique oracles.
    ///
    /// The two oracles are independent by design; deployments typically point
    /// them at different models (a stronger generator, a cheaper critic).
    #[must_use]
    pub fn new(generator_model: Arc<dyn Model>, critic_model: Arc<dyn Model>) -> Self {
        let revision = RevisionLoop::new(
            ChecklistGenerator::new(generator_model),
            ChecklistCritic::new(critic_model),
        );
        Self { revision }
    }

    /// Overrides the revision retry budget.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.revision = self.revision.with_max_retries(max_retries);
        self
    }

    /// Runs the pipeline over already-extracted segments.
    ///
    /// # Errors
    /// Fails only on oracle transport/quota errors; structural shortfalls
    /// degrade to a best-effort plan instead.
    pub async fn run(
        &self,
        segments: Vec<ContentSegment>,
        request: &PlanRequest,
    ) -> Result<GeneratedPlan> {
        debug!(segments = segments.len(), title = %request.title, "starting pipeline run");

        let goal = request.profile.goal.as_deref().unwrap_or("");
        let keywords = extract_goal_keywords(goal);
        let segments = filter_segments_by_goal(segments, &keywords);

        let outline = build_outline(&segments);
        let outcome = self.revision.run(&outline, &request.profile).await?;

        info!(
            verdict = ?outcome.verdict,
            attempts = outcome.attempts,
            items = outcome.items.len(),
            "pipeline run finished"
        );

        let week_title = format!("{} Study Week", request.title);
        let plan = assemble(outcome.items, &week_title);

        Ok(GeneratedPlan {
            plan,
            raw_text: outcome.raw_text,
            verdict: outcome.verdict,
            attempts: outcome.attempts,
        })
    }

    /// Runs the pipeline for a document served by an extraction collaborator.
    ///
    /// # Errors
    /// Propagates extraction failures and oracle transport/quota errors.
    pub async fn run_for_document(
        &self,
        source: &dyn ContentSource,
        document_id: Uuid,
        request: &PlanRequest,
    ) -> Result<GeneratedPlan> {
        let segments = source.segments(document_id).await?;
        self.run(segments, request).await
    }

    /// Runs the pipeline and persists the resulting plan.
    ///
    /// # Errors
    /// Propagates extraction, oracle, and persistence failures.
    pub async fn run_and_store(
        &self,
        source: &dyn ContentSource,
        store: &dyn PlanStore,
        learner_id: Uuid,
        document_id: Uuid,
        request: &PlanRequest,
    ) -> Result<(PlanId, GeneratedPlan)> {
        let generated = self.run_for_document(source, document_id, request).await?;

        let title = format!("Study Plan – {}", request.title);
        let plan_id =
            store.store(generated.plan.clone(), title, learner_id, document_id).await?;

        info!(plan_id = %plan_id, "plan stored");
        Ok((plan_id, generated))
    }
}
