//! Persistence collaborator seam.
//!
//! The pipeline hands a finished `StructuredPlan` to a `PlanStore` and gets
//! back an identifier. Relational persistence lives outside this crate; the
//! in-memory store backs tests and the CLI. Identifiers are freshly minted
//! UUIDs scoped to the insert, never drawn from process-wide counters.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::PipelineError;
use crate::plan::StructuredPlan;

/// Identifier of a stored plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(Uuid);

impl PlanId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored plan record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPlan {
    /// The plan document.
    pub plan: StructuredPlan,
    /// Display title, e.g. `"Study Plan – Anatomy Basics"`.
    pub title: String,
    /// Owning learner.
    pub learner_id: Uuid,
    /// Source document.
    pub document_id: Uuid,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

/// The external persistence collaborator.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Persists a plan and returns its identifier.
    ///
    /// # Errors
    /// Returns a `PipelineError::Store` if persistence fails.
    async fn store(
        &self,
        plan: StructuredPlan,
        title: String,
        learner_id: Uuid,
        document_id: Uuid,
    ) -> Result<PlanId, PipelineError>;
}

/// Map-backed store for tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryPlanStore {
    plans: Mutex<HashMap<PlanId, StoredPlan>>,
}

impl InMemoryPlanStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches a stored plan by ID.
    pub fn get(&self, id: PlanId) -> Option<StoredPlan> {
        self.plans.lock().unwrap_or_else(std::sync::PoisonError::into_inner).get(&id).cloned()
    }

    /// Number of stored plans.
    pub fn len(&self) -> usize {
        self.plans.lock().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn store(
        &self,
        plan: StructuredPlan,
        title: String,
        learner_id: Uuid,
        document_id: Uuid,
    ) -> Result<PlanId, PipelineError> {
        let id = PlanId::new();
        let record =
            StoredPlan { plan, title, learner_id, document_id, created_at: Utc::now() };

        debug!(plan_id = %id, learner_id = %learner_id, "storing plan");
        self.plans
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(id, record);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::assemble;

    #[tokio::test]
    async fn test_store_and_fetch() {
        let store = InMemoryPlanStore::new();
        let plan = assemble(Vec::new(), "Study Week");

        let id = store
            .store(plan, "Study Plan – Empty".to_string(), Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();

        let record = store.get(id).unwrap();
        assert_eq!(record.title, "Study Plan – Empty");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_unique_per_insert() {
        let store = InMemoryPlanStore::new();
        let learner = Uuid::new_v4();
        let document = Uuid::new_v4();

        let a = store
            .store(assemble(Vec::new(), "W"), "A".to_string(), learner, document)
            .await
            .unwrap();
        let b = store
            .store(assemble(Vec::new(), "W"), "B".to_string(), learner, document)
            .await
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }
}
