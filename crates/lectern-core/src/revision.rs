//! The bounded generate → validate → critique → revise loop.
//!
//! Generation oracles are unreliable at following exact structural contracts,
//! so every attempt passes through two independent checks: the cheap
//! deterministic validator and the (second-oracle) critic. Either failing
//! sends the text back for revision, at most `max_retries` times. The loop
//! always terminates with usable text: running out of budget is the soft
//! `Exhausted` terminal, not an error. Only oracle transport/quota failures
//! abort the run, and those are never retried here.

use lectern_abstraction::ModelError;
use tracing::{debug, info, warn};

use crate::checklist::{ChecklistItem, parse_checklist, validate};
use crate::critic::{ChecklistCritic, Critique};
use crate::generator::{ChecklistGenerator, LearnerProfile};

/// Default number of revision attempts after the initial generation.
pub const DEFAULT_MAX_RETRIES: usize = 2;

/// How the loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopVerdict {
    /// Validator and critic both passed.
    Accepted,
    /// Retry budget ran out; the result is best-effort.
    Exhausted,
}

/// Final state of one loop run.
#[derive(Debug, Clone)]
pub struct RevisionOutcome {
    /// The last checklist text the generator produced.
    pub raw_text: String,
    /// Items parsed from `raw_text` (possibly empty, possibly non-compliant
    /// when the verdict is `Exhausted`).
    pub items: Vec<ChecklistItem>,
    /// Terminal state.
    pub verdict: LoopVerdict,
    /// Number of generation oracle invocations performed.
    pub attempts: u32,
}

/// Drives generation, validation, critique, and bounded revision.
///
/// Owns the current best checklist text for the duration of a run; each run
/// is fully independent, so concurrent runs need no coordination. A
/// parse-to-zero-items attempt is deliberately not an error: the validator's
/// empty-checklist violation becomes the revision feedback, and if the budget
/// runs out the empty result flows downstream. (Fail-open here is a recorded
/// product decision; see DESIGN.md.)
pub struct RevisionLoop {
    generator: ChecklistGenerator,
    critic: ChecklistCritic,
    max_retries: usize,
}

impl RevisionLoop {
    /// Creates a loop with the default retry budget.
    #[must_use]
    pub fn new(generator: ChecklistGenerator, critic: ChecklistCritic) -> Self {
        Self { generator, critic, max_retries: DEFAULT_MAX_RETRIES }
    }

    /// Overrides the retry budget.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Runs the loop to a terminal state.
    ///
    /// Invokes the generation oracle at most `1 + max_retries` times and the
    /// critique oracle at most `max_retries + 1` times.
    ///
    /// # Errors
    /// Returns a `ModelError` if either oracle fails at the transport level;
    /// the failure aborts the run immediately.
    pub async fn run(
        &self,
        outline: &str,
        profile: &LearnerProfile,
    ) -> Result<RevisionOutcome, ModelError> {
        let mut raw_text = self.generator.generate(outline, profile).await?;
        let mut attempts: u32 = 1;
        let mut revisions = 0;

        loop {
            let items = parse_checklist(&raw_text);

            let feedback = match validate(&items) {
                Ok(()) => match self.critic.review(&raw_text).await? {
                    Critique::Passed => {
                        info!(attempts, items = items.len(), "checklist accepted");
                        return Ok(RevisionOutcome {
                            raw_text,
                            items,
                            verdict: LoopVerdict::Accepted,
                            attempts,
                        });
                    }
                    Critique::Deviations(deviations) => {
                        debug!(attempts, "critic rejected checklist");
                        deviations
                    }
                },
                Err(violation) => {
                    debug!(attempts, %violation, "structural validation failed");
                    violation.to_string()
                }
            };

            if revisions == self.max_retries {
                warn!(
                    attempts,
                    items = items.len(),
                    "revision budget exhausted, returning best-effort checklist"
                );
                return Ok(RevisionOutcome {
                    raw_text,
                    items,
                    verdict: LoopVerdict::Exhausted,
                    attempts,
                });
            }

            raw_text = self.generator.revise(outline, profile, &raw_text, &feedback).await?;
            revisions += 1;
            attempts += 1;
        }
    }
}
