//! Scripted oracle for revision-loop testing.
//!
//! Replays a fixed sequence of canned replies, one per invocation, and counts
//! how many times it was called. This is the workhorse test double for
//! exercising generate/validate/critique/revise paths without a live provider.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lectern_abstraction::{ChatMessage, Model, ModelError, ModelParameters, ModelResponse};
use tracing::debug;

/// One scripted reply: either a successful text response or an error.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// The oracle answers with this text.
    Text(String),
    /// The oracle fails with this error.
    Fail(ModelError),
}

impl ScriptedReply {
    /// Convenience constructor for a text reply.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }
}

/// A `Model` that replays queued replies in order.
///
/// Calls beyond the end of the script return a `ModelResponseError`; a
/// correctly bounded revision loop never reaches that point, so hitting it in
/// a test is itself a failure signal.
#[derive(Debug)]
pub struct ScriptedModel {
    id: String,
    replies: Mutex<Vec<ScriptedReply>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    /// Creates a new `ScriptedModel` replaying `replies` in order.
    #[must_use]
    pub fn new(id: impl Into<String>, replies: Vec<ScriptedReply>) -> Self {
        let mut replies = replies;
        replies.reverse();
        Self { id: id.into(), replies: Mutex::new(replies), calls: AtomicUsize::new(0) }
    }

    /// Number of invocations observed so far (text and chat combined).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> Result<ModelResponse, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop();

        match reply {
            Some(ScriptedReply::Text(content)) => Ok(ModelResponse {
                content,
                model_id: Some(self.id.clone()),
                usage: None,
            }),
            Some(ScriptedReply::Fail(err)) => Err(err),
            None => Err(ModelError::ModelResponseError(format!(
                "scripted model '{}' exhausted its replies",
                self.id
            ))),
        }
    }
}

#[async_trait]
impl Model for ScriptedModel {
    async fn generate_text(
        &self,
        _prompt: &str,
        _parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError> {
        debug!(model_id = %self.id, call = self.call_count() + 1, "ScriptedModel replying");
        self.next_reply()
    }

    async fn generate_chat_completion(
        &self,
        _messages: &[ChatMessage],
        _parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError> {
        debug!(model_id = %self.id, call = self.call_count() + 1, "ScriptedModel replying");
        self.next_reply()
    }

    fn model_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order() {
        let model = ScriptedModel::new(
            "script",
            vec![ScriptedReply::text("first"), ScriptedReply::text("second")],
        );

        assert_eq!(model.generate_text("x", None).await.unwrap().content, "first");
        assert_eq!(model.generate_text("x", None).await.unwrap().content, "second");
        assert_eq!(model.call_count(), 2);
    }

    #[tokio::test]
    async fn test_scripted_error_is_returned() {
        let model = ScriptedModel::new(
            "script",
            vec![ScriptedReply::Fail(ModelError::RequestError("down".to_string()))],
        );

        let err = model.generate_text("x", None).await.unwrap_err();
        assert_eq!(err, ModelError::RequestError("down".to_string()));
    }

    #[tokio::test]
    async fn test_exhausted_script_errors() {
        let model = ScriptedModel::new("script", vec![]);
        assert!(model.generate_chat_completion(&[], None).await.is_err());
    }
}
