//! Oracle abstraction layer for Lectern.
//!
//! Both the checklist generation oracle and the checklist critique oracle are
//! text-completion services reached through the single [`Model`] trait defined
//! here. Adapters always surface plain text; whatever structure a provider
//! wraps its responses in is flattened before it leaves the adapter, so the
//! checklist parser is the only place that interprets oracle output.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents an error that can occur when invoking an oracle.
///
/// Transport-level failures (`RequestError`, `QuotaExceeded`) are fatal to the
/// pipeline invocation that hit them: the revision loop never retries them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelError {
    /// The request never produced a usable response (network failure,
    /// timeout, rejected request). Timeouts are reported here and treated
    /// identically to any other transport failure.
    #[error("Request Error: {0}")]
    RequestError(String),

    /// The provider answered, but with an error (invalid input, server fault).
    #[error("Model Response Error: {0}")]
    ModelResponseError(String),

    /// A request or response body could not be (de)serialized.
    #[error("Serialization Error: {0}")]
    SerializationError(String),

    /// The requested provider is unknown or misconfigured.
    #[error("Unsupported Model Provider: {0}")]
    UnsupportedModelProvider(String),

    /// Provider quota exceeded or rate limit hit (hard stop error).
    #[error("Provider '{provider}' quota exceeded")]
    QuotaExceeded {
        /// The provider name (e.g., "openai").
        provider: String,
        /// Optional error message from the provider.
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Other unexpected errors.
    #[error("Other Model Error: {0}")]
    Other(String),
}

/// Represents a message in a conversation with a chat oracle.
///
/// The revision loop replays a prior checklist attempt as an `assistant`
/// message followed by a corrective `user` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender ("user", "assistant", "system").
    pub role: String,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

/// Parameters for controlling the oracle's generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Sampling temperature. Checklist generation runs cool (0.2) so the
    /// output stays close to the instructed format.
    pub temperature: Option<f32>,

    /// Nucleus sampling mass.
    pub top_p: Option<f32>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sequences at which the provider stops generating.
    pub stop_sequences: Option<Vec<String>>,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            temperature: Some(0.2),
            top_p: Some(1.0),
            max_tokens: Some(1024),
            stop_sequences: None,
        }
    }
}

impl ModelParameters {
    /// Parameters for deterministic-leaning calls such as the critique rubric.
    #[must_use]
    pub fn deterministic() -> Self {
        Self { temperature: Some(0.0), ..Self::default() }
    }
}

/// The response from an oracle invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The generated content, always plain text.
    pub content: String,

    /// The ID of the model that generated the response, if reported.
    pub model_id: Option<String>,

    /// Usage statistics for the request, if reported.
    pub usage: Option<ModelUsage>,
}

/// Usage statistics for an oracle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelUsage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,

    /// Number of tokens in the completion.
    pub completion_tokens: u32,

    /// Total number of tokens used.
    pub total_tokens: u32,
}

/// A trait for invoking a text-completion oracle.
///
/// All implementations must be `Send + Sync` so concurrent pipeline
/// invocations can share one adapter. An invocation is the sole suspension
/// point in a pipeline run; cancelling the caller simply drops the future.
#[async_trait]
pub trait Model: Send + Sync {
    /// Generates a completion for a single prompt.
    ///
    /// # Errors
    /// Returns a `ModelError` if the invocation fails.
    async fn generate_text(
        &self,
        prompt: &str,
        parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError>;

    /// Generates a completion for a conversation.
    ///
    /// # Errors
    /// Returns a `ModelError` if the invocation fails.
    async fn generate_chat_completion(
        &self,
        messages: &[ChatMessage],
        parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError>;

    /// Returns the ID of the model.
    fn model_id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_constructors() {
        assert_eq!(ChatMessage::system("s").role, "system");
        assert_eq!(ChatMessage::user("u").role, "user");
        assert_eq!(ChatMessage::assistant("a").role, "assistant");
        assert_eq!(ChatMessage::user("hello").content, "hello");
    }

    #[test]
    fn test_default_parameters_run_cool() {
        let params = ModelParameters::default();
        assert_eq!(params.temperature, Some(0.2));
        assert_eq!(params.max_tokens, Some(1024));
    }

    #[test]
    fn test_deterministic_parameters() {
        let params = ModelParameters::deterministic();
        assert_eq!(params.temperature, Some(0.0));
    }

    #[test]
    fn test_quota_error_display_names_provider() {
        let err = ModelError::QuotaExceeded {
            provider: "openai".to_string(),
            message: Some("insufficient_quota".to_string()),
        };
        assert!(err.to_string().contains("openai"));
    }
}
