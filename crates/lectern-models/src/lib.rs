//! Oracle implementations for Lectern.
//!
//! This crate provides concrete implementations of the `Model` trait.
//!
//! # Supported Providers
//!
//! - **Mock**: Testing and development
//! - **Scripted**: Replays a queued sequence of responses (test double for the
//!   revision loop)
//! - **OpenAI**: OpenAI chat-completions API (API key required); the same
//!   adapter serves any OpenAI-compatible endpoint via a custom base URL

pub mod factory;
pub mod openai;
pub mod scripted;

use async_trait::async_trait;
use lectern_abstraction::{
    ChatMessage, Model, ModelError, ModelParameters, ModelResponse, ModelUsage,
};
use tracing::debug;

pub use factory::{ModelConfig, ModelFactory, ModelType};
pub use openai::OpenAIModel;
pub use scripted::{ScriptedModel, ScriptedReply};

/// A mock implementation of the `Model` trait for testing and demonstration.
#[derive(Debug, Default)]
pub struct MockModel {
    id: String,
}

impl MockModel {
    /// Creates a new `MockModel` with the given ID.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Model for MockModel {
    async fn generate_text(
        &self,
        prompt: &str,
        parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError> {
        debug!(
            model_id = %self.id,
            prompt_len = prompt.len(),
            parameters = ?parameters,
            "MockModel generating text"
        );

        let response_content = format!("Mock response for: {prompt}");

        let prompt_tokens = count_tokens(prompt);
        let completion_tokens = count_tokens(&response_content);

        Ok(ModelResponse {
            content: response_content,
            model_id: Some(self.id.clone()),
            usage: Some(ModelUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            }),
        })
    }

    async fn generate_chat_completion(
        &self,
        messages: &[ChatMessage],
        parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError> {
        debug!(
            model_id = %self.id,
            message_count = messages.len(),
            parameters = ?parameters,
            "MockModel generating chat completion"
        );

        let last = messages.last().map_or("", |m| m.content.as_str());
        let response_content = format!("Mock chat response for: {last}");

        let prompt_tokens = messages.iter().map(|m| count_tokens(&m.content)).sum::<u32>();
        let completion_tokens = count_tokens(&response_content);

        Ok(ModelResponse {
            content: response_content,
            model_id: Some(self.id.clone()),
            usage: Some(ModelUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            }),
        })
    }

    fn model_id(&self) -> &str {
        &self.id
    }
}

/// Rough token estimate: whitespace-separated words.
fn count_tokens(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_model_generate_text() {
        let model = MockModel::new("mock-model".to_string());
        let response = model.generate_text("hello", None).await.unwrap();
        assert!(response.content.contains("hello"));
        assert_eq!(response.model_id, Some("mock-model".to_string()));
        assert!(response.usage.is_some());
    }

    #[tokio::test]
    async fn test_mock_model_chat_completion_uses_last_message() {
        let model = MockModel::new("mock-model".to_string());
        let messages = vec![
            ChatMessage::system("You are a tutor."),
            ChatMessage::user("Outline chapter one."),
        ];
        let response = model.generate_chat_completion(&messages, None).await.unwrap();
        assert!(response.content.contains("Outline chapter one."));
    }

    #[test]
    fn test_count_tokens() {
        assert_eq!(count_tokens(""), 0);
        assert_eq!(count_tokens("one two three"), 3);
    }
}
