//! Messages API request and response types

use crate::types::{ContentBlock, Message, Role, StopReason, Usage};
use serde::{Deserialize, Serialize};

/// Default model used for itinerary writing
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Request to create a message
#[derive(Clone, Debug, Serialize)]
pub struct MessagesRequest {
    /// Model to use (e.g., "claude-sonnet-4-5-20250929")
    pub model: String,
    /// Conversation history
    pub messages: Vec<Message>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl MessagesRequest {
    /// Create a basic request with sensible defaults
    #[must_use]
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            messages,
            max_tokens: 2048,
        }
    }

    /// Builder: Set model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder: Set max tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Response from creating a message
#[derive(Clone, Debug, Deserialize)]
pub struct MessagesResponse {
    /// Unique identifier for this message
    pub id: String,
    /// Model that generated the response
    pub model: String,
    /// Role (always "assistant" for responses)
    pub role: Role,
    /// Content blocks in the response
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
    /// Token usage statistics
    #[serde(default)]
    pub usage: Usage,
}

impl MessagesResponse {
    /// Concatenate every text block of the response
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}
