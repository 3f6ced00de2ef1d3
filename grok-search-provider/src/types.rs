//! Chat Completions request body.
//!
//! Responses are not modelled as structs: the stream reassembler navigates
//! them as [`serde_json::Value`] so that unexpected shapes degrade to "no
//! content" instead of a hard error.

use serde::Serialize;

/// Chat Completions API request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g. "grok-4-fast").
    pub model: String,
    /// Conversation messages, system prompt first.
    pub messages: Vec<ChatMessage>,
    /// Whether to request an event stream. Omitted from the body when `false`.
    #[serde(skip_serializing_if = "is_false")]
    pub stream: bool,
}

/// A message in the Chat Completions API format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Who authored the message.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A system instruction.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction.
    System,
    /// End-user input.
    User,
}

fn is_false(value: &bool) -> bool {
    !*value
}
