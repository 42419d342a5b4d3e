//! Core types shared between the gateway and the stream consumer

use serde::{Deserialize, Serialize};

/// Message roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a conversation. The same shape travels to the upstream
/// provider, so it carries nothing beyond role and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request body accepted by the gateway's `POST /chat` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// Treat `message` as an email body and skip the provider call
    #[serde(default)]
    pub is_email: bool,
    /// Language code selecting the persona preamble
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ChatRequest {
    /// A plain chat question
    pub fn chat(message: impl Into<String>, language: Option<String>) -> Self {
        Self {
            message: message.into(),
            is_email: false,
            language,
        }
    }

    /// An email body headed for the mailto hand-off
    pub fn email(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_email: true,
            language: None,
        }
    }
}

/// Immediate acknowledgment returned for email requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAck {
    pub success: bool,
    pub message: String,
}

/// Structured failure body returned with a 5xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

/// Payload sent to an upstream completion provider. Streaming is always
/// enabled; token and temperature limits are fixed for the whole service.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Response budget for every turn
    pub const MAX_TOKENS: u32 = 500;
    /// Sampling temperature for every turn
    pub const TEMPERATURE: f32 = 0.7;

    /// Build a streaming request with the service-wide limits
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: true,
            max_tokens: Self::MAX_TOKENS,
            temperature: Self::TEMPERATURE,
        }
    }
}
