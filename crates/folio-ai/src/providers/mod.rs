//! Upstream completion providers
//!
//! Each provider issues one streaming HTTP call and hands the response
//! bytes back untouched; the gateway forwards them as-is.

pub mod groq;
pub mod llama;

use async_trait::async_trait;

use crate::{error::Result, stream::ByteStream, types::CompletionRequest};

/// A hosted chat-completion service reachable over HTTP
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name, used in logs
    fn name(&self) -> &'static str;

    /// Model identifier this provider serves
    fn default_model(&self) -> &'static str;

    /// Issue a streaming completion call and return the raw byte stream.
    /// Non-success statuses surface as `Error::Status`; anything that
    /// failed before a status line arrived surfaces as a transport error.
    async fn stream(&self, request: &CompletionRequest) -> Result<ByteStream>;
}

pub use groq::GroqProvider;
pub use llama::LlamaApiProvider;
