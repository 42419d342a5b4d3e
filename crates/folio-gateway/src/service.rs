//! Provider selection, fallback, and the error-message taxonomy
//!
//! The service always hands back a stream. Upstream status replies map
//! to fixed user-facing texts; a transport failure on the primary falls
//! back to the secondary when one is configured; with no credentials at
//! all the service runs in synthetic-error-only mode.

use std::sync::Arc;

use folio_ai::{
    ByteStream, ChatMessage, CompletionRequest, Error,
    providers::{CompletionProvider, GroqProvider, LlamaApiProvider},
    stream::error_stream,
};

use crate::config::GatewayConfig;

/// Reply for a rate-limited primary (HTTP 429)
pub const MSG_CAPACITY: &str = "I'm currently at capacity. Please try again in a few minutes - I'm using a free service with daily limits.";

/// Reply for a rejected credential (HTTP 401)
pub const MSG_CONFIGURATION: &str =
    "There's an issue with my configuration. Please contact the portfolio owner.";

/// Reply for a request the provider refused (HTTP 400)
pub const MSG_REPHRASE: &str =
    "I encountered an issue processing your request. Please try rephrasing your question.";

/// Reply for a forbidden credential (HTTP 403)
pub const MSG_PERMISSION: &str =
    "I don't have permission to access the AI service. Please contact the portfolio owner.";

/// Reply for an upstream server error (HTTP 5xx)
pub const MSG_UNAVAILABLE: &str =
    "The AI service is temporarily unavailable. Please try again in a few minutes.";

/// Reply for every other failure
pub const MSG_GENERIC: &str =
    "I'm currently experiencing technical difficulties. Please try again later.";

/// Reply when no provider credential is configured at all
pub const MSG_NO_PROVIDER: &str =
    "I'm currently unavailable. Please contact the portfolio owner to set up the AI chat service.";

/// Map an upstream HTTP status to its fixed user-facing reply
pub fn status_message(code: u16) -> &'static str {
    match code {
        429 => MSG_CAPACITY,
        401 => MSG_CONFIGURATION,
        400 => MSG_REPHRASE,
        403 => MSG_PERMISSION,
        500..=599 => MSG_UNAVAILABLE,
        _ => MSG_GENERIC,
    }
}

/// The provider pool behind the gateway
pub struct ChatService {
    primary: Option<Arc<dyn CompletionProvider>>,
    secondary: Option<Arc<dyn CompletionProvider>>,
}

impl ChatService {
    /// Build from explicit providers (tests inject mocks here)
    pub fn new(
        primary: Option<Arc<dyn CompletionProvider>>,
        secondary: Option<Arc<dyn CompletionProvider>>,
    ) -> Self {
        Self { primary, secondary }
    }

    /// Build from configured credentials: Groq primary, LlamaAPI secondary
    pub fn from_config(config: &GatewayConfig) -> Self {
        let primary = config
            .groq_api_key
            .as_ref()
            .map(|key| Arc::new(GroqProvider::new(key)) as Arc<dyn CompletionProvider>);
        let secondary = config
            .llama_api_key
            .as_ref()
            .map(|key| Arc::new(LlamaApiProvider::new(key)) as Arc<dyn CompletionProvider>);

        if primary.is_none() && secondary.is_none() {
            tracing::warn!("no provider credentials configured; chat degrades to a fixed message");
        }
        Self { primary, secondary }
    }

    /// Issue the streaming completion call for an assembled conversation.
    /// Never fails: every error path returns a synthetic error stream in
    /// the normal wire shape.
    pub async fn streaming_response(&self, messages: Vec<ChatMessage>) -> ByteStream {
        if let Some(primary) = &self.primary {
            let request = CompletionRequest::new(primary.default_model(), messages.clone());
            match primary.stream(&request).await {
                Ok(stream) => return stream,
                Err(Error::Status { code, .. }) => {
                    // A status reply already names the problem; retrying it
                    // on another provider would only hide it.
                    return error_stream(status_message(code));
                }
                Err(err) if err.is_transport() && self.secondary.is_some() => {
                    tracing::warn!(provider = primary.name(), "primary call failed: {err}");
                }
                Err(err) => {
                    tracing::warn!(provider = primary.name(), "primary call failed: {err}");
                    return error_stream(MSG_GENERIC);
                }
            }
        }

        if let Some(secondary) = &self.secondary {
            let request = CompletionRequest::new(secondary.default_model(), messages);
            match secondary.stream(&request).await {
                Ok(stream) => return stream,
                Err(err) => {
                    tracing::warn!(provider = secondary.name(), "secondary call failed: {err}");
                    return error_stream(MSG_GENERIC);
                }
            }
        }

        error_stream(MSG_NO_PROVIDER)
    }
}
