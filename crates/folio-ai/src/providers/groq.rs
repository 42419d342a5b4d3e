//! Groq chat-completions client (primary provider)

use async_trait::async_trait;
use futures::StreamExt;

use crate::{
    error::{Error, Result},
    providers::CompletionProvider,
    stream::ByteStream,
    types::CompletionRequest,
};

/// Groq's OpenAI-compatible completions endpoint
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Groq's free-tier model
pub const GROQ_MODEL: &str = "llama3-8b-8192";

/// Groq API client
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: String,
}

impl GroqProvider {
    /// Create a new Groq provider with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create from the `GROQ_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| Error::InvalidApiKey)?;
        Ok(Self::new(api_key))
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "Groq"
    }

    fn default_model(&self) -> &'static str {
        GROQ_MODEL
    }

    async fn stream(&self, request: &CompletionRequest) -> Result<ByteStream> {
        let response = self
            .client
            .post(GROQ_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(provider = "Groq", %status, "upstream error response");
            return Err(Error::status(status.as_u16(), body));
        }

        Ok(Box::pin(
            response.bytes_stream().map(|item| item.map_err(Error::from)),
        ))
    }
}
