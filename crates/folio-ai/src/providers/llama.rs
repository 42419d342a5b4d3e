//! LlamaAPI chat-completions client (secondary provider)

use async_trait::async_trait;
use futures::StreamExt;

use crate::{
    error::{Error, Result},
    providers::CompletionProvider,
    stream::ByteStream,
    types::CompletionRequest,
};

/// LlamaAPI completions endpoint
const LLAMA_URL: &str = "https://api.llama-api.com/chat/completions";

/// Model served through LlamaAPI
pub const LLAMA_MODEL: &str = "llama3-8b";

/// LlamaAPI client
pub struct LlamaApiProvider {
    client: reqwest::Client,
    api_key: String,
}

impl LlamaApiProvider {
    /// Create a new LlamaAPI provider with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create from the `LLAMA_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLAMA_API_KEY").map_err(|_| Error::InvalidApiKey)?;
        Ok(Self::new(api_key))
    }
}

#[async_trait]
impl CompletionProvider for LlamaApiProvider {
    fn name(&self) -> &'static str {
        "LlamaAPI"
    }

    fn default_model(&self) -> &'static str {
        LLAMA_MODEL
    }

    async fn stream(&self, request: &CompletionRequest) -> Result<ByteStream> {
        let response = self
            .client
            .post(LLAMA_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(provider = "LlamaAPI", %status, "upstream error response");
            return Err(Error::status(status.as_u16(), body));
        }

        Ok(Box::pin(
            response.bytes_stream().map(|item| item.map_err(Error::from)),
        ))
    }
}
