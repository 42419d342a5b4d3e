//! Transport seam between the session and the gateway

use async_trait::async_trait;
use futures::StreamExt;

use folio_ai::{ByteStream, ChatRequest, EmailAck};

use crate::error::{Error, Result};

/// What the gateway answered with
pub enum TransportReply {
    /// Chat path: the chunked delta stream, bytes untouched
    Stream(ByteStream),
    /// Email path: the immediate acknowledgment
    Ack(EmailAck),
}

/// Carries one request to the gateway and returns its reply
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<TransportReply>;
}

/// Production transport: `POST {base_url}/chat` over reqwest
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport for a gateway base URL (e.g. `http://localhost:8787`)
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/chat", base_url.as_ref().trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<TransportReply> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(folio_ai::Error::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Gateway {
                code: status.as_u16(),
                body,
            });
        }

        if request.is_email {
            let ack: EmailAck = response.json().await.map_err(folio_ai::Error::from)?;
            Ok(TransportReply::Ack(ack))
        } else {
            let stream: ByteStream = Box::pin(
                response
                    .bytes_stream()
                    .map(|item| item.map_err(folio_ai::Error::from)),
            );
            Ok(TransportReply::Stream(stream))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let t = HttpTransport::new("http://localhost:8787/");
        assert_eq!(t.url, "http://localhost:8787/chat");
        let t = HttpTransport::new("http://localhost:8787");
        assert_eq!(t.url, "http://localhost:8787/chat");
    }
}
