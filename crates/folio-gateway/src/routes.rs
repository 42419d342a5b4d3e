//! The `/chat` endpoint

use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use folio_ai::{ChatMessage, ChatRequest, EmailAck, ErrorReply};

use crate::server::GatewayState;

/// Ack text for the email short-circuit
pub const EMAIL_ACK: &str = "Email prepared successfully";

/// Error text for a request the handler could not process
pub const HANDLER_ERROR: &str = "Failed to process request";

/// POST /chat: email ack, or the provider's delta stream passed through
/// unchanged. The body is parsed inside the handler so a malformed
/// request degrades to the structured 500 reply instead of an extractor
/// rejection.
pub async fn chat(State(state): State<GatewayState>, body: Bytes) -> Response {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::error!("failed to parse chat request: {err}");
            return handler_error();
        }
    };

    // The mailto hand-off happens client-side; the gateway only acks.
    if request.is_email {
        return Json(EmailAck {
            success: true,
            message: EMAIL_ACK.to_string(),
        })
        .into_response();
    }

    let preamble = state.personas.preamble(request.language.as_deref());
    let messages = vec![
        ChatMessage::system(preamble),
        ChatMessage::user(request.message),
    ];

    let stream = state.service.streaming_response(messages).await;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(stream),
    )
        .into_response()
}

fn handler_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorReply {
            error: HANDLER_ERROR.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonaSet;
    use crate::service::{ChatService, MSG_NO_PROVIDER};
    use async_trait::async_trait;
    use folio_ai::providers::CompletionProvider;
    use folio_ai::stream::{ByteStream, DeltaDecoder, DeltaEvent, delta_frame};
    use folio_ai::CompletionRequest;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Provider capturing the request it was called with
    struct CapturingProvider {
        reply: String,
        calls: Arc<AtomicU32>,
        seen: Arc<Mutex<Option<CompletionRequest>>>,
    }

    #[async_trait]
    impl CompletionProvider for CapturingProvider {
        fn name(&self) -> &'static str {
            "Capturing"
        }

        fn default_model(&self) -> &'static str {
            "mock-model"
        }

        async fn stream(&self, request: &CompletionRequest) -> folio_ai::Result<ByteStream> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            *self.seen.lock() = Some(request.clone());
            let frame = delta_frame(&self.reply);
            Ok(Box::pin(async_stream::stream! {
                yield Ok(frame);
            }))
        }
    }

    fn capturing_state(
        reply: &str,
    ) -> (
        GatewayState,
        Arc<AtomicU32>,
        Arc<Mutex<Option<CompletionRequest>>>,
    ) {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = Arc::new(Mutex::new(None));
        let provider = Arc::new(CapturingProvider {
            reply: reply.to_string(),
            calls: calls.clone(),
            seen: seen.clone(),
        });
        let state = GatewayState {
            service: Arc::new(ChatService::new(Some(provider), None)),
            personas: Arc::new(PersonaSet::builtin()),
        };
        (state, calls, seen)
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn stream_content(response: Response) -> String {
        let raw = body_text(response).await;
        let mut decoder = DeltaDecoder::new();
        decoder
            .feed(raw.as_bytes())
            .into_iter()
            .filter_map(|event| match event {
                DeltaEvent::Content(text) => Some(text),
                DeltaEvent::Done => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_email_request_skips_the_provider() {
        let (state, calls, _) = capturing_state("never sent");

        let body = Bytes::from(r#"{"message":"hi","isEmail":true}"#);
        let response = chat(State(state), body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let ack: EmailAck = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(ack.success);
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_chat_request_streams_the_reply() {
        let (state, calls, seen) = capturing_state("I build things.");

        let body = Bytes::from(r#"{"message":"what do you do?"}"#);
        let response = chat(State(state), body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("text/event-stream")
        );
        assert_eq!(stream_content(response).await, "I build things.");
        assert_eq!(calls.load(Ordering::Relaxed), 1);

        let request = seen.lock().clone().unwrap();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[1].content, "what do you do?");
    }

    #[tokio::test]
    async fn test_language_selects_the_persona() {
        let (state, _, seen) = capturing_state("ok");

        let body = Bytes::from(r#"{"message":"salut","language":"fr"}"#);
        let _ = chat(State(state), body).await;

        let request = seen.lock().clone().unwrap();
        assert!(request.messages[0].content.contains("francais"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_structured_500() {
        let (state, calls, _) = capturing_state("never sent");

        let body = Bytes::from_static(b"{not json");
        let response = chat(State(state), body).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let reply: ErrorReply = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(reply.error, HANDLER_ERROR);
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_no_credentials_still_streams_a_message() {
        let state = GatewayState {
            service: Arc::new(ChatService::new(None, None)),
            personas: Arc::new(PersonaSet::builtin()),
        };

        let body = Bytes::from(r#"{"message":"hello?"}"#);
        let response = chat(State(state), body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(stream_content(response).await, MSG_NO_PROVIDER);
    }
}
