//! Delta event wire format and incremental stream decoding

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use tokio_stream::Stream;

use crate::error::Error;

/// Prefix carried by every event line
const DATA_PREFIX: &str = "data:";

/// Terminal sentinel ending a well-formed provider stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// A raw byte stream, as handed through the gateway unmodified
pub type ByteStream = Pin<Box<dyn Stream<Item = std::result::Result<Bytes, Error>> + Send>>;

/// One streamed chunk: `{"choices":[{"delta":{"content":"..."}}]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChoice {
    pub delta: StreamDelta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Events recovered from the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaEvent {
    /// An incremental fragment of generated text
    Content(String),
    /// The terminal sentinel
    Done,
}

/// Incremental decoder for `data:`-prefixed event lines.
///
/// Chunks arrive at arbitrary byte boundaries; a partial trailing line is
/// buffered until a later chunk completes it. Lines without the event
/// prefix, and event payloads that fail to parse, are skipped.
#[derive(Debug, Default)]
pub struct DeltaDecoder {
    buf: String,
}

impl DeltaDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw chunk, returning the events completed by it
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<DeltaEvent> {
        self.buf.push_str(&String::from_utf8_lossy(chunk));

        let mut events = Vec::new();
        while let Some(pos) = self.buf.find('\n') {
            let line: String = self.buf.drain(..=pos).collect();
            if let Some(event) = parse_line(line.trim_end_matches(['\r', '\n'])) {
                events.push(event);
            }
        }
        events
    }

    /// Flush the trailing unterminated line at end-of-stream
    pub fn finish(self) -> Option<DeltaEvent> {
        parse_line(self.buf.trim_end_matches('\r'))
    }
}

fn parse_line(line: &str) -> Option<DeltaEvent> {
    let payload = line.strip_prefix(DATA_PREFIX)?.trim_start();
    if payload == DONE_SENTINEL {
        return Some(DeltaEvent::Done);
    }

    match serde_json::from_str::<StreamChunk>(payload) {
        Ok(chunk) => {
            let content: String = chunk
                .choices
                .into_iter()
                .filter_map(|c| c.delta.content)
                .collect();
            if content.is_empty() {
                None
            } else {
                Some(DeltaEvent::Content(content))
            }
        }
        Err(err) => {
            tracing::trace!("skipping malformed event line: {err}");
            None
        }
    }
}

/// Encode one delta event line the way providers emit it
pub fn delta_frame(content: &str) -> Bytes {
    let payload = serde_json::json!({
        "choices": [{ "delta": { "content": content } }],
    });
    Bytes::from(format!("data: {payload}\n\n"))
}

/// A one-event stream carrying a human-readable message in the normal
/// wire shape, so consumers parse it like any provider reply.
pub fn error_stream(message: &str) -> ByteStream {
    let frame = delta_frame(message);
    Box::pin(async_stream::stream! {
        yield Ok(frame);
    })
}
