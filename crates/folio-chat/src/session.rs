//! Command-channel session driving one turn at a time
//!
//! Commands arrive on an mpsc receiver and are processed strictly
//! sequentially, so there is never more than one in-flight request and
//! nothing to cancel. Every applied event is re-broadcast for observers.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio_stream::StreamExt;

use folio_ai::{ByteStream, ChatRequest, DeltaDecoder, DeltaEvent};

use crate::{
    conversation::{ChatMode, Conversation},
    email::{self, EmailConfig},
    events::ChatEvent,
    transport::{ChatTransport, TransportReply},
};

/// Inbound commands for a chat session
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Submit the current input in the active mode
    Submit(String),
    /// Switch between chat and email mode
    SetMode(ChatMode),
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Language code forwarded to the gateway for persona selection
    pub language: Option<String>,
    /// Recipient and subject for the mailto hand-off
    pub email: EmailConfig,
    /// Idle-chunk timeout: a stream with no chunk for this long fails
    pub idle_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: None,
            email: EmailConfig::default(),
            idle_timeout: Duration::from_secs(30),
        }
    }
}

/// A chat session: one conversation, one transport, one turn at a time
pub struct ChatSession<T: ChatTransport> {
    transport: T,
    config: SessionConfig,
    state: Conversation,
    event_tx: broadcast::Sender<ChatEvent>,
}

impl<T: ChatTransport> ChatSession<T> {
    /// Create a session over a transport
    pub fn new(transport: T, config: SessionConfig) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            transport,
            config,
            state: Conversation::new(),
            event_tx,
        }
    }

    /// Subscribe to the events this session applies
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.event_tx.subscribe()
    }

    /// Current conversation state
    pub fn state(&self) -> &Conversation {
        &self.state
    }

    /// Consume commands until the channel closes
    pub async fn run(mut self, mut commands: mpsc::Receiver<ChatCommand>) {
        while let Some(command) = commands.recv().await {
            self.handle(command).await;
        }
    }

    /// Process a single command to completion
    pub async fn handle(&mut self, command: ChatCommand) {
        match command {
            ChatCommand::SetMode(mode) => self.apply(ChatEvent::ModeChanged { mode }),
            ChatCommand::Submit(text) => self.submit(text).await,
        }
    }

    fn apply(&mut self, event: ChatEvent) {
        self.state = std::mem::take(&mut self.state).apply(&event);
        let _ = self.event_tx.send(event);
    }

    async fn submit(&mut self, text: String) {
        let text = text.trim().to_string();
        if text.is_empty() || !self.state.can_submit() {
            tracing::debug!("submission rejected: blank input or turn in flight");
            return;
        }

        self.apply(ChatEvent::Submitted { text: text.clone() });
        match self.state.mode {
            ChatMode::Chat => self.chat_turn(text).await,
            ChatMode::Email => self.email_turn(text).await,
        }
    }

    async fn chat_turn(&mut self, text: String) {
        let request = ChatRequest::chat(text, self.config.language.clone());
        let stream = match self.transport.send(&request).await {
            Ok(TransportReply::Stream(stream)) => stream,
            Ok(TransportReply::Ack(_)) => {
                tracing::warn!("unexpected ack reply on the chat path");
                self.apply(ChatEvent::Failed);
                return;
            }
            Err(err) => {
                tracing::warn!("chat request failed: {err}");
                self.apply(ChatEvent::Failed);
                return;
            }
        };
        self.consume(stream).await;
    }

    /// Read the delta stream until it ends, stalls, or breaks
    async fn consume(&mut self, mut stream: ByteStream) {
        let mut decoder = DeltaDecoder::new();
        let mut opened = false;

        loop {
            let chunk = match tokio::time::timeout(self.config.idle_timeout, stream.next()).await {
                Ok(Some(Ok(chunk))) => chunk,
                Ok(Some(Err(err))) => {
                    tracing::warn!("stream read failed: {err}");
                    self.apply(ChatEvent::Failed);
                    return;
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(timeout = ?self.config.idle_timeout, "stream stalled");
                    self.apply(ChatEvent::Failed);
                    return;
                }
            };

            if !opened {
                opened = true;
                self.apply(ChatEvent::StreamOpened);
            }
            for event in decoder.feed(&chunk) {
                if let DeltaEvent::Content(text) = event {
                    self.apply(ChatEvent::Delta { text });
                }
            }
        }

        // A trailing line without its newline still counts.
        if let Some(DeltaEvent::Content(text)) = decoder.finish() {
            self.apply(ChatEvent::Delta { text });
        }
        self.apply(ChatEvent::Completed);
    }

    async fn email_turn(&mut self, body: String) {
        let request = ChatRequest::email(body.clone());
        match self.transport.send(&request).await {
            Ok(TransportReply::Ack(ack)) if ack.success => {
                let mailto = email::compose_mailto(&self.config.email, &body);
                self.apply(ChatEvent::EmailReady { mailto });
            }
            Ok(_) => {
                tracing::warn!("unexpected reply on the email path");
                self.apply(ChatEvent::Failed);
            }
            Err(err) => {
                tracing::warn!("email request failed: {err}");
                self.apply(ChatEvent::Failed);
            }
        }
    }
}
