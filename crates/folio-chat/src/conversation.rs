//! Conversation state: transcript, mode, and the per-turn phase machine.

use folio_ai::{ChatMessage, Role};
use serde::{Deserialize, Serialize};

/// Greeting seeded into a fresh chat transcript
pub const GREETING: &str = "Hi! Ask me about my professional experience and skills!";

/// Fixed assistant reply appended when a turn fails
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Fixed assistant reply appended once an email is handed to the mail app
pub const EMAIL_REPLY: &str = "Your email is ready to send from your mail app.";

/// What the widget is collecting input for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Questions answered by the assistant
    Chat,
    /// Text treated as an email body for the mailto hand-off
    Email,
}

/// How the most recent turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnOutcome {
    Success,
    Error,
}

/// Phase of the current turn. A new submission is accepted only in
/// `Idle` or `Settled`; `Sending` and `Streaming` block input, which is
/// the only concurrency control the pipeline needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnPhase {
    Idle,
    Sending,
    Streaming,
    Settled(TurnOutcome),
}

/// Conversation state: mode, turn phase, and the ordered transcript.
///
/// Owned by exactly one session and never persisted. Prior turns are
/// immutable; only the trailing assistant message of a streaming turn is
/// replaced as deltas arrive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub mode: ChatMode,
    pub phase: TurnPhase,
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    /// A fresh chat conversation with the greeting seeded
    pub fn new() -> Self {
        Self::with_mode(ChatMode::Chat)
    }

    /// A fresh conversation in the given mode
    pub fn with_mode(mode: ChatMode) -> Self {
        let messages = match mode {
            ChatMode::Chat => vec![ChatMessage::assistant(GREETING)],
            ChatMode::Email => vec![],
        };
        Self {
            mode,
            phase: TurnPhase::Idle,
            messages,
        }
    }

    /// Whether a new submission would be accepted
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, TurnPhase::Idle | TurnPhase::Settled(_))
    }

    /// The trailing assistant reply, if the current turn has produced one
    pub fn streaming_reply(&self) -> Option<&str> {
        match self.phase {
            TurnPhase::Streaming => self.messages.last().and_then(|m| {
                (m.role == Role::Assistant).then_some(m.content.as_str())
            }),
            _ => None,
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_greeting() {
        let conv = Conversation::new();
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.messages[0].content, GREETING);
        assert_eq!(conv.phase, TurnPhase::Idle);
    }

    #[test]
    fn test_email_mode_starts_empty() {
        let conv = Conversation::with_mode(ChatMode::Email);
        assert!(conv.messages.is_empty());
    }

    #[test]
    fn test_can_submit_by_phase() {
        let mut conv = Conversation::new();
        assert!(conv.can_submit());
        conv.phase = TurnPhase::Sending;
        assert!(!conv.can_submit());
        conv.phase = TurnPhase::Streaming;
        assert!(!conv.can_submit());
        conv.phase = TurnPhase::Settled(TurnOutcome::Error);
        assert!(conv.can_submit());
    }
}
