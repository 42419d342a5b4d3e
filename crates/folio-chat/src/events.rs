//! Chat events and the pure conversation reducer

use folio_ai::{ChatMessage, Role};
use serde::{Deserialize, Serialize};

use crate::conversation::{
    ChatMode, Conversation, EMAIL_REPLY, ERROR_REPLY, TurnOutcome, TurnPhase,
};

/// Events applied to a `Conversation`. The session broadcasts every event
/// it applies, so observers can mirror state with the same reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// User submitted input (already trimmed)
    Submitted { text: String },

    /// First chunk of the response stream arrived
    StreamOpened,

    /// An incremental fragment of the assistant reply
    Delta { text: String },

    /// The stream ended without a transport error
    Completed,

    /// The turn failed; a fixed error reply joins the transcript
    Failed,

    /// The widget switched modes; the conversation resets
    ModeChanged { mode: ChatMode },

    /// The email ack arrived and a mailto URI is ready to open
    EmailReady { mailto: String },
}

impl Conversation {
    /// Apply one event, producing the next state. Pure: no I/O, no
    /// rendering, total over every (state, event) pair. Events that make
    /// no sense in the current phase leave the state unchanged.
    pub fn apply(mut self, event: &ChatEvent) -> Conversation {
        match event {
            ChatEvent::Submitted { text } => {
                let text = text.trim();
                if text.is_empty() || !self.can_submit() {
                    return self;
                }
                self.messages.push(ChatMessage::user(text));
                self.phase = TurnPhase::Sending;
                self
            }

            ChatEvent::StreamOpened => {
                if self.phase == TurnPhase::Sending {
                    self.phase = TurnPhase::Streaming;
                }
                self
            }

            ChatEvent::Delta { text } => {
                if self.phase != TurnPhase::Streaming {
                    return self;
                }
                // A trailing assistant message can only belong to the turn
                // in flight: the submit that opened it pushed a user
                // message after every earlier reply.
                let extend = matches!(
                    self.messages.last(),
                    Some(last) if last.role == Role::Assistant
                );
                if extend {
                    if let Some(last) = self.messages.last_mut() {
                        last.content.push_str(text);
                    }
                } else {
                    self.messages.push(ChatMessage::assistant(text));
                }
                self
            }

            ChatEvent::Completed => {
                if matches!(self.phase, TurnPhase::Sending | TurnPhase::Streaming) {
                    self.phase = TurnPhase::Settled(TurnOutcome::Success);
                }
                self
            }

            ChatEvent::Failed => {
                if matches!(self.phase, TurnPhase::Sending | TurnPhase::Streaming) {
                    self.messages.push(ChatMessage::assistant(ERROR_REPLY));
                    self.phase = TurnPhase::Settled(TurnOutcome::Error);
                }
                self
            }

            ChatEvent::ModeChanged { mode } => {
                if *mode == self.mode {
                    return self;
                }
                Conversation::with_mode(*mode)
            }

            ChatEvent::EmailReady { .. } => {
                if self.phase == TurnPhase::Sending {
                    self.messages.push(ChatMessage::assistant(EMAIL_REPLY));
                    self.phase = TurnPhase::Settled(TurnOutcome::Success);
                }
                self
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::GREETING;

    fn submitted(text: &str) -> ChatEvent {
        ChatEvent::Submitted { text: text.into() }
    }

    fn delta(text: &str) -> ChatEvent {
        ChatEvent::Delta { text: text.into() }
    }

    #[test]
    fn test_submit_appends_user_and_sends() {
        let conv = Conversation::new().apply(&submitted("hello"));
        assert_eq!(conv.phase, TurnPhase::Sending);
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[1].role, Role::User);
        assert_eq!(conv.messages[1].content, "hello");
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let before = Conversation::new();
        let after = before.clone().apply(&submitted("   "));
        assert_eq!(before, after);
    }

    #[test]
    fn test_submit_while_in_flight_is_noop() {
        let streaming = Conversation::new()
            .apply(&submitted("first"))
            .apply(&ChatEvent::StreamOpened);
        let len = streaming.messages.len();

        let after = streaming.clone().apply(&submitted("second"));
        assert_eq!(after.messages.len(), len);
        assert_eq!(after, streaming);

        let sending = Conversation::new().apply(&submitted("first"));
        let len = sending.messages.len();
        let after = sending.apply(&submitted("second"));
        assert_eq!(after.messages.len(), len);
    }

    #[test]
    fn test_deltas_build_a_single_reply() {
        let conv = Conversation::new()
            .apply(&submitted("hi"))
            .apply(&ChatEvent::StreamOpened)
            .apply(&delta("Hello"))
            .apply(&delta(" there"))
            .apply(&delta("!"));

        // greeting + user + one accumulating assistant message
        assert_eq!(conv.messages.len(), 3);
        assert_eq!(conv.messages[2].content, "Hello there!");
        assert_eq!(conv.streaming_reply(), Some("Hello there!"));
    }

    #[test]
    fn test_completed_settles_success() {
        let conv = Conversation::new()
            .apply(&submitted("hi"))
            .apply(&ChatEvent::StreamOpened)
            .apply(&delta("ok"))
            .apply(&ChatEvent::Completed);
        assert_eq!(conv.phase, TurnPhase::Settled(TurnOutcome::Success));
        assert!(conv.can_submit());
    }

    #[test]
    fn test_failed_appends_fixed_reply() {
        let conv = Conversation::new()
            .apply(&submitted("hi"))
            .apply(&ChatEvent::Failed);
        assert_eq!(conv.phase, TurnPhase::Settled(TurnOutcome::Error));
        assert_eq!(conv.messages.last().unwrap().content, ERROR_REPLY);
    }

    #[test]
    fn test_previous_reply_is_immutable_across_turns() {
        let conv = Conversation::new()
            .apply(&submitted("first"))
            .apply(&ChatEvent::StreamOpened)
            .apply(&delta("answer one"))
            .apply(&ChatEvent::Completed)
            .apply(&submitted("second"))
            .apply(&ChatEvent::StreamOpened)
            .apply(&delta("answer two"));

        assert_eq!(conv.messages[2].content, "answer one");
        assert_eq!(conv.messages[4].content, "answer two");
    }

    #[test]
    fn test_delta_outside_streaming_is_ignored() {
        let before = Conversation::new();
        let after = before.clone().apply(&delta("stray"));
        assert_eq!(before, after);
    }

    #[test]
    fn test_mode_switch_resets_transcript() {
        let conv = Conversation::new()
            .apply(&submitted("hi"))
            .apply(&ChatEvent::StreamOpened)
            .apply(&delta("partial"))
            .apply(&ChatEvent::Completed)
            .apply(&ChatEvent::ModeChanged {
                mode: ChatMode::Email,
            });

        assert_eq!(conv.mode, ChatMode::Email);
        assert!(conv.messages.is_empty());
        assert_eq!(conv.phase, TurnPhase::Idle);

        let back = conv.apply(&ChatEvent::ModeChanged {
            mode: ChatMode::Chat,
        });
        assert_eq!(back.messages.len(), 1);
        assert_eq!(back.messages[0].content, GREETING);
    }

    #[test]
    fn test_same_mode_change_is_noop() {
        let conv = Conversation::new().apply(&submitted("keep me"));
        let after = conv.clone().apply(&ChatEvent::ModeChanged {
            mode: ChatMode::Chat,
        });
        assert_eq!(conv, after);
    }

    #[test]
    fn test_email_ready_confirms_and_settles() {
        let conv = Conversation::with_mode(ChatMode::Email)
            .apply(&submitted("please contact me"))
            .apply(&ChatEvent::EmailReady {
                mailto: "mailto:someone@example.com".into(),
            });
        assert_eq!(conv.phase, TurnPhase::Settled(TurnOutcome::Success));
        assert_eq!(conv.messages.last().unwrap().content, EMAIL_REPLY);
    }
}
