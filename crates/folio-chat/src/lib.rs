//! folio-chat: conversation state machine and stream consumer
//!
//! This crate owns the client side of the chat pipeline: a pure reducer
//! over an explicit `Conversation` value, a command-channel session that
//! drives one turn at a time, and the transport seam that talks to the
//! gateway.

pub mod conversation;
pub mod email;
pub mod error;
pub mod events;
pub mod session;
pub mod transport;

pub use conversation::{ChatMode, Conversation, TurnOutcome, TurnPhase};
pub use email::EmailConfig;
pub use error::{Error, Result};
pub use events::ChatEvent;
pub use session::{ChatCommand, ChatSession, SessionConfig};
pub use transport::{ChatTransport, HttpTransport, TransportReply};
