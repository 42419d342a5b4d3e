//! folio-ai: completion-provider clients and the delta wire format
//!
//! This crate holds everything both ends of the chat pipeline agree on:
//! the message and request types, the `data: <JSON>` delta event format
//! with its incremental decoder, and the HTTP clients for the hosted
//! completion providers.

pub mod error;
pub mod providers;
pub mod stream;
pub mod types;

pub use error::{Error, Result};
pub use stream::{ByteStream, DeltaDecoder, DeltaEvent};
pub use types::*;
