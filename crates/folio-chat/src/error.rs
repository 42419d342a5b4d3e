//! Error types for folio-chat

use thiserror::Error;

/// Result type alias using the folio-chat Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the transport seam. The session never propagates these to
/// its caller; every one degrades into a `Failed` event on the transcript.
#[derive(Error, Debug)]
pub enum Error {
    /// Provider/protocol layer error
    #[error(transparent)]
    Ai(#[from] folio_ai::Error),

    /// The gateway answered with a non-success status
    #[error("gateway status {code}: {body}")]
    Gateway { code: u16, body: String },
}
