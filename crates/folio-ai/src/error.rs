//! Error types for folio-ai

use thiserror::Error;

/// Result type alias using the folio-ai Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to completion providers
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a status line arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider answered with a non-success status and a textual body
    #[error("upstream status {code}: {body}")]
    Status { code: u16, body: String },

    /// Invalid or missing API key
    #[error("invalid or missing API key")]
    InvalidApiKey,

    /// The byte stream broke mid-response
    #[error("stream error: {0}")]
    Stream(String),

    /// No chunk arrived within the idle window
    #[error("stream stalled: no chunk within {0:?}")]
    Stalled(std::time::Duration),
}

impl Error {
    /// Create a status error from a code and response body
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        Self::Status {
            code,
            body: body.into(),
        }
    }

    /// True when the call failed in transit rather than with an upstream
    /// status reply. Transport failures are the ones eligible for the
    /// secondary-provider fallback.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Stream(_) | Error::Stalled(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_not_transport() {
        assert!(!Error::status(429, "rate limited").is_transport());
        assert!(!Error::status(500, "oops").is_transport());
    }

    #[test]
    fn test_stream_errors_are_transport() {
        assert!(Error::Stream("connection reset".into()).is_transport());
        assert!(Error::Stalled(std::time::Duration::from_secs(30)).is_transport());
    }

    #[test]
    fn test_non_transport_variants() {
        assert!(!Error::InvalidApiKey.is_transport());
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!Error::Json(json_err).is_transport());
    }
}
