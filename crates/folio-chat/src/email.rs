//! mailto composition for the email hand-off
//!
//! The gateway only acknowledges email submissions; building the URI and
//! opening it belong to the host environment. Recipient and subject are
//! fixed configuration, the body is the user's text percent-encoded.

use serde::{Deserialize, Serialize};

/// Where the composed email goes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub to: String,
    pub subject: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            to: "john.doe@example.com".to_string(),
            subject: "Portfolio contact".to_string(),
        }
    }
}

/// Build the `mailto:` URI for a submitted body
pub fn compose_mailto(config: &EmailConfig, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        config.to,
        urlencoding::encode(&config.subject),
        urlencoding::encode(body),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_is_percent_encoded() {
        let config = EmailConfig {
            to: "owner@example.com".into(),
            subject: "Hello from the site".into(),
        };
        let uri = compose_mailto(&config, "line one\nline two & more");
        assert_eq!(
            uri,
            "mailto:owner@example.com?subject=Hello%20from%20the%20site&body=line%20one%0Aline%20two%20%26%20more"
        );
    }

    #[test]
    fn test_default_recipient() {
        let uri = compose_mailto(&EmailConfig::default(), "hi");
        assert!(uri.starts_with("mailto:john.doe@example.com?"));
    }
}
