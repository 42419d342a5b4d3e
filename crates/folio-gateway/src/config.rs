//! Gateway runtime configuration
//!
//! Credentials come from the environment; either one may be absent. With
//! neither present the gateway still serves, answering every chat with
//! the fixed unavailability message. Key values never reach the logs.

use std::path::PathBuf;

/// Environment variable holding the primary (Groq) credential
pub const GROQ_KEY_VAR: &str = "GROQ_API_KEY";
/// Environment variable holding the secondary (LlamaAPI) credential
pub const LLAMA_KEY_VAR: &str = "LLAMA_API_KEY";
/// Environment variable overriding the persona file location
pub const PERSONA_PATH_VAR: &str = "FOLIO_PERSONA_PATH";

/// Runtime configuration for the gateway
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Primary provider credential
    pub groq_api_key: Option<String>,
    /// Secondary provider credential
    pub llama_api_key: Option<String>,
    /// Persona file on disk; the embedded copy is used when unset
    pub persona_path: Option<PathBuf>,
}

impl GatewayConfig {
    /// Read configuration from the environment
    pub fn from_env() -> Self {
        Self {
            groq_api_key: non_empty_var(GROQ_KEY_VAR),
            llama_api_key: non_empty_var(LLAMA_KEY_VAR),
            persona_path: non_empty_var(PERSONA_PATH_VAR).map(PathBuf::from),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_credentials() {
        let config = GatewayConfig::default();
        assert!(config.groq_api_key.is_none());
        assert!(config.llama_api_key.is_none());
        assert!(config.persona_path.is_none());
    }
}
