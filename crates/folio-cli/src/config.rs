//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Configuration for folio
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the gateway binds
    pub bind: Option<SocketAddr>,
    /// Gateway base URL the console client talks to
    pub gateway_url: Option<String>,
    /// Default language for persona selection
    pub language: Option<String>,
    /// Persona file path (the embedded copy is used when unset)
    pub persona_path: Option<String>,
    /// Recipient of the email hand-off
    pub contact_email: Option<String>,
    /// Subject line of the email hand-off
    pub contact_subject: Option<String>,
    /// Seconds without a chunk before a stream counts as stalled
    pub idle_timeout_secs: Option<u64>,
    /// API keys (alternative to environment variables)
    #[serde(default)]
    pub api_keys: ApiKeys,
}

/// API key configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    pub groq: Option<String>,
    pub llama: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for FOLIO_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("FOLIO_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            gateway_url: Some("http://127.0.0.1:8787".to_string()),
            language: Some("en".to_string()),
            contact_email: Some("john.doe@example.com".to_string()),
            contact_subject: Some("Portfolio contact".to_string()),
            idle_timeout_secs: Some(30),
            ..Default::default()
        };

        default_config.save()?;
        Ok(path)
    }
}
