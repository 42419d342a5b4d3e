//! Persona preambles as injected configuration
//!
//! The preamble defines the assistant's voice and what it is allowed to
//! know. It is data, not code: a TOML file keyed by language, loaded once
//! at process start. A copy ships inside the binary as the default.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Built-in persona file, used when no path is configured
const BUILTIN: &str = include_str!("../assets/personas.toml");

/// Errors loading a persona file
#[derive(Error, Debug)]
pub enum PersonaError {
    #[error("failed to read persona file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse persona file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("default language '{0}' has no persona entry")]
    MissingDefault(String),
}

#[derive(Debug, Deserialize)]
struct PersonaFile {
    default: String,
    personas: HashMap<String, Persona>,
}

#[derive(Debug, Deserialize)]
struct Persona {
    text: String,
}

/// Language-keyed persona preambles with a baseline fallback
#[derive(Debug, Clone)]
pub struct PersonaSet {
    default: String,
    personas: HashMap<String, String>,
}

impl PersonaSet {
    /// Parse a persona file
    pub fn from_toml_str(raw: &str) -> Result<Self, PersonaError> {
        let file: PersonaFile = toml::from_str(raw)?;
        if !file.personas.contains_key(&file.default) {
            return Err(PersonaError::MissingDefault(file.default));
        }
        Ok(Self {
            default: file.default,
            personas: file
                .personas
                .into_iter()
                .map(|(lang, persona)| (lang, persona.text))
                .collect(),
        })
    }

    /// Load a persona file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersonaError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// The copy embedded in the binary
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN).expect("built-in persona file is valid")
    }

    /// The preamble for a language, falling back to the baseline
    pub fn preamble(&self, language: Option<&str>) -> &str {
        language
            .and_then(|lang| self.personas.get(lang))
            .unwrap_or_else(|| &self.personas[&self.default])
    }

    /// Languages with a persona entry
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.personas.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
default = "en"

[personas.en]
text = "english persona"

[personas.fr]
text = "persona en francais"
"#;

    #[test]
    fn test_language_selection() {
        let set = PersonaSet::from_toml_str(SAMPLE).unwrap();
        assert_eq!(set.preamble(Some("fr")), "persona en francais");
        assert_eq!(set.preamble(Some("en")), "english persona");
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let set = PersonaSet::from_toml_str(SAMPLE).unwrap();
        assert_eq!(set.preamble(Some("ja")), "english persona");
        assert_eq!(set.preamble(None), "english persona");
    }

    #[test]
    fn test_missing_default_is_an_error() {
        let raw = r#"
default = "de"

[personas.en]
text = "english persona"
"#;
        assert!(matches!(
            PersonaSet::from_toml_str(raw),
            Err(PersonaError::MissingDefault(lang)) if lang == "de"
        ));
    }

    #[test]
    fn test_builtin_parses_and_has_english() {
        let set = PersonaSet::builtin();
        assert!(set.preamble(None).contains("portfolio"));
        assert!(set.languages().any(|lang| lang == "en"));
    }
}
