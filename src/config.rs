use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for the translation providers.
///
/// Supplied whole at provider construction and read-only afterwards.
/// Every field has a default, so a partial TOML document (or
/// `TranslatorConfig::default()`) is always valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Which backend to use: `"ollama"` or `"openrouter"`.
    pub provider: String,
    /// Base URL of the local Ollama server.
    pub ollama_endpoint: String,
    /// Model name on the Ollama server.
    pub ollama_model: String,
    /// Full chat-completions URL of the OpenRouter aggregator.
    pub openrouter_endpoint: String,
    /// Bearer token for OpenRouter. Empty means not configured.
    pub openrouter_api_key: String,
    /// Model identifier on OpenRouter.
    pub openrouter_model: String,
    /// Sampling temperature sent with every request.
    pub temperature: f32,
    /// Token limit sent with every request.
    pub max_tokens: u32,
    /// Optional prompt template with `{text}` and `{targetLang}`
    /// placeholders. When absent, a built-in template is used.
    pub custom_prompt: Option<String>,
    /// Enable verbose diagnostic output on stderr.
    pub debug: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            ollama_endpoint: "http://localhost:11434".to_string(),
            ollama_model: "qwen2.5:7b".to_string(),
            openrouter_endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            openrouter_api_key: String::new(),
            openrouter_model: "openai/gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            custom_prompt: None,
            debug: false,
        }
    }
}

impl TranslatorConfig {
    /// Parses a configuration from a TOML document.
    ///
    /// Unspecified fields fall back to their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse translator config")
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranslatorConfig::default();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.ollama_endpoint, "http://localhost:11434");
        assert_eq!(config.ollama_model, "qwen2.5:7b");
        assert_eq!(
            config.openrouter_endpoint,
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert!(config.openrouter_api_key.is_empty());
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens, 2000);
        assert!(config.custom_prompt.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = TranslatorConfig::from_toml_str(
            r#"
            provider = "openrouter"
            openrouter_api_key = "sk-or-test"
            "#,
        )
        .unwrap();

        assert_eq!(config.provider, "openrouter");
        assert_eq!(config.openrouter_api_key, "sk-or-test");
        // Untouched fields keep their defaults
        assert_eq!(config.ollama_model, "qwen2.5:7b");
        assert_eq!(config.max_tokens, 2000);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = TranslatorConfig::from_toml_str("").unwrap();
        assert_eq!(config.provider, "ollama");
    }

    #[test]
    fn test_invalid_toml_fails() {
        let result = TranslatorConfig::from_toml_str("provider = [not toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debug = true\ncustom_prompt = \"Say {text} in {targetLang}\"\n")
            .unwrap();

        let config = TranslatorConfig::load(&path).unwrap();
        assert!(config.debug);
        assert_eq!(
            config.custom_prompt.as_deref(),
            Some("Say {text} in {targetLang}")
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = TranslatorConfig::load(&dir.path().join("nope.toml"));
        assert!(result.is_err());
    }
}
