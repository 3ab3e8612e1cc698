//! Backend for the OpenRouter cloud aggregator.
//!
//! Same chat-completion protocol as the Ollama backend, plus bearer-token
//! authentication and the aggregator's identification headers.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;

use super::{ChatCompletionRequest, ChatCompletionResponse, ConnectionTest, Provider};
use crate::config::TranslatorConfig;
use crate::debug;

const REFERER_HEADER: &str = "https://github.com/d2verb/llm-translate";
const TITLE_HEADER: &str = "LLM Translate";

pub struct OpenRouterProvider {
    client: Client,
    config: TranslatorConfig,
}

impl OpenRouterProvider {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Pulls a human-readable message out of an aggregator error body.
    ///
    /// OpenRouter errors look like `{"error": {"message": "..."}}`; when
    /// the body is not JSON or the field is absent, the caller falls back
    /// to the HTTP status text.
    fn extract_error_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .pointer("/error/message")
            .and_then(|m| m.as_str())
            .map(String::from)
    }

    async fn run_connection_test(&self) -> Result<ConnectionTest> {
        let sample = self.translate("Hello", "Chinese", None).await?;
        Ok(ConnectionTest::ok(
            "Connection successful",
            self.config.openrouter_model.clone(),
            sample,
        ))
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    async fn call_api(&self, prompt: &str) -> Result<String> {
        if self.config.openrouter_api_key.is_empty() {
            bail!("OpenRouter API key is not configured");
        }

        let url = &self.config.openrouter_endpoint;
        let request =
            ChatCompletionRequest::for_prompt(&self.config.openrouter_model, prompt, &self.config);

        debug!(
            "[openrouter] POST {url} (model {})",
            self.config.openrouter_model
        );

        let response = self
            .client
            .post(url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.openrouter_api_key),
            )
            .header("HTTP-Referer", REFERER_HEADER)
            .header("X-Title", TITLE_HEADER)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to connect to OpenRouter at {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let status_text = status.canonical_reason().unwrap_or("Unknown error");
            let body = response.text().await.unwrap_or_default();
            let message =
                Self::extract_error_message(&body).unwrap_or_else(|| status_text.to_string());
            bail!("OpenRouter request failed with status {status}: {message}");
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse OpenRouter response")?;

        Ok(parsed.content())
    }

    async fn test_connection(&self) -> ConnectionTest {
        if self.config.openrouter_api_key.is_empty() {
            return ConnectionTest::fail("API key is not configured");
        }

        match self.run_connection_test().await {
            Ok(result) => result,
            Err(e) => ConnectionTest::fail(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_openrouter_shape() {
        let body = r#"{"error": {"message": "invalid api key", "code": 401}}"#;
        assert_eq!(
            OpenRouterProvider::extract_error_message(body).as_deref(),
            Some("invalid api key")
        );
    }

    #[test]
    fn test_extract_error_message_absent_field() {
        assert!(OpenRouterProvider::extract_error_message(r#"{"detail": "nope"}"#).is_none());
    }

    #[test]
    fn test_extract_error_message_not_json() {
        assert!(OpenRouterProvider::extract_error_message("<html>502</html>").is_none());
    }
}
