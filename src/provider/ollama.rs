//! Backend for a local Ollama server.
//!
//! Talks to Ollama's OpenAI-compatible chat-completions endpoint for
//! translation, and to its native `/api/tags` endpoint to list locally
//! installed models during a connection test.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ChatCompletionRequest, ChatCompletionResponse, ConnectionTest, Provider};
use crate::config::TranslatorConfig;
use crate::debug;

pub struct OllamaProvider {
    client: Client,
    config: TranslatorConfig,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

impl OllamaProvider {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.ollama_endpoint.trim_end_matches('/')
        )
    }

    fn tags_url(&self) -> String {
        format!(
            "{}/api/tags",
            self.config.ollama_endpoint.trim_end_matches('/')
        )
    }

    /// Lists the models installed on the server.
    async fn list_models(&self) -> Result<Vec<String>> {
        let url = self.tags_url();
        let response = self.client.get(&url).send().await.with_context(|| {
            format!(
                "Cannot connect to Ollama at {}",
                self.config.ollama_endpoint
            )
        })?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Ollama model listing at {url} failed with status {}",
                response.status()
            );
        }

        let list: ModelList = response
            .json()
            .await
            .context("Failed to parse Ollama model list")?;

        Ok(list.models.into_iter().map(|m| m.name).collect())
    }

    /// The connection-test body, with failures surfaced as `Err` so the
    /// trait method can fold them into a failure result.
    async fn run_connection_test(&self) -> Result<ConnectionTest> {
        let available = self.list_models().await?;

        let model = &self.config.ollama_model;
        let found = available
            .iter()
            .any(|name| name == model || name.starts_with(&format!("{model}:")));

        if !found {
            return Ok(ConnectionTest::fail(format!(
                "Model '{}' not found on the server. Available models: {}",
                model,
                available.join(", ")
            )));
        }

        let sample = self.translate("Hello", "Chinese", None).await?;
        Ok(ConnectionTest::ok(
            "Connection successful",
            model.clone(),
            sample,
        ))
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    async fn call_api(&self, prompt: &str) -> Result<String> {
        let url = self.completions_url();
        let request = ChatCompletionRequest::for_prompt(&self.config.ollama_model, prompt, &self.config);

        debug!("[ollama] POST {url} (model {})", self.config.ollama_model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to connect to Ollama at {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama request failed with status {status}: {body}");
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(parsed.content())
    }

    async fn test_connection(&self) -> ConnectionTest {
        match self.run_connection_test().await {
            Ok(result) => result,
            Err(e) => ConnectionTest::fail(e.to_string()),
        }
    }
}
