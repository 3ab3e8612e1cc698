//! The provider abstraction and its concrete backends.

mod factory;
mod ollama;
mod openrouter;

pub use factory::create_provider;
pub use ollama::OllamaProvider;
pub use openrouter::OpenRouterProvider;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::config::TranslatorConfig;
use crate::debug;
use crate::{batch, prompt};

/// Result of a connection test, shaped for display on a settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionTest {
    pub success: bool,
    pub message: String,
    /// The model that answered the probe, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// The probe's sample translation, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_translation: Option<String>,
}

impl ConnectionTest {
    pub fn ok(message: impl Into<String>, model: impl Into<String>, sample: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            model: Some(model.into()),
            test_translation: Some(sample.into()),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            model: None,
            test_translation: None,
        }
    }
}

/// A translation backend over one LLM chat-completion HTTP API.
///
/// Backends supply [`call_api`](Provider::call_api) and
/// [`test_connection`](Provider::test_connection); translation and prompt
/// construction are provided on top of those. Instances are immutable
/// after construction and safe to share across tasks.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Backend identity, used only for logging.
    fn name(&self) -> &'static str;

    /// The configuration this provider was built from.
    fn config(&self) -> &TranslatorConfig;

    /// Sends one prompt to the backend and returns the raw reply text.
    ///
    /// This is the single network hook every backend supplies; the
    /// provided translation methods are built on it.
    async fn call_api(&self, prompt: &str) -> Result<String>;

    /// Probes the backend for reachability and credentials.
    ///
    /// Never fails: every internal error is folded into a
    /// `ConnectionTest` with `success: false`.
    async fn test_connection(&self) -> ConnectionTest;

    /// Builds the prompt for a single translation, honoring the
    /// configured custom template.
    fn build_prompt(&self, text: &str, target_lang: &str) -> String {
        prompt::build_prompt(text, target_lang, self.config().custom_prompt.as_deref())
    }

    /// Builds the prompt for a batched translation.
    fn build_batch_prompt(&self, texts: &[String], target_lang: &str) -> String {
        prompt::build_batch_prompt(texts, target_lang)
    }

    /// Translates one text. Transport and HTTP failures propagate to the
    /// caller, who owns fallback policy.
    ///
    /// `source_lang` is informational only; the model infers the source
    /// language from the text itself.
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<String> {
        debug!(
            "[{}] translating {} chars ({} -> {})",
            self.name(),
            text.len(),
            source_lang.unwrap_or("auto"),
            target_lang
        );
        let prompt = self.build_prompt(text, target_lang);
        self.call_api(&prompt).await
    }

    /// Translates an ordered sequence of segments in one round trip.
    ///
    /// The result always has exactly as many elements as the input:
    /// an empty input returns immediately without a network call, a
    /// single segment delegates to [`translate`](Provider::translate)
    /// (skipping the delimiter protocol for the trivial case), and a
    /// miscounted model reply is padded or truncated.
    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if texts.len() == 1 {
            let translated = self.translate(&texts[0], target_lang, source_lang).await?;
            return Ok(vec![translated]);
        }

        debug!(
            "[{}] batch translating {} segments ({} -> {})",
            self.name(),
            texts.len(),
            source_lang.unwrap_or("auto"),
            target_lang
        );
        let prompt = self.build_batch_prompt(texts, target_lang);
        let raw = self.call_api(&prompt).await?;
        Ok(batch::parse_batch_response(&raw, texts.len()))
    }
}

// Wire types shared by both backends. Cow avoids cloning prompt strings
// that are only borrowed for serialization.
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Message<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct Message<'a> {
    pub role: &'static str,
    pub content: Cow<'a, str>,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn for_prompt(model: &'a str, prompt: &'a str, config: &TranslatorConfig) -> Self {
        Self {
            model,
            messages: vec![Message {
                role: "user",
                content: Cow::Borrowed(prompt),
            }],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            stream: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Choice {
    #[serde(default)]
    pub message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Extracts the assistant reply, degrading to an empty string when
    /// the expected shape is absent.
    pub fn content(&self) -> String {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or("")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_test_constructors() {
        let ok = ConnectionTest::ok("connected", "qwen2.5:7b", "你好");
        assert!(ok.success);
        assert_eq!(ok.model.as_deref(), Some("qwen2.5:7b"));
        assert_eq!(ok.test_translation.as_deref(), Some("你好"));

        let fail = ConnectionTest::fail("boom");
        assert!(!fail.success);
        assert_eq!(fail.message, "boom");
        assert!(fail.model.is_none());
    }

    #[test]
    fn test_response_content_extraction() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Bonjour  "}}]}"#,
        )
        .unwrap();
        assert_eq!(response.content(), "Bonjour");
    }

    #[test]
    fn test_response_missing_shape_degrades_to_empty() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.content(), "");

        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{}}]}"#).unwrap();
        assert_eq!(response.content(), "");

        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(response.content(), "");
    }

    #[test]
    fn test_request_serialization() {
        let config = TranslatorConfig::default();
        let request = ChatCompletionRequest::for_prompt("qwen2.5:7b", "Translate this", &config);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "qwen2.5:7b");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Translate this");
        assert_eq!(json["stream"], false);
        assert_eq!(json["max_tokens"], 2000);
    }
}
