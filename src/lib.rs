//! # llm-translate - LLM-backed translation providers
//!
//! `llm-translate` delegates text translation to a large-language-model
//! backend — a local [Ollama](https://ollama.com) server or the
//! [OpenRouter](https://openrouter.ai) aggregator — through a single
//! provider abstraction. It turns `(text, target language)` into translated
//! text by building a prompt, issuing one chat-completion request, and
//! parsing the reply, including a batched variant that translates many
//! segments in one round trip.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_translate::{TranslatorConfig, create_provider};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = TranslatorConfig::from_toml_str(
//!     r#"
//!     provider = "ollama"
//!     ollama_model = "qwen2.5:7b"
//!     "#,
//! )?;
//!
//! let provider = create_provider(config);
//! let translated = provider.translate("Hello", "Japanese", None).await?;
//!
//! let segments = vec!["Good morning".to_string(), "Good night".to_string()];
//! let translations = provider.translate_batch(&segments, "Japanese", None).await?;
//! assert_eq!(translations.len(), segments.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Guarantees
//!
//! - Batched results are always positionally aligned with the input: a
//!   miscounted model reply is padded or truncated, never an error.
//! - `test_connection` never fails; it reports status as a value for
//!   display on a settings screen.
//! - No retries, timeouts, or fallback here — a failed call surfaces
//!   immediately so the caller can apply its own policy.

/// Parsing of batched model replies (delimiter protocol).
pub mod batch;

/// Provider configuration.
pub mod config;

/// Global diagnostic output (debug flag, stderr macros).
pub mod output;

/// Prompt construction for single and batched requests.
pub mod prompt;

/// The provider abstraction and the Ollama/OpenRouter backends.
pub mod provider;

pub use config::TranslatorConfig;
pub use provider::{
    ConnectionTest, OllamaProvider, OpenRouterProvider, Provider, create_provider,
};
