//! Provider selection.

use crate::config::TranslatorConfig;
use crate::output;
use crate::warn;

use super::{OllamaProvider, OpenRouterProvider, Provider};

/// Creates the provider selected by the configuration.
///
/// Also applies the configuration's debug flag to the global diagnostic
/// output. An unrecognized selector warns and falls back to the Ollama
/// backend. Every call yields a fresh, independent instance.
pub fn create_provider(config: TranslatorConfig) -> Box<dyn Provider> {
    output::set_debug(config.debug);

    let selector = config.provider.clone();
    match selector.as_str() {
        "openrouter" => Box::new(OpenRouterProvider::new(config)),
        "ollama" => Box::new(OllamaProvider::new(config)),
        other => {
            warn!("Unknown provider '{other}', falling back to ollama");
            Box::new(OllamaProvider::new(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // create_provider writes the process-wide debug flag, so every test
    // that calls it shares the debug_flag serial key.
    #[test]
    #[serial_test::serial(debug_flag)]
    fn test_creates_ollama_by_default() {
        let provider = create_provider(TranslatorConfig::default());
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    #[serial_test::serial(debug_flag)]
    fn test_creates_openrouter() {
        let config = TranslatorConfig {
            provider: "openrouter".to_string(),
            ..TranslatorConfig::default()
        };
        let provider = create_provider(config);
        assert_eq!(provider.name(), "openrouter");
    }

    #[test]
    #[serial_test::serial(debug_flag)]
    fn test_unknown_selector_falls_back_to_ollama() {
        let config = TranslatorConfig {
            provider: "deepl".to_string(),
            ..TranslatorConfig::default()
        };
        let provider = create_provider(config);
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    #[serial_test::serial(debug_flag)]
    fn test_applies_debug_flag() {
        let config = TranslatorConfig {
            debug: true,
            ..TranslatorConfig::default()
        };
        let _ = create_provider(config);
        assert!(output::is_debug());

        let _ = create_provider(TranslatorConfig::default());
        assert!(!output::is_debug());
    }
}
