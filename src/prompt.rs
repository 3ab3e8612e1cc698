//! Prompt construction for single and batched translation requests.

/// Delimiter that separates segments in a batched prompt and in the
/// model's batched reply.
pub const BATCH_SEPARATOR: &str = "[---SEP---]";

pub const DEFAULT_PROMPT_TEMPLATE: &str =
    "You are a professional translator. Translate the following text to {targetLang}. \
     Output only the translated text without any explanation or commentary. \
     Preserve the original formatting, including line breaks.\n\n{text}";

const BATCH_PROMPT_TEMPLATE: &str =
    "You are a professional translator. Translate each of the following text segments \
     to {targetLang}. The segments are separated by the marker [---SEP---]. \
     Reply with the translated segments separated by the same [---SEP---] marker, \
     in the same order. Output only the translations without any explanation \
     or commentary.\n\n{text}";

/// Builds the prompt for a single translation request.
///
/// With a custom template, only the *first* occurrence of `{text}` and the
/// first occurrence of `{targetLang}` are substituted; a placeholder that
/// appears twice keeps its second occurrence verbatim. This mirrors the
/// behavior callers already rely on, so templates authored against it keep
/// working.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_prompt(text: &str, target_lang: &str, custom_template: Option<&str>) -> String {
    let template = custom_template.unwrap_or(DEFAULT_PROMPT_TEMPLATE);
    template
        .replacen("{text}", text, 1)
        .replacen("{targetLang}", target_lang, 1)
}

/// Builds the prompt for a batched translation request.
///
/// Segments are joined with the [`BATCH_SEPARATOR`] marker; the wrapping
/// instructions tell the model to preserve the marker and the ordering in
/// its reply.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_batch_prompt(texts: &[String], target_lang: &str) -> String {
    let joined = texts.join(&format!("\n{BATCH_SEPARATOR}\n"));
    BATCH_PROMPT_TEMPLATE
        .replacen("{text}", &joined, 1)
        .replacen("{targetLang}", target_lang, 1)
}
