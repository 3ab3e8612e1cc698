//! Parsing of batched translation replies.
//!
//! The batch protocol trusts the model to reproduce the `[---SEP---]`
//! marker between translated segments. Models sometimes drop or invent
//! separators, so a count mismatch is corrected best-effort instead of
//! aborting the whole batch.

use crate::prompt::BATCH_SEPARATOR;
use crate::warn;

/// Splits a batched model reply into exactly `expected_count` segments.
///
/// The reply is split on the literal `[---SEP---]` marker and each segment
/// is trimmed, which also absorbs whatever whitespace the model put around
/// the marker. When the model returned the wrong number of segments, a
/// warning is logged and the result is padded with empty strings or
/// truncated from the end until the count matches. This never fails.
pub fn parse_batch_response(response: &str, expected_count: usize) -> Vec<String> {
    let mut segments: Vec<String> = response
        .split(BATCH_SEPARATOR)
        .map(|s| s.trim().to_string())
        .collect();

    if let Some(message) = mismatch_warning(segments.len(), expected_count) {
        warn!("{message}");
        segments.resize(expected_count, String::new());
    }

    segments
}

/// The warning for a miscounted reply, or `None` when the count matches.
///
/// Split out so the warning contract (when it fires and what it says) is
/// testable without capturing stderr.
fn mismatch_warning(got: usize, expected: usize) -> Option<String> {
    (got != expected).then(|| {
        format!("Batch translation returned {got} segments, expected {expected}; padding/truncating")
    })
}
