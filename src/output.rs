//! Global diagnostic output configuration.
//!
//! This module provides centralized control over the crate's diagnostic
//! output: a single process-wide debug flag toggled by the provider
//! factory, plus macros for gated debug messages and warnings.
//!
//! ## Design Principles
//!
//! - Diagnostics go to stderr, never stdout
//! - Debug messages are suppressed unless debug mode is enabled
//! - Warnings are always shown
//! - The flag may be toggled again by later factory calls

use std::sync::atomic::{AtomicBool, Ordering};

/// Global debug flag, set by [`crate::create_provider`].
static DEBUG: AtomicBool = AtomicBool::new(false);

/// Enable or disable debug output.
///
/// Called by the provider factory on every invocation, so the most
/// recent configuration wins.
pub fn set_debug(enabled: bool) {
    DEBUG.store(enabled, Ordering::Relaxed);
}

/// Check whether debug output is enabled.
pub fn is_debug() -> bool {
    DEBUG.load(Ordering::Relaxed)
}

/// Print a debug message to stderr (only when debug mode is enabled).
///
/// Use this for request/response tracing and other verbose diagnostics.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::output::is_debug() {
            eprintln!($($arg)*);
        }
    };
}

/// Print a warning to stderr (always shown, even without debug mode).
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}
