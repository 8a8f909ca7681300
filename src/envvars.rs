//! Environment-variable knobs.
//!
//! Values read here are parsed permissively: a missing or malformed value
//! silently falls back to the built-in default.

use std::env;

/// Overrides the size (in MB) above which a large-file warning is shown.
pub const LARGE_FILE_MB_VAR: &str = "BIOFLOW_LARGE_FILE_MB";

/// Default large-file warning threshold, in MB.
pub const DEFAULT_LARGE_FILE_MB: i64 = 500;

/// Parses an integer, returning `default` when `raw` is absent or not a number.
///
/// Surrounding whitespace and a leading sign are accepted.
pub fn parse_int_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads an integer environment variable with [`parse_int_or`] semantics.
pub fn env_int_or(key: &str, default: i64) -> i64 {
    parse_int_or(env::var(key).ok().as_deref(), default)
}

/// The current large-file warning threshold, in MB.
pub fn large_file_warning_mb() -> i64 {
    env_int_or(LARGE_FILE_MB_VAR, DEFAULT_LARGE_FILE_MB)
}
