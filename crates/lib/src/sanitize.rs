//! Redaction of secrets from error messages before they reach the caller.
//!
//! RPC endpoints often embed credentials, either as `user:password@host` or as an
//! `api-key` query parameter, and both end up verbatim in `solana_client` errors.

use regex::Regex;
use std::sync::LazyLock;

static URL_WITH_CREDENTIALS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z][a-z0-9+.-]*://[^:@\s]+:[^@\s]+@[^\s]+")
        .expect("Failed to create url regex pattern")
});

static API_KEY_PARAM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(api[-_]?key|token|secret)=[^&\s]+")
        .expect("Failed to create api key regex pattern")
});

static HEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:0x)?[0-9a-fA-F]{32,}").expect("Failed to create hex regex pattern")
});

/// Sanitizes a message by redacting sensitive information
pub fn sanitize_message(message: &str) -> String {
    let result = URL_WITH_CREDENTIALS_PATTERN.replace_all(message, "[REDACTED_URL]");
    let result = API_KEY_PARAM_PATTERN.replace_all(&result, "$1=[REDACTED]");
    HEX_PATTERN.replace_all(&result, "[REDACTED_HEX]").to_string()
}

/// Formats an error, sanitized unless the `unsafe-debug` feature is enabled
#[macro_export]
macro_rules! sanitize_error {
    ($error:expr) => {{
        #[cfg(feature = "unsafe-debug")]
        {
            format!("{}", $error)
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            $crate::sanitize::sanitize_message(&format!("{}", $error))
        }
    }};
}
