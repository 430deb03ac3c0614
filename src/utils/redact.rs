use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const INLINE_REDACTION: &str = "***REDACTED***";

static SENSITIVE_HEADER_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "authorization",
        "proxy-authorization",
        "x-api-key",
        "x-goog-api-key",
    ]
    .into_iter()
    .collect()
});

static INLINE_REDACTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"\bya29\.[A-Za-z0-9._-]{10,}").expect("inline redaction regex"),
            "ya29.***REDACTED***",
        ),
        (
            Regex::new(r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b")
                .expect("inline redaction regex"),
            INLINE_REDACTION,
        ),
        (
            Regex::new(r"\b(Bearer)\s+([A-Za-z0-9._~+/=-]{10,})").expect("inline redaction regex"),
            "$1 ***REDACTED***",
        ),
        (
            Regex::new(r"\bAIza[0-9A-Za-z_-]{20,}\b").expect("inline redaction regex"),
            "AIza***REDACTED***",
        ),
    ]
});

pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADER_KEYS.contains(name.trim().to_lowercase().as_str())
}

/// Masks a header value for diagnostics, keeping the auth scheme visible.
pub fn redact_header_value(name: &str, value: &str) -> String {
    if !is_sensitive_header(name) {
        return value.to_string();
    }
    match value.split_once(' ') {
        Some((scheme, _)) if !scheme.is_empty() => format!("{} {}", scheme, INLINE_REDACTION),
        _ => INLINE_REDACTION.to_string(),
    }
}

pub fn redact_text(value: &str) -> String {
    let mut out = value.to_string();
    for (pattern, replacement) in INLINE_REDACTION_PATTERNS.iter() {
        if pattern.is_match(&out) {
            out = pattern.replace_all(&out, *replacement).into_owned();
        }
    }
    out
}
