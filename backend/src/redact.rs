//! Log redaction
//!
//! User text is logged as a short preview. Card numbers, e-mail addresses and
//! api-key/token assignments are masked before they reach the logs.

use once_cell::sync::Lazy;
use regex::Regex;

/// Replacement for masked fragments
pub const REDACTED: &str = "[REDACTED]";

static CREDIT_CARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b").expect("credit card pattern is valid")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern is valid")
});

static API_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(api[_-]?key|apikey|token)[\s:=]+[\w\-]+").expect("api key pattern is valid")
});

/// Mask sensitive fragments in `text`
pub fn redact(text: &str) -> String {
    let text = CREDIT_CARD.replace_all(text, REDACTED);
    let text = EMAIL.replace_all(&text, REDACTED);
    API_KEY.replace_all(&text, REDACTED).into_owned()
}

/// Redacted preview of at most `max_chars` characters
pub fn preview(text: &str, max_chars: usize) -> String {
    let truncated: String = text.chars().take(max_chars).collect();
    redact(&truncated)
}
