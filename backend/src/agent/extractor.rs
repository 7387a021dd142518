//! Slot extraction
//!
//! The booking agent delegates language understanding to a `SlotExtractor`:
//! pulling slot values out of free text, and deciding whether a reply
//! confirms the booking summary. Parsing of the model's JSON lives here so
//! every backend shares the same repair and defaulting rules.

use super::slots::{SlotName, Slots};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use thiserror::Error;

/// Errors raised by an extractor
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The LLM server could not be reached or answered with an error
    #[error("LLM request failed: {0}")]
    Request(String),

    /// The model output was not valid JSON, even after repair
    #[error("Invalid JSON from model: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The model output lacks a required key
    #[error("Missing '{0}' key in model output")]
    MissingKey(&'static str),
}

/// Result of one extraction call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Slot values found in the message, merged with the ones already known
    pub updated_slots: Slots,
    /// Key of the next missing slot, or `none`
    pub next_missing: String,
    /// Follow-up question proposed by the model (may be empty)
    pub next_question: String,
}

impl Extraction {
    /// Extraction used when the model is unavailable: nothing new learned
    pub fn fallback(slots: &Slots) -> Self {
        let next = slots.missing().first().copied();
        Self {
            updated_slots: slots.clone(),
            next_missing: next.map_or("none", |n| n.key()).to_string(),
            next_question: next.map_or("", |n| n.fallback_question()).to_string(),
        }
    }
}

/// Language understanding used by the booking agent
#[async_trait]
pub trait SlotExtractor: Send + Sync {
    /// Extract slot values from `user_message`
    async fn extract(
        &self,
        slots: &Slots,
        last_question: &str,
        user_message: &str,
    ) -> Result<Extraction, ExtractorError>;

    /// Decide whether `user_message` confirms the booking summary
    async fn detect_confirmation(
        &self,
        last_question: &str,
        user_message: &str,
    ) -> Result<bool, ExtractorError>;
}

/// Close a truncated JSON object by appending the missing braces
pub fn repair_json(raw: &str) -> String {
    let trimmed = raw.trim();
    let open = trimmed.matches('{').count();
    let close = trimmed.matches('}').count();
    let mut repaired = trimmed.to_string();
    if open > close {
        tracing::warn!(missing = open - close, "Model JSON truncated, repairing");
        repaired.push_str(&"}".repeat(open - close));
    }
    repaired
}

/// Parse the model's extraction output
///
/// `updated_slots` is required; `next_missing` and `next_question` default
/// from the merged slots.
pub fn parse_extraction(raw: &str, current: &Slots) -> Result<Extraction, ExtractorError> {
    let parsed: Value = serde_json::from_str(&repair_json(raw))?;
    let update = parsed
        .get("updated_slots")
        .ok_or(ExtractorError::MissingKey("updated_slots"))?;

    let mut updated_slots = current.clone();
    updated_slots.merge(&Slots::from_json_lenient(update));

    let next_missing = parsed
        .get("next_missing")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            updated_slots
                .missing()
                .first()
                .map_or("none", |n| n.key())
                .to_string()
        });
    let next_question = parsed
        .get("next_question")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Extraction {
        updated_slots,
        next_missing,
        next_question,
    })
}

/// Parse the model's confirmation output (`{"confirmed": bool}`)
/// Anything but an explicit true counts as not confirmed
pub fn parse_confirmation(raw: &str) -> Result<bool, ExtractorError> {
    let parsed: Value = serde_json::from_str(&repair_json(raw))?;
    Ok(match parsed.get("confirmed") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Prompt for slot extraction
pub fn extraction_prompt(
    today: NaiveDate,
    slots: &Slots,
    last_question: &str,
    user_message: &str,
) -> String {
    let filled = serde_json::to_string_pretty(slots).unwrap_or_else(|_| "{}".to_string());
    let order = SlotName::ALL.map(|n| n.key()).join("→");
    format!(
        r#"You are a Fly Me slot extractor. Year is {year}. Current date: {today}.

SLOTS DEFINITION:
- "or_city" = origin/departure city
- "dst_city" = destination city
- "dep_date" = departure date (YYYY-MM-DD)
- "ret_date" = return date (YYYY-MM-DD)
- "budget" = max budget with currency

CURRENT STATE:
Already filled: {filled}
Question asked: "{last_question}"
User just said: "{user_message}"

INSTRUCTIONS:
1. Extract ONLY from user's message what answers the missing slots.
2. NO guesses, NO defaults - only explicit values from user.
3. Parse dates to YYYY-MM-DD (e.g., "15 Feb" → "{year}-02-15").
4. Keep already filled slots UNCHANGED (copy them as-is).
5. Next priority: {order}.

OUTPUT STRICT JSON (no other text):
{{
"updated_slots": {{
    "or_city": <keep existing or new value or null>,
    "dst_city": <keep existing or new value or null>,
    "dep_date": <keep existing or new value or null>,
    "ret_date": <keep existing or new value or null>,
    "budget": <keep existing or new value or null>
}},
"next_missing": "<first missing slot name or 'none'>",
"next_question": "<natural question for next slot or empty string>"
}}"#,
        year = today.year(),
        today = today.format("%B %-d, %Y"),
    )
}

/// Prompt for confirmation classification
pub fn confirmation_prompt(last_question: &str, user_message: &str) -> String {
    format!(
        r#"You are a confirmation intent classifier.

User message:
"{user_message}"

Question previously asked:
"{last_question}"

TASK:
Decide if the user CONFIRMS the booking details.

Rules:
- Confirmation can be explicit or implicit
- Accept natural language confirmations
- Accept short answers
- Reject questions, modifications, hesitation, or silence

OUTPUT STRICT JSON ONLY:
{{
"confirmed": true | false
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_json_closes_braces() {
        assert_eq!(repair_json(r#"{"a": {"b": 1"#), r#"{"a": {"b": 1}}"#);
        assert_eq!(repair_json(r#"  {"a": 1}  "#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_repair_json_after_inner_object() {
        assert_eq!(repair_json(r#"{"a": {"b": 1}"#), r#"{"a": {"b": 1}}"#);
        assert_eq!(
            repair_json(r#"{"a": {"b": {"c": 1}}"#),
            r#"{"a": {"b": {"c": 1}}}"#
        );
    }

    #[test]
    fn test_parse_extraction_merges_and_defaults() {
        let mut current = Slots::default();
        current.set(SlotName::OrCity, "Paris");

        let extraction = parse_extraction(
            r#"{"updated_slots": {"or_city": null, "dst_city": "Djerba"}"#,
            &current,
        )
        .unwrap();

        assert_eq!(extraction.updated_slots.get(SlotName::OrCity), Some("Paris"));
        assert_eq!(extraction.updated_slots.get(SlotName::DstCity), Some("Djerba"));
        assert_eq!(extraction.next_missing, "dep_date");
        assert_eq!(extraction.next_question, "");
    }

    #[test]
    fn test_parse_extraction_with_numeric_budget() {
        let extraction = parse_extraction(
            r#"{"updated_slots": {"or_city": "Paris", "dst_city": "Djerba", "dep_date": "2026-02-10", "ret_date": "2026-02-15", "budget": 500}}"#,
            &Slots::default(),
        )
        .unwrap();

        assert_eq!(extraction.updated_slots.get(SlotName::Budget), Some("500"));
        assert!(extraction.updated_slots.missing().is_empty());
        assert_eq!(extraction.next_missing, "none");
    }

    #[test]
    fn test_parse_extraction_requires_updated_slots() {
        let result = parse_extraction(r#"{"next_missing": "or_city"}"#, &Slots::default());
        assert!(matches!(result, Err(ExtractorError::MissingKey("updated_slots"))));

        let result = parse_extraction("not json at all", &Slots::default());
        assert!(matches!(result, Err(ExtractorError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_confirmation() {
        assert!(parse_confirmation(r#"{"confirmed": true}"#).unwrap());
        assert!(!parse_confirmation(r#"{"confirmed": false}"#).unwrap());
        assert!(parse_confirmation(r#"{"confirmed": "TRUE"}"#).unwrap());
        assert!(!parse_confirmation(r#"{}"#).unwrap());
        assert!(parse_confirmation("yes").is_err());
    }

    #[test]
    fn test_fallback_asks_first_missing_slot() {
        let mut slots = Slots::default();
        slots.set(SlotName::OrCity, "Paris");
        let fallback = Extraction::fallback(&slots);
        assert_eq!(fallback.updated_slots, slots);
        assert_eq!(fallback.next_missing, "dst_city");
        assert_eq!(fallback.next_question, "What is your destination city?");

        for name in SlotName::ALL {
            slots.set(name, "x");
        }
        assert_eq!(Extraction::fallback(&slots).next_missing, "none");
    }

    #[test]
    fn test_extraction_prompt_mentions_context() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 27).unwrap();
        let prompt = extraction_prompt(today, &Slots::default(), "Where to?", "Paris to Djerba");
        assert!(prompt.contains("Year is 2026. Current date: January 27, 2026."));
        assert!(prompt.contains(r#"User just said: "Paris to Djerba""#));
        assert!(prompt.contains("or_city→dst_city→dep_date→ret_date→budget"));
    }
}
