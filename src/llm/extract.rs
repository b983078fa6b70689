//! Recovering a JSON object from free-form model output.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as DeError;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{RecapError, Result};

/// A ```` ``` ```` fence, optionally tagged `json`, around the shortest
/// brace-delimited body that is followed by the closing fence.
static FENCED_OBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("invalid fenced object regex")
});

/// Ways of locating a JSON object in model output, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The whole response is the object.
    Whole,
    /// The object sits in a markdown code fence.
    FencedBlock,
    /// First `{` through last `}`.
    BraceSpan,
}

impl Strategy {
    pub const ORDER: [Strategy; 3] = [Strategy::Whole, Strategy::FencedBlock, Strategy::BraceSpan];

    pub fn name(self) -> &'static str {
        match self {
            Self::Whole => "whole",
            Self::FencedBlock => "fenced-block",
            Self::BraceSpan => "brace-span",
        }
    }

    fn candidate(self, raw: &str) -> Option<&str> {
        match self {
            Self::Whole => Some(raw.trim()),
            Self::FencedBlock => FENCED_OBJECT_RE
                .captures(raw)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str()),
            Self::BraceSpan => {
                let start = raw.find('{')?;
                let end = raw.rfind('}')?;
                (start < end).then(|| &raw[start..=end])
            }
        }
    }
}

/// Parse the first JSON object any [`Strategy`] can recover from `raw`.
///
/// On failure the error carries the strict whole-input parse error.
pub fn extract_json(raw: &str) -> Result<Map<String, Value>> {
    let mut strict_error = None;

    for strategy in Strategy::ORDER {
        let Some(candidate) = strategy.candidate(raw) else {
            continue;
        };

        match serde_json::from_str::<Map<String, Value>>(candidate) {
            Ok(object) => {
                debug!(strategy = strategy.name(), "extracted JSON from completion");
                return Ok(object);
            }
            Err(e) => {
                strict_error.get_or_insert(e);
            }
        }
    }

    let source = strict_error.unwrap_or_else(|| DeError::custom("no JSON object found"));
    Err(RecapError::MalformedResponse { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_bare_object() {
        let obj = extract_json(r#"{"a":1}"#).unwrap();
        assert_eq!(Value::Object(obj), json!({"a": 1}));
    }

    #[test]
    fn parses_object_inside_json_fence() {
        let obj = extract_json("blah blah ```json\n{\"a\":1}\n``` blah").unwrap();
        assert_eq!(Value::Object(obj), json!({"a": 1}));
    }

    #[test]
    fn parses_untagged_fence() {
        let obj = extract_json("Here you go:\n```\n{\"error\": \"NO_ACTION_ITEMS_FOUND\"}\n```").unwrap();
        assert_eq!(Value::Object(obj), json!({"error": "NO_ACTION_ITEMS_FOUND"}));
    }

    #[test]
    fn fenced_block_wins_over_stray_braces_in_prose() {
        let raw = "Note: I used {placeholders} below.\n```json\n{\"a\": 2}\n```\nThanks {again}";
        let obj = extract_json(raw).unwrap();
        assert_eq!(Value::Object(obj), json!({"a": 2}));
    }

    #[test]
    fn nested_object_in_fence_is_recovered() {
        let raw = "Result:\n```json\n{\"a\": {\"b\": 1}}\n```";
        let obj = extract_json(raw).unwrap();
        assert_eq!(Value::Object(obj), json!({"a": {"b": 1}}));
    }

    #[test]
    fn brace_span_handles_unfenced_commentary() {
        let raw = "Sure! {\"meeting_title\": \"Sync\"} Hope that helps.";
        let obj = extract_json(raw).unwrap();
        assert_eq!(obj["meeting_title"], "Sync");
    }

    #[test]
    fn text_without_json_is_malformed() {
        let err = extract_json("I could not find anything useful.").unwrap_err();
        assert!(matches!(err, RecapError::MalformedResponse { .. }));
    }

    #[test]
    fn non_object_json_is_malformed() {
        let err = extract_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, RecapError::MalformedResponse { .. }));
    }

    #[test]
    fn strategy_order_is_strict_then_fence_then_span() {
        assert_eq!(
            Strategy::ORDER,
            [Strategy::Whole, Strategy::FencedBlock, Strategy::BraceSpan]
        );
    }
}
