//! Shape checks for parsed model responses.

use serde_json::{Map, Value};

use crate::summary::models::ErrorCode;

const SUMMARY_TEXT_FIELDS: [&str; 2] = ["meeting_title", "agenda"];
const ACTION_ITEM_FIELDS: [&str; 3] = ["task", "owner", "deadline"];

/// Whether `obj` is an acceptable response: either a lone recognized
/// `error` code, or a summary with non-blank title, agenda, and action items.
pub fn is_valid(obj: &Map<String, Value>) -> bool {
    if let Some(error) = obj.get("error") {
        return obj.len() == 1 && error.as_str().and_then(ErrorCode::parse).is_some();
    }

    SUMMARY_TEXT_FIELDS
        .iter()
        .all(|field| is_non_blank_str(obj.get(*field)))
        && match obj.get("action_items") {
            Some(Value::Array(items)) => items.iter().all(is_valid_action_item),
            _ => false,
        }
}

fn is_valid_action_item(item: &Value) -> bool {
    match item {
        Value::Object(fields) => ACTION_ITEM_FIELDS
            .iter()
            .all(|field| is_non_blank_str(fields.get(*field))),
        _ => false,
    }
}

fn is_non_blank_str(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: Value) -> bool {
        match value {
            Value::Object(map) => is_valid(&map),
            other => panic!("expected object, got {other}"),
        }
    }

    fn summary() -> Value {
        json!({
            "meeting_title": "Project Update",
            "agenda": "Coordinate on report completion and review",
            "action_items": [
                {"task": "Finish the report", "owner": "Alice", "deadline": "Friday"},
                {"task": "Review the report", "owner": "Bob", "deadline": "Not specified"}
            ]
        })
    }

    #[test]
    fn accepts_complete_summary() {
        assert!(check(summary()));
    }

    #[test]
    fn accepts_summary_without_action_items() {
        let mut value = summary();
        value["action_items"] = json!([]);
        assert!(check(value));
    }

    #[test]
    fn rejects_missing_top_level_keys() {
        for key in ["meeting_title", "agenda", "action_items"] {
            let mut value = summary();
            value.as_object_mut().unwrap().remove(key);
            assert!(!check(value), "missing {key} should be invalid");
        }
    }

    #[test]
    fn rejects_blank_or_non_string_text() {
        for key in ["meeting_title", "agenda"] {
            let mut value = summary();
            value[key] = json!("   ");
            assert!(!check(value), "blank {key} should be invalid");

            let mut value = summary();
            value[key] = json!(42);
            assert!(!check(value), "numeric {key} should be invalid");
        }
    }

    #[test]
    fn rejects_non_array_action_items() {
        let mut value = summary();
        value["action_items"] = json!({"task": "x", "owner": "y", "deadline": "z"});
        assert!(!check(value));
    }

    #[test]
    fn rejects_bad_action_items() {
        for key in ["task", "owner", "deadline"] {
            let mut value = summary();
            value["action_items"][0].as_object_mut().unwrap().remove(key);
            assert!(!check(value), "action item missing {key} should be invalid");

            let mut value = summary();
            value["action_items"][1][key] = json!("\n\t");
            assert!(!check(value), "action item with blank {key} should be invalid");
        }

        let mut value = summary();
        value["action_items"] = json!(["Finish the report"]);
        assert!(!check(value));
    }

    #[test]
    fn accepts_known_error_codes() {
        assert!(check(json!({"error": "NOT_A_MEETING_TRANSCRIPT"})));
        assert!(check(json!({"error": "NO_ACTION_ITEMS_FOUND"})));
    }

    #[test]
    fn rejects_unknown_or_mixed_error_responses() {
        assert!(!check(json!({"error": "SOMETHING_ELSE"})));
        assert!(!check(json!({"error": "NOT_A_MEETING_TRANSCRIPT", "extra": 1})));
        assert!(!check(json!({"error": null})));

        let mut value = summary();
        value["error"] = json!("NO_ACTION_ITEMS_FOUND");
        assert!(!check(value));
    }

    #[test]
    fn rejects_empty_object() {
        assert!(!check(json!({})));
    }
}
