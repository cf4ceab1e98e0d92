use serde_json::Value;

/// The span from the first `{` to the last `}` in model output, if any.
pub fn json_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse the embedded JSON object out of free-form model output.
pub fn embedded_object(text: &str) -> Result<Value, String> {
    let span = json_object_span(text).ok_or_else(|| "no JSON object in output".to_string())?;
    serde_json::from_str(span).map_err(|e| e.to_string())
}

/// Non-empty string field, or `None`.
pub fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// String array field truncated to `limit`. Non-array values yield an empty list.
pub fn string_list(value: &Value, key: &str, limit: usize) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .take(limit)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_covers_first_to_last_brace() {
        let text = "Sure! {\"a\": {\"b\": 1}} Hope that helps.";
        assert_eq!(json_object_span(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn span_requires_both_braces() {
        assert_eq!(json_object_span("no json"), None);
        assert_eq!(json_object_span("} before {"), None);
    }

    #[test]
    fn embedded_object_reports_parse_errors() {
        assert!(embedded_object("{not json}").is_err());
        assert!(embedded_object("plain").is_err());
        assert_eq!(embedded_object("x {\"k\": 2} y").unwrap()["k"], 2);
    }

    #[test]
    fn lists_are_truncated_and_non_strings_dropped() {
        let v = serde_json::json!({"themes": ["a", 1, "b", "c", "d", "e"], "summary": 3});
        assert_eq!(string_list(&v, "themes", 4), vec!["a", "b", "c", "d"]);
        assert!(string_list(&v, "missing", 4).is_empty());
        assert!(string_list(&v, "summary", 4).is_empty());
    }

    #[test]
    fn string_field_skips_blank_and_non_string() {
        let v = serde_json::json!({"a": "  ", "b": 1, "c": " ok "});
        assert_eq!(string_field(&v, "a"), None);
        assert_eq!(string_field(&v, "b"), None);
        assert_eq!(string_field(&v, "c").as_deref(), Some("ok"));
    }
}
