use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::core::errors::{RouterError, RouterResult};
use crate::core::utils::preview;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*```[A-Za-z]*|```\s*$").expect("valid fence pattern"));

/// Remove markdown code fences the collaborator sometimes wraps around JSON.
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw.trim(), "").trim().to_string()
}

/// Fence-strip and parse into an untyped JSON value.
pub fn parse_value(context: &str, raw: &str) -> RouterResult<Value> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| {
        error!("Invalid JSON returned for {}: {}", context, e);
        debug!("Raw collaborator output: {}", preview(raw, 500));
        RouterError::malformed(context, format!("not valid JSON: {e}"), raw)
    })
}

/// Fence-strip and parse into `T`.
pub fn parse_json<T: DeserializeOwned>(context: &str, raw: &str) -> RouterResult<T> {
    let value = parse_value(context, raw)?;
    serde_json::from_value(value).map_err(|e| {
        error!("Unexpected response shape for {}: {}", context, e);
        RouterError::malformed(context, format!("unexpected shape: {e}"), raw)
    })
}

/// Value after `LABEL:` on a line, case-insensitive on the label.
pub fn labelled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let line = line.trim();
    let prefix = line.get(..label.len())?;
    if !prefix.eq_ignore_ascii_case(label) {
        return None;
    }
    line[label.len()..].trim_start().strip_prefix(':').map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pick {
        selected_technician_id: i64,
    }

    #[test]
    fn test_strip_code_fences() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_json_accepts_fenced_output() {
        let pick: Pick = parse_json("justification", "```\n{\"selected_technician_id\": 4}\n```").unwrap();
        assert_eq!(pick, Pick { selected_technician_id: 4 });
    }

    #[test]
    fn test_parse_failure_keeps_raw_text() {
        let err = parse_json::<Pick>("justification", "I think Ada").unwrap_err();
        match err {
            RouterError::MalformedInferenceOutput { raw, context, .. } => {
                assert_eq!(raw, "I think Ada");
                assert_eq!(context, "justification");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_labelled_value() {
        assert_eq!(labelled_value("SCORE: 85", "SCORE"), Some("85"));
        assert_eq!(labelled_value("  reason : fine work", "REASON"), Some("fine work"));
        assert_eq!(labelled_value("SKILLS: x", "SKILL"), None);
        assert_eq!(labelled_value("S", "SCORE"), None);
    }
}
