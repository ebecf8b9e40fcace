//! Model output normalization: strip code fences, parse JSON, validate schema.
//!
//! The model is untrusted. Nothing here repairs malformed output; any failure
//! is terminal for the request.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("response is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("response does not match the expected schema: {0}")]
    Schema(String),
}

/// A JSON shape the model must produce. `check` holds constraints serde
/// cannot express, such as numeric ranges.
pub trait ModelSchema: DeserializeOwned {
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

/// For `#[serde(default, deserialize_with = "present")]` fields: a missing key
/// stays `None`, an explicit `null` is a schema error.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Replaces every fenced block (three backticks, optional `json` label, optional
/// newline, content, three backticks) with its content and trims the result.
/// Text outside fences is kept; an unterminated fence is left untouched.
pub fn strip_markdown_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let body = after_open.strip_prefix("json").unwrap_or(after_open);
        let body = body.strip_prefix('\n').unwrap_or(body);

        let Some(close) = body.find(FENCE) else {
            break;
        };

        out.push_str(&rest[..open]);
        out.push_str(&body[..close]);
        rest = &body[close + FENCE.len()..];
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Strip → parse → deserialize → check. The error distinguishes unparsable
/// text from well-formed JSON of the wrong shape.
pub fn parse_model_output<T: ModelSchema>(raw: &str) -> Result<T, FormatError> {
    let stripped = strip_markdown_json(raw);

    let value: Value = serde_json::from_str(&stripped).map_err(FormatError::Syntax)?;
    // serde would otherwise fill struct fields from an array by position
    if !value.is_object() {
        return Err(FormatError::Schema("expected a JSON object".to_string()));
    }
    let parsed: T =
        serde_json::from_value(value).map_err(|e| FormatError::Schema(e.to_string()))?;
    parsed.check().map_err(FormatError::Schema)?;

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        n: u32,
        #[serde(default, deserialize_with = "present")]
        label: Option<String>,
    }

    impl ModelSchema for Sample {
        fn check(&self) -> Result<(), String> {
            if self.n > 10 {
                return Err(format!("n must be at most 10, got {}", self.n));
            }
            Ok(())
        }
    }

    #[test]
    fn test_strip_json_labeled_fence() {
        let input = "```json\n{\"score\":80,\"missingKeywords\":[],\"suggestions\":[]}\n```";
        assert_eq!(
            strip_markdown_json(input),
            r#"{"score":80,"missingKeywords":[],"suggestions":[]}"#
        );
    }

    #[test]
    fn test_strip_bare_fence() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_markdown_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fence_without_newline() {
        assert_eq!(strip_markdown_json("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_no_fences_only_trims() {
        let input = "  \n{\"key\": \"value\"}\n ";
        assert_eq!(strip_markdown_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_keeps_surrounding_prose() {
        let input = "Here you go:\n```json\n{\"a\":1}\n```\nThanks";
        assert_eq!(strip_markdown_json(input), "Here you go:\n{\"a\":1}\n\nThanks");
    }

    #[test]
    fn test_strip_leaves_unterminated_fence() {
        let input = "```json\n{\"a\":1}";
        assert_eq!(strip_markdown_json(input), input);
    }

    #[test]
    fn test_strip_multiple_fences() {
        let input = "```json\n[1,\n```\n```\n2]\n```";
        assert_eq!(strip_markdown_json(input), "[1,\n\n2]");
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = parse_model_output::<Sample>("I cannot comply").unwrap_err();
        assert!(matches!(err, FormatError::Syntax(_)));
    }

    #[test]
    fn test_parse_rejects_fenced_prose_around_json() {
        let err = parse_model_output::<Sample>("Sure!\n```json\n{\"n\":1}\n```").unwrap_err();
        assert!(matches!(err, FormatError::Syntax(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = parse_model_output::<Sample>("{\"n\":\"one\"}").unwrap_err();
        assert!(matches!(err, FormatError::Schema(_)));
        let err = parse_model_output::<Sample>("[1,2,3]").unwrap_err();
        assert!(matches!(err, FormatError::Schema(_)));
    }

    #[test]
    fn test_parse_rejects_positional_array() {
        // a one-element array would deserialize into `Sample { n: 3 }`
        for raw in ["[3]", "[3,\"x\"]", "3", "\"n\"", "null"] {
            let err = parse_model_output::<Sample>(raw).unwrap_err();
            assert!(matches!(err, FormatError::Schema(_)), "{raw}");
        }
    }

    #[test]
    fn test_optional_field_absent_or_present_but_not_null() {
        assert_eq!(parse_model_output::<Sample>("{\"n\":1}").unwrap().label, None);
        assert_eq!(
            parse_model_output::<Sample>("{\"n\":1,\"label\":\"a\"}").unwrap().label.as_deref(),
            Some("a")
        );
        let err = parse_model_output::<Sample>("{\"n\":1,\"label\":null}").unwrap_err();
        assert!(matches!(err, FormatError::Schema(_)));
    }

    #[test]
    fn test_parse_runs_check() {
        let err = parse_model_output::<Sample>("{\"n\":11}").unwrap_err();
        assert!(matches!(err, FormatError::Schema(ref m) if m.contains("at most 10")));
        assert_eq!(parse_model_output::<Sample>("```json\n{\"n\":3}\n```").unwrap().n, 3);
    }

    #[test]
    fn test_parse_does_not_repair_trailing_comma() {
        assert!(parse_model_output::<Sample>("{\"n\":1,}").is_err());
    }
}
