//! Response sanitizer — normalizes raw LLM output into parseable JSON.
//!
//! Model replies routinely arrive wrapped in Markdown code fences, sprinkled
//! with ASCII control characters, or carrying raw newlines/tabs inside quoted
//! string values. All three break strict JSON parsing. Every `call_json` goes
//! through this module; no caller parses raw model text directly.

use serde::de::DeserializeOwned;

use super::LlmError;

/// Applies all sanitization steps and returns a string that is expected to
/// parse as JSON. Parsing itself happens in [`parse_sanitized`].
pub fn sanitize(raw: &str) -> String {
    let text = strip_code_fences(raw);
    let text = strip_control_chars(text);
    collapse_whitespace_in_strings(&text)
}

/// Sanitizes `raw` and deserializes it. On failure the original raw text is
/// preserved in the error for diagnostics.
pub fn parse_sanitized<T: DeserializeOwned>(raw: &str) -> Result<T, LlmError> {
    let cleaned = sanitize(raw);
    serde_json::from_str(&cleaned).map_err(|e| LlmError::MalformedResponse {
        message: e.to_string(),
        raw: raw.to_string(),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Removes ASCII control characters except tab, LF, and CR, which are handled
/// by [`collapse_whitespace_in_strings`]. Ranges: [0x00–0x08], [0x0B–0x0C],
/// [0x0E–0x1F].
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| !matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}'))
        .collect()
}

/// Rewrites runs of CR/LF/Tab inside double-quoted string literals into a
/// single space. Whitespace between tokens is legal JSON and left untouched;
/// only the interiors of quoted spans are rewritten. Backslash escapes are
/// honored so an escaped quote does not end the span.
fn collapse_whitespace_in_strings(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
            continue;
        }
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '"' => {
                in_string = false;
                out.push(c);
            }
            '\r' | '\n' | '\t' => {
                while matches!(chars.peek(), Some('\r') | Some('\n') | Some('\t')) {
                    chars.next();
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_strip_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_unterminated() {
        let input = "```json\n{\"key\": 1}";
        assert_eq!(strip_code_fences(input), "{\"key\": 1}");
    }

    #[test]
    fn test_control_chars_removed() {
        let input = "{\"a\": \"b\u{0}\u{8}\u{B}\u{C}\u{E}\u{1F}c\"}";
        assert_eq!(strip_control_chars(input), "{\"a\": \"bc\"}");
    }

    #[test]
    fn test_control_chars_keeps_tab_newline_cr() {
        let input = "a\tb\nc\rd";
        assert_eq!(strip_control_chars(input), input);
    }

    #[test]
    fn test_newline_run_inside_string_becomes_one_space() {
        let input = "{\"analysis\": \"first line\n\n\tsecond line\"}";
        let parsed: Value = parse_sanitized(input).unwrap();
        assert_eq!(parsed["analysis"], "first line second line");
    }

    #[test]
    fn test_whitespace_between_tokens_untouched() {
        let input = "{\n  \"a\": 1,\n  \"b\": 2\n}";
        let parsed: Value = parse_sanitized(input).unwrap();
        assert_eq!(parsed, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_escaped_quote_does_not_end_span() {
        let input = "{\"quote\": \"she said \\\"hi\\\"\nand left\"}";
        let parsed: Value = parse_sanitized(input).unwrap();
        assert_eq!(parsed["quote"], "she said \"hi\" and left");
    }

    #[test]
    fn test_escaped_backslash_before_closing_quote() {
        let input = r#"{"path": "C:\\temp\\"}"#;
        let parsed: Value = parse_sanitized(input).unwrap();
        assert_eq!(parsed["path"], "C:\\temp\\");
    }

    #[test]
    fn test_already_clean_json_round_trips() {
        let original = json!({
            "skills": ["Rust", "SQL"],
            "skillsRelevance": 8,
            "analysis": "solid systems background"
        });
        let parsed: Value = parse_sanitized(&original.to_string()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_fenced_json_with_injected_newlines_round_trips() {
        // Property: sanitize(wrap(json)) == json after reparsing.
        let input = "```json\n{\"analysis\": \"good\nresume\", \"score\": 7}\n```";
        let parsed: Value = parse_sanitized(input).unwrap();
        assert_eq!(parsed, json!({"analysis": "good resume", "score": 7}));
    }

    #[test]
    fn test_unicode_preserved() {
        let input = "{\"name\": \"Zoë — Münchén 東京\"}";
        let parsed: Value = parse_sanitized(input).unwrap();
        assert_eq!(parsed["name"], "Zoë — Münchén 東京");
    }

    #[test]
    fn test_garbage_is_malformed_error_with_raw() {
        let raw = "I'm sorry, I cannot produce JSON today.";
        let err = parse_sanitized::<Value>(raw).unwrap_err();
        match err {
            LlmError::MalformedResponse { raw: kept, .. } => assert_eq!(kept, raw),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_response_is_malformed_error() {
        let raw = "```json\n{\"skills\": [\"Rust\", \"Go\"";
        assert!(parse_sanitized::<Value>(raw).is_err());
    }

    #[test]
    fn test_typed_parse_missing_field_fails() {
        #[derive(serde::Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            score: f64,
        }
        let raw = "{\"analysis\": \"no score here\"}";
        assert!(parse_sanitized::<Shape>(raw).is_err());
    }

    #[test]
    fn test_tab_run_inside_string() {
        let input = "{\"a\": \"x\t\t\ty\"}";
        let parsed: Value = parse_sanitized(input).unwrap();
        assert_eq!(parsed["a"], "x y");
    }

    #[test]
    fn test_crlf_run_inside_string() {
        let input = "{\"a\": \"x\r\n\r\ny\"}";
        let parsed: Value = parse_sanitized(input).unwrap();
        assert_eq!(parsed["a"], "x y");
    }
}
