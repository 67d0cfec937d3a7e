//! Column cleanup shared by every reader

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal `\xNN` escape sequences left in exported text columns
static ESCAPE_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\x\w{2}").expect("valid escape pattern"));

/// A comma directly before a closing brace or bracket
static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([}\]])").expect("valid trailing comma pattern"));

/// Lower-case, trim and strip `\xNN` sequences; blank becomes `None`
pub fn clean_text(raw: &str) -> Option<String> {
    let lowered = raw.to_lowercase();
    let cleaned = ESCAPE_SEQUENCE.replace_all(lowered.trim(), "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Same as [`clean_text`] for an optional column
pub fn clean_column(raw: Option<&str>) -> Option<String> {
    raw.and_then(clean_text)
}

/// Drop trailing commas so hand-edited JSON arrays still parse
pub fn strip_trailing_commas(json: &str) -> String {
    TRAILING_COMMA.replace_all(json, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Aspirin "), Some("aspirin".to_string()));
        assert_eq!(
            clean_text(r"Journal of emergency nursing\xc3\x28"),
            Some("journal of emergency nursing".to_string())
        );
        assert_eq!(clean_text("   "), None);
        assert_eq!(clean_text(r"\xc3"), None);
    }

    #[test]
    fn test_clean_column() {
        assert_eq!(clean_column(None), None);
        assert_eq!(clean_column(Some("")), None);
        assert_eq!(clean_column(Some("BMJ")), Some("bmj".to_string()));
    }

    #[test]
    fn test_strip_trailing_commas() {
        let raw = "[\n  {\"id\": 1, \"title\": \"a\",\n  },\n]";
        let cleaned = strip_trailing_commas(raw);
        let value: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value[0]["title"], "a");
    }

    #[test]
    fn test_strip_trailing_commas_keeps_valid_json() {
        let raw = r#"[{"id": 1, "title": "a, b"}]"#;
        assert_eq!(strip_trailing_commas(raw), raw);
    }
}
