//! Cleanup of markdown artifacts models wrap around JSON.

const FENCE: &str = "```";

/// Single-pass cleanup of provider text.
///
/// Trims, then removes one outer triple-backtick fence if the text both starts
/// and ends with one, otherwise one outer single-backtick pair. A bare run of
/// backticks with nothing between the markers cleans to an empty string.
/// Nested or unbalanced fences are left as they are.
pub fn sanitize_response(text: &str) -> String {
    let trimmed = text.trim();

    let inner = if trimmed.starts_with(FENCE) && trimmed.ends_with(FENCE) {
        trimmed
            .get(FENCE.len()..trimmed.len().saturating_sub(FENCE.len()))
            .unwrap_or_default()
    } else if trimmed.starts_with('`') && trimmed.ends_with('`') {
        trimmed
            .get(1..trimmed.len().saturating_sub(1))
            .unwrap_or_default()
    } else {
        trimmed
    };

    inner.trim().to_string()
}

/// Strips a leading ```` ```json ```` or ```` ``` ```` marker and a trailing
/// ```` ``` ````, each at most once, then trims.
pub fn strip_json_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    }
    if let Some(rest) = text.strip_prefix(FENCE) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_triple_fence() {
        assert_eq!(sanitize_response("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_sanitize_strips_single_backticks() {
        assert_eq!(sanitize_response("  `{\"a\": 1}`  "), "{\"a\": 1}");
    }

    #[test]
    fn test_sanitize_leaves_plain_text() {
        assert_eq!(sanitize_response("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_sanitize_only_removes_one_level() {
        let nested = "```\n```\n{}\n```\n```";
        assert_eq!(sanitize_response(nested), "```\n{}\n```");
    }

    #[test]
    fn test_sanitize_leaves_unbalanced_fence() {
        assert_eq!(sanitize_response("```\n{}"), "```\n{}");
    }

    #[test]
    fn test_sanitize_bare_backtick_runs_clean_to_empty() {
        assert_eq!(sanitize_response("`"), "");
        assert_eq!(sanitize_response("``"), "");
        assert_eq!(sanitize_response("```"), "");
        assert_eq!(sanitize_response("````"), "");
        assert_eq!(sanitize_response(" ````` "), "");
        assert_eq!(sanitize_response("``````"), "");
    }

    #[test]
    fn test_sanitize_is_idempotent_for_single_wrapping() {
        for input in ["```{\"a\":1}```", "`{\"a\":1}`", "{\"a\":1}", " \n{}\n "] {
            let once = sanitize_response(input);
            assert_eq!(sanitize_response(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_trailing_only() {
        assert_eq!(strip_json_fences("{\"key\": 1}\n```"), "{\"key\": 1}");
    }
}
