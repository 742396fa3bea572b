//! Finds the first JSON value embedded in free-form assistant text.
//!
//! Delimiter balancing is a deliberate heuristic, not a tokenizer: a brace or
//! bracket inside a JSON string literal (say a product title containing `}`)
//! throws the depth counter off and the span fails to parse. That case
//! degrades to "no directive found" and the reply is shown as plain prose.

use serde_json::Value;

/// What `extract` hands back: the parsed span, if any, plus the text around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub parsed: Option<Value>,
    pub remaining: String,
}

impl Extraction {
    fn none(text: &str) -> Self {
        Self {
            parsed: None,
            remaining: text.to_string(),
        }
    }
}

/// Scan `text` for the first `{`/`[`, balance-match to its closing delimiter
/// and parse the span as JSON. On success the remaining text is the
/// surrounding prose with fence markers stripped; on any failure the original
/// text comes back untouched.
pub fn extract(text: &str) -> Extraction {
    let first_brace = text.find('{');
    let first_bracket = text.find('[');
    let (start, open, close) = match (first_brace, first_bracket) {
        (None, None) => return Extraction::none(text),
        (Some(brace), None) => (brace, '{', '}'),
        (None, Some(bracket)) => (bracket, '[', ']'),
        (Some(brace), Some(bracket)) if bracket < brace => (bracket, '[', ']'),
        (Some(brace), Some(_)) => (brace, '{', '}'),
    };

    let Some(end) = balanced_end(text, start, open, close) else {
        return Extraction::none(text);
    };

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(parsed) => {
            let before = text[..start].trim();
            let after = text[end + 1..].trim();
            let remaining = strip_fences(&format!("{} {}", before, after));
            Extraction {
                parsed: Some(parsed),
                remaining,
            }
        }
        // A span that does not parse is discarded wholesale: the caller gets
        // the original text, never a partially stripped one.
        Err(_) => Extraction::none(text),
    }
}

/// Byte index of the close delimiter that balances the open delimiter at
/// `start`. Counts only the chosen pair; the other pair is ignored.
fn balanced_end(text: &str, start: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0u32;
    for (offset, ch) in text[start..].char_indices() {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(start + offset);
            }
        }
    }
    None
}

/// Remove code-fence debris: backtick fences anywhere, plus a bare leading or
/// trailing `json` language tag left behind when a fence was split in two by
/// the extracted span.
pub fn strip_fences(text: &str) -> String {
    let cleaned = text.replace("```json", "").replace("```", "");
    strip_edge_tags(cleaned.trim()).to_string()
}

fn strip_edge_tags(text: &str) -> &str {
    let mut out = text;
    if has_json_prefix(out) {
        out = out[4..].trim_start();
    }
    if has_json_suffix(out) {
        out = out[..out.len() - 4].trim_end();
    }
    out
}

fn has_json_prefix(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 4
        && bytes[..4].eq_ignore_ascii_case(b"json")
        && bytes.get(4).map_or(true, |b| b.is_ascii_whitespace())
}

fn has_json_suffix(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 4
        && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b"json")
        && (bytes.len() == 4 || bytes[bytes.len() - 5].is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_passes_through() {
        let result = extract("no structured content here");
        assert_eq!(result.parsed, None);
        assert_eq!(result.remaining, "no structured content here");
    }

    #[test]
    fn object_is_lifted_out_of_surrounding_prose() {
        let result = extract("hello {\"action\":\"emptyCart\"} world");
        assert_eq!(result.parsed, Some(json!({"action": "emptyCart"})));
        assert_eq!(result.remaining, "hello world");
    }

    #[test]
    fn nested_braces_balance_to_the_outer_close() {
        let result = extract("{\"a\":{\"b\":1}} tail");
        assert_eq!(result.parsed, Some(json!({"a": {"b": 1}})));
        assert_eq!(result.remaining, "tail");
    }

    #[test]
    fn invalid_span_returns_the_original_text() {
        let input = "before {\"a\": } after";
        let result = extract(input);
        assert_eq!(result.parsed, None);
        assert_eq!(result.remaining, input);
    }

    #[test]
    fn unbalanced_open_returns_the_original_text() {
        let input = "starts { but never closes";
        let result = extract(input);
        assert_eq!(result.parsed, None);
        assert_eq!(result.remaining, input);
    }

    #[test]
    fn earlier_bracket_wins_over_later_brace() {
        let result = extract("x [1,2] y {\"a\":1}");
        assert_eq!(result.parsed, Some(json!([1, 2])));
        assert_eq!(result.remaining, "x y {\"a\":1}");
    }

    #[test]
    fn earlier_brace_wins_over_later_bracket() {
        let result = extract("{\"a\":1} then [2]");
        assert_eq!(result.parsed, Some(json!({"a": 1})));
        assert_eq!(result.remaining, "then [2]");
    }

    #[test]
    fn fence_markers_are_stripped_from_remaining() {
        let result = extract("```json\n{\"action\":\"viewCart\"}\n``` thanks");
        assert_eq!(result.parsed, Some(json!({"action": "viewCart"})));
        assert_eq!(result.remaining, "thanks");
    }

    #[test]
    fn bare_json_tags_at_the_edges_are_stripped() {
        let result = extract("json {\"a\":1} json");
        assert_eq!(result.parsed, Some(json!({"a": 1})));
        assert_eq!(result.remaining, "");
    }

    #[test]
    fn json_tag_inside_a_word_is_kept() {
        assert_eq!(strip_fences("jsonify the data"), "jsonify the data");
        assert_eq!(strip_fences("I love json"), "I love");
    }

    #[test]
    fn multibyte_text_around_the_span_is_preserved() {
        let result = extract("héllo {\"a\":1} wörld");
        assert_eq!(result.parsed, Some(json!({"a": 1})));
        assert_eq!(result.remaining, "héllo wörld");
    }

    // Known limitation of delimiter counting: a close delimiter inside a JSON
    // string ends the span early, the parse fails, and the whole reply is
    // treated as prose.
    #[test]
    fn brace_inside_string_literal_degrades_to_prose() {
        let input = "{\"title\": \"a } b\"}";
        let result = extract(input);
        assert_eq!(result.parsed, None);
        assert_eq!(result.remaining, input);
    }

    #[test]
    fn array_of_directives_parses_whole() {
        let result = extract("[{\"action\":\"viewCart\"},{\"action\":\"checkout\"}] done");
        assert_eq!(
            result.parsed,
            Some(json!([{"action": "viewCart"}, {"action": "checkout"}]))
        );
        assert_eq!(result.remaining, "done");
    }
}
