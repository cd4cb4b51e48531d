//! Pull the diagram out of a fenced Markdown document.

use std::sync::OnceLock;

use regex::Regex;

fn text_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)```text[ \t]*\r?\n(.*?)```").expect("fence pattern is valid")
    })
}

/// Body of the first ` ```text ` fenced block, without its leading and
/// trailing blank lines. `None` when there is no such block or it is empty.
///
/// Leading spaces on the first diagram row are kept; they are part of the
/// drawing.
pub fn text_block(document: &str) -> Option<&str> {
    let body = text_fence().captures(document)?.get(1)?.as_str();
    let body = body.trim_matches(|c| c == '\n' || c == '\r');
    if body.trim().is_empty() {
        None
    } else {
        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_fence() {
        let doc = "Intro\n\n```text\n┌─┐\n└─┘\n```\n\n```text\nsecond\n```\n";
        assert_eq!(text_block(doc), Some("┌─┐\n└─┘"));
    }

    #[test]
    fn test_fence_tag_is_case_insensitive() {
        assert_eq!(text_block("```TEXT\n──\n```"), Some("──"));
    }

    #[test]
    fn test_indentation_is_kept() {
        assert_eq!(text_block("```text\n\n  ┌┐\n  └┘\n\n```"), Some("  ┌┐\n  └┘"));
    }

    #[test]
    fn test_missing_or_empty_fence() {
        assert_eq!(text_block("no fences here"), None);
        assert_eq!(text_block("```rust\nfn main() {}\n```"), None);
        assert_eq!(text_block("```text\n   \n```"), None);
    }

    #[test]
    fn test_crlf_document() {
        assert_eq!(text_block("```text\r\n┌┐\r\n└┘\r\n```\r\n"), Some("┌┐\r\n└┘"));
    }
}
