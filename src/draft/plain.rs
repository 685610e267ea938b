use std::sync::LazyLock;

use regex::Regex;

/// Wide enough that html2text never wraps a business email paragraph.
const RENDER_WIDTH: usize = 4096;

#[allow(clippy::unwrap_used)]
static INLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(strong|b|em)\b[^>]*>").unwrap());

#[allow(clippy::unwrap_used)]
static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[A-Za-z][^>]*>").unwrap());

#[allow(clippy::unwrap_used)]
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Converts a draft body into plain text for the clipboard.
///
/// Paragraphs become blank-line separated blocks and list items their own
/// lines. Bodies without markup are returned as-is.
pub fn to_plain_text(body: &str) -> String {
    if !ANY_TAG_RE.is_match(body) {
        return body.trim().to_string();
    }

    // html2text decorates emphasis; drop it first.
    let body = INLINE_RE.replace_all(body, "");

    let rendered = html2text::config::plain()
        .string_from_read(body.as_bytes(), RENDER_WIDTH)
        .unwrap_or_else(|e| {
            tracing::debug!(error = %e, "html2text failed, stripping tags instead");
            ANY_TAG_RE.replace_all(&body, "\n").into_owned()
        });

    let lines: Vec<&str> = rendered.lines().map(str::trim_end).collect();
    BLANK_RUN_RE
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_and_list() {
        let text = to_plain_text("<p>Hello</p><ul><li>A</li><li>B</li></ul>");
        assert!(text.contains("Hello"));
        assert!(text.contains('A'));
        assert!(text.contains('B'));
        assert!(!text.contains('<'));
        assert!(!text.contains('>'));
    }

    #[test]
    fn test_list_items_on_separate_lines() {
        let text = to_plain_text("<ul><li>첫째</li><li>둘째</li></ul>");
        let item_lines: Vec<_> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(item_lines.len(), 2);
        assert!(item_lines[0].contains("첫째"));
        assert!(item_lines[1].contains("둘째"));
    }

    #[test]
    fn test_emphasis_is_dropped_without_decoration() {
        let text = to_plain_text("<p><strong>중요</strong> 공지</p>");
        assert_eq!(text, "중요 공지");
    }

    #[test]
    fn test_plain_body_passes_through() {
        let body = "안녕하세요.\n\n감사합니다.";
        assert_eq!(to_plain_text(body), body);
    }

    #[test]
    fn test_entities_are_decoded() {
        let text = to_plain_text("<p>R&amp;D 팀</p>");
        assert_eq!(text, "R&D 팀");
    }
}
