//! Cleanup of raw model replies into draft text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Tags a generated body may contain. Everything else is stripped.
pub const ALLOWED_TAGS: &[&str] = &["p", "br", "ul", "ol", "li", "strong", "b", "em"];

const QUOTE_PAIRS: &[(char, char)] = &[
    ('"', '"'),
    ('\'', '\''),
    ('`', '`'),
    ('“', '”'),
    ('‘', '’'),
    ('「', '」'),
    ('『', '』'),
];

// unwrap is safe: patterns are compile-time constants
#[allow(clippy::unwrap_used)]
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)\b[^>]*?(/?)>").unwrap());

#[allow(clippy::unwrap_used)]
static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());

#[allow(clippy::unwrap_used)]
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());

#[allow(clippy::unwrap_used)]
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Removes a surrounding markdown code fence (` ```html ... ``` `), if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`html`, `json`, ...) on the opening line.
    let rest = rest.split_once('\n').map_or(rest, |(_, body)| body);
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

/// Subject line from a raw reply: whitespace and wrapping quotes removed.
///
/// Quotes are only stripped as a matching pair around the whole line, so a
/// quoted word at either end survives.
pub fn clean_subject(raw: &str) -> String {
    let mut subject = strip_code_fence(raw);
    while let Some(inner) = unwrap_quotes(subject) {
        subject = inner;
    }
    subject.to_string()
}

fn unwrap_quotes(text: &str) -> Option<&str> {
    QUOTE_PAIRS.iter().find_map(|&(open, close)| {
        let inner = text.strip_prefix(open)?.strip_suffix(close)?;
        let inner = inner.trim();
        // `"A" and "B"` is two quoted words, not one wrapped line.
        (!inner.contains([open, close])).then_some(inner)
    })
}

/// Body from a raw reply: fence removed, markup sanitized, whitespace trimmed.
pub fn clean_body(raw: &str) -> String {
    sanitize_markup(strip_code_fence(raw)).trim().to_string()
}

/// Keeps only [`ALLOWED_TAGS`] (attributes dropped) and the text of everything else.
///
/// `<script>` and `<style>` elements are removed together with their content.
pub fn sanitize_markup(html: &str) -> String {
    let html = COMMENT_RE.replace_all(html, "");
    let html = SCRIPT_RE.replace_all(&html, "");
    let html = STYLE_RE.replace_all(&html, "");

    TAG_RE
        .replace_all(&html, |caps: &Captures<'_>| {
            let closing = &caps[1];
            let name = caps[2].to_ascii_lowercase();
            if !ALLOWED_TAGS.contains(&name.as_str()) {
                return String::new();
            }
            if name == "br" {
                return "<br>".to_string();
            }
            format!("<{closing}{name}>")
        })
        .into_owned()
}
