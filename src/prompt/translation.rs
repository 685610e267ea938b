//! Translation request and the structured reply it must come back in.

use serde::Deserialize;

use crate::draft::{ALLOWED_TAGS, Draft, LanguageTag, clean_subject, sanitize_markup, strip_code_fence};
use crate::error::ComposeError;

pub const TRANSLATION_PROMPT_TEMPLATE: &str = "You are translating a business email into {target_language}.\n\
     Translate the subject and the body of the email given below as JSON.\n\
     Rules:\n\
     - The body contains HTML tags ({tags}). Preserve every tag exactly, character for character, \
     in the same order and nesting. Translate only the text between tags.\n\
     - Do not add, remove or rename tags, and do not add attributes.\n\
     - Keep names, dates, numbers, email addresses and URLs unchanged.\n\
     - Use a polite business register appropriate for {target_language}.\n\
     - Reply with a single JSON object with exactly two string fields, \"subject\" and \"body\". \
     Output nothing else: no explanations and no code fences.\n\n\
     Email:\n";

/// Builds the translation instruction for `draft`.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn compile_translation_prompt(draft: &Draft, target: LanguageTag) -> String {
    // {target_language} and {tags} are placeholders for string replacement, not format arguments
    let tags = ALLOWED_TAGS
        .iter()
        .map(|tag| format!("<{tag}>"))
        .collect::<Vec<_>>()
        .join(", ");
    let email = serde_json::json!({
        "subject": draft.subject,
        "body": draft.body,
    });

    let mut prompt = TRANSLATION_PROMPT_TEMPLATE
        .replace("{target_language}", target.english_name())
        .replace("{tags}", &tags);
    prompt.push_str(&email.to_string());
    prompt
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TranslationReply {
    subject: String,
    body: String,
}

/// Parses a translation reply into a draft in `target`.
///
/// The reply must be a JSON object with exactly `subject` and `body`, optionally
/// wrapped in a code fence. Anything else is a [`ComposeError::TranslationParse`].
pub fn parse_translation_reply(raw: &str, target: LanguageTag) -> Result<Draft, ComposeError> {
    let json = strip_code_fence(raw);
    let reply: TranslationReply =
        serde_json::from_str(json).map_err(|e| ComposeError::TranslationParse(e.to_string()))?;

    let body = sanitize_markup(reply.body.trim()).trim().to_string();
    if body.is_empty() {
        return Err(ComposeError::TranslationParse(
            "reply body is empty".to_string(),
        ));
    }

    Ok(Draft {
        subject: clean_subject(&reply.subject),
        body,
        language: Some(target),
    })
}
