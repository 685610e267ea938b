//! The generated email draft and the text shaping applied to it.

mod language;
mod markup;
mod plain;

pub use language::{LanguageTag, print_languages};
pub use markup::{ALLOWED_TAGS, clean_body, clean_subject, sanitize_markup, strip_code_fence};
pub use plain::to_plain_text;

use serde::{Deserialize, Serialize};

/// Subject and body currently shown to the user, and the language they are in.
///
/// `language` is `None` for an empty draft and for a draft holding a failure
/// message rather than generated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub subject: String,
    /// May contain the tags listed in [`ALLOWED_TAGS`].
    pub body: String,
    pub language: Option<LanguageTag>,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.subject.is_empty() && self.body.is_empty()
    }

    /// Whether translating into `target` would change anything.
    pub fn can_translate_to(&self, target: LanguageTag) -> bool {
        !self.body.is_empty() && self.language.is_some_and(|current| current != target)
    }

    /// Body with markup removed, for copying. The draft itself is untouched.
    pub fn plain_body(&self) -> String {
        to_plain_text(&self.body)
    }
}
