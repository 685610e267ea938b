//! Draft languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ui::Style;

/// Languages a draft can be translated into.
///
/// Korean is the base language: every generated draft starts in Korean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Korean,
    English,
    Japanese,
    Chinese,
}

impl LanguageTag {
    pub const ALL: [Self; 4] = [Self::Korean, Self::English, Self::Japanese, Self::Chinese];

    /// Identifier used on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Korean => "korean",
            Self::English => "english",
            Self::Japanese => "japanese",
            Self::Chinese => "chinese",
        }
    }

    /// ISO 639-1 code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Korean => "ko",
            Self::English => "en",
            Self::Japanese => "ja",
            Self::Chinese => "zh",
        }
    }

    /// Name in the language itself.
    pub const fn native_label(self) -> &'static str {
        match self {
            Self::Korean => "한국어",
            Self::English => "English",
            Self::Japanese => "日本語",
            Self::Chinese => "中文",
        }
    }

    /// English name, used inside translation instructions.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Korean => "Korean",
            Self::English => "English",
            Self::Japanese => "Japanese",
            Self::Chinese => "Simplified Chinese",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LanguageTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.id() == lower || lang.code() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid language: '{s}'\n\n\
                     Valid languages: korean (ko), english (en), japanese (ja), chinese (zh)\n\
                     Run 'maildraft languages' to see all supported languages."
                )
            })
    }
}

/// Prints all supported languages to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported languages"));
    for lang in LanguageTag::ALL {
        println!(
            "  {:9} {:3} {}",
            Style::value(lang.id()),
            Style::code(lang.code()),
            Style::secondary(lang.native_label())
        );
    }
}
