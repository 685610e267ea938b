//! Subcommand implementations.

use anyhow::{Result, bail};

use crate::config::{ConfigFile, ConfigManager};
use crate::recipient::{Recipient, lookup};

/// Interactive compose mode handler.
pub mod compose;

/// Configure command handler.
pub mod configure;

/// One-shot generation handler.
pub mod generate;

/// Sender profile handler.
pub mod profile;

/// Provider listing handler.
pub mod providers;

/// Recipient directory handler.
pub mod recipients;

/// Closing remark handler.
pub mod remarks;

/// Template listing handler.
pub mod templates;

fn load_config_file() -> Result<ConfigFile> {
    ConfigManager::new()?.load_or_default()
}

/// Resolves a `--to` value against the directory.
fn resolve_recipient<'a>(directory: &'a [Recipient], key: &str) -> Result<&'a Recipient> {
    match lookup(directory, key) {
        Ok(recipient) => Ok(recipient),
        Err(candidates) if candidates.is_empty() => bail!(
            "No recipient matches '{key}'\n\n\
             Run 'maildraft recipients' to see the directory."
        ),
        Err(candidates) => bail!(
            "'{key}' matches several recipients:\n  \
             - {}\n\n\
             Use a recipient id instead.",
            candidates
                .iter()
                .map(|r| format!("{} ({})", r.id, r.honorific()))
                .collect::<Vec<_>>()
                .join("\n  - ")
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::recipient::fixtures::directory;

    #[test]
    fn test_resolve_recipient_by_id() {
        let directory = directory();
        assert_eq!(resolve_recipient(&directory, "4").unwrap().name, "이순신");
    }

    #[test]
    fn test_resolve_recipient_ambiguous_lists_ids() {
        let directory = directory();
        let err = resolve_recipient(&directory, "개발자").unwrap_err().to_string();
        assert!(err.contains("1 (홍길동 선임님)"));
        assert!(err.contains("2 (을지문덕 수석님)"));
    }

    #[test]
    fn test_resolve_recipient_missing() {
        let err = resolve_recipient(&directory(), "nobody").unwrap_err();
        assert!(err.to_string().contains("No recipient matches 'nobody'"));
    }
}
