//! Reading a free-text email description from the command line, a file, or stdin.

use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

const MAX_DESCRIPTION_SIZE: u64 = 64 * 1024;

/// Where the description of a template-less email comes from.
#[derive(Debug, Clone, Copy)]
pub enum DescriptionSource<'a> {
    Inline(&'a str),
    /// `-` reads stdin.
    File(&'a Path),
}

impl<'a> DescriptionSource<'a> {
    /// Picks the source from `--describe` and `--describe-file`, if either was given.
    pub fn from_args(inline: Option<&'a str>, file: Option<&'a Path>) -> Option<Self> {
        inline.map(Self::Inline).or_else(|| file.map(Self::File))
    }
}

/// Reads a description, rejecting blank and oversized input.
pub fn read_description(source: DescriptionSource<'_>) -> Result<String> {
    let text = match source {
        DescriptionSource::Inline(text) => text.to_string(),
        DescriptionSource::File(path) if path == Path::new("-") => {
            read_limited(io::stdin().lock(), "stdin")?
        }
        DescriptionSource::File(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            read_limited(file, &path.display().to_string())?
        }
    };

    let text = text.trim();
    if text.is_empty() {
        bail!("Error: The email description is empty.");
    }
    Ok(text.to_string())
}

fn read_limited(reader: impl Read, origin: &str) -> Result<String> {
    let mut buffer = Vec::new();
    reader
        .take(MAX_DESCRIPTION_SIZE + 1)
        .read_to_end(&mut buffer)
        .with_context(|| format!("Failed to read from {origin}"))?;

    if buffer.len() as u64 > MAX_DESCRIPTION_SIZE {
        bail!(
            "Error: Description in {origin} exceeds the maximum allowed size ({} KB).",
            MAX_DESCRIPTION_SIZE / 1024
        );
    }

    String::from_utf8(buffer).with_context(|| format!("Description in {origin} is not valid UTF-8"))
}
