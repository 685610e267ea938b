//! Color helpers for terminal output, built on owo-colors.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Styles for the semantic elements of `maildraft` output.
pub struct Style;

impl Style {
    /// Section headers, e.g. "Templates", "Recipients"
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Labels and keys, e.g. "subject", "provider"
    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Primary values, e.g. template ids, recipient names
    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    /// Supplementary info such as endpoints and recipient summaries
    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn error<T: Display>(text: T) -> String {
        format!("{}", text.red().bold())
    }

    pub fn warning<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// Slash commands, e.g. "/generate"
    pub fn command<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    /// Language codes and field names
    pub fn code<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    pub fn hint<T: Display>(text: T) -> String {
        format!("{}", text.dimmed().italic())
    }

    /// The draft subject line
    pub fn subject<T: Display>(text: T) -> String {
        format!("{}", text.bold().underline())
    }

    pub fn default_marker() -> String {
        format!("{}", "(default)".dimmed())
    }

    pub fn version<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }
}
