//! Interactive compose mode.
//!
//! A REPL with slash commands that fills in a template, picks recipients,
//! and generates or translates the draft in place.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;
mod ui;

pub use session::{ComposeRepl, ReplConfig};
