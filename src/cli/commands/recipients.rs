use anyhow::Result;

use super::load_config_file;
use crate::recipient::{RecipientSet, search};
use crate::ui::Style;

/// Prints directory entries matching `query`, or all of them.
pub fn print_recipients(query: Option<&str>) -> Result<()> {
    let config = load_config_file()?;

    if config.recipients.is_empty() {
        println!("No recipients configured.");
        println!("Add [[recipients]] entries to ~/.config/maildraft/config.toml");
        return Ok(());
    }

    let found = search(&config.recipients, query.unwrap_or(""), &RecipientSet::default());
    if found.is_empty() {
        println!("No recipients match '{}'.", query.unwrap_or(""));
        return Ok(());
    }

    println!("{}", Style::header("Recipients"));
    for recipient in found {
        println!(
            "  {:4} {} {}",
            Style::code(&recipient.id),
            Style::value(recipient.honorific()),
            Style::secondary(recipient.summary())
        );
    }
    Ok(())
}
