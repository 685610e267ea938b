//! Compose mode output.

use crate::compose::SessionState;
use crate::recipient::Recipient;
use crate::template::{FieldRecord, Selection, TemplateKind};
use crate::ui::{Style, print_draft};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(provider: &str, model: &str) {
    println!(
        "{} {} - Interactive Compose Mode",
        Style::header("maildraft"),
        Style::version(format!("v{VERSION}"))
    );
    println!(
        "{}",
        Style::secondary(format!("{provider} · {model}"))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let rows = [
        ("/template <id>", "Select a template (no id lists them)"),
        ("/to <id|query>", "Add a recipient (no argument lists the directory)"),
        ("/to -<id>", "Remove a recipient"),
        ("/set <field> <value>", "Set a form field of the template"),
        ("/describe <text>", "Describe the email without a template"),
        ("/generate", "Generate subject and body"),
        ("/translate <lang>", "Translate the draft (ko, en, ja, zh)"),
        ("/copy", "Copy the body to the clipboard as plain text"),
        ("/show", "Show template, fields, recipients and draft"),
        ("/help", "Show this help"),
        ("/quit", "Exit compose mode"),
    ];
    for (command, description) in rows {
        println!(
            "  {:30} {}",
            Style::command(command),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_templates() {
    println!("{}", Style::header("Templates"));
    for kind in TemplateKind::ALL {
        println!(
            "  {:16} {}",
            Style::value(kind.id()),
            Style::secondary(kind.display_name())
        );
    }
    println!();
}

pub fn print_candidates(candidates: &[&Recipient]) {
    if candidates.is_empty() {
        println!("{}", Style::secondary("No matching recipients."));
        return;
    }
    for recipient in candidates {
        println!(
            "  {} {} {}",
            Style::code(&recipient.id),
            Style::value(recipient.honorific()),
            Style::secondary(recipient.summary())
        );
    }
}

pub fn print_state(state: &SessionState) {
    println!("{}", Style::header("Session"));
    match &state.selection {
        None => println!("  {}  {}", Style::label("template"), Style::secondary("(none)")),
        Some(Selection::FreeText(description)) => {
            println!("  {}  {}", Style::label("template"), Style::secondary("(free text)"));
            for line in description.lines() {
                println!("    {line}");
            }
        }
        Some(Selection::Template(record)) => {
            let kind = record.kind();
            println!(
                "  {}  {} {}",
                Style::label("template"),
                Style::value(kind.id()),
                Style::secondary(kind.display_name())
            );
            print_fields(record);
            println!(
                "  {}   {}",
                Style::label("closing"),
                state.closing_remarks.get(kind)
            );
        }
    }

    if state.recipients.is_empty() {
        println!("  {}        {}", Style::label("to"), Style::secondary("(none)"));
    } else {
        for recipient in &state.recipients {
            println!(
                "  {}        {} {}",
                Style::label("to"),
                Style::value(recipient.honorific()),
                Style::secondary(recipient.summary())
            );
        }
        println!(
            "  {}   {}",
            Style::label("address"),
            Style::code(state.recipients.addresses())
        );
    }

    let sender = state.profile.introduction();
    println!(
        "  {}      {}",
        Style::label("from"),
        if sender.is_empty() {
            Style::warning("(profile not set, run 'maildraft profile')")
        } else {
            Style::value(sender)
        }
    );
    println!();

    if !state.draft.is_empty() {
        print_draft(&state.draft, false);
        println!();
    }
}

fn print_fields(record: &FieldRecord) {
    let Ok(serde_json::Value::Object(map)) = serde_json::to_value(record) else {
        return;
    };
    let Some(serde_json::Value::Object(fields)) = map.get("fields") else {
        return;
    };
    for name in record.field_names() {
        let value = fields.get(*name).and_then(serde_json::Value::as_str).unwrap_or("");
        println!(
            "    {:14} {}",
            Style::code(name),
            if value.is_empty() {
                Style::secondary("-")
            } else {
                value.to_string()
            }
        );
    }
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
