use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use super::command::{Input, RecipientAction, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::compose::Session;
use crate::draft::LanguageTag;
use crate::llm::TextGenerator;
use crate::recipient::{Recipient, lookup, search};
use crate::store::KeyValueStore;
use crate::template::{Selection, TemplateKind};
use crate::ui::{Spinner, Style, copy_to_clipboard, print_draft};

/// Provider and model shown in the header.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub provider_name: String,
    pub model: String,
}

/// Interactive compose loop driving one [`Session`].
pub struct ComposeRepl<G, S> {
    config: ReplConfig,
    session: Session<G, S>,
    directory: Vec<Recipient>,
}

impl<G: TextGenerator, S: KeyValueStore> ComposeRepl<G, S> {
    pub const fn new(config: ReplConfig, session: Session<G, S>, directory: Vec<Recipient>) -> Self {
        Self {
            config,
            session,
            directory,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(&self.config.provider_name, &self.config.model);

        let prompt_style = Styled::new("✉")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Describe the email or use /template, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd).await {
                            break;
                        }
                    }
                    Input::Text(text) => self.describe(&text),
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Returns `false` when the loop should end.
    async fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Template(id) => self.select_template(id.as_deref()),
            SlashCommand::To(action) => self.handle_recipient(action),
            SlashCommand::Set { field, value } => self.set_field(&field, &value),
            SlashCommand::Describe(text) => self.describe(&text),
            SlashCommand::Generate => self.generate().await,
            SlashCommand::Translate(lang) => self.translate(lang.as_deref()).await,
            SlashCommand::Copy => self.copy(),
            SlashCommand::Show => ui::print_state(self.session.state()),
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    fn select_template(&mut self, id: Option<&str>) {
        let Some(id) = id else {
            ui::print_templates();
            return;
        };
        match id.parse::<TemplateKind>() {
            Ok(kind) => {
                self.session.select_template(kind);
                ui::print_success(&format!(
                    "Template set to {} {}",
                    Style::value(kind.id()),
                    Style::secondary(kind.display_name())
                ));
                if let Some(Selection::Template(record)) = &self.session.state().selection {
                    println!(
                        "  {} {}",
                        Style::label("fields:"),
                        Style::code(record.field_names().join(", "))
                    );
                }
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    fn handle_recipient(&mut self, action: RecipientAction) {
        match action {
            RecipientAction::List => {
                let candidates = search(&self.directory, "", &self.session.state().recipients);
                ui::print_candidates(&candidates);
            }
            RecipientAction::Remove(id) => {
                if self.session.remove_recipient(&id) {
                    ui::print_success(&format!("Removed recipient {}", Style::code(&id)));
                } else {
                    ui::print_error(&format!("Recipient '{id}' is not selected"));
                }
            }
            RecipientAction::Add(key) => match lookup(&self.directory, &key) {
                Ok(recipient) => {
                    let honorific = recipient.honorific();
                    if self.session.add_recipient(recipient.clone()) {
                        ui::print_success(&format!("Added {}", Style::value(honorific)));
                    } else {
                        ui::print_error(&format!("{honorific} is already selected"));
                    }
                }
                Err(candidates) if candidates.is_empty() => {
                    ui::print_error(&format!("No recipient matches '{key}'"));
                }
                Err(candidates) => {
                    println!("{}", Style::hint("Several recipients match; use /to <id>:"));
                    ui::print_candidates(&candidates);
                }
            },
        }
    }

    fn set_field(&mut self, field: &str, value: &str) {
        if field.is_empty() {
            println!("Usage: /set <field> <value>");
            return;
        }
        match self.session.set_field(field, value) {
            Ok(()) => ui::print_success(&format!("{} updated", Style::code(field))),
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    fn describe(&mut self, text: &str) {
        if text.trim().is_empty() {
            ui::print_error("Usage: /describe <what the email is about>");
            return;
        }
        self.session.set_free_text(text);
        ui::print_success("Description set (free text, no template)");
    }

    async fn generate(&mut self) {
        let result = {
            let _spinner = Spinner::new("Generating email...");
            self.session.generate().await
        };
        match result {
            Ok(None) => print_draft(self.session.draft(), false),
            Ok(Some(failure)) => {
                print_draft(self.session.draft(), false);
                ui::print_error(&failure.to_string());
            }
            Err(precondition) => ui::print_error(&precondition.to_string()),
        }
        println!();
    }

    async fn translate(&mut self, lang: Option<&str>) {
        let Some(lang) = lang else {
            ui::print_error("Usage: /translate <language> (ko, en, ja, zh)");
            return;
        };
        let target = match lang.parse::<LanguageTag>() {
            Ok(target) => target,
            Err(e) => {
                ui::print_error(&e.to_string());
                return;
            }
        };
        if self.session.draft().language == Some(target) {
            println!("{}", Style::hint(format!("The draft is already in {}.", target.native_label())));
            return;
        }

        let result = {
            let _spinner = Spinner::new("Translating...");
            self.session.translate(target).await
        };
        match result {
            Ok(()) => {
                print_draft(self.session.draft(), false);
                println!();
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    fn copy(&self) {
        if self.session.draft().body.is_empty() {
            ui::print_error("There is no draft to copy");
            return;
        }
        let plain = self.session.plain_body();
        match copy_to_clipboard(&plain) {
            Ok(()) => ui::print_success("Body copied to clipboard"),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "Clipboard unavailable");
                println!("{}", Style::hint("Clipboard unavailable; plain text follows:"));
                println!("{plain}");
            }
        }
    }
}
