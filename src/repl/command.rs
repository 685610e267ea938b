use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/template", "Select a template"),
    ("/to", "Add a recipient (/to -<id> removes)"),
    ("/set", "Set a form field"),
    ("/describe", "Describe the email without a template"),
    ("/generate", "Generate subject and body"),
    ("/translate", "Translate the draft"),
    ("/copy", "Copy the body as plain text"),
    ("/show", "Show the current session"),
    ("/help", "Show available commands"),
    ("/quit", "Exit compose mode"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(' ') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement = highlighted_suggestion
            .map(|s| format!("{} ", s.split_whitespace().next().unwrap_or("")));
        Ok(replacement)
    }
}

/// What `/to` should do with its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientAction {
    /// No argument: list candidates.
    List,
    /// Id or search query.
    Add(String),
    /// `-<id>`
    Remove(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Template(Option<String>),
    To(RecipientAction),
    Set { field: String, value: String },
    Describe(String),
    Generate,
    Translate(Option<String>),
    Copy,
    Show,
    Help,
    Quit,
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    /// Plain text, taken as the email description.
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let (name, rest) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, rest)| (name, rest.trim()));
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    let command = match name {
        "template" | "t" => SlashCommand::Template(arg),
        "to" => SlashCommand::To(match arg {
            None => RecipientAction::List,
            Some(arg) => arg.strip_prefix('-').map_or_else(
                || RecipientAction::Add(arg.clone()),
                |id| RecipientAction::Remove(id.trim().to_string()),
            ),
        }),
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(field, value)| (field, value.trim()));
            SlashCommand::Set {
                field: field.to_string(),
                value: value.to_string(),
            }
        }
        "describe" => SlashCommand::Describe(rest.to_string()),
        "generate" | "g" => SlashCommand::Generate,
        "translate" => SlashCommand::Translate(arg),
        "copy" => SlashCommand::Copy,
        "show" => SlashCommand::Show,
        "help" => SlashCommand::Help,
        "quit" | "exit" | "q" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(cmd.to_string()),
    };
    Input::Command(command)
}
