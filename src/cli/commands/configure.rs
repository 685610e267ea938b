//! Configure command handler for the default provider and model.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::config::{ConfigFile, ConfigManager, DefaultsConfig};
use crate::ui::{Style, handle_prompt_cancellation};

/// Prints the config file location and the current defaults.
pub fn show_config() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;

    println!(
        "{} {}",
        Style::label("file"),
        Style::secondary(manager.config_path().display())
    );
    print_current_defaults(&config);
    println!(
        "  {} {}",
        Style::label("recipients"),
        Style::value(config.recipients.len())
    );
    Ok(())
}

/// Interactively sets the default provider and model.
pub fn run_configure() -> Result<()> {
    handle_prompt_cancellation(run_configure_inner)
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    if config.providers.is_empty() {
        bail!(
            "No providers configured.\n\n\
             Add a [providers.<name>] section to {} first.",
            manager.config_path().display()
        );
    }

    print_current_defaults(&config);

    let mut provider_names: Vec<String> = config.providers.keys().cloned().collect();
    provider_names.sort_unstable();
    let provider = select_provider(&provider_names, config.maildraft.provider.as_deref())?;

    let available_models = config
        .providers
        .get(&provider)
        .map(|p| p.models.clone())
        .unwrap_or_default();
    let model = select_model(&available_models, config.maildraft.model.as_deref())?;

    config.maildraft = DefaultsConfig {
        provider: Some(provider),
        model: Some(model),
    };
    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    let show = |value: Option<&str>| value.map_or_else(|| Style::secondary("(not set)"), Style::value);

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}  {}",
        Style::label("provider"),
        show(config.maildraft.provider.as_deref())
    );
    println!(
        "  {}     {}",
        Style::label("model"),
        show(config.maildraft.model.as_deref())
    );
    println!();
}

fn select_provider(providers: &[String], default: Option<&str>) -> Result<String> {
    let default_index = default
        .and_then(|d| providers.iter().position(|p| p == d))
        .unwrap_or(0);

    let selection = Select::new("Default provider:", providers.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_model(available_models: &[String], default: Option<&str>) -> Result<String> {
    if available_models.is_empty() {
        let mut prompt = Text::new("Default model:").with_help_message("Enter the model name");
        if let Some(d) = default {
            prompt = prompt.with_default(d);
        }

        let model = prompt.prompt()?;
        if model.trim().is_empty() {
            bail!("Model name cannot be empty");
        }
        return Ok(model.trim().to_string());
    }

    let default_index = default
        .and_then(|d| available_models.iter().position(|m| m == d))
        .unwrap_or(0);

    let selection = Select::new("Default model:", available_models.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}
