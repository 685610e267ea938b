use anyhow::Result;

use super::load_config_file;
use crate::config::ProviderConfig;
use crate::ui::Style;

/// Prints configured providers.
///
/// With `specific_provider`, shows that provider's endpoint, key status and models.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let config = load_config_file()?;

    if config.providers.is_empty() {
        println!("No providers configured.");
        println!("Add providers to ~/.config/maildraft/config.toml");
        return Ok(());
    }

    let default_provider = config.maildraft.provider.as_deref();
    let marker = |name: &str| {
        if default_provider == Some(name) {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        }
    };

    if let Some(name) = specific_provider {
        let Some(provider) = config.providers.get(name) else {
            anyhow::bail!("Provider '{name}' not found");
        };
        println!("{}{}", Style::header(name), marker(name));
        print_provider_details(provider);
        return Ok(());
    }

    let mut names: Vec<&String> = config.providers.keys().collect();
    names.sort_unstable();

    println!("{}", Style::header("Configured providers"));
    for name in names {
        let provider = &config.providers[name];
        println!("  {}{}", Style::value(name), marker(name));
        println!(
            "    {} {}",
            Style::label("endpoint"),
            Style::secondary(&provider.endpoint)
        );
        if !provider.models.is_empty() {
            println!(
                "    {}   {}",
                Style::label("models"),
                provider.models.join(", ")
            );
        }
    }

    Ok(())
}

fn print_provider_details(provider: &ProviderConfig) {
    println!(
        "  {} {}",
        Style::label("endpoint"),
        Style::secondary(&provider.endpoint)
    );
    if provider.requires_api_key() {
        let status = if provider.get_api_key().is_some() {
            Style::success("(set)")
        } else {
            Style::warning("(not set)")
        };
        println!("  {}  {status}", Style::label("api_key"));
    }
    if provider.models.is_empty() {
        println!("  {}   {}", Style::label("models"), Style::secondary("(none configured)"));
    } else {
        println!("  {}", Style::label("models"));
        for model in &provider.models {
            println!("    - {model}");
        }
    }
}
