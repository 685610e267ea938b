use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use maildraft::cli::commands::{
    compose, configure, generate, profile, providers, recipients, remarks, templates,
};
use maildraft::cli::{Args, Command};
use maildraft::config::ResolveOptions;
use maildraft::draft::print_languages;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = ResolveOptions {
        provider: args.provider,
        model: args.model,
    };

    match args.command {
        Command::Generate(generate_args) => {
            generate::run_generate(&options, generate_args).await?;
        }
        Command::Compose => {
            compose::run_compose(&options).await?;
        }
        Command::Templates => {
            templates::print_templates();
        }
        Command::Languages => {
            print_languages();
        }
        Command::Recipients { query } => {
            recipients::print_recipients(query.as_deref())?;
        }
        Command::Providers { provider } => {
            providers::print_providers(provider.as_deref())?;
        }
        Command::Profile(profile_args) => {
            profile::run_profile(&profile_args)?;
        }
        Command::Remarks {
            template,
            text,
            reset,
        } => {
            remarks::run_remarks(template.as_deref(), text.as_deref(), reset)?;
        }
        Command::Configure { show } => {
            if show {
                configure::show_config()?;
            } else {
                configure::run_configure()?;
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays pipeable. `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "maildraft=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
