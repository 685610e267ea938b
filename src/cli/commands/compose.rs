use anyhow::Result;

use super::load_config_file;
use crate::compose::Session;
use crate::config::{ResolveOptions, resolve_config};
use crate::llm::ChatClient;
use crate::repl::{ComposeRepl, ReplConfig};
use crate::store::SqliteStore;

pub async fn run_compose(options: &ResolveOptions) -> Result<()> {
    let config_file = load_config_file()?;
    let resolved = resolve_config(options, &config_file)?;

    let session = Session::new(ChatClient::from_config(&resolved), SqliteStore::new()?);
    let config = ReplConfig {
        provider_name: resolved.provider_name,
        model: resolved.model,
    };

    let mut repl = ComposeRepl::new(config, session, config_file.recipients);
    repl.run().await
}
