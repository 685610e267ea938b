mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DefaultsConfig, ProviderConfig, ResolveOptions, ResolvedConfig,
    resolve_config,
};
