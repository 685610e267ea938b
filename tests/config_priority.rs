#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! CLI options take priority over the `[maildraft]` defaults in config.toml.
//! A provider that declares a key but has none still resolves; the missing
//! credential is reported when a draft is generated.

use std::collections::HashMap;
use maildraft::config::{
    ConfigFile, ConfigManager, DefaultsConfig, ProviderConfig, ResolveOptions, resolve_config,
};
use tempfile::TempDir;

fn make_config_with_defaults() -> ConfigFile {
    let mut providers = HashMap::new();
    providers.insert(
        "test_provider".to_string(),
        ProviderConfig {
            endpoint: "http://test.local".to_string(),
            api_key: Some("test_key".to_string()),
            api_key_env: None,
            models: vec!["config_model".to_string()],
        },
    );
    providers.insert(
        "keyless".to_string(),
        ProviderConfig {
            endpoint: "http://localhost:11434".to_string(),
            api_key: None,
            api_key_env: None,
            models: vec![],
        },
    );

    ConfigFile {
        maildraft: DefaultsConfig {
            provider: Some("test_provider".to_string()),
            model: Some("config_model".to_string()),
        },
        providers,
        recipients: vec![],
    }
}

#[test]
fn test_config_defaults_used_when_cli_not_specified() {
    let config = make_config_with_defaults();

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.provider_name, "test_provider");
    assert_eq!(resolved.endpoint, "http://test.local");
    assert_eq!(resolved.model, "config_model");
    assert_eq!(resolved.api_key.as_deref(), Some("test_key"));
}

#[test]
fn test_cli_model_overrides_config_model() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        provider: None,
        model: Some("cli_model".to_string()),
    };

    let resolved = resolve_config(&options, &config).unwrap();

    // Models outside the configured list are allowed with a warning
    assert_eq!(resolved.model, "cli_model");
}

#[test]
fn test_cli_provider_overrides_config_provider() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        provider: Some("keyless".to_string()),
        model: None,
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.provider_name, "keyless");
    assert_eq!(resolved.endpoint, "http://localhost:11434");
    assert!(!resolved.credential_required);
    assert!(resolved.api_key.is_none());
}

#[test]
fn test_unknown_provider_lists_available() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        provider: Some("missing".to_string()),
        model: None,
    };

    let message = resolve_config(&options, &config).unwrap_err().to_string();
    assert!(message.contains("Provider 'missing' not found"));
    assert!(message.contains("keyless"));
    assert!(message.contains("test_provider"));
}

#[test]
fn test_missing_model_is_an_error() {
    let mut config = make_config_with_defaults();
    config.maildraft.model = None;

    let message = resolve_config(&ResolveOptions::default(), &config)
        .unwrap_err()
        .to_string();
    assert!(message.contains("'model'"));
}

#[test]
fn test_declared_but_missing_key_still_resolves() {
    let mut config = make_config_with_defaults();
    config.providers.insert(
        "needs_key".to_string(),
        ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: None,
            api_key_env: Some("MAILDRAFT_PRIORITY_TEST_UNSET_KEY".to_string()),
            models: vec![],
        },
    );
    let options = ResolveOptions {
        provider: Some("needs_key".to_string()),
        model: None,
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert!(resolved.credential_required);
    assert!(resolved.api_key.is_none());
}

#[test]
fn test_cli_options_override_saved_file() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(temp_dir.path().join("nested").join("config.toml"));
    manager.save(&make_config_with_defaults()).unwrap();

    let loaded = manager.load_or_default().unwrap();
    let options = ResolveOptions {
        provider: Some("keyless".to_string()),
        model: Some("gemma3:12b".to_string()),
    };
    let resolved = resolve_config(&options, &loaded).unwrap();

    assert_eq!(resolved.provider_name, "keyless");
    assert_eq!(resolved.model, "gemma3:12b");
}
