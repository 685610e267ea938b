use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::fs::atomic_write;
use crate::paths;
use crate::recipient::Recipient;

/// Default settings in the `[maildraft]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default model name.
    pub model: Option<String>,
}

/// Configuration for a text-generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.is_empty())
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/maildraft/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub maildraft: DefaultsConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Recipient directory.
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The selected provider name.
    pub provider_name: String,
    /// The API endpoint URL.
    pub endpoint: String,
    /// The model to use for generation.
    pub model: String,
    /// The API key, if one was found.
    pub api_key: Option<String>,
    /// Whether the provider declares a key at all. A required but missing key
    /// is reported by the composer instead of failing resolution.
    pub credential_required: bool,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Provider name override.
    pub provider: Option<String>,
    /// Model name override.
    pub model: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// # Errors
///
/// Returns an error if the provider or model is missing, or if the provider
/// is not configured.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let provider_name = options
        .provider
        .as_ref()
        .or(config_file.maildraft.provider.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'provider'\n\n\
                 Please provide it via:\n  \
                 - CLI option: maildraft --provider <name>\n  \
                 - Config file: ~/.config/maildraft/config.toml"
            )
        })?;

    let provider_config = config_file.providers.get(&provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        if available.is_empty() {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/maildraft/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/maildraft/config.toml",
                available.join("\n  - ")
            )
        }
    })?;

    let model = options
        .model
        .as_ref()
        .or(config_file.maildraft.model.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'model'\n\n\
                 Please provide it via:\n  \
                 - CLI option: maildraft --model <name>\n  \
                 - Config file: ~/.config/maildraft/config.toml"
            )
        })?;

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        tracing::warn!(
            model = %model,
            provider = %provider_name,
            configured = %provider_config.models.join(", "),
            "Model is not in the configured models list, proceeding anyway"
        );
    }

    let api_key = provider_config.get_api_key();
    let credential_required = provider_config.requires_api_key();

    if credential_required && api_key.is_none() {
        tracing::warn!(provider = %provider_name, "Provider requires an API key but none was found");
    }

    Ok(ResolvedConfig {
        provider_name,
        endpoint: provider_config.endpoint.clone(),
        model,
        api_key,
        credential_required,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/maildraft/config.toml`
    /// or `~/.config/maildraft/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Uses an explicit config file path.
    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the config file, falling back to defaults if it is missing.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(ConfigFile::default());
        }
        self.load()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let config = create_test_config();
        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.maildraft.provider, Some("ollama".to_string()));
        assert_eq!(loaded.maildraft.model, Some("gemma3:12b".to_string()));
        assert!(loaded.providers.contains_key("ollama"));
        assert_eq!(loaded.recipients.len(), 1);
        assert_eq!(loaded.recipients[0].name, "홍길동");
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        let config = manager.load_or_default().unwrap();
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_load_or_default_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[maildraft\nprovider =").unwrap();

        assert!(manager.load_or_default().is_err());
    }

    #[test]
    fn test_parse_recipients_table() {
        let toml_str = r#"
            [maildraft]
            provider = "ollama"

            [[recipients]]
            id = "2"
            name = "을지문덕"
            position = "수석"
            role = "개발자"
            department = "팀장"
            email = "moonduck@company.com"
        "#;
        let config: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(config.recipients[0].department.as_deref(), Some("팀장"));
        assert_eq!(config.recipients[0].honorific(), "을지문덕 수석님");
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_from_env() {
        // SAFETY: serialized test, only touches a test-specific env var
        unsafe {
            std::env::set_var("MAILDRAFT_TEST_API_KEY", "test-key-value");
        }

        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("MAILDRAFT_TEST_API_KEY".to_string()),
            models: vec![],
        };

        // Environment variable takes priority
        assert_eq!(provider.get_api_key(), Some("test-key-value".to_string()));

        // SAFETY: Cleanup test env var
        unsafe {
            std::env::remove_var("MAILDRAFT_TEST_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_fallback() {
        // SAFETY: serialized test, only touches a test-specific env var
        unsafe {
            std::env::remove_var("MAILDRAFT_NONEXISTENT_KEY");
        }

        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("MAILDRAFT_NONEXISTENT_KEY".to_string()),
            models: vec![],
        };

        assert_eq!(provider.get_api_key(), Some("fallback-key".to_string()));
    }

    #[test]
    fn test_provider_empty_inline_key_is_missing() {
        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some(String::new()),
            api_key_env: None,
            models: vec![],
        };
        assert!(provider.requires_api_key());
        assert!(provider.get_api_key().is_none());
    }

    // resolve_config tests

    fn create_test_options() -> ResolveOptions {
        ResolveOptions {
            provider: Some("ollama".to_string()),
            model: Some("gemma3:12b".to_string()),
        }
    }

    fn create_test_config() -> ConfigFile {
        let mut providers = HashMap::new();
        providers.insert(
            "ollama".to_string(),
            ProviderConfig {
                endpoint: "http://localhost:11434".to_string(),
                api_key: None,
                api_key_env: None,
                models: vec!["gemma3:12b".to_string()],
            },
        );
        providers.insert(
            "openrouter".to_string(),
            ProviderConfig {
                endpoint: "https://openrouter.ai/api".to_string(),
                api_key: None,
                api_key_env: Some("MAILDRAFT_TEST_NONEXISTENT_API_KEY".to_string()),
                models: vec!["gpt-4o".to_string()],
            },
        );

        ConfigFile {
            maildraft: DefaultsConfig {
                provider: Some("ollama".to_string()),
                model: Some("gemma3:12b".to_string()),
            },
            providers,
            recipients: vec![Recipient {
                id: "1".to_string(),
                name: "홍길동".to_string(),
                position: "선임".to_string(),
                role: "개발자".to_string(),
                department: None,
                email: "hong@company.com".to_string(),
            }],
        }
    }

    #[test]
    fn test_resolve_config_with_cli_options() {
        let resolved = resolve_config(&create_test_options(), &create_test_config()).unwrap();

        assert_eq!(resolved.provider_name, "ollama");
        assert_eq!(resolved.endpoint, "http://localhost:11434");
        assert_eq!(resolved.model, "gemma3:12b");
        assert!(resolved.api_key.is_none());
        assert!(!resolved.credential_required);
    }

    #[test]
    fn test_resolve_config_cli_overrides_file() {
        let mut options = create_test_options();
        options.model = Some("llama3".to_string());

        let resolved = resolve_config(&options, &create_test_config()).unwrap();

        assert_eq!(resolved.model, "llama3");
    }

    #[test]
    fn test_resolve_config_falls_back_to_file() {
        let resolved = resolve_config(&ResolveOptions::default(), &create_test_config()).unwrap();

        assert_eq!(resolved.provider_name, "ollama");
        assert_eq!(resolved.model, "gemma3:12b");
    }

    #[test]
    fn test_resolve_config_missing_provider() {
        let options = ResolveOptions {
            provider: None,
            model: Some("model".to_string()),
        };

        let result = resolve_config(&options, &ConfigFile::default());

        assert!(result.unwrap_err().to_string().contains("provider"));
    }

    #[test]
    fn test_resolve_config_provider_not_found() {
        let mut options = create_test_options();
        options.provider = Some("nonexistent".to_string());

        let err = resolve_config(&options, &create_test_config()).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("not found"));
        assert!(message.contains("ollama"));
    }

    #[test]
    fn test_resolve_config_missing_model() {
        let mut options = create_test_options();
        options.model = None;

        let mut config = create_test_config();
        config.maildraft.model = None;

        let result = resolve_config(&options, &config);

        assert!(result.unwrap_err().to_string().contains("model"));
    }

    #[test]
    fn test_resolve_config_missing_key_is_not_an_error() {
        let options = ResolveOptions {
            provider: Some("openrouter".to_string()),
            model: Some("gpt-4o".to_string()),
        };

        let resolved = resolve_config(&options, &create_test_config()).unwrap();

        assert!(resolved.credential_required);
        assert!(resolved.api_key.is_none());
    }
}
