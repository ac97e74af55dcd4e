//! Configuration loader for Flowgate.
//!
//! Reads `config.toml` from the data directory (`~/.flowgate` in
//! production) and deserializes it into [`FlowgateConfig`]. Falls back to
//! defaults when the file is missing or malformed. Bearer tokens never
//! live in the config file; they are read from the environment and
//! wrapped in `SecretString` at this edge.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use flowgate_types::credentials::{DirectusCredentials, WazzupCredentials};

/// Environment variable holding the Wazzup bearer token.
pub const WAZZUP_API_KEY_ENV: &str = "WAZZUP_API_KEY";

/// Environment variable holding the Directus bearer token.
pub const DIRECTUS_TOKEN_ENV: &str = "DIRECTUS_TOKEN";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowgateConfig {
    pub server: ServerConfig,
    pub trigger: TriggerConfig,
    pub wazzup: WazzupConfig,
    pub directus: DirectusConfig,
}

impl Default for FlowgateConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            trigger: TriggerConfig::default(),
            wazzup: WazzupConfig::default(),
            directus: DirectusConfig::default(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8700,
        }
    }
}

/// Trigger settings: where the platform should deliver webhooks, and
/// which event categories the user selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TriggerConfig {
    /// Externally reachable URL of this gateway's inbound webhook
    /// endpoint. Must be set before the trigger can be activated.
    pub callback_url: String,
    /// Selected event category names (`statuses`, `contacts_deals`,
    /// `channels`). May be empty: bare message events are always on.
    pub categories: Vec<String>,
}

/// Wazzup API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WazzupConfig {
    pub api_base: String,
}

impl Default for WazzupConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.wazzup24.com/v3".to_string(),
        }
    }
}

/// Directus instance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DirectusConfig {
    pub base_url: String,
}

/// Resolve the data directory: `FLOWGATE_DATA_DIR` if set, otherwise
/// `~/.flowgate`, falling back to a relative `.flowgate` when no home
/// directory can be determined.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FLOWGATE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".flowgate"))
        .unwrap_or_else(|| PathBuf::from(".flowgate"))
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`FlowgateConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the
///   default.
pub async fn load_config(data_dir: &Path) -> FlowgateConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return FlowgateConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return FlowgateConfig::default();
        }
    };

    match toml::from_str::<FlowgateConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            FlowgateConfig::default()
        }
    }
}

/// Read the Wazzup bearer token from the environment.
pub fn wazzup_credentials_from_env() -> Option<WazzupCredentials> {
    std::env::var(WAZZUP_API_KEY_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .map(|v| WazzupCredentials::new(v.into()))
}

/// Read the Directus bearer token from the environment and pair it with
/// the configured base URL.
pub fn directus_credentials_from_env(config: &DirectusConfig) -> Option<DirectusCredentials> {
    if config.base_url.is_empty() {
        return None;
    }
    std::env::var(DIRECTUS_TOKEN_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .map(|v| DirectusCredentials::new(config.base_url.clone(), v.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, FlowgateConfig::default());
        assert_eq!(config.server.port, 8700);
        assert_eq!(config.wazzup.api_base, "https://api.wazzup24.com/v3");
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[server]
host = "0.0.0.0"
port = 9000

[trigger]
callback_url = "https://example.com/hooks/wazzup"
categories = ["statuses", "channels"]

[directus]
base_url = "https://cms.example.com"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.trigger.callback_url, "https://example.com/hooks/wazzup");
        assert_eq!(config.trigger.categories, vec!["statuses", "channels"]);
        assert_eq!(config.directus.base_url, "https://cms.example.com");
        // Unset sections keep their defaults.
        assert_eq!(config.wazzup.api_base, "https://api.wazzup24.com/v3");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config, FlowgateConfig::default());
    }

    #[test]
    fn directus_credentials_require_base_url() {
        let config = DirectusConfig::default();
        // Even with a token in the environment there is nothing to talk
        // to without a base URL.
        assert!(directus_credentials_from_env(&config).is_none());
    }
}
