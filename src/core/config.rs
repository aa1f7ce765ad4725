use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds between sweeps over the whole directory.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Pacing delay before each account's spend read, for API rate limits.
    #[serde(default = "default_account_delay")]
    pub account_delay_ms: u64,
    #[serde(default = "default_graph_version")]
    pub graph_api_version: String,
}

fn default_poll_interval() -> u64 {
    300
}
fn default_account_delay() -> u64 {
    1000
}
fn default_graph_version() -> String {
    crate::core::graph::default_version()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            account_delay_ms: default_account_delay(),
            graph_api_version: default_graph_version(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Operator-facing label, only used in logs.
    #[serde(default)]
    pub label: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub credentials: Vec<CredentialConfig>,
}

impl AppConfig {
    /// Get the config file path, respecting XDG_CONFIG_HOME
    pub fn config_path() -> PathBuf {
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            });
        config_dir.join("spendwatch").join("config.toml")
    }

    /// Load config from the default path, falling back to defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Write a commented starter config to the config file path.
    pub fn write_template() -> Result<PathBuf, std::io::Error> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, TEMPLATE)?;
        Ok(path)
    }

    /// Graph API access tokens to monitor, in order. Config entries win;
    /// with none configured, the FB_ACCESS_TOKEN / FB_ACCESS_TOKEN_BM1 env
    /// vars are used instead.
    pub fn access_tokens(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .credentials
            .iter()
            .map(|c| c.access_token.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !configured.is_empty() {
            return configured;
        }

        ["FB_ACCESS_TOKEN", "FB_ACCESS_TOKEN_BM1"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .filter(|t| !t.trim().is_empty())
            .collect()
    }

    pub fn telegram_bot_token(&self) -> Option<String> {
        non_empty(self.telegram.bot_token.clone())
            .or_else(|| std::env::var("TELEGRAM_BOT_TOKEN").ok())
    }

    pub fn telegram_chat_id(&self) -> Option<String> {
        non_empty(self.telegram.chat_id.clone())
            .or_else(|| std::env::var("TELEGRAM_CHAT_ID").ok())
    }

    /// Validate the config
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.settings.poll_interval_secs == 0 {
            issues.push("poll_interval_secs must be at least 1".to_string());
        }
        if !self.settings.graph_api_version.starts_with('v') {
            issues.push(format!(
                "Invalid graph_api_version: '{}' (expected e.g. 'v22.0')",
                self.settings.graph_api_version
            ));
        }
        if self.access_tokens().is_empty() {
            issues.push(
                "No access tokens: add a [[credentials]] entry or set FB_ACCESS_TOKEN".to_string(),
            );
        }
        if self.telegram_bot_token().is_none() {
            issues.push(
                "No Telegram bot token: set [telegram] bot_token or TELEGRAM_BOT_TOKEN".to_string(),
            );
        }
        if self.telegram_chat_id().is_none() {
            issues.push(
                "No Telegram chat id: set [telegram] chat_id or TELEGRAM_CHAT_ID".to_string(),
            );
        }
        issues
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

const TEMPLATE: &str = r#"[settings]
# Seconds between full sweeps over every monitored account.
poll_interval_secs = 300
# Pacing delay (ms) before each account's spend read.
account_delay_ms = 1000
graph_api_version = "v22.0"

[telegram]
# Falls back to TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID env vars when unset.
bot_token = ""
chat_id = ""

# One entry per Graph API access token to monitor. With no entries, the
# FB_ACCESS_TOKEN and FB_ACCESS_TOKEN_BM1 env vars are used instead.
#[[credentials]]
#label = "primary"
#access_token = ""
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.poll_interval_secs, 300);
        assert_eq!(settings.account_delay_ms, 1000);
        assert_eq!(settings.graph_api_version, "v22.0");
    }

    #[test]
    fn parse_empty_toml_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.settings.poll_interval_secs, 300);
        assert!(config.credentials.is_empty());
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn parse_minimal_toml() {
        let toml = r#"
[settings]
poll_interval_secs = 60

[telegram]
bot_token = "bot:abc"
chat_id = "-100123"

[[credentials]]
label = "primary"
access_token = "EAAtoken"
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.settings.poll_interval_secs, 60);
        assert_eq!(config.settings.account_delay_ms, 1000);
        assert_eq!(config.credentials.len(), 1);
        assert_eq!(config.credentials[0].label, "primary");
        assert_eq!(config.access_tokens(), vec!["EAAtoken".to_string()]);
        assert_eq!(config.telegram_bot_token().as_deref(), Some("bot:abc"));
        assert_eq!(config.telegram_chat_id().as_deref(), Some("-100123"));
    }

    #[test]
    fn template_parses_back() {
        let config: AppConfig = toml::from_str(TEMPLATE).unwrap();
        assert_eq!(config.settings.poll_interval_secs, 300);
        assert!(config.credentials.is_empty());
    }

    #[test]
    fn configured_tokens_preserve_order() {
        let toml = r#"
[[credentials]]
access_token = "first"

[[credentials]]
access_token = "second"
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.access_tokens(),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn validate_catches_zero_interval() {
        let mut config = AppConfig::default();
        config.settings.poll_interval_secs = 0;
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("poll_interval_secs")));
    }

    #[test]
    fn validate_catches_bad_version() {
        let mut config = AppConfig::default();
        config.settings.graph_api_version = "22.0".to_string();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("graph_api_version")));
    }

    #[test]
    fn config_path_uses_xdg_when_set() {
        std::env::set_var("XDG_CONFIG_HOME", "/tmp/test_xdg_config");
        let path = AppConfig::config_path();
        std::env::remove_var("XDG_CONFIG_HOME");
        assert_eq!(
            path,
            PathBuf::from("/tmp/test_xdg_config/spendwatch/config.toml")
        );
    }
}
