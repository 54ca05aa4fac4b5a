//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::application::errors::ConfigError;

/// Environment variable holding the Telegram bot token
pub const TOKEN_ENV: &str = "BOT_TOKEN";

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TelegramConfig {
    /// Prefer the BOT_TOKEN environment variable over storing it here
    pub token: Option<String>,
    pub api_base: String,
    pub poll_timeout_secs: u64,
    /// Publish the command list with setMyCommands on startup
    pub register_commands: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "randomizer-bot".to_string(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: "https://api.telegram.org".to_string(),
            poll_timeout_secs: 30,
            register_commands: true,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, falling back to defaults, then apply
    /// environment overrides
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let config = if path.exists() {
            Config::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            })
        } else {
            Config::default()
        };

        config.with_env_token(std::env::var(TOKEN_ENV).ok())
    }

    /// Apply a token taken from the environment. Blank values are ignored.
    pub fn with_env_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.telegram.token = Some(token.trim().to_string());
        }
        self
    }

    /// The bot token, required by the Telegram transport
    pub fn telegram_token(&self) -> Result<&str, ConfigError> {
        self.telegram
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingEnvVar(TOKEN_ENV))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram.poll_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("telegram.poll-timeout-secs must be positive".to_string()));
        }
        if !self.telegram.api_base.starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "telegram.api-base is not a URL: {}",
                self.telegram.api_base
            )));
        }
        Ok(())
    }
}
