use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub rate_limit: RateLimitConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub bot_token: SecretString,
    /// Chat that receives qualified-lead notifications. Lead escalation is
    /// disabled while this is unset.
    pub admin_chat_id: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub requests: usize,
    pub window_secs: u64,
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub price_list_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig { bot_token: String::new().into(), admin_chat_id: None },
            rate_limit: RateLimitConfig { requests: 10, window_secs: 60 },
            catalog: CatalogConfig { price_list_path: PathBuf::from("price_list.csv") },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    telegram: Option<TelegramPatch>,
    rate_limit: Option<RateLimitPatch>,
    catalog: Option<CatalogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct TelegramPatch {
    bot_token: Option<String>,
    admin_chat_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct RateLimitPatch {
    requests: Option<usize>,
    window_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    price_list_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<String>,
}

impl AppConfig {
    /// Defaults, then the optional TOML file, then `WRENCHBOT_*`
    /// environment overrides, then validation.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = options.config_path.as_deref() {
            if path.exists() {
                let patch = read_patch(path)?;
                config.apply_patch(patch)?;
            } else if options.require_file {
                return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) -> Result<(), ConfigError> {
        if let Some(telegram) = patch.telegram {
            if let Some(token) = telegram.bot_token {
                self.telegram.bot_token = token.into();
            }
            if let Some(chat_id) = telegram.admin_chat_id {
                self.telegram.admin_chat_id = Some(chat_id);
            }
        }
        if let Some(rate_limit) = patch.rate_limit {
            if let Some(requests) = rate_limit.requests {
                self.rate_limit.requests = requests;
            }
            if let Some(window_secs) = rate_limit.window_secs {
                self.rate_limit.window_secs = window_secs;
            }
        }
        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.price_list_path {
                self.catalog.price_list_path = path;
            }
        }
        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format.parse()?;
            }
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(token) = read_env("WRENCHBOT_TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = token.into();
        }
        if let Some(value) = read_env("WRENCHBOT_ADMIN_CHAT_ID") {
            self.telegram.admin_chat_id =
                Some(parse_env("WRENCHBOT_ADMIN_CHAT_ID", &value)?);
        }
        if let Some(value) = read_env("WRENCHBOT_RATE_LIMIT_REQUESTS") {
            self.rate_limit.requests = parse_env("WRENCHBOT_RATE_LIMIT_REQUESTS", &value)?;
        }
        if let Some(value) = read_env("WRENCHBOT_RATE_LIMIT_WINDOW_SECS") {
            self.rate_limit.window_secs = parse_env("WRENCHBOT_RATE_LIMIT_WINDOW_SECS", &value)?;
        }
        if let Some(path) = read_env("WRENCHBOT_PRICE_LIST_PATH") {
            self.catalog.price_list_path = PathBuf::from(path);
        }
        if let Some(level) = read_env("WRENCHBOT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = read_env("WRENCHBOT_LOG_FORMAT") {
            self.logging.format = format.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                key: "WRENCHBOT_LOG_FORMAT".to_string(),
                value: format,
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit.requests == 0 {
            return Err(ConfigError::Validation(
                "rate_limit.requests must be at least 1".to_string(),
            ));
        }
        if self.rate_limit.window_secs == 0 {
            return Err(ConfigError::Validation(
                "rate_limit.window_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}
