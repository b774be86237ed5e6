use serde::Deserialize;
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid windows: short={short}, long={long} (need 0 < short < long)")]
    InvalidWindows { short: usize, long: usize },
    #[error("symbol must not be empty")]
    EmptySymbol,
    #[error("environment variable {var} is not set")]
    MissingSecret { var: String },
    #[error("{field} = {value} is out of range (max {max})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

const MAX_LOOKBACK_DAYS: u64 = 36_500;
const MAX_WINDOW: u64 = 5_000;
const MAX_RETRIES: u64 = 10;
const MAX_RETRY_BASE_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub chat_id: i64,
    /// Name of the environment variable holding the bot token.
    #[serde(default = "default_bot_token_env")]
    pub bot_token_env: String,
    #[serde(default = "default_telegram_url")]
    pub api_base_url: String,
}

impl TelegramConfig {
    /// Looks the bot token up through `lookup` (the process environment in production).
    pub fn resolve_token<F>(&self, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(&self.bot_token_env)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingSecret {
                var: self.bot_token_env.clone(),
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub symbol: String,
    #[serde(default = "default_short_window")]
    pub short_window: usize,
    #[serde(default = "default_long_window")]
    pub long_window: usize,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u64,
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Alerts are only logged when absent.
    pub telegram: Option<TelegramConfig>,
}

impl AppConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::EmptySymbol);
        }
        if self.short_window == 0 || self.short_window >= self.long_window {
            return Err(ConfigError::InvalidWindows {
                short: self.short_window,
                long: self.long_window,
            });
        }
        check_max("long_window", self.long_window as u64, MAX_WINDOW)?;
        check_max("lookback_days", self.lookback_days, MAX_LOOKBACK_DAYS)?;
        check_max("provider.max_retries", self.provider.max_retries as u64, MAX_RETRIES)?;
        check_max(
            "provider.retry_base_delay_ms",
            self.provider.retry_base_delay_ms,
            MAX_RETRY_BASE_DELAY_MS,
        )?;
        Ok(())
    }
}

fn check_max(field: &'static str, value: u64, max: u64) -> Result<(), ConfigError> {
    if value > max {
        return Err(ConfigError::OutOfRange { field, value, max });
    }
    Ok(())
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    AppConfig::from_json(&content)
}

fn default_short_window() -> usize { 8 }
fn default_long_window() -> usize { 21 }
fn default_lookback_days() -> u64 { 365 }
fn default_provider_url() -> String { "https://query1.finance.yahoo.com".into() }
fn default_timeout_seconds() -> u64 { 10 }
fn default_max_retries() -> u32 { 3 }
fn default_retry_base_delay_ms() -> u64 { 500 }
fn default_bot_token_env() -> String { "TELEGRAM_BOT_TOKEN".into() }
fn default_telegram_url() -> String { "https://api.telegram.org".into() }
