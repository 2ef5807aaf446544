//! Environment-driven configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use storefront_catalog::{DiscountPolicy, DiscountTable};
use storefront_observability::{LogConfig, LogFormat};

pub const CATALOG_URL: &str = "STOREFRONT_CATALOG_URL";
pub const DISCOUNT_RULES: &str = "STOREFRONT_DISCOUNT_RULES";
pub const LOG_FORMAT: &str = "STOREFRONT_LOG_FORMAT";
pub const LOG_LEVEL: &str = "STOREFRONT_LOG_LEVEL";
pub const HTTP_TIMEOUT_SECS: &str = "STOREFRONT_HTTP_TIMEOUT_SECS";

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("failed to load discount rules from {path}: {message}")]
    DiscountRules { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub catalog_url: String,
    /// JSON [`DiscountTable`]; the built-in table is used when unset.
    pub discount_rules: Option<PathBuf>,
    pub log: LogConfig,
    pub http_timeout: Duration,
    /// Keys that were unset and fell back to defaults (reported once logging is up).
    pub defaulted: Vec<&'static str>,
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value lookup (environment, test maps).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut defaulted = Vec::new();
        let mut get = |key: &'static str| {
            let value = lookup(key).filter(|v| !v.trim().is_empty());
            if value.is_none() {
                defaulted.push(key);
            }
            value
        };

        let catalog_url = get(CATALOG_URL).unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        if !catalog_url.starts_with("http://") && !catalog_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: CATALOG_URL,
                message: format!("'{catalog_url}' is not an http(s) URL"),
            });
        }

        let discount_rules = get(DISCOUNT_RULES).map(PathBuf::from);

        let format = match get(LOG_FORMAT) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|message| ConfigError::Invalid { key: LOG_FORMAT, message })?,
            None => LogFormat::default(),
        };
        let level = get(LOG_LEVEL).unwrap_or_else(|| LogConfig::default().level);

        let timeout_secs = match get(HTTP_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: HTTP_TIMEOUT_SECS,
                message: e.to_string(),
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            catalog_url,
            discount_rules,
            log: LogConfig { format, level },
            http_timeout: Duration::from_secs(timeout_secs),
            defaulted,
        })
    }

    pub fn discount_policy(&self) -> Result<DiscountPolicy, ConfigError> {
        match &self.discount_rules {
            Some(path) => load_discount_table(path).map(DiscountPolicy::from_table),
            None => Ok(DiscountPolicy::default()),
        }
    }
}

pub fn load_discount_table(path: &Path) -> Result<DiscountTable, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::DiscountRules {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::DiscountRules {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
