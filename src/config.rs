//! # Generator Configuration
//!
//! Generator-level settings loaded from environment variables.

use crate::constants::DEFAULT_ASSET_DIR;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "unknown log format '{other}', expected 'text' or 'json'"
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str("text"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Generator configuration
///
/// All settings have sensible defaults and can be overridden via environment
/// variables. Command-line flags take precedence over both.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    /// Ignored when RUST_LOG is set
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: LogFormat,
    /// Enable color in text format logs
    pub log_enable_color: bool,
    /// Directory holding install-config.yaml, manifests are written below it
    pub asset_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            log_format: LogFormat::Text,
            log_enable_color: true,
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            log_level: env_var_or_default_str("LOG_LEVEL", "INFO"),
            log_format: env_var_or_default("LOG_FORMAT", LogFormat::Text),
            log_enable_color: env_var_or_default_bool("LOG_ENABLE_COLOR", true),
            asset_dir: PathBuf::from(env_var_or_default_str("ASSET_DIR", DEFAULT_ASSET_DIR)),
        }
    }

    /// Log filter directive for this crate, e.g. `trust_bundle_manifests=info`
    pub fn log_directive(&self) -> String {
        format!(
            "{}={}",
            crate::constants::DEFAULT_LOG_TARGET,
            self.log_level.to_lowercase()
        )
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T: FromStr>(key: &str, default: T) -> T
where
    <T as FromStr>::Err: fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read environment variable as boolean or return default
fn env_var_or_default_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
