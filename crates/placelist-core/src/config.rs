use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read regions file {path}: {source}")]
    RegionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse regions file: {0}")]
    RegionsFileParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<bool>().map_err(|_| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected 'true' or 'false', got '{raw}'"),
        })
    };

    let keyword = require("PLACELIST_KEYWORD")?;

    let api_keys: Vec<String> = require("PLACELIST_API_KEYS")?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if api_keys.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLACELIST_API_KEYS".to_string(),
            reason: "expected a comma-separated list of at least one key".to_string(),
        });
    }

    let key_budget = parse_u32("PLACELIST_KEY_BUDGET", "2000")?;
    let charge_failed_requests = parse_bool("PLACELIST_CHARGE_FAILED_REQUESTS", "true")?;
    let request_timeout_secs = parse_u64("PLACELIST_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("PLACELIST_USER_AGENT", "placelist/0.1 (poi-collection)");
    let inter_request_delay_ms = parse_u64("PLACELIST_INTER_REQUEST_DELAY_MS", "200")?;
    let inter_region_delay_ms = parse_u64("PLACELIST_INTER_REGION_DELAY_MS", "500")?;
    let regions_path = PathBuf::from(or_default("PLACELIST_REGIONS_PATH", "./config/regions.yaml"));
    let output_path = PathBuf::from(or_default("PLACELIST_OUTPUT_PATH", "merchants_data.json"));
    let log_path = PathBuf::from(or_default("PLACELIST_LOG_PATH", "collection.log"));
    let log_level = or_default("PLACELIST_LOG_LEVEL", "info");

    Ok(AppConfig {
        keyword,
        api_keys,
        key_budget,
        charge_failed_requests,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        inter_region_delay_ms,
        regions_path,
        output_path,
        log_path,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
