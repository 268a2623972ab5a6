use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment is valid.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<usize>() {
            Ok(0) => Err(invalid(var, "must be at least 1".to_string())),
            Ok(n) => Ok(n),
            Err(e) => Err(invalid(var, e.to_string())),
        }
    };

    let env = parse_environment(&or_default("STOREDIR_ENV", "development"))?;
    let log_level = or_default("STOREDIR_LOG_LEVEL", "info");
    let data_source = or_default("STOREDIR_DATA_SOURCE", "./data/stores.json");
    let brands_path = PathBuf::from(or_default("STOREDIR_BRANDS_PATH", "./config/brands.yaml"));
    let exclude_brand = lookup("STOREDIR_EXCLUDE_BRAND")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let page_size = parse_positive("STOREDIR_PAGE_SIZE", "50")?;
    let chunk_size = parse_positive("STOREDIR_CHUNK_SIZE", "1000")?;
    let top_limit = parse_positive("STOREDIR_TOP_LIMIT", "10")?;
    let search_debounce_ms = parse_u64("STOREDIR_SEARCH_DEBOUNCE_MS", "300")?;
    let scroll_debounce_ms = parse_u64("STOREDIR_SCROLL_DEBOUNCE_MS", "100")?;
    let request_timeout_secs = parse_u64("STOREDIR_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STOREDIR_USER_AGENT", "storedir/0.1 (catalog-loader)");

    Ok(AppConfig {
        env,
        log_level,
        data_source,
        brands_path,
        exclude_brand,
        page_size,
        chunk_size,
        top_limit,
        search_debounce_ms,
        scroll_debounce_ms,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREDIR_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
