use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "STOREDIR_ENV"));
}

#[test]
fn build_app_config_defaults_from_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_source, "./data/stores.json");
    assert_eq!(cfg.brands_path.to_string_lossy(), "./config/brands.yaml");
    assert!(cfg.exclude_brand.is_none());
    assert_eq!(cfg.page_size, 50);
    assert_eq!(cfg.chunk_size, 1000);
    assert_eq!(cfg.top_limit, 10);
    assert_eq!(cfg.search_debounce_ms, 300);
    assert_eq!(cfg.scroll_debounce_ms, 100);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "storedir/0.1 (catalog-loader)");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("STOREDIR_ENV", "production");
    map.insert("STOREDIR_DATA_SOURCE", "https://example.com/cfe.json");
    map.insert("STOREDIR_EXCLUDE_BRAND", "CHEDRAUI");
    map.insert("STOREDIR_PAGE_SIZE", "25");
    map.insert("STOREDIR_SEARCH_DEBOUNCE_MS", "150");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.data_source, "https://example.com/cfe.json");
    assert_eq!(cfg.exclude_brand.as_deref(), Some("CHEDRAUI"));
    assert_eq!(cfg.page_size, 25);
    assert_eq!(cfg.search_debounce().as_millis(), 150);
}

#[test]
fn blank_exclude_brand_is_ignored() {
    let mut map = HashMap::new();
    map.insert("STOREDIR_EXCLUDE_BRAND", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.exclude_brand.is_none());
}

#[test]
fn build_app_config_rejects_zero_page_size() {
    let mut map = HashMap::new();
    map.insert("STOREDIR_PAGE_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREDIR_PAGE_SIZE"),
        "expected InvalidEnvVar(STOREDIR_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_chunk_size() {
    let mut map = HashMap::new();
    map.insert("STOREDIR_CHUNK_SIZE", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREDIR_CHUNK_SIZE"),
        "expected InvalidEnvVar(STOREDIR_CHUNK_SIZE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("STOREDIR_REQUEST_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREDIR_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOREDIR_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unknown_env() {
    let mut map = HashMap::new();
    map.insert("STOREDIR_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREDIR_ENV"));
}
