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

/// Returns a map with all required env vars populated with valid values.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("PLACELIST_KEYWORD", "沉香");
    m.insert("PLACELIST_API_KEYS", "key-a,key-b");
    m
}

#[test]
fn build_app_config_fails_without_keyword() {
    let mut map = full_env();
    map.remove("PLACELIST_KEYWORD");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "PLACELIST_KEYWORD"),
        "expected MissingEnvVar(PLACELIST_KEYWORD), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_api_keys() {
    let mut map = full_env();
    map.remove("PLACELIST_API_KEYS");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "PLACELIST_API_KEYS"),
        "expected MissingEnvVar(PLACELIST_API_KEYS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_api_key_list() {
    let mut map = full_env();
    map.insert("PLACELIST_API_KEYS", " , ,");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACELIST_API_KEYS"
    ));
}

#[test]
fn build_app_config_splits_and_trims_api_keys() {
    let mut map = full_env();
    map.insert("PLACELIST_API_KEYS", " key-a , key-b ,key-c");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.api_keys, vec!["key-a", "key-b", "key-c"]);
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.key_budget, 2000);
    assert!(config.charge_failed_requests);
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.inter_request_delay_ms, 200);
    assert_eq!(config.inter_region_delay_ms, 500);
    assert_eq!(config.output_path.to_str(), Some("merchants_data.json"));
    assert_eq!(config.log_path.to_str(), Some("collection.log"));
    assert_eq!(config.log_level, "info");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("PLACELIST_KEY_BUDGET", "50");
    map.insert("PLACELIST_CHARGE_FAILED_REQUESTS", "false");
    map.insert("PLACELIST_OUTPUT_PATH", "/tmp/out.json");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.key_budget, 50);
    assert!(!config.charge_failed_requests);
    assert_eq!(config.output_path.to_str(), Some("/tmp/out.json"));
}

#[test]
fn build_app_config_rejects_invalid_budget() {
    let mut map = full_env();
    map.insert("PLACELIST_KEY_BUDGET", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLACELIST_KEY_BUDGET"
    ));
}

#[test]
fn build_app_config_rejects_invalid_bool() {
    let mut map = full_env();
    map.insert("PLACELIST_CHARGE_FAILED_REQUESTS", "yes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. })
            if var == "PLACELIST_CHARGE_FAILED_REQUESTS"
    ));
}

#[test]
fn debug_output_redacts_api_keys() {
    let map = full_env();
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("key-a"), "keys leaked into Debug: {debug}");
    assert!(debug.contains("redacted"));
}
