use std::path::PathBuf;

/// Runtime configuration for the multi-region collection run, loaded from the
/// environment by [`crate::config::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    pub keyword: String,
    pub api_keys: Vec<String>,
    pub key_budget: u32,
    pub charge_failed_requests: bool,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_request_delay_ms: u64,
    pub inter_region_delay_ms: u64,
    pub regions_path: PathBuf,
    pub output_path: PathBuf,
    pub log_path: PathBuf,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("keyword", &self.keyword)
            .field("api_keys", &format!("[{} redacted]", self.api_keys.len()))
            .field("key_budget", &self.key_budget)
            .field("charge_failed_requests", &self.charge_failed_requests)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("inter_region_delay_ms", &self.inter_region_delay_ms)
            .field("regions_path", &self.regions_path)
            .field("output_path", &self.output_path)
            .field("log_path", &self.log_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}
