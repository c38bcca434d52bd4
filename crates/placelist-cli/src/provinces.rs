//! The `provinces` command: sweeps every configured region against the
//! Tencent dialect, rotating across the key pool, persisting after each
//! region, and always writing a final save — on normal completion, on key
//! exhaustion, and on Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use placelist_core::{load_app_config, load_regions, AppConfig, JsonFileSink, ReportSink};
use placelist_search::{
    CollectOptions, Collector, CredentialPool, PlaceSearchClient, ProviderDialect,
};

pub(crate) async fn run() -> anyhow::Result<()> {
    let config = load_app_config()?;
    init_logging(&config)?;

    let regions = load_regions(&config.regions_path)?;

    tracing::info!(
        keyword = %config.keyword,
        regions = regions.len(),
        keys = config.api_keys.len(),
        total_budget = config.api_keys.len() as u32 * config.key_budget,
        "starting nationwide sweep"
    );

    let client = PlaceSearchClient::new(
        ProviderDialect::Tencent,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let pool = CredentialPool::from_keys(&config.api_keys, config.key_budget)
        .charge_failures(config.charge_failed_requests);
    let options = CollectOptions {
        max_results: None,
        inter_request_delay: Duration::from_millis(config.inter_request_delay_ms),
        inter_region_delay: Duration::from_millis(config.inter_region_delay_ms),
    };

    let mut collector = Collector::new(client, pool, &config.keyword, options);
    let sink = JsonFileSink::new(&config.output_path);

    let outcome = tokio::select! {
        result = collector.collect_regions(&regions, &sink) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted, saving partial results");
            Ok(())
        }
    };

    // The final save runs on every exit path: completion, interrupt, or a
    // mid-run failure such as key exhaustion.
    let report = collector.snapshot();
    sink.persist(&report)?;
    tracing::info!(
        total = report.total_count,
        regions = report.stats_by_region.len(),
        output = %config.output_path.display(),
        "collection saved"
    );
    for (key, used) in &report.api_usage {
        tracing::info!(key = %mask_key(key), used, "key usage");
    }

    outcome.map_err(Into::into)
}

fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_ansi(false)
        .with_writer(std::io::stdout.and(Arc::new(log_file)))
        .init();

    Ok(())
}

/// Keeps only the first and last four characters of an access key for logs.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}****{tail}")
}
