//! The single-scope `search` command: one keyword against the Amap dialect,
//! output as a flat JSON array of listings.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use placelist_core::save_listings;
use placelist_search::{
    CollectOptions, Collector, CredentialPool, PlaceSearchClient, ProviderDialect, SearchScope,
};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "placelist/0.1 (poi-collection)";

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Amap REST API key.
    #[arg(long, env = "PLACELIST_AMAP_KEY")]
    key: String,

    /// Search keyword, e.g. a business name or type.
    #[arg(long)]
    keyword: String,

    /// City name or city code to restrict the search.
    #[arg(long)]
    city: Option<String>,

    /// POI category code filter, e.g. 050100.
    #[arg(long)]
    types: Option<String>,

    /// Center coordinate "lon,lat" for an around-search instead of a city search.
    #[arg(long)]
    location: Option<String>,

    /// Around-search radius in meters (provider maximum 50000).
    #[arg(long, default_value_t = 1000)]
    radius: u32,

    /// Maximum number of listings to collect.
    #[arg(long, default_value_t = 100)]
    max: usize,

    /// Delay between page requests, in seconds.
    #[arg(long, default_value_t = 0.5)]
    delay: f64,

    /// Output file for the collected listings.
    #[arg(long, default_value = "amap_businesses.json")]
    output: PathBuf,
}

pub(crate) async fn run(args: SearchArgs) -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = PlaceSearchClient::new(ProviderDialect::Amap, REQUEST_TIMEOUT_SECS, USER_AGENT)?;
    let pool = CredentialPool::single(&args.key);
    let options = CollectOptions {
        max_results: Some(args.max),
        inter_request_delay: Duration::from_secs_f64(args.delay.max(0.0)),
        ..CollectOptions::default()
    };

    let mut scope = SearchScope::new(&args.keyword)
        .with_page_size(ProviderDialect::Amap.max_page_size());
    if let Some(city) = &args.city {
        scope = scope.with_city(city);
    }
    if let Some(types) = &args.types {
        scope = scope.with_categories(types);
    }
    if let Some(location) = &args.location {
        scope = scope.with_center(location, args.radius);
    }

    tracing::info!(keyword = %args.keyword, city = ?args.city, max = args.max, "starting collection");

    let mut collector = Collector::new(client, pool, &args.keyword, options);
    let added = collector.collect_scope(scope, None).await?;

    if added == 0 {
        anyhow::bail!("no listings collected");
    }

    let listings = &collector.report().listings;
    save_listings(&args.output, listings)?;
    tracing::info!(count = added, output = %args.output.display(), "collection saved");

    print_category_summary(listings.iter().map(|l| l.category.as_str()));

    Ok(())
}

/// Prints the ten most common categories among the collected listings.
fn print_category_summary<'a>(categories: impl Iterator<Item = &'a str>) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;
    for category in categories {
        total += 1;
        let key = if category.is_empty() {
            "(uncategorized)"
        } else {
            category
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    println!("collected {total} listings; top categories:");
    for (category, count) in ranked.into_iter().take(10) {
        println!("  {category}: {count}");
    }
}
