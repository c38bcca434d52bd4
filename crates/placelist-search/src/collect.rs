//! The collection loop: drives the client page by page for a scope, and
//! scope by scope across regions, accumulating normalized listings.
//!
//! One scope moves through `Fetching(page) → Accumulating → Fetching(page+1)`
//! until a terminal condition: a fetch failure (logged, never retried), an
//! empty page, the declared count, the page-capacity threshold (Tencent), or
//! the max-results ceiling. Credential exhaustion is the one condition that
//! propagates as an error instead of ending the scope quietly.

use std::time::Duration;

use thiserror::Error;

use placelist_core::{CollectionReport, PersistError, Region, ReportSink};

use crate::client::PlaceSearchClient;
use crate::credential::CredentialPool;
use crate::dialect::ProviderDialect;
use crate::error::SearchError;
use crate::normalize::normalize_poi;
use crate::scope::SearchScope;

/// Errors from a multi-region collection run.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("failed to persist collection report: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Ceiling on listings accumulated across the whole run. `None` for the
    /// region sweep, which bounds volume by key budgets instead.
    pub max_results: Option<usize>,
    pub inter_request_delay: Duration,
    pub inter_region_delay: Duration,
}

impl Default for CollectOptions {
    fn default() -> Self {
        CollectOptions {
            max_results: None,
            inter_request_delay: Duration::from_millis(500),
            inter_region_delay: Duration::from_millis(500),
        }
    }
}

/// Accumulates listings across pages and regions for one keyword.
pub struct Collector {
    client: PlaceSearchClient,
    pool: CredentialPool,
    options: CollectOptions,
    report: CollectionReport,
}

impl Collector {
    #[must_use]
    pub fn new(
        client: PlaceSearchClient,
        pool: CredentialPool,
        keyword: &str,
        options: CollectOptions,
    ) -> Self {
        Collector {
            client,
            pool,
            options,
            report: CollectionReport::new(keyword),
        }
    }

    #[must_use]
    pub fn report(&self) -> &CollectionReport {
        &self.report
    }

    /// A persistable copy of the report with refreshed aggregates.
    #[must_use]
    pub fn snapshot(&self) -> CollectionReport {
        let mut report = self.report.clone();
        report.total_count = report.listings.len();
        report.collected_at = chrono::Utc::now();
        report.api_usage = self.pool.usage();
        report
    }

    /// Paginates through one scope, appending normalized listings to the
    /// accumulator. Returns the number of listings added.
    ///
    /// Fetch failures end the scope without error; there is no retry policy.
    /// When `region` is given, its name/code and a collection timestamp are
    /// attached to every listing and the per-region stats are updated.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Exhausted`] once every pooled credential has
    /// spent its budget; no request is attempted in that state.
    pub async fn collect_scope(
        &mut self,
        scope: SearchScope,
        region: Option<&Region>,
    ) -> Result<usize, SearchError> {
        let mut scope = scope;
        let start = self.report.listings.len();
        let page_size = scope.page_size.min(self.client.dialect().max_page_size());

        loop {
            let key = self.pool.current()?.key().to_owned();
            let outcome = self.client.fetch_page(&scope, &key).await;
            self.pool.record_attempt(outcome.is_ok());

            let page = match outcome {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(page = scope.page, error = %e, "page fetch failed, ending scope");
                    break;
                }
            };

            if page.pois.is_empty() {
                tracing::info!(page = scope.page, "no results on page, ending scope");
                break;
            }

            let mut ceiling_hit = false;
            for poi in &page.pois {
                if self
                    .options
                    .max_results
                    .is_some_and(|max| self.report.listings.len() >= max)
                {
                    ceiling_hit = true;
                    break;
                }
                let mut listing = normalize_poi(poi);
                if let Some(region) = region {
                    listing.province = Some(region.name.clone());
                    listing.province_code = region.code.clone();
                }
                listing.collected_at = Some(chrono::Utc::now());
                self.report.listings.push(listing);
            }

            let collected = self.report.listings.len() - start;
            tracing::info!(
                page = scope.page,
                page_records = page.pois.len(),
                collected,
                declared = page.declared_count,
                "collected page"
            );

            if ceiling_hit
                || self
                    .options
                    .max_results
                    .is_some_and(|max| self.report.listings.len() >= max)
            {
                tracing::info!(collected, "max-results ceiling reached");
                break;
            }
            if collected as u64 >= page.declared_count {
                tracing::info!(declared = page.declared_count, "declared count reached");
                break;
            }
            if self.client.dialect() == ProviderDialect::Tencent
                && u64::from(scope.page) * u64::from(page_size) >= page.declared_count
            {
                tracing::info!(declared = page.declared_count, "page capacity reached");
                break;
            }

            tokio::time::sleep(self.options.inter_request_delay).await;
            scope.page += 1;
        }

        let added = self.report.listings.len() - start;
        if let Some(region) = region {
            self.report
                .stats_by_region
                .insert(region.name.clone(), added);
        }
        Ok(added)
    }

    /// Runs one scope per region in list order, persisting the report through
    /// `sink` after each completed region so a crash between regions loses at
    /// most the region in flight.
    ///
    /// # Errors
    ///
    /// - [`CollectError::Search`] wrapping [`SearchError::Exhausted`] when the
    ///   key pool is spent; already-collected listings stay in the accumulator.
    /// - [`CollectError::Persist`] if a periodic report write fails.
    pub async fn collect_regions(
        &mut self,
        regions: &[Region],
        sink: &dyn ReportSink,
    ) -> Result<(), CollectError> {
        let keyword = self.report.keyword.clone();
        let total = regions.len();

        for (idx, region) in regions.iter().enumerate() {
            tracing::info!(
                region = %region.name,
                progress = %format!("{}/{total}", idx + 1),
                "collecting region"
            );

            let scope = SearchScope::new(&keyword)
                .with_region(&region.name)
                .with_page_size(self.client.dialect().max_page_size());
            let added = self.collect_scope(scope, Some(region)).await?;
            tracing::info!(region = %region.name, added, "region complete");

            sink.persist(&self.snapshot())?;

            if idx + 1 < total {
                tokio::time::sleep(self.options.inter_region_delay).await;
            }
        }

        Ok(())
    }
}
