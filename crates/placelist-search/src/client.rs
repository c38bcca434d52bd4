//! HTTP client for the place-search REST APIs.
//!
//! Wraps `reqwest` with dialect-specific URL building and response checking.
//! Every per-request failure comes back as a [`SearchError`] value; the
//! status field of the JSON envelope is checked per dialect and provider-side
//! failures surface as [`SearchError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::dialect::{PoiPage, ProviderDialect};
use crate::error::SearchError;
use crate::scope::SearchScope;

/// Client for one provider dialect.
///
/// Use [`PlaceSearchClient::new`] for production or
/// [`PlaceSearchClient::with_base_url`] to point at a mock server in tests.
pub struct PlaceSearchClient {
    client: Client,
    dialect: ProviderDialect,
    base_url: Url,
}

impl PlaceSearchClient {
    /// Creates a client pointed at the dialect's production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        dialect: ProviderDialect,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        Self::with_base_url(dialect, timeout_secs, user_agent, dialect.default_base_url())
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        dialect: ProviderDialect,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends the endpoint path instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SearchError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            dialect,
            base_url,
        })
    }

    #[must_use]
    pub fn dialect(&self) -> ProviderDialect {
        self.dialect
    }

    /// Fetches one result page for `scope` using `api_key`.
    ///
    /// Page size and radius are clamped to the dialect maxima before the
    /// request is built; the raw values in `scope` are never forwarded.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`SearchError::Deserialize`] if the body is not valid JSON.
    /// - [`SearchError::Api`] if the provider reports a failure status.
    pub async fn fetch_page(
        &self,
        scope: &SearchScope,
        api_key: &str,
    ) -> Result<PoiPage, SearchError> {
        let url = self.build_url(scope, api_key)?;
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let body: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
                context: format!("{} page {}", self.dialect.endpoint(scope), scope.page),
                source: e,
            })?;
        self.dialect.parse_page(&body)
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters for the dialect.
    fn build_url(&self, scope: &SearchScope, api_key: &str) -> Result<Url, SearchError> {
        let endpoint = self.dialect.endpoint(scope);
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| SearchError::InvalidUrl {
                url: format!("{}{endpoint}", self.base_url),
                reason: e.to_string(),
            })?;

        let page_size = scope.page_size.min(self.dialect.max_page_size());

        let mut pairs = url.query_pairs_mut();
        match self.dialect {
            ProviderDialect::Amap => {
                pairs.append_pair("key", api_key);
                pairs.append_pair("keywords", &scope.keyword);
                pairs.append_pair("offset", &page_size.to_string());
                pairs.append_pair("page", &scope.page.to_string());
                pairs.append_pair("extensions", "all");
                if let Some(center) = &scope.center {
                    let radius = scope
                        .radius_m
                        .unwrap_or(1000)
                        .min(self.dialect.max_radius_m());
                    pairs.append_pair("location", center);
                    pairs.append_pair("radius", &radius.to_string());
                } else if let Some(city) = &scope.city {
                    pairs.append_pair("city", city);
                }
                if let Some(categories) = &scope.categories {
                    pairs.append_pair("types", categories);
                }
            }
            ProviderDialect::Tencent => {
                pairs.append_pair("keyword", &scope.keyword);
                if let Some(region) = &scope.region {
                    pairs.append_pair("boundary", &format!("region({region},0)"));
                }
                pairs.append_pair("page_size", &page_size.to_string());
                pairs.append_pair("page_index", &scope.page.to_string());
                pairs.append_pair("key", api_key);
                pairs.append_pair("output", "json");
            }
        }
        drop(pairs);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(dialect: ProviderDialect) -> PlaceSearchClient {
        PlaceSearchClient::with_base_url(dialect, 10, "placelist-test/0.1", "https://example.com")
            .expect("client construction should not fail")
    }

    fn query_of(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn amap_text_url_carries_all_scope_params() {
        let c = client(ProviderDialect::Amap);
        let scope = SearchScope::new("火锅")
            .with_city("成都")
            .with_categories("050100")
            .with_page_size(25);
        let url = c.build_url(&scope, "secret-key").unwrap();
        assert!(url.path().ends_with("/place/text"));
        let query = query_of(&url);
        assert!(query.contains(&("key".into(), "secret-key".into())));
        assert!(query.contains(&("keywords".into(), "火锅".into())));
        assert!(query.contains(&("offset".into(), "25".into())));
        assert!(query.contains(&("page".into(), "1".into())));
        assert!(query.contains(&("extensions".into(), "all".into())));
        assert!(query.contains(&("city".into(), "成都".into())));
        assert!(query.contains(&("types".into(), "050100".into())));
    }

    #[test]
    fn amap_page_size_is_clamped_to_25() {
        let c = client(ProviderDialect::Amap);
        let scope = SearchScope::new("茶").with_page_size(100);
        let url = c.build_url(&scope, "k").unwrap();
        assert!(query_of(&url).contains(&("offset".into(), "25".into())));
    }

    #[test]
    fn amap_radius_is_clamped_to_provider_max() {
        let c = client(ProviderDialect::Amap);
        let scope = SearchScope::new("茶").with_center("116.397,39.909", 99_999);
        let url = c.build_url(&scope, "k").unwrap();
        assert!(url.path().ends_with("/place/around"));
        let query = query_of(&url);
        assert!(query.contains(&("location".into(), "116.397,39.909".into())));
        assert!(query.contains(&("radius".into(), "50000".into())));
    }

    #[test]
    fn amap_around_search_ignores_city() {
        let c = client(ProviderDialect::Amap);
        let scope = SearchScope::new("茶")
            .with_city("北京")
            .with_center("116.4,39.9", 1000);
        let url = c.build_url(&scope, "k").unwrap();
        assert!(!query_of(&url).iter().any(|(k, _)| k == "city"));
    }

    #[test]
    fn tencent_url_uses_region_boundary_and_clamps_page_size() {
        let c = client(ProviderDialect::Tencent);
        let scope = SearchScope::new("沉香")
            .with_region("北京市")
            .with_page_size(50);
        let mut scope = scope;
        scope.page = 3;
        let url = c.build_url(&scope, "tk").unwrap();
        assert!(url.path().ends_with("/ws/place/v1/search"));
        let query = query_of(&url);
        assert!(query.contains(&("keyword".into(), "沉香".into())));
        assert!(query.contains(&("boundary".into(), "region(北京市,0)".into())));
        assert!(query.contains(&("page_size".into(), "20".into())));
        assert!(query.contains(&("page_index".into(), "3".into())));
        assert!(query.contains(&("output".into(), "json".into())));
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let c = PlaceSearchClient::with_base_url(
            ProviderDialect::Amap,
            10,
            "ua",
            "https://example.com/v3///",
        )
        .unwrap();
        let url = c.build_url(&SearchScope::new("茶"), "k").unwrap();
        assert!(url.as_str().starts_with("https://example.com/v3/place/text?"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result =
            PlaceSearchClient::with_base_url(ProviderDialect::Amap, 10, "ua", "not a url");
        assert!(matches!(result, Err(SearchError::InvalidUrl { .. })));
    }
}
