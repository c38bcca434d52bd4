use thiserror::Error;

/// Errors surfaced by the place-search client and collector.
///
/// Every per-page failure is converted into one of these values at the fetch
/// boundary; nothing escapes a page fetch as a panic or an unhandled error.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network, TLS, timeout, or non-2xx failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be parsed as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider returned a well-formed response reporting a failure.
    #[error("provider API error: {0}")]
    Api(String),

    /// Every credential in the pool has spent its request budget.
    #[error("all access keys have exhausted their request budget")]
    Exhausted,

    /// A request URL could not be constructed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
