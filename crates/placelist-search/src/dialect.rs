//! Provider dialects: the per-provider differences in endpoints, limits, and
//! response envelopes, selected once at client construction.
//!
//! The two supported providers disagree on almost every envelope detail:
//!
//! | | Amap | Tencent |
//! |---|---|---|
//! | success status | string `"1"` | integer `0` |
//! | results field | `pois` | `data` |
//! | count field | numeric string | integer |
//! | error message | `info` | `message` |
//! | page-size max | 25 | 20 |

use serde_json::Value;

use crate::error::SearchError;
use crate::scope::SearchScope;

pub const AMAP_BASE_URL: &str = "https://restapi.amap.com/v3/";
pub const TENCENT_BASE_URL: &str = "https://apis.map.qq.com/";

/// One successfully fetched page: the raw records plus the provider-declared
/// total result count for the scope.
#[derive(Debug)]
pub struct PoiPage {
    pub pois: Vec<Value>,
    pub declared_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderDialect {
    Amap,
    Tencent,
}

impl ProviderDialect {
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderDialect::Amap => AMAP_BASE_URL,
            ProviderDialect::Tencent => TENCENT_BASE_URL,
        }
    }

    /// Largest page size the provider accepts; requested sizes above this are
    /// clamped before the request is built.
    #[must_use]
    pub fn max_page_size(self) -> u32 {
        match self {
            ProviderDialect::Amap => 25,
            ProviderDialect::Tencent => 20,
        }
    }

    /// Largest around-search radius in meters (Amap only).
    #[must_use]
    pub fn max_radius_m(self) -> u32 {
        50_000
    }

    pub(crate) fn endpoint(self, scope: &SearchScope) -> &'static str {
        match self {
            ProviderDialect::Amap => {
                if scope.center.is_some() {
                    "place/around"
                } else {
                    "place/text"
                }
            }
            ProviderDialect::Tencent => "ws/place/v1/search",
        }
    }

    /// Checks the dialect's status field and extracts the result list and
    /// declared count from a parsed response body.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Api`] with the provider's message field when the
    /// status indicates a provider-side failure.
    pub fn parse_page(self, body: &Value) -> Result<PoiPage, SearchError> {
        match self {
            ProviderDialect::Amap => {
                if body.get("status").and_then(Value::as_str) != Some("1") {
                    let msg = body
                        .get("info")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error");
                    return Err(SearchError::Api(msg.to_string()));
                }
                let pois = body
                    .get("pois")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                // Amap reports count as a numeric string; fall back to a bare
                // integer in case the provider changes its mind.
                let declared_count = body
                    .get("count")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse().ok())
                    .or_else(|| body.get("count").and_then(Value::as_u64))
                    .unwrap_or(0);
                Ok(PoiPage {
                    pois,
                    declared_count,
                })
            }
            ProviderDialect::Tencent => {
                if body.get("status").and_then(Value::as_i64) != Some(0) {
                    let msg = body
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error");
                    return Err(SearchError::Api(msg.to_string()));
                }
                let pois = body
                    .get("data")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                let declared_count = body.get("count").and_then(Value::as_u64).unwrap_or(0);
                Ok(PoiPage {
                    pois,
                    declared_count,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amap_success_extracts_pois_and_string_count() {
        let body = json!({
            "status": "1",
            "info": "OK",
            "count": "42",
            "pois": [{"id": "B001"}, {"id": "B002"}]
        });
        let page = ProviderDialect::Amap.parse_page(&body).unwrap();
        assert_eq!(page.pois.len(), 2);
        assert_eq!(page.declared_count, 42);
    }

    #[test]
    fn amap_error_status_carries_info_message() {
        let body = json!({"status": "0", "info": "INVALID_USER_KEY"});
        let err = ProviderDialect::Amap.parse_page(&body).unwrap_err();
        assert!(matches!(err, SearchError::Api(ref msg) if msg == "INVALID_USER_KEY"));
    }

    #[test]
    fn amap_integer_status_is_not_success() {
        // The Amap dialect encodes success as the *string* "1".
        let body = json!({"status": 1, "count": "1", "pois": []});
        assert!(ProviderDialect::Amap.parse_page(&body).is_err());
    }

    #[test]
    fn amap_missing_pois_is_an_empty_page() {
        let body = json!({"status": "1", "count": "0"});
        let page = ProviderDialect::Amap.parse_page(&body).unwrap();
        assert!(page.pois.is_empty());
        assert_eq!(page.declared_count, 0);
    }

    #[test]
    fn tencent_success_extracts_data_and_integer_count() {
        let body = json!({
            "status": 0,
            "message": "query ok",
            "count": 35,
            "data": [{"id": "t1"}]
        });
        let page = ProviderDialect::Tencent.parse_page(&body).unwrap();
        assert_eq!(page.pois.len(), 1);
        assert_eq!(page.declared_count, 35);
    }

    #[test]
    fn tencent_error_status_carries_message() {
        let body = json!({"status": 121, "message": "此key每日调用量已达到上限"});
        let err = ProviderDialect::Tencent.parse_page(&body).unwrap_err();
        assert!(matches!(err, SearchError::Api(ref msg) if msg.contains("上限")));
    }

    #[test]
    fn tencent_string_status_is_not_success() {
        let body = json!({"status": "0", "data": []});
        assert!(ProviderDialect::Tencent.parse_page(&body).is_err());
    }

    #[test]
    fn amap_endpoint_switches_on_center() {
        let text = SearchScope::new("茶");
        let around = SearchScope::new("茶").with_center("116.4,39.9", 1000);
        assert_eq!(ProviderDialect::Amap.endpoint(&text), "place/text");
        assert_eq!(ProviderDialect::Amap.endpoint(&around), "place/around");
        assert_eq!(
            ProviderDialect::Tencent.endpoint(&text),
            "ws/place/v1/search"
        );
    }
}
