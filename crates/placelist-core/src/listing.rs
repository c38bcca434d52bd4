//! The normalized business-listing shape shared by every collection mode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One coordinate component, kept in the representation its provider uses.
///
/// The Amap dialect reports coordinates as decimal strings inside a single
/// `"lon,lat"` field; the Tencent dialect reports numeric `lat`/`lng` values.
/// Both survive normalization unchanged: `Text("")` is the empty/missing value
/// for the string dialect, `Degrees(0.0)` the default for the numeric one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Degrees(f64),
    Text(String),
}

impl Coordinate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Coordinate::Text(s) if s.is_empty())
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Coordinate::Text(String::new())
    }
}

/// Longitude/latitude pair. Either both components carry a value or both are
/// the empty value — never one without the other.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: Coordinate,
    pub latitude: Coordinate,
}

impl GeoPoint {
    /// The both-components-empty point used when a record has no usable
    /// location.
    #[must_use]
    pub fn empty() -> Self {
        GeoPoint::default()
    }
}

/// A photo attached to an Amap record's extended details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub title: String,
    pub url: String,
}

/// A provider-agnostic business listing.
///
/// Core fields default to the empty string when the provider omits them.
/// The rating/cost/photos extensions only appear for the Amap dialect;
/// province, `province_code`, and `collected_at` are attached by the
/// region collector, not the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    pub tel: String,
    pub location: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<DateTime<Utc>>,
}
