//! Normalization of raw provider records into [`Listing`]s.
//!
//! Normalization is total: a record missing every field still produces a
//! listing with empty-string/zero defaults. Records stay as `serde_json::Value`
//! up to this point because the two dialects disagree on field names and on
//! the shape of the location field, and a strict typed parse would turn one
//! odd record into a lost page.

use serde_json::Value;

use placelist_core::{Coordinate, GeoPoint, Listing, Photo};

/// Converts one raw provider record into a [`Listing`].
///
/// Field vocabulary is merged across dialects: `name`/`title` for the display
/// name, `type`/`category` for the category. The `biz_ext` and `photos`
/// extension blocks only exist in the Amap dialect; province and timestamp
/// context are attached later by the collector.
#[must_use]
pub fn normalize_poi(poi: &Value) -> Listing {
    Listing {
        id: str_field(poi, "id"),
        name: first_str_field(poi, &["name", "title"]),
        category: first_str_field(poi, &["type", "category"]),
        address: str_field(poi, "address"),
        tel: str_field(poi, "tel"),
        location: parse_location(poi.get("location")),
        rating: ext_field(poi, "rating"),
        cost: ext_field(poi, "cost"),
        photos: parse_photos(poi.get("photos")),
        province: None,
        province_code: None,
        collected_at: None,
    }
}

/// Parses the dialect-specific location representation.
///
/// A `"lon,lat"` string yields text coordinates; a `{lat, lng}` object yields
/// numeric coordinates with 0.0 defaults. A string with fewer than two
/// non-empty components yields the both-empty point — one coordinate is never
/// populated without the other.
fn parse_location(location: Option<&Value>) -> GeoPoint {
    match location {
        Some(Value::String(s)) => {
            let mut parts = s.split(',');
            let lon = parts.next().unwrap_or("").trim();
            let lat = parts.next().unwrap_or("").trim();
            if lon.is_empty() || lat.is_empty() {
                GeoPoint::empty()
            } else {
                GeoPoint {
                    longitude: Coordinate::Text(lon.to_owned()),
                    latitude: Coordinate::Text(lat.to_owned()),
                }
            }
        }
        Some(Value::Object(obj)) => GeoPoint {
            longitude: Coordinate::Degrees(obj.get("lng").and_then(Value::as_f64).unwrap_or(0.0)),
            latitude: Coordinate::Degrees(obj.get("lat").and_then(Value::as_f64).unwrap_or(0.0)),
        },
        _ => GeoPoint::empty(),
    }
}

fn str_field(poi: &Value, key: &str) -> String {
    poi.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn first_str_field(poi: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| poi.get(key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_owned()
}

/// Extracts a field from the Amap `biz_ext` block. Amap encodes absent
/// extension values as an empty array rather than omitting the key, so
/// non-string values collapse to `None`.
fn ext_field(poi: &Value, key: &str) -> Option<String> {
    poi.get("biz_ext")
        .and_then(|ext| ext.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn parse_photos(photos: Option<&Value>) -> Vec<Photo> {
    photos
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|photo| Photo {
                    title: str_field(photo, "title"),
                    url: str_field(photo, "url"),
                })
                .collect()
        })
        .unwrap_or_default()
}
