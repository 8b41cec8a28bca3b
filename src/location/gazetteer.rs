//! Built-in gazetteer: the last-resort fallback when every provider fails.
//!
//! Matching is a bidirectional substring test against lowercase keys, in
//! table order. The first hit wins.

use serde::Serialize;

use super::providers::GeocodeStrategy;
use super::types::{GeoQuery, GeoResult, LocationError, LocationSource, DEFAULT_COUNTRY};

struct GazetteerEntry {
    key: &'static str,
    lat: f64,
    lon: f64,
    name: &'static str,
}

const ENTRIES: &[GazetteerEntry] = &[
    GazetteerEntry { key: "mumbai", lat: 19.0760, lon: 72.8777, name: "Mumbai" },
    GazetteerEntry { key: "delhi", lat: 28.7041, lon: 77.1025, name: "Delhi" },
    GazetteerEntry { key: "bangalore", lat: 12.9716, lon: 77.5946, name: "Bangalore" },
    GazetteerEntry { key: "chennai", lat: 13.0827, lon: 80.2707, name: "Chennai" },
    GazetteerEntry { key: "kolkata", lat: 22.5726, lon: 88.3639, name: "Kolkata" },
    GazetteerEntry { key: "hyderabad", lat: 17.3850, lon: 78.4867, name: "Hyderabad" },
    GazetteerEntry { key: "pune", lat: 18.5204, lon: 73.8567, name: "Pune" },
    GazetteerEntry { key: "ahmedabad", lat: 23.0225, lon: 72.5714, name: "Ahmedabad" },
    GazetteerEntry { key: "jaipur", lat: 26.9124, lon: 75.7873, name: "Jaipur" },
    GazetteerEntry { key: "lucknow", lat: 26.8467, lon: 80.9462, name: "Lucknow" },
];

/// Number of entry names quoted in the not-found hint.
const SUGGESTION_COUNT: usize = 3;

/// Search the gazetteer. `query` is lowercased before matching.
pub fn lookup(query: &str) -> Option<GeoResult> {
    let q = query.to_lowercase();
    ENTRIES
        .iter()
        .find(|e| q.contains(e.key) || e.key.contains(q.as_str()))
        .and_then(to_result)
}

fn to_result(entry: &GazetteerEntry) -> Option<GeoResult> {
    GeoResult::new(
        entry.lat,
        entry.lon,
        entry.name,
        DEFAULT_COUNTRY,
        LocationSource::Gazetteer,
    )
}

/// "Mumbai, Delhi, Bangalore": the hint shown when nothing resolves.
pub fn suggestions() -> String {
    ENTRIES
        .iter()
        .take(SUGGESTION_COUNT)
        .map(|e| e.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A gazetteer entry for the public city list API.
#[derive(Debug, Clone, Serialize)]
pub struct CityInfo {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Return the full gazetteer in table order.
pub fn city_list() -> Vec<CityInfo> {
    ENTRIES
        .iter()
        .map(|e| CityInfo {
            name: e.name.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            lat: e.lat,
            lon: e.lon,
        })
        .collect()
}

/// The gazetteer as the final cascade strategy. Never errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gazetteer;

impl GeocodeStrategy for Gazetteer {
    fn name(&self) -> &'static str {
        "gazetteer"
    }

    fn lookup(&self, query: &GeoQuery) -> Result<Option<GeoResult>, LocationError> {
        Ok(lookup(query.as_str()))
    }
}
