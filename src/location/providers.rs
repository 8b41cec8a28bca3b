//! Location providers: Open-Meteo geocoding and Nominatim.
//!
//! Each provider is a [`GeocodeStrategy`]. `Ok(None)` means the provider
//! answered with no usable candidate; `Err` means it could not be reached
//! or answered garbage. The resolver treats both as "try the next one".

use serde::Deserialize;

use super::types::{GeoQuery, GeoResult, LocationError, LocationSource, DEFAULT_COUNTRY};
use crate::upstream::{endpoint, fetch_json, USER_AGENT};

/// Candidates requested from each provider; only the first is used.
const CANDIDATE_LIMIT: &str = "5";

/// One step of the resolution cascade.
pub trait GeocodeStrategy: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    fn lookup(&self, query: &GeoQuery) -> Result<Option<GeoResult>, LocationError>;
}

// ─── Open-Meteo geocoding ───────────────────────────────────────

#[derive(Deserialize, Debug)]
pub struct OpenMeteoResponse {
    #[serde(default)]
    pub results: Option<Vec<OpenMeteoPlace>>,
}

#[derive(Deserialize, Debug)]
pub struct OpenMeteoPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
}

/// Map the best-ranked Open-Meteo candidate.
pub fn open_meteo_best(response: &OpenMeteoResponse) -> Option<GeoResult> {
    let top = response.results.as_ref()?.first()?;
    GeoResult::new(
        top.latitude,
        top.longitude,
        top.name.as_str(),
        top.country.as_deref().unwrap_or(DEFAULT_COUNTRY),
        LocationSource::OpenMeteo,
    )
}

/// Worldwide free-text search, no country filter.
pub struct OpenMeteoGeocoder {
    agent: ureq::Agent,
    base_url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(agent: ureq::Agent, base_url: impl Into<String>) -> Self {
        Self {
            agent,
            base_url: base_url.into(),
        }
    }
}

impl GeocodeStrategy for OpenMeteoGeocoder {
    fn name(&self) -> &'static str {
        "open-meteo"
    }

    fn lookup(&self, query: &GeoQuery) -> Result<Option<GeoResult>, LocationError> {
        let request = self
            .agent
            .get(&endpoint(&self.base_url, "/v1/search"))
            .query("name", query.as_str())
            .query("count", CANDIDATE_LIMIT)
            .query("language", "en")
            .query("format", "json");

        let response: OpenMeteoResponse = fetch_json(request)?;
        Ok(open_meteo_best(&response))
    }
}

// ─── Nominatim ──────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
pub struct NominatimResult {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

/// Map the first Nominatim hit. Coordinates arrive as strings; a value that
/// does not parse makes the candidate unusable.
pub fn nominatim_best(results: &[NominatimResult]) -> Option<GeoResult> {
    let top = results.first()?;
    let lat: f64 = top.lat.trim().parse().ok()?;
    let lon: f64 = top.lon.trim().parse().ok()?;
    GeoResult::new(
        lat,
        lon,
        short_name(&top.display_name),
        DEFAULT_COUNTRY,
        LocationSource::Nominatim,
    )
}

/// "Pune, Pune District, Maharashtra, India" → "Pune"
fn short_name(display_name: &str) -> &str {
    display_name.split(',').next().unwrap_or(display_name).trim()
}

/// OpenStreetMap Nominatim, restricted to India.
pub struct NominatimGeocoder {
    agent: ureq::Agent,
    base_url: String,
}

impl NominatimGeocoder {
    pub const COUNTRY_CODES: &'static str = "in";

    pub fn new(agent: ureq::Agent, base_url: impl Into<String>) -> Self {
        Self {
            agent,
            base_url: base_url.into(),
        }
    }
}

impl GeocodeStrategy for NominatimGeocoder {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    fn lookup(&self, query: &GeoQuery) -> Result<Option<GeoResult>, LocationError> {
        let request = self
            .agent
            .get(&endpoint(&self.base_url, "/search"))
            .set("User-Agent", USER_AGENT)
            .query("q", query.as_str())
            .query("format", "json")
            .query("limit", CANDIDATE_LIMIT)
            .query("countrycodes", Self::COUNTRY_CODES);

        let results: Vec<NominatimResult> = fetch_json(request)?;
        Ok(nominatim_best(&results))
    }
}
