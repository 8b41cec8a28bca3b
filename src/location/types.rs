//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::upstream::UpstreamError;

/// Country reported when a provider omits one, and for every fallback hit.
pub const DEFAULT_COUNTRY: &str = "India";

/// Which strategy resolved a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    OpenMeteo,
    Nominatim,
    Gazetteer,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenMeteo => write!(f, "Open-Meteo"),
            Self::Nominatim => write!(f, "Nominatim"),
            Self::Gazetteer => write!(f, "Built-in"),
        }
    }
}

/// A validated free-text place query: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoQuery(String);

impl GeoQuery {
    pub fn parse(raw: &str) -> Result<Self, LocationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LocationError::NoInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeoQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A latitude/longitude pair inside the valid WGS84 ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Returns `None` for non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some(Self { lat, lon })
    }
}

/// A fully resolved location. Only built through [`GeoResult::new`], so a
/// value in hand always has in-range coordinates and a name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoResult {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub country: String,
    #[serde(skip)]
    pub source: LocationSource,
}

impl GeoResult {
    pub fn new(
        lat: f64,
        lon: f64,
        name: impl Into<String>,
        country: impl Into<String>,
        source: LocationSource,
    ) -> Option<Self> {
        let coords = Coordinates::new(lat, lon)?;
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            lat: coords.lat,
            lon: coords.lon,
            name,
            country: country.into(),
            source,
        })
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// Location resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location parameter is required")]
    NoInput,
    #[error("Location not found. Try major city names like {suggestions}, etc.")]
    NotFound { query: String, suggestions: String },
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
