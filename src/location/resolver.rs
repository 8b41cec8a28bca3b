//! Location resolver: walks an ordered list of strategies.
//!
//! Default flow:  Open-Meteo → Nominatim (India) → built-in gazetteer → NotFound
//! Offline flow:  built-in gazetteer → NotFound

use super::gazetteer::{self, Gazetteer};
use super::providers::{GeocodeStrategy, NominatimGeocoder, OpenMeteoGeocoder};
use super::types::{GeoQuery, GeoResult, LocationError};

/// The location resolver with its fallback pipeline.
pub struct LocationResolver {
    strategies: Vec<Box<dyn GeocodeStrategy>>,
}

impl LocationResolver {
    /// The full online cascade.
    pub fn new(agent: ureq::Agent, open_meteo_url: &str, nominatim_url: &str) -> Self {
        Self::with_strategies(vec![
            Box::new(OpenMeteoGeocoder::new(agent.clone(), open_meteo_url)),
            Box::new(NominatimGeocoder::new(agent, nominatim_url)),
            Box::new(Gazetteer),
        ])
    }

    /// Gazetteer only, no network.
    pub fn offline() -> Self {
        Self::with_strategies(vec![Box::new(Gazetteer)])
    }

    /// Create a resolver with a specific strategy order (for testing).
    pub fn with_strategies(strategies: Vec<Box<dyn GeocodeStrategy>>) -> Self {
        Self { strategies }
    }

    /// Strategy labels in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve a place name. First strategy to produce a result wins;
    /// strategy failures are logged and skipped.
    pub fn resolve(&self, query: &GeoQuery) -> Result<GeoResult, LocationError> {
        for strategy in &self.strategies {
            match strategy.lookup(query) {
                Ok(Some(loc)) => {
                    tracing::info!(
                        query = %query,
                        strategy = strategy.name(),
                        name = %loc.name,
                        lat = loc.lat,
                        lon = loc.lon,
                        "resolved location"
                    );
                    return Ok(loc);
                }
                Ok(None) => {
                    tracing::debug!(query = %query, strategy = strategy.name(), "no candidate");
                }
                Err(e) => {
                    tracing::warn!(query = %query, strategy = strategy.name(), error = %e, "strategy failed");
                }
            }
        }

        Err(LocationError::NotFound {
            query: query.to_string(),
            suggestions: gazetteer::suggestions(),
        })
    }
}
