//! Location subsystem for AgriPulse.
//!
//! Resolves free-text place names through an ordered cascade of geocoding
//! providers, ending in a built-in gazetteer of major Indian cities.

pub mod gazetteer;
pub mod providers;
pub mod resolver;
pub mod types;

pub use gazetteer::{city_list, CityInfo};
pub use providers::GeocodeStrategy;
pub use resolver::LocationResolver;
pub use types::{Coordinates, GeoQuery, GeoResult, LocationError, LocationSource};
