//! Daily weather forecast from Open-Meteo.

use chrono::NaiveDate;
use serde::Deserialize;

use super::{endpoint, fetch_raw, RawJson, UpstreamError};
use crate::location::Coordinates;

/// Used when a weather request carries no coordinates (Delhi).
pub const DEFAULT_WEATHER_COORDINATES: Coordinates = Coordinates {
    lat: 28.7041,
    lon: 77.1025,
};

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";
const FORECAST_DAYS: u8 = 7;

/// Anything that can produce a multi-day forecast for a point.
pub trait ForecastProvider: Send + Sync {
    fn daily_forecast(&self, coords: Coordinates) -> Result<RawJson, UpstreamError>;
}

pub struct OpenMeteoForecast {
    agent: ureq::Agent,
    base_url: String,
}

impl OpenMeteoForecast {
    pub fn new(agent: ureq::Agent, base_url: impl Into<String>) -> Self {
        Self {
            agent,
            base_url: base_url.into(),
        }
    }
}

impl ForecastProvider for OpenMeteoForecast {
    fn daily_forecast(&self, coords: Coordinates) -> Result<RawJson, UpstreamError> {
        let request = self
            .agent
            .get(&endpoint(&self.base_url, "/v1/forecast"))
            .query("latitude", &coords.lat.to_string())
            .query("longitude", &coords.lon.to_string())
            .query("daily", DAILY_FIELDS)
            .query("timezone", "auto")
            .query("forecast_days", &FORECAST_DAYS.to_string());

        let (raw, value) = fetch_raw(request)?;
        match DailyForecast::from_value(&value) {
            Some(daily) => tracing::info!(
                lat = coords.lat,
                lon = coords.lon,
                days = daily.days.len(),
                first = ?daily.days.first().map(|d| d.date),
                last = ?daily.days.last().map(|d| d.date),
                "fetched forecast"
            ),
            None => tracing::warn!(lat = coords.lat, lon = coords.lon, "forecast has no readable daily section"),
        }
        Ok(raw)
    }
}

// ─── Typed view of the daily block ──────────────────────────────

#[derive(Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
}

#[derive(Deserialize)]
struct ForecastBody {
    daily: DailyBlock,
}

/// One forecast day. Missing readings stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub precipitation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub days: Vec<ForecastDay>,
}

impl DailyForecast {
    /// Read the column-oriented `daily` block into rows. Ragged columns are
    /// cut to the date column's length.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let body: ForecastBody = serde_json::from_value(value.clone()).ok()?;
        let d = body.daily;
        let days = d
            .time
            .iter()
            .enumerate()
            .map(|(i, date)| ForecastDay {
                date: *date,
                max_temp: d.temperature_2m_max.get(i).copied().flatten(),
                min_temp: d.temperature_2m_min.get(i).copied().flatten(),
                precipitation: d.precipitation_sum.get(i).copied().flatten(),
            })
            .collect();
        Some(Self { days })
    }
}
