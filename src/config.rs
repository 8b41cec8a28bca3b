//! Runtime configuration: command-line flags with environment fallbacks.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::upstream::genai::DEFAULT_MODEL;

/// AgriPulse server: market prices, weather and farm assistant proxy.
///
/// Examples:
///   agripulse
///   agripulse --port 8080 --public-dir ./public
///   GEMINI_API_KEY=... DATA_GOV_API_KEY=... agripulse
///   agripulse --offline
#[derive(Parser, Debug, Clone)]
#[command(name = "agripulse", version, about, long_about = None)]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "AGRIPULSE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, short = 'p', env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory holding the static frontend (index.html and its assets).
    #[arg(long, env = "AGRIPULSE_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Gemini API key. Chat endpoints answer 500 without it.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    /// data.gov.in API key for the mandi price feed. No key is built in:
    /// /api/prices answers 500 until this is set.
    #[arg(long, env = "DATA_GOV_API_KEY", hide_env_values = true)]
    pub data_gov_api_key: Option<String>,

    /// Timeout for each outbound request, in seconds.
    #[arg(long, env = "AGRIPULSE_UPSTREAM_TIMEOUT", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Offline geocoding: only the built-in city table.
    #[arg(long)]
    pub offline: bool,

    /// Open-Meteo geocoding base URL (first geocoding strategy).
    #[arg(long, env = "OPEN_METEO_GEOCODING_URL", default_value = "https://geocoding-api.open-meteo.com")]
    pub open_meteo_geocoding_url: String,

    /// Open-Meteo forecast base URL for /api/weather.
    #[arg(long, env = "OPEN_METEO_FORECAST_URL", default_value = "https://api.open-meteo.com")]
    pub open_meteo_forecast_url: String,

    /// Nominatim base URL; point at a self-hosted instance if needed.
    #[arg(long, env = "NOMINATIM_URL", default_value = "https://nominatim.openstreetmap.org")]
    pub nominatim_url: String,

    /// data.gov.in base URL for /api/prices.
    #[arg(long, env = "DATA_GOV_URL", default_value = "https://api.data.gov.in")]
    pub data_gov_url: String,

    /// Gemini API base URL for the chat and crop analysis endpoints.
    #[arg(long, env = "GEMINI_URL", default_value = "https://generativelanguage.googleapis.com")]
    pub gemini_url: String,
}

impl Config {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Empty strings from the environment count as unset.
    pub fn gemini_key(&self) -> Option<String> {
        non_blank(self.gemini_api_key.as_deref())
    }

    pub fn data_gov_key(&self) -> Option<String> {
        non_blank(self.data_gov_api_key.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}
