use std::sync::Arc;

use crate::config::Config;
use crate::location::LocationResolver;
use crate::upstream::{
    build_agent, DataGovPriceFeed, ForecastProvider, GeminiClient, OpenMeteoForecast, PriceFeed,
    TextGenerator,
};

/// Read-only, shared by every request. Fields are `Arc`s so handlers can
/// move them into blocking tasks.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<LocationResolver>,
    pub forecast: Arc<dyn ForecastProvider>,
    pub prices: Arc<dyn PriceFeed>,
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    /// Wire the real upstream clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let agent = build_agent(config.upstream_timeout());

        let resolver = if config.offline {
            LocationResolver::offline()
        } else {
            LocationResolver::new(
                agent.clone(),
                &config.open_meteo_geocoding_url,
                &config.nominatim_url,
            )
        };

        Self {
            resolver: Arc::new(resolver),
            forecast: Arc::new(OpenMeteoForecast::new(
                agent.clone(),
                config.open_meteo_forecast_url.as_str(),
            )),
            prices: Arc::new(DataGovPriceFeed::new(
                agent.clone(),
                config.data_gov_url.as_str(),
                config.data_gov_key(),
            )),
            generator: Arc::new(GeminiClient::new(
                agent,
                config.gemini_url.as_str(),
                config.gemini_model.as_str(),
                config.gemini_key(),
            )),
        }
    }
}
