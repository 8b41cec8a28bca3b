//! Mandi commodity prices from the data.gov.in open data portal.

use super::{endpoint, fetch_raw, RawJson, UpstreamError};

/// "Current daily price of various commodities from various markets".
const RESOURCE_ID: &str = "9ef84268-d588-465a-a308-a864a43d0070";
const RECORD_LIMIT: u32 = 100;

pub trait PriceFeed: Send + Sync {
    fn latest_prices(&self) -> Result<RawJson, UpstreamError>;
}

pub struct DataGovPriceFeed {
    agent: ureq::Agent,
    base_url: String,
    api_key: Option<String>,
}

impl DataGovPriceFeed {
    pub fn new(agent: ureq::Agent, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            agent,
            base_url: base_url.into(),
            api_key,
        }
    }
}

impl PriceFeed for DataGovPriceFeed {
    fn latest_prices(&self) -> Result<RawJson, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingCredential("DATA_GOV_API_KEY"))?;

        tracing::info!("fetching prices from data.gov.in");
        let request = self
            .agent
            .get(&endpoint(&self.base_url, &format!("/resource/{}", RESOURCE_ID)))
            .query("api-key", api_key)
            .query("format", "json")
            .query("offset", "0")
            .query("limit", &RECORD_LIMIT.to_string());

        let (raw, value) = fetch_raw(request)?;
        tracing::info!(records = record_count(&value), "fetched price records");
        Ok(raw)
    }
}

fn record_count(value: &serde_json::Value) -> usize {
    value
        .get("records")
        .and_then(|r| r.as_array())
        .map_or(0, Vec::len)
}
