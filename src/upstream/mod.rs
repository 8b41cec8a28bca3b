//! Outbound clients for the third-party services AgriPulse proxies.
//!
//! All clients share one blocking [`ureq::Agent`]; callers on the async side
//! run them through `spawn_blocking`.

pub mod forecast;
pub mod genai;
pub mod prices;

use serde::de::DeserializeOwned;
use std::time::Duration;

pub use forecast::{ForecastProvider, OpenMeteoForecast, DEFAULT_WEATHER_COORDINATES};
pub use genai::{GeminiClient, TextGenerator};
pub use prices::{DataGovPriceFeed, PriceFeed};

/// Identifying client string; Nominatim's usage policy requires one.
pub const USER_AGENT: &str = "AgriPulse/1.0";

/// Failures talking to an upstream service.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
    #[error("{0} is not configured")]
    MissingCredential(&'static str),
}

impl From<ureq::Error> for UpstreamError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => Self::Status(code),
            // Transport's Display includes the full request URL, api keys in the query string too.
            ureq::Error::Transport(t) => Self::Network(match t.message() {
                Some(msg) => format!("{}: {}", t.kind(), msg),
                None => t.kind().to_string(),
            }),
        }
    }
}

/// An upstream JSON body relayed byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct RawJson(pub String);

/// Build the shared agent with a per-request timeout.
pub fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Send a prepared request and decode the JSON body.
pub(crate) fn fetch_json<T: DeserializeOwned>(request: ureq::Request) -> Result<T, UpstreamError> {
    let response = request.call()?;
    response
        .into_json()
        .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
}

/// Send a prepared request and keep the body as text, rejecting non-JSON.
pub(crate) fn fetch_raw(request: ureq::Request) -> Result<(RawJson, serde_json::Value), UpstreamError> {
    let response = request.call()?;
    let body = response
        .into_string()
        .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;
    let value = serde_json::from_str(&body)
        .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;
    Ok((RawJson(body), value))
}

/// Strip a trailing slash so endpoint paths can be appended uniformly.
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
