use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::location::{city_list, CityInfo, Coordinates, GeoQuery, GeoResult};
use crate::prompts;
use crate::upstream::{RawJson, DEFAULT_WEATHER_COORDINATES};

use super::error::{bad_request, ApiError};
use super::state::AppState;

impl IntoResponse for RawJson {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/json")], self.0).into_response()
    }
}

/// Run blocking upstream I/O off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await?)
}

// ─── GET /api/prices ─────────────────────────────────────────────

pub async fn prices(State(state): State<AppState>) -> Result<RawJson, ApiError> {
    let feed = state.prices.clone();
    blocking(move || feed.latest_prices())
        .await?
        .map_err(|e| ApiError::upstream(e, "data.gov.in", "Failed to fetch prices from data.gov"))
}

// ─── GET /api/geocode ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GeocodeQuery {
    pub location: Option<String>,
}

pub async fn geocode(
    State(state): State<AppState>,
    Query(params): Query<GeocodeQuery>,
) -> Result<Json<GeoResult>, ApiError> {
    let start = Instant::now();
    let query = GeoQuery::parse(params.location.as_deref().unwrap_or(""))?;

    let resolver = state.resolver.clone();
    let q = query.clone();
    let resolved = blocking(move || resolver.resolve(&q)).await??;

    tracing::info!(
        query = %query,
        name = %resolved.name,
        source = %resolved.source,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/geocode"
    );
    Ok(Json(resolved))
}

// ─── GET /api/weather ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

fn parse_coordinate(raw: Option<&str>, fallback: f64, label: &str) -> Result<f64, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(fallback),
        Some(s) => s
            .parse::<f64>()
            .map_err(|_| bad_request(format!("Invalid '{}' parameter: '{}'", label, s))),
    }
}

pub async fn weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<RawJson, ApiError> {
    let lat = parse_coordinate(params.lat.as_deref(), DEFAULT_WEATHER_COORDINATES.lat, "lat")?;
    let lon = parse_coordinate(params.lon.as_deref(), DEFAULT_WEATHER_COORDINATES.lon, "lon")?;
    let coords = Coordinates::new(lat, lon)
        .ok_or_else(|| bad_request("Invalid coordinates. Lat: -90..90, Lon: -180..180"))?;

    let forecast = state.forecast.clone();
    blocking(move || forecast.daily_forecast(coords))
        .await?
        .map_err(|e| ApiError::upstream(e, "Open-Meteo", "Failed to fetch weather data"))
}

// ─── POST /api/chat ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct TextResponse {
    pub text: String,
}

async fn generate(state: &AppState, prompt: String, generic: &str) -> Result<Json<TextResponse>, ApiError> {
    let generator = state.generator.clone();
    let text = blocking(move || generator.generate(&prompt))
        .await?
        .map_err(|e| ApiError::upstream(e, "Gemini", generic))?;
    Ok(Json(TextResponse { text }))
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| bad_request(e.body_text()))?;
    let message = body
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| bad_request("Message is required"))?;

    tracing::info!(chars = message.len(), "processing chat message");
    generate(
        &state,
        prompts::chat_prompt(message),
        "Failed to get response from AI. Please try again.",
    )
    .await
}

// ─── POST /api/analyze-crop-image ────────────────────────────────

#[derive(Deserialize)]
pub struct CropImageRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn analyze_crop_image(
    State(state): State<AppState>,
    payload: Result<Json<CropImageRequest>, JsonRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| bad_request(e.body_text()))?;
    let has_image = body.image.as_deref().is_some_and(|i| !i.trim().is_empty());
    let crop = body.crop.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let crop = match (has_image, crop) {
        (true, Some(crop)) => crop,
        _ => return Err(bad_request("Image and crop type are required")),
    };

    tracing::info!(crop, "processing crop image analysis");
    generate(
        &state,
        prompts::crop_analysis_prompt(crop, body.description.as_deref()),
        "Failed to analyze image. Please try again.",
    )
    .await
}

// ─── GET /api/cities ─────────────────────────────────────────────

pub async fn cities() -> Json<Vec<CityInfo>> {
    Json(city_list())
}
