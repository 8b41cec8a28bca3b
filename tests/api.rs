use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use agripulse::location::gazetteer::Gazetteer;
use agripulse::location::{Coordinates, GeoQuery, GeoResult, GeocodeStrategy, LocationError, LocationResolver};
use agripulse::server::{build_router, AppState};
use agripulse::upstream::{ForecastProvider, PriceFeed, RawJson, TextGenerator, UpstreamError};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

// ─── Fakes ───────────────────────────────────────────────────────

struct DownProvider;

impl GeocodeStrategy for DownProvider {
    fn name(&self) -> &'static str {
        "down"
    }

    fn lookup(&self, _query: &GeoQuery) -> Result<Option<GeoResult>, LocationError> {
        Err(UpstreamError::Network("connection refused".into()).into())
    }
}

#[derive(Default)]
struct RecordingForecast {
    seen: Mutex<Vec<Coordinates>>,
}

impl ForecastProvider for RecordingForecast {
    fn daily_forecast(&self, coords: Coordinates) -> Result<RawJson, UpstreamError> {
        self.seen.lock().unwrap().push(coords);
        Ok(RawJson(r#"{"daily":{"time":["2026-10-19"]}}"#.into()))
    }
}

struct StaticPrices(Result<&'static str, ()>);

impl PriceFeed for StaticPrices {
    fn latest_prices(&self) -> Result<RawJson, UpstreamError> {
        match self.0 {
            Ok(body) => Ok(RawJson(body.to_string())),
            Err(()) => Err(UpstreamError::Status(503)),
        }
    }
}

struct CountingGenerator {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    configured: bool,
}

impl CountingGenerator {
    fn new(configured: bool) -> Self {
        Self { calls: AtomicUsize::new(0), prompts: Mutex::new(vec![]), configured }
    }
}

impl TextGenerator for CountingGenerator {
    fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        if !self.configured {
            return Err(UpstreamError::MissingCredential("GEMINI_API_KEY"));
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("Irrigate every 10 days.".into())
    }
}

struct Harness {
    app: Router,
    forecast: Arc<RecordingForecast>,
    generator: Arc<CountingGenerator>,
}

fn harness_with(prices: StaticPrices, generator_configured: bool) -> Harness {
    let forecast = Arc::new(RecordingForecast::default());
    let generator = Arc::new(CountingGenerator::new(generator_configured));
    let resolver = LocationResolver::with_strategies(vec![
        Box::new(DownProvider),
        Box::new(DownProvider),
        Box::new(Gazetteer),
    ]);
    let state = AppState {
        resolver: Arc::new(resolver),
        forecast: forecast.clone(),
        prices: Arc::new(prices),
        generator: generator.clone(),
    };
    Harness {
        app: build_router(state, Path::new("public")),
        forecast,
        generator,
    }
}

fn harness() -> Harness {
    harness_with(StaticPrices(Ok(r#"{"records":[{"commodity":"Onion","modal_price":"1800"}],"total":1}"#)), true)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec();
    (status, headers, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let (status, _, body) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _, body) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap())
}

// ─── /api/geocode ────────────────────────────────────────────────

#[tokio::test]
async fn test_geocode_missing_param() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/geocode").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Location parameter is required");
}

#[tokio::test]
async fn test_geocode_blank_param() {
    let h = harness();
    let (status, _) = get(&h.app, "/api/geocode?location=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_geocode_outage_falls_back_to_gazetteer() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/geocode?location=Mumbai%20City").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Mumbai");
    assert_eq!(body["country"], "India");
    assert_eq!(body["lat"], 19.0760);
    assert_eq!(body["lon"], 72.8777);
    assert!(body.get("source").is_none());
}

#[tokio::test]
async fn test_geocode_not_found() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/geocode?location=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert!(body["error"].as_str().unwrap().contains("Mumbai, Delhi, Bangalore"));
}

// ─── /api/weather ────────────────────────────────────────────────

#[tokio::test]
async fn test_weather_defaults_to_delhi() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/weather").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["daily"]["time"][0], "2026-10-19");
    let seen = h.forecast.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].lat, 28.7041);
    assert_eq!(seen[0].lon, 77.1025);
}

#[tokio::test]
async fn test_weather_passes_coordinates() {
    let h = harness();
    let (status, _) = get(&h.app, "/api/weather?lat=18.5204&lon=73.8567").await;
    assert_eq!(status, StatusCode::OK);
    let seen = h.forecast.seen.lock().unwrap();
    assert_eq!(seen[0].lat, 18.5204);
    assert_eq!(seen[0].lon, 73.8567);
}

#[tokio::test]
async fn test_weather_rejects_bad_coordinates() {
    let h = harness();
    let (status, _) = get(&h.app, "/api/weather?lat=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get(&h.app, "/api/weather?lat=95&lon=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(h.forecast.seen.lock().unwrap().is_empty());
}

// ─── /api/prices ─────────────────────────────────────────────────

#[tokio::test]
async fn test_prices_relayed_verbatim() {
    let h = harness();
    let req = Request::get("/api/prices").body(Body::empty()).unwrap();
    let (status, headers, body) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"{"records":[{"commodity":"Onion","modal_price":"1800"}],"total":1}"#
    );
}

#[tokio::test]
async fn test_prices_upstream_failure_is_generic() {
    let h = harness_with(StaticPrices(Err(())), true);
    let (status, body) = get(&h.app, "/api/prices").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch prices from data.gov");
}

// ─── /api/chat ───────────────────────────────────────────────────

#[tokio::test]
async fn test_chat_empty_message_makes_no_call() {
    let h = harness();
    let (status, body) = post_json(&h.app, "/api/chat", r#"{"message": ""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
    let (status, _) = post_json(&h.app, "/api/chat", r#"{"message": "   "}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = post_json(&h.app, "/api/chat", r#"{}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chat_malformed_body() {
    let h = harness();
    let (status, body) = post_json(&h.app, "/api/chat", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_chat_ok() {
    let h = harness();
    let (status, body) = post_json(&h.app, "/api/chat", r#"{"message": "How often to water onions?"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Irrigate every 10 days.");
    let prompts = h.generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("How often to water onions?"));
}

#[tokio::test]
async fn test_chat_missing_key() {
    let h = harness_with(StaticPrices(Ok("{}")), false);
    let (status, body) = post_json(&h.app, "/api/chat", r#"{"message": "hello"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Gemini API key not configured");
}

// ─── /api/analyze-crop-image ─────────────────────────────────────

#[tokio::test]
async fn test_crop_image_requires_image_and_crop() {
    let h = harness();
    let (status, body) = post_json(&h.app, "/api/analyze-crop-image", r#"{"crop": "Tomato"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Image and crop type are required");
    let (status, _) = post_json(&h.app, "/api/analyze-crop-image", r#"{"image": "data:image/png;base64,AAAA"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_crop_image_ok() {
    let h = harness();
    let (status, body) = post_json(
        &h.app,
        "/api/analyze-crop-image",
        r#"{"image": "data:image/png;base64,AAAA", "crop": "Tomato", "description": "curling leaves"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Irrigate every 10 days.");
    let prompts = h.generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("Crop Type: Tomato"));
    assert!(prompts[0].contains("Additional Details: curling leaves"));
}

// ─── /api/cities and static files ────────────────────────────────

#[tokio::test]
async fn test_cities() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/cities").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 10);
    assert_eq!(list[1]["name"], "Delhi");
}

#[tokio::test]
async fn test_index_not_cached() {
    let h = harness();
    let req = Request::get("/").body(Body::empty()).unwrap();
    let (status, headers, body) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate");
    assert_eq!(headers[header::PRAGMA], "no-cache");
    assert_eq!(headers[header::EXPIRES], "0");
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("AgriPulse"));
    // The placeholder page must not reference assets that are not shipped.
    assert!(!page.contains("<script"), "{}", page);
}
