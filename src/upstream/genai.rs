//! Text generation through the Gemini `generateContent` REST endpoint.

use serde::Deserialize;
use serde_json::json;

use super::{endpoint, UpstreamError};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// `generate(prompt) -> text`. Prompt content is the caller's business.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

pub struct GeminiClient {
    agent: ureq::Agent,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(
        agent: ureq::Agent,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            agent,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingCredential("GEMINI_API_KEY"))?;

        let url = endpoint(
            &self.base_url,
            &format!("/v1beta/models/{}:generateContent", self.model),
        );
        let response: GenerateResponse = self
            .agent
            .post(&url)
            .set("x-goog-api-key", api_key)
            .send_json(json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))?
            .into_json()
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        let text = response.text().ok_or_else(|| {
            UpstreamError::InvalidResponse("no candidate text in model response".into())
        })?;
        tracing::debug!(model = %self.model, chars = text.len(), "generated response");
        Ok(text)
    }
}

// ─── Response shape ─────────────────────────────────────────────

#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Deserialize, Debug)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize, Debug)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }
}
