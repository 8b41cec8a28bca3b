use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::location::LocationError;
use crate::upstream::UpstreamError;

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

/// The one error type handlers return. The message is what the client
/// sees; upstream details are logged, never forwarded.
#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

pub fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

pub fn bad_request(msg: impl Into<String>) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, msg)
}

impl ApiError {
    /// Map an upstream failure to a generic 500. `service` names the
    /// credential holder in the not-configured message ("Gemini").
    pub fn upstream(err: UpstreamError, service: &str, generic: &str) -> Self {
        match err {
            UpstreamError::MissingCredential(var) => {
                tracing::error!(credential = var, "{} API key missing", service);
                api_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{} API key not configured", service),
                )
            }
            other => {
                tracing::error!(error = %other, "{} request failed", service);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, generic)
            }
        }
    }
}

impl From<LocationError> for ApiError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::NoInput => bad_request(err.to_string()),
            LocationError::NotFound { .. } => api_error(StatusCode::NOT_FOUND, err.to_string()),
            LocationError::Upstream(e) => {
                tracing::error!(error = %e, "geocoding failed");
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to geocode location")
            }
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!(error = %err, "blocking task did not complete");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
