use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use crate::search::engine::SearchError;

/// Request failure as seen by an HTTP caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotConfigured(String),

    /// Bibliographic service failure; the upstream text is passed through as `details`.
    #[error("Search failed")]
    Upstream(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotConfigured(_) | ApiError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Upstream(details) => {
                error!(status = status.as_u16(), %details, "upstream failure");
                json!({ "error": self.to_string(), "details": details })
            }
            _ => {
                warn!(status = status.as_u16(), message = %self, "request rejected");
                json!({ "error": self.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Validation(message) => ApiError::BadRequest(message),
            SearchError::Upstream(e) => ApiError::Upstream(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
