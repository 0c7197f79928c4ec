use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jira_tools::{ToolErrorKind, ToolFailure};
use serde_json::json;

/// An error answered as `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
  pub status: StatusCode,
  pub detail: String,
}

impl ApiError {
  pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
    Self {
      status,
      detail: detail.into(),
    }
  }

  pub fn bad_request(detail: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, detail)
  }

  pub fn internal(detail: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
  }
}

impl From<ToolFailure> for ApiError {
  fn from(failure: ToolFailure) -> Self {
    let status = match failure.kind {
      ToolErrorKind::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
      ToolErrorKind::NotFound => StatusCode::NOT_FOUND,
      ToolErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
      ToolErrorKind::Validation | ToolErrorKind::Tracker | ToolErrorKind::Unexpected => StatusCode::BAD_GATEWAY,
    };
    Self::new(status, failure.message)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(json!({"detail": self.detail}))).into_response()
  }
}
