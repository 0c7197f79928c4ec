//! Error type shared by every Jira endpoint.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Failure reported by the Jira client.
#[derive(Debug, Error)]
pub enum JiraError {
  /// Jira answered with a non-success status.
  #[error("HTTP {} - {text}", status.as_u16())]
  Api { status: StatusCode, text: String },

  /// The request never produced a response.
  #[error("Failed to reach Jira: {0}")]
  Transport(#[from] reqwest::Error),

  /// The configured Jira URL cannot be used.
  #[error("Invalid Jira URL: {0}")]
  InvalidUrl(String),

  /// Jira answered successfully but the body was not what we expected.
  #[error("Failed to parse Jira response: {0}")]
  Decode(String),
}

/// Body Jira returns alongside 4xx responses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorCollection {
  #[serde(default)]
  error_messages: Vec<String>,
  #[serde(default)]
  errors: serde_json::Map<String, serde_json::Value>,
}

impl JiraError {
  /// HTTP status reported by Jira, if any.
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Api { status, .. } => Some(*status),
      _ => None,
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.status() == Some(StatusCode::NOT_FOUND)
  }

  /// Tracker-supplied message text, or the rendered error for non-API failures.
  pub fn text(&self) -> String {
    match self {
      Self::Api { text, .. } => text.clone(),
      other => other.to_string(),
    }
  }

  /// Consume a non-success response into an `Api` error.
  pub(crate) async fn from_response(response: Response) -> Self {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Self::Api {
      status,
      text: render_error_body(status, &body),
    }
  }
}

/// Flatten Jira's `errorMessages` / `errors` body into a single line.
///
/// Field errors render as `field: message` so callers can search for the
/// offending field name.
fn render_error_body(status: StatusCode, body: &str) -> String {
  let parsed = serde_json::from_str::<ErrorCollection>(body).unwrap_or_default();

  let mut parts = parsed.error_messages;
  for (field, message) in parsed.errors {
    let message = match message {
      serde_json::Value::String(s) => s,
      other => other.to_string(),
    };
    parts.push(format!("{field}: {message}"));
  }

  if !parts.is_empty() {
    return parts.join("; ");
  }

  let trimmed = body.trim();
  if trimmed.is_empty() {
    status.canonical_reason().unwrap_or("Unknown error").to_string()
  } else {
    trimmed.to_string()
  }
}
