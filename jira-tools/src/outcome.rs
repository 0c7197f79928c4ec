//! Result types returned by every tool.
//!
//! A tool never fails past its own boundary: it returns a [`ToolOutcome`]
//! that is either a success text or a classified failure text. The agent
//! only ever sees [`ToolOutcome::into_text`]; Rust callers can still match on
//! the [`ToolErrorKind`].

use std::fmt;

use jira_client::JiraError;
use serde::Serialize;

/// Classification of a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
  /// No tracker handle: credentials were missing or the client never came up.
  NotConfigured,
  /// The caller supplied an empty or malformed argument.
  InvalidInput,
  /// The tracker reported a missing entity (HTTP 404).
  NotFound,
  /// The tracker rejected the input, or it did not match the available options.
  Validation,
  /// Any other tracker-reported failure (permissions, server errors).
  Tracker,
  /// The request never completed or the reply could not be understood.
  Unexpected,
}

impl ToolErrorKind {
  /// Classify a tracker error by its HTTP status.
  pub fn of(err: &JiraError) -> Self {
    match err {
      JiraError::Api { status, .. } if status.as_u16() == 404 => Self::NotFound,
      JiraError::Api { status, .. } if status.as_u16() == 400 => Self::Validation,
      JiraError::Api { .. } => Self::Tracker,
      JiraError::Transport(_) | JiraError::Decode(_) | JiraError::InvalidUrl(_) => Self::Unexpected,
    }
  }
}

/// A classified failure with its agent-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
  pub kind: ToolErrorKind,
  pub message: String,
}

impl ToolFailure {
  pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
    }
  }
}

impl fmt::Display for ToolFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message)
  }
}

/// Outcome of a single tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
  Ok { text: String },
  Error { kind: ToolErrorKind, message: String },
}

impl ToolOutcome {
  pub fn ok(text: impl Into<String>) -> Self {
    Self::Ok { text: text.into() }
  }

  pub fn err(kind: ToolErrorKind, message: impl Into<String>) -> Self {
    Self::Error {
      kind,
      message: message.into(),
    }
  }

  pub fn is_ok(&self) -> bool {
    matches!(self, Self::Ok { .. })
  }

  /// Failure kind, `None` on success.
  pub fn kind(&self) -> Option<ToolErrorKind> {
    match self {
      Self::Ok { .. } => None,
      Self::Error { kind, .. } => Some(*kind),
    }
  }

  /// The message text regardless of success.
  pub fn text(&self) -> &str {
    match self {
      Self::Ok { text } => text,
      Self::Error { message, .. } => message,
    }
  }

  /// Flatten to the string handed back to the agent.
  pub fn into_text(self) -> String {
    match self {
      Self::Ok { text } => text,
      Self::Error { message, .. } => message,
    }
  }
}

impl From<ToolFailure> for ToolOutcome {
  fn from(failure: ToolFailure) -> Self {
    Self::err(failure.kind, failure.message)
  }
}

impl fmt::Display for ToolOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.text())
  }
}

/// Trim a required argument, rejecting blank values.
pub(crate) fn required<'a>(argument: &str, value: &'a str) -> Result<&'a str, ToolFailure> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    Err(ToolFailure::new(
      ToolErrorKind::InvalidInput,
      format!("Error: The '{argument}' argument must not be empty."),
    ))
  } else {
    Ok(trimmed)
  }
}
