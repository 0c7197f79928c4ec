//! Comment tool.

use jira_client::JiraError;

use crate::outcome::{ToolErrorKind, ToolOutcome, required};
use crate::tracker::Tracker;

/// Add a comment to an issue.
pub async fn add_comment(tracker: &Tracker, issue_key: &str, comment_body: &str) -> ToolOutcome {
  let client = match tracker.client() {
    Ok(c) => c,
    Err(outcome) => return outcome,
  };
  let issue_key = match required("issue_key", issue_key) {
    Ok(k) => k,
    Err(failure) => return failure.into(),
  };
  let comment_body = match required("comment_body", comment_body) {
    Ok(b) => b,
    Err(failure) => return failure.into(),
  };

  match client.add_comment(issue_key, comment_body).await {
    Ok(()) => ToolOutcome::ok(format!("Successfully added comment to issue {issue_key}.")),
    Err(e @ JiraError::Api { .. }) => ToolOutcome::err(
      ToolErrorKind::of(&e),
      format!("Error adding comment to issue {issue_key}: {}", e.text()),
    ),
    Err(e) => ToolOutcome::err(
      ToolErrorKind::Unexpected,
      format!("An unexpected error occurred while adding a comment to {issue_key}: {e}"),
    ),
  }
}
