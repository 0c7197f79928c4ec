//! Project validation tool.
//!
//! Meant to be called before [`crate::create_issue`] whenever the project key
//! is uncertain.

use jira_client::JiraError;

use crate::outcome::{ToolErrorKind, ToolOutcome, required};
use crate::tracker::Tracker;

/// Confirm that a project exists and is visible to the configured user.
pub async fn validate_project_key(tracker: &Tracker, project_key: &str) -> ToolOutcome {
  let client = match tracker.client() {
    Ok(c) => c,
    Err(outcome) => return outcome,
  };
  let project_key = match required("project_key", project_key) {
    Ok(k) => k,
    Err(failure) => return failure.into(),
  };

  match client.get_project(project_key).await {
    Ok(project) => ToolOutcome::ok(format!(
      "Success: Project with key '{}' and name '{}' is valid and accessible.",
      project.key, project.name
    )),
    Err(e) if e.is_not_found() => ToolOutcome::err(
      ToolErrorKind::NotFound,
      format!("Error: Project with key '{project_key}' was not found. Please provide a correct project key."),
    ),
    Err(JiraError::Api { text, .. }) => ToolOutcome::err(
      ToolErrorKind::Tracker,
      format!(
        "Error: An error occurred while validating project '{project_key}'. You may not have permission to view it. \
         Details: {text}"
      ),
    ),
    Err(e) => ToolOutcome::err(
      ToolErrorKind::Unexpected,
      format!("An unexpected error occurred while validating project '{project_key}': {e}"),
    ),
  }
}
