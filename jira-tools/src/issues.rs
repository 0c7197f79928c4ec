//! Issue lookup and creation tools.

use jira_client::{IssueFieldsInput, IssueTypeRef, JiraError, JiraIssue, ProjectRef};
use tracing::debug;

use crate::outcome::{ToolErrorKind, ToolOutcome, required};
use crate::tracker::Tracker;

/// Issue type used when the caller does not name one.
pub const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Display name of an issue's assignee, or `Unassigned`.
pub(crate) fn assignee_name(issue: &JiraIssue) -> &str {
  issue
    .fields
    .assignee
    .as_ref()
    .map(|a| a.display_name.as_str())
    .unwrap_or("Unassigned")
}

/// Fetch one issue and describe it on a single line.
pub async fn fetch_issue(tracker: &Tracker, issue_key: &str) -> ToolOutcome {
  let client = match tracker.client() {
    Ok(c) => c,
    Err(outcome) => return outcome,
  };
  let issue_key = match required("issue_key", issue_key) {
    Ok(k) => k,
    Err(failure) => return failure.into(),
  };

  match client.get_issue(issue_key).await {
    Ok(issue) => ToolOutcome::ok(format!(
      "Issue: {}, Summary: {}, Status: {}, Assignee: {}",
      issue.key,
      issue.fields.summary,
      issue.fields.status.name,
      assignee_name(&issue)
    )),
    Err(e) => ToolOutcome::err(
      ToolErrorKind::of(&e),
      format!("Error retrieving issue {issue_key}: {e}"),
    ),
  }
}

/// Create an issue and report its key.
///
/// When the tracker rejects the request and mentions the issue type, the
/// project's valid issue types are looked up and listed so the caller can
/// retry with one of them.
pub async fn create_issue(
  tracker: &Tracker,
  project_key: &str,
  summary: &str,
  description: &str,
  issue_type: Option<&str>,
) -> ToolOutcome {
  let client = match tracker.client() {
    Ok(c) => c,
    Err(outcome) => return outcome,
  };
  let project_key = match required("project_key", project_key) {
    Ok(k) => k,
    Err(failure) => return failure.into(),
  };
  let summary = match required("summary", summary) {
    Ok(s) => s,
    Err(failure) => return failure.into(),
  };
  let issue_type = issue_type
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .unwrap_or(DEFAULT_ISSUE_TYPE);

  let fields = IssueFieldsInput {
    project: ProjectRef {
      key: project_key.to_string(),
      name: None,
    },
    summary: summary.to_string(),
    description: description.to_string(),
    issue_type: IssueTypeRef {
      name: issue_type.to_string(),
    },
  };

  let err = match client.create_issue(fields).await {
    Ok(created) => return ToolOutcome::ok(format!("Successfully created issue {}.", created.key)),
    Err(e) => e,
  };

  match err {
    JiraError::Api { ref text, .. } if text.to_lowercase().contains("issuetype") => {
      debug!(project = project_key, issue_type, "Issue type rejected; looking up valid types");
      match client.get_project(project_key).await {
        Ok(project) => {
          let available: Vec<&str> = project.issue_types.iter().map(|t| t.name.as_str()).collect();
          ToolOutcome::err(
            ToolErrorKind::Validation,
            format!(
              "Error: Failed to create issue. The issue type '{issue_type}' is likely invalid for project \
               '{project_key}'. Please use one of the following available issue types: {}.",
              available.join(", ")
            ),
          )
        }
        Err(_) => ToolOutcome::err(
          ToolErrorKind::Validation,
          format!(
            "Error: Failed to create issue with type '{issue_type}'. It might be an invalid issue type for project \
             '{project_key}'. Original error: {text}"
          ),
        ),
      }
    }
    JiraError::Api { ref text, .. } => {
      ToolOutcome::err(ToolErrorKind::of(&err), format!("Error creating issue: {text}"))
    }
    other => ToolOutcome::err(ToolErrorKind::Unexpected, format!("Error creating issue: {other}")),
  }
}
