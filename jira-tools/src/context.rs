//! Structured read-only lookups for the HTTP facade.
//!
//! These share the readiness check and error classification of the text
//! tools but hand back data instead of prose.

use jira_client::{JiraError, JiraIssue};
use serde::Serialize;

use crate::issues::assignee_name;
use crate::outcome::{ToolErrorKind, ToolFailure, required};
use crate::search::MAX_SEARCH_RESULTS;
use crate::tracker::Tracker;

/// The fields of one issue that a front end displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueContext {
  pub key: String,
  pub summary: String,
  pub status: String,
  pub assignee: String,
  pub description: Option<String>,
  pub project: Option<String>,
}

/// One row of a project's issue list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
  pub key: String,
  pub summary: String,
  pub status: String,
}

/// One accessible project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
  pub key: String,
  pub name: String,
  pub id: String,
}

fn failure(err: JiraError, what: &str) -> ToolFailure {
  let message = match &err {
    JiraError::Api { .. } => format!("Error retrieving {what}: {}", err.text()),
    _ => format!("Error retrieving {what}: {err}"),
  };
  ToolFailure::new(ToolErrorKind::of(&err), message)
}

/// Quote a value as a JQL string literal.
fn jql_string(value: &str) -> String {
  format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

impl From<&JiraIssue> for IssueSummary {
  fn from(issue: &JiraIssue) -> Self {
    Self {
      key: issue.key.clone(),
      summary: issue.fields.summary.clone(),
      status: issue.fields.status.name.clone(),
    }
  }
}

/// Look up one issue.
pub async fn issue_context(tracker: &Tracker, issue_key: &str) -> Result<IssueContext, ToolFailure> {
  let client = tracker.require()?;
  let issue_key = required("issue_key", issue_key)?;

  let issue = client
    .get_issue(issue_key)
    .await
    .map_err(|e| failure(e, &format!("issue {issue_key}")))?;

  Ok(IssueContext {
    assignee: assignee_name(&issue).to_string(),
    key: issue.key,
    summary: issue.fields.summary,
    status: issue.fields.status.name,
    description: issue.fields.description,
    project: issue.fields.project.map(|p| p.key),
  })
}

/// The newest issues of a project, at most [`MAX_SEARCH_RESULTS`].
pub async fn project_issues(tracker: &Tracker, project_key: &str) -> Result<Vec<IssueSummary>, ToolFailure> {
  let client = tracker.require()?;
  let project_key = required("project_key", project_key)?;

  let jql = format!("project = {} ORDER BY created DESC", jql_string(project_key));
  let issues = client
    .search_issues(&jql, MAX_SEARCH_RESULTS as u32)
    .await
    .map_err(|e| failure(e, &format!("issues for project {project_key}")))?;

  Ok(issues.iter().take(MAX_SEARCH_RESULTS).map(IssueSummary::from).collect())
}

/// Every project the configured user can see.
pub async fn project_list(tracker: &Tracker) -> Result<Vec<ProjectSummary>, ToolFailure> {
  let client = tracker.require()?;
  let projects = client.list_projects().await.map_err(|e| failure(e, "projects"))?;

  Ok(
    projects
      .into_iter()
      .map(|p| ProjectSummary {
        key: p.key,
        name: p.name,
        id: p.id,
      })
      .collect(),
  )
}
