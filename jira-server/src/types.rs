//! Request and response bodies.

use jira_tools::{IssueContext, IssueSummary, ProjectSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
  pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct InvokeResponse {
  pub response: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
  pub status: &'static str,
}

/// Full context of one issue.
#[derive(Debug, Serialize)]
pub struct IssueResponse {
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub key: String,
  pub summary: String,
  pub status: String,
  pub assignee: String,
  pub description: Option<String>,
  pub project: Option<String>,
  pub url: String,
}

impl IssueResponse {
  pub fn new(issue: IssueContext, url: String) -> Self {
    Self {
      kind: "issue",
      key: issue.key,
      summary: issue.summary,
      status: issue.status,
      assignee: issue.assignee,
      description: issue.description,
      project: issue.project,
      url,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct IssueListItem {
  pub key: String,
  pub summary: String,
  pub status: String,
  pub url: String,
}

impl IssueListItem {
  pub fn new(issue: IssueSummary, url: String) -> Self {
    Self {
      key: issue.key,
      summary: issue.summary,
      status: issue.status,
      url,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct IssueListResponse {
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub project: String,
  pub issues: Vec<IssueListItem>,
}

#[derive(Debug, Serialize)]
pub struct ProjectItem {
  pub key: String,
  pub name: String,
  pub id: String,
  pub url: String,
}

impl ProjectItem {
  pub fn new(project: ProjectSummary, url: String) -> Self {
    Self {
      key: project.key,
      name: project.name,
      id: project.id,
      url,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub projects: Vec<ProjectItem>,
}
