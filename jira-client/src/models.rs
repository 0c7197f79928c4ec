use serde::{Deserialize, Serialize};

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// Represents a Jira issue
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssue {
  pub id: String,
  pub key: String,
  pub fields: JiraIssueFields,
}

/// Represents Jira issue fields
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueFields {
  pub summary: String,
  #[serde(default)]
  pub description: Option<String>,
  pub status: JiraIssueStatus,
  #[serde(default)]
  pub assignee: Option<JiraUser>,
  #[serde(default)]
  pub project: Option<ProjectRef>,
  #[serde(default)]
  pub created: Option<String>,
}

/// Represents a Jira issue status
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueStatus {
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
}

/// Represents a Jira user as embedded in issue fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
  pub display_name: String,
  #[serde(default)]
  pub account_id: Option<String>,
}

/// Project reference embedded in issue fields and create payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
  pub key: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

/// Represents a Jira project
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraProject {
  pub id: String,
  pub key: String,
  pub name: String,
  /// Only populated by the single-project endpoint.
  #[serde(default)]
  pub issue_types: Vec<JiraIssueType>,
}

/// Issue type available in a project
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueType {
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
  #[serde(default)]
  pub subtask: bool,
}

/// Response body of the JQL search endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
  #[serde(default)]
  pub total: Option<u64>,
  #[serde(default)]
  pub issues: Vec<JiraIssue>,
}

/// Fields accepted when creating an issue
#[derive(Debug, Clone, Serialize)]
pub struct IssueFieldsInput {
  pub project: ProjectRef,
  pub summary: String,
  pub description: String,
  #[serde(rename = "issuetype")]
  pub issue_type: IssueTypeRef,
}

/// Issue type referenced by name in a create payload
#[derive(Debug, Clone, Serialize)]
pub struct IssueTypeRef {
  pub name: String,
}

/// Represents an issue creation request payload
#[derive(Debug, Serialize)]
pub struct CreateIssueRequest {
  pub fields: IssueFieldsInput,
}

/// Identifiers Jira returns for a newly created issue
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
  pub id: String,
  pub key: String,
}

/// Represents a Jira transition
#[derive(Debug, Clone, Deserialize)]
pub struct JiraTransition {
  pub id: String,
  pub name: String,
}

/// Represents a list of Jira transitions
#[derive(Debug, Deserialize)]
pub struct JiraTransitions {
  pub transitions: Vec<JiraTransition>,
}

/// Represents a transition request payload
#[derive(Debug, Serialize)]
pub struct TransitionRequest {
  pub transition: TransitionId,
}

/// Represents a transition ID for the request
#[derive(Debug, Serialize)]
pub struct TransitionId {
  pub id: String,
}

/// Represents a comment creation payload
#[derive(Debug, Serialize)]
pub(crate) struct CommentRequest<'a> {
  pub body: &'a str,
}
