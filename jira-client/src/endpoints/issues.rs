//! # Jira Issue Endpoints
//!
//! Jira API endpoint implementations for issue operations,
//! including fetching and creating Jira issues.

use tracing::debug;

use crate::client::{JiraClient, read_json};
use crate::error::JiraError;
use crate::models::{CreateIssueRequest, CreatedIssue, IssueFieldsInput, JiraIssue};

impl JiraClient {
  /// Get a Jira issue by key
  pub async fn get_issue(&self, issue_key: &str) -> Result<JiraIssue, JiraError> {
    let response = self.get(&["issue", issue_key])?.send().await?;
    read_json(response).await
  }

  /// Create an issue from the given fields and return its key
  pub async fn create_issue(&self, fields: IssueFieldsInput) -> Result<CreatedIssue, JiraError> {
    debug!(project = %fields.project.key, issue_type = %fields.issue_type.name, "Creating issue");

    let payload = CreateIssueRequest { fields };
    let response = self.post(&["issue"])?.json(&payload).send().await?;
    read_json(response).await
  }
}
