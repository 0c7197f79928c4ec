//! # Jira Comment Endpoints

use crate::client::{JiraClient, ensure_success};
use crate::error::JiraError;
use crate::models::CommentRequest;

impl JiraClient {
  /// Add a plain-text comment to an issue
  pub async fn add_comment(&self, issue_key: &str, body: &str) -> Result<(), JiraError> {
    let response = self
      .post(&["issue", issue_key, "comment"])?
      .json(&CommentRequest { body })
      .send()
      .await?;

    ensure_success(response).await?;
    Ok(())
  }
}
