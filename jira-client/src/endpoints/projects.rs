//! # Jira Project Endpoints

use crate::client::{JiraClient, read_json};
use crate::error::JiraError;
use crate::models::JiraProject;

impl JiraClient {
  /// Get a single project, including its issue types
  pub async fn get_project(&self, project_key: &str) -> Result<JiraProject, JiraError> {
    let response = self
      .get(&["project", project_key])?
      .query(&[("expand", "issueTypes")])
      .send()
      .await?;
    read_json(response).await
  }

  /// List every project visible to the authenticated user
  pub async fn list_projects(&self) -> Result<Vec<JiraProject>, JiraError> {
    let response = self.get(&["project"])?.send().await?;
    read_json(response).await
  }
}
