//! # Jira Search Endpoint
//!
//! JQL search against `/rest/api/2/search`.

use crate::client::{JiraClient, read_json};
use crate::error::JiraError;
use crate::models::{JiraIssue, SearchResults};

/// Fields requested from the search endpoint; keeps payloads small.
const SEARCH_FIELDS: &str = "summary,status,assignee,project,description,created";

impl JiraClient {
  /// Search issues with a JQL query, returning at most `max_results` issues
  pub async fn search_issues(&self, jql: &str, max_results: u32) -> Result<Vec<JiraIssue>, JiraError> {
    let max_results = max_results.to_string();
    let response = self
      .get(&["search"])?
      .query(&[
        ("jql", jql),
        ("maxResults", max_results.as_str()),
        ("fields", SEARCH_FIELDS),
      ])
      .send()
      .await?;

    let results: SearchResults = read_json(response).await?;
    Ok(results.issues)
  }
}
