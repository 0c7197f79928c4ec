//! JQL search tool.

use crate::outcome::{ToolErrorKind, ToolOutcome, required};
use crate::tracker::Tracker;

/// Upper bound on issues returned by a single search.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Run a JQL query and list matching issues as `- KEY: summary` lines.
pub async fn search_issues(tracker: &Tracker, jql_query: &str) -> ToolOutcome {
  let client = match tracker.client() {
    Ok(c) => c,
    Err(outcome) => return outcome,
  };
  let jql_query = match required("jql_query", jql_query) {
    Ok(q) => q,
    Err(failure) => return failure.into(),
  };

  let issues = match client.search_issues(jql_query, MAX_SEARCH_RESULTS as u32).await {
    Ok(issues) => issues,
    Err(e) => {
      return ToolOutcome::err(
        ToolErrorKind::of(&e),
        format!("Error searching for issues with JQL '{jql_query}': {e}"),
      );
    }
  };

  if issues.is_empty() {
    return ToolOutcome::ok(format!("No issues found for JQL query: '{jql_query}'"));
  }

  // Jira may ignore maxResults on some deployments.
  let lines: Vec<String> = issues
    .iter()
    .take(MAX_SEARCH_RESULTS)
    .map(|issue| format!("- {}: {}", issue.key, issue.fields.summary))
    .collect();

  ToolOutcome::ok(format!("Found issues:\n{}", lines.join("\n")))
}

#[cfg(test)]
mod tests {
  use agent_test_utils::JiraMock;
  use agent_test_utils::jira::{TEST_TOKEN, TEST_USER, error_json, issue_json, search_json};
  use jira_client::create_jira_client;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, ResponseTemplate};

  use super::*;

  fn tracker_for(jira: &JiraMock) -> Tracker {
    Tracker::ready(create_jira_client(&jira.uri(), TEST_USER, TEST_TOKEN).unwrap())
  }

  #[tokio::test]
  async fn test_search_lists_key_and_summary() {
    let jira = JiraMock::start().await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(query_param("maxResults", "10"))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![
        issue_json("SCRUM-2", "Add dark mode", "In Progress", None),
        issue_json("SCRUM-1", "Fix login flow", "In Progress", Some("Ada")),
      ])))
      .expect(1)
      .mount(&jira.server)
      .await;

    let outcome = search_issues(&tracker_for(&jira), "project = SCRUM AND status = \"In Progress\"").await;
    insta::assert_snapshot!(outcome.text(), @r"
    Found issues:
    - SCRUM-2: Add dark mode
    - SCRUM-1: Fix login flow
    ");
  }

  #[tokio::test]
  async fn test_search_with_no_results_names_query() {
    let jira = JiraMock::start().await;
    jira.respond("GET", "/search", 200, search_json(vec![])).await;

    let outcome = search_issues(&tracker_for(&jira), "project = EMPTY").await;
    assert!(outcome.is_ok());
    assert_eq!(outcome.text(), "No issues found for JQL query: 'project = EMPTY'");
  }

  #[tokio::test]
  async fn test_search_caps_results_even_if_tracker_returns_more() {
    let jira = JiraMock::start().await;
    let issues = (1..=25)
      .map(|n| issue_json(&format!("BIG-{n}"), &format!("Issue {n}"), "To Do", None))
      .collect();
    jira.respond("GET", "/search", 200, search_json(issues)).await;

    let outcome = search_issues(&tracker_for(&jira), "project = BIG").await;
    let result_lines = outcome.text().lines().filter(|l| l.starts_with("- ")).count();
    assert_eq!(result_lines, MAX_SEARCH_RESULTS);
    assert!(!outcome.text().contains("BIG-11"));
  }

  #[tokio::test]
  async fn test_search_error_names_query() {
    let jira = JiraMock::start().await;
    jira
      .respond(
        "GET",
        "/search",
        400,
        error_json(&["Error in the JQL Query: The character '%' is a reserved JQL character."], &[]),
      )
      .await;

    let outcome = search_issues(&tracker_for(&jira), "summary ~ %").await;
    assert_eq!(outcome.kind(), Some(ToolErrorKind::Validation));
    assert!(outcome.text().starts_with("Error searching for issues with JQL 'summary ~ %':"));
    assert!(outcome.text().contains("reserved JQL character"));
  }
}
