//! Jira REST fixtures for testing
//!
//! Payload builders mirror the JSON shapes Jira Cloud returns from the v2
//! API, and [`JiraMock`] wraps a wiremock server with shortcuts for mounting
//! them. Expectations set with [`JiraMock::forbid`] or
//! [`JiraMock::forbid_any`] are verified when the mock is dropped.

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Username every fixture client authenticates with
pub const TEST_USER: &str = "test_user";
/// API token every fixture client authenticates with
pub const TEST_TOKEN: &str = "test_token";

/// Full request path for a path under `/rest/api/2`
pub fn api_path(resource: &str) -> String {
  format!("/rest/api/2{resource}")
}

/// An issue as returned by `GET /issue/{key}` and the search endpoint
pub fn issue_json(key: &str, summary: &str, status: &str, assignee: Option<&str>) -> Value {
  let project_key = key.split('-').next().unwrap_or(key);
  json!({
      "id": format!("1{}", key.len()),
      "key": key,
      "fields": {
          "summary": summary,
          "description": format!("Description of {key}"),
          "status": {"id": "1", "name": status},
          "assignee": assignee.map(|name| json!({"displayName": name, "accountId": "acc-1"})),
          "project": {"key": project_key, "name": format!("{project_key} project")},
          "created": "2024-05-01T10:00:00.000+0000"
      }
  })
}

/// Body of `GET /search`
pub fn search_json(issues: Vec<Value>) -> Value {
  let total = issues.len();
  json!({
      "startAt": 0,
      "maxResults": 10,
      "total": total,
      "issues": issues
  })
}

/// Body of `GET /issue/{key}/transitions`
pub fn transitions_json(transitions: &[(&str, &str)]) -> Value {
  let transitions: Vec<Value> = transitions
    .iter()
    .map(|(id, name)| json!({"id": id, "name": name}))
    .collect();
  json!({ "transitions": transitions })
}

/// A project as returned by `GET /project/{key}`
pub fn project_json(key: &str, name: &str, issue_types: &[&str]) -> Value {
  let issue_types: Vec<Value> = issue_types
    .iter()
    .enumerate()
    .map(|(i, t)| json!({"id": (i + 1).to_string(), "name": t, "subtask": false}))
    .collect();
  json!({
      "id": format!("10{}", key.len()),
      "key": key,
      "name": name,
      "issueTypes": issue_types
  })
}

/// Jira's standard error collection body
pub fn error_json(messages: &[&str], field_errors: &[(&str, &str)]) -> Value {
  let errors: serde_json::Map<String, Value> = field_errors
    .iter()
    .map(|(field, message)| (field.to_string(), Value::String(message.to_string())))
    .collect();
  json!({
      "errorMessages": messages,
      "errors": errors
  })
}

/// A wiremock server standing in for Jira
pub struct JiraMock {
  pub server: MockServer,
}

impl JiraMock {
  /// Start a fresh mock server
  pub async fn start() -> Self {
    Self {
      server: MockServer::start().await,
    }
  }

  /// Base URL to point a Jira client at
  pub fn uri(&self) -> String {
    self.server.uri()
  }

  /// Answer `http_method resource` with `status` and a JSON body
  pub async fn respond(&self, http_method: &str, resource: &str, status: u16, body: Value) {
    Mock::given(method(http_method))
      .and(path(api_path(resource)))
      .respond_with(ResponseTemplate::new(status).set_body_json(body))
      .mount(&self.server)
      .await;
  }

  /// Answer `http_method resource` with `status`, expecting exactly `times` calls
  pub async fn respond_times(&self, http_method: &str, resource: &str, status: u16, body: Value, times: u64) {
    Mock::given(method(http_method))
      .and(path(api_path(resource)))
      .respond_with(ResponseTemplate::new(status).set_body_json(body))
      .expect(times)
      .mount(&self.server)
      .await;
  }

  /// Fail the test if `http_method resource` is ever requested
  pub async fn forbid(&self, http_method: &str, resource: &str) {
    Mock::given(method(http_method))
      .and(path(api_path(resource)))
      .respond_with(ResponseTemplate::new(500))
      .expect(0)
      .mount(&self.server)
      .await;
  }

  /// Fail the test if any request reaches the server
  pub async fn forbid_any(&self) {
    Mock::given(wiremock::matchers::any())
      .respond_with(ResponseTemplate::new(500))
      .expect(0)
      .mount(&self.server)
      .await;
  }

  /// Number of requests the server has received so far
  pub async fn request_count(&self) -> usize {
    self.server.received_requests().await.map(|r| r.len()).unwrap_or_default()
  }
}
