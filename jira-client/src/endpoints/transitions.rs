use crate::client::{JiraClient, ensure_success, read_json};
use crate::error::JiraError;
use crate::models::{JiraTransition, JiraTransitions, TransitionId, TransitionRequest};

impl JiraClient {
  /// Get available transitions for an issue
  pub async fn get_transitions(&self, issue_key: &str) -> Result<Vec<JiraTransition>, JiraError> {
    let response = self.get(&["issue", issue_key, "transitions"])?.send().await?;
    let transitions: JiraTransitions = read_json(response).await?;
    Ok(transitions.transitions)
  }

  /// Transition an issue to a new status
  pub async fn transition_issue(&self, issue_key: &str, transition_id: &str) -> Result<(), JiraError> {
    let payload = TransitionRequest {
      transition: TransitionId {
        id: transition_id.to_string(),
      },
    };

    let response = self
      .post(&["issue", issue_key, "transitions"])?
      .json(&payload)
      .send()
      .await?;

    ensure_success(response).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use agent_test_utils::jira::{TEST_TOKEN, TEST_USER, error_json, transitions_json};
  use wiremock::matchers::{basic_auth, body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::create_jira_client;

  #[tokio::test]
  async fn test_get_transitions() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), TEST_USER, TEST_TOKEN)?;

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .and(basic_auth(TEST_USER, TEST_TOKEN))
      .respond_with(ResponseTemplate::new(200).set_body_json(transitions_json(&[
        ("11", "To Do"),
        ("21", "In Progress"),
        ("31", "Done"),
      ])))
      .mount(&mock_server)
      .await;

    let transitions = client.get_transitions("TEST-123").await?;
    assert_eq!(transitions.len(), 3);
    assert_eq!(transitions[0].id, "11");
    assert_eq!(transitions[0].name, "To Do");
    assert_eq!(transitions[2].id, "31");
    assert_eq!(transitions[2].name, "Done");

    Ok(())
  }

  #[tokio::test]
  async fn test_transition_issue() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), TEST_USER, TEST_TOKEN)?;

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .and(basic_auth(TEST_USER, TEST_TOKEN))
      .and(body_json(serde_json::json!({
          "transition": {
              "id": "21"
          }
      })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    client.transition_issue("TEST-123", "21").await?;

    Ok(())
  }

  #[tokio::test]
  async fn test_transition_issue_invalid_transition() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), TEST_USER, TEST_TOKEN)?;

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .respond_with(ResponseTemplate::new(400).set_body_json(error_json(
        &["The requested transition is not available for the current status."],
        &[],
      )))
      .mount(&mock_server)
      .await;

    let err = client.transition_issue("TEST-123", "invalid").await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    assert!(err.text().contains("not available"));

    Ok(())
  }

  #[tokio::test]
  async fn test_transitions_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), TEST_USER, TEST_TOKEN)?;

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/NONEXISTENT-123/transitions"))
      .respond_with(ResponseTemplate::new(404).set_body_json(error_json(
        &["Issue does not exist or you do not have permission to see it."],
        &[],
      )))
      .mount(&mock_server)
      .await;

    let err = client.get_transitions("NONEXISTENT-123").await.unwrap_err();
    assert!(err.is_not_found());

    Ok(())
  }
}
