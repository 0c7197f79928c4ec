use std::sync::Arc;

use agent_test_utils::JiraMock;
use agent_test_utils::jira::{TEST_TOKEN, TEST_USER, error_json, issue_json, project_json, search_json};
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use jira_client::create_jira_client;
use jira_orchestrator::{Agent, OrchestratorError};
use jira_server::{AppState, build_router};
use jira_tools::{NOT_CONFIGURED_MESSAGE, Tracker};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Answers every prompt by echoing it, or fails on demand.
struct EchoAgent {
  fail: bool,
}

#[async_trait]
impl Agent for EchoAgent {
  async fn run(&self, prompt: &str) -> Result<String, OrchestratorError> {
    if self.fail {
      Err(OrchestratorError::Llm("quota exceeded".to_string()))
    } else {
      Ok(format!("echo: {prompt}"))
    }
  }
}

fn app(tracker: Tracker, agent: Option<Arc<dyn Agent>>) -> Router {
  build_router(Arc::new(AppState::new(
    tracker,
    agent,
    Some("https://example.atlassian.net"),
  )))
}

async fn tracker_for(jira: &JiraMock) -> anyhow::Result<Tracker> {
  Ok(Tracker::ready(create_jira_client(&jira.uri(), TEST_USER, TEST_TOKEN)?))
}

async fn send(app: Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
  let response = app.oneshot(request).await?;
  let status = response.status();
  let bytes = to_bytes(response.into_body(), usize::MAX).await?;
  let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  Ok((status, body))
}

fn get(uri: &str) -> anyhow::Result<Request<Body>> {
  Ok(Request::builder().uri(uri).body(Body::empty())?)
}

fn post_prompt(prompt: &str) -> anyhow::Result<Request<Body>> {
  Ok(
    Request::builder()
      .method("POST")
      .uri("/invoke")
      .header("content-type", "application/json")
      .body(Body::from(json!({"prompt": prompt}).to_string()))?,
  )
}

#[tokio::test]
async fn test_root_reports_running() -> anyhow::Result<()> {
  let (status, body) = send(app(Tracker::unavailable(), None), get("/")?).await?;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({"status": "Jira agent server is running."}));
  Ok(())
}

#[tokio::test]
async fn test_ui_is_served() -> anyhow::Result<()> {
  let response = app(Tracker::unavailable(), None).oneshot(get("/ui")?).await?;
  assert_eq!(response.status(), StatusCode::OK);
  let bytes = to_bytes(response.into_body(), usize::MAX).await?;
  let html = String::from_utf8(bytes.to_vec())?;
  assert!(html.contains("Send to Jira Agent"));
  assert!(html.contains("Transition issue SCRUM-789 to 'Done'."));
  Ok(())
}

#[tokio::test]
async fn test_invoke_returns_agent_answer() -> anyhow::Result<()> {
  let agent: Arc<dyn Agent> = Arc::new(EchoAgent { fail: false });
  let (status, body) = send(app(Tracker::unavailable(), Some(agent)), post_prompt(" What is SCRUM-1? ")?).await?;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({"response": "echo: What is SCRUM-1?"}));
  Ok(())
}

#[tokio::test]
async fn test_invoke_rejects_blank_prompt() -> anyhow::Result<()> {
  let agent: Arc<dyn Agent> = Arc::new(EchoAgent { fail: true });
  let (status, body) = send(app(Tracker::unavailable(), Some(agent)), post_prompt("   ")?).await?;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body, json!({"detail": "Prompt cannot be empty."}));
  Ok(())
}

#[tokio::test]
async fn test_invoke_failure_is_500() -> anyhow::Result<()> {
  let agent: Arc<dyn Agent> = Arc::new(EchoAgent { fail: true });
  let (status, body) = send(app(Tracker::unavailable(), Some(agent)), post_prompt("hi")?).await?;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body["detail"], "LLM error: quota exceeded");
  Ok(())
}

#[tokio::test]
async fn test_invoke_without_model_is_500() -> anyhow::Result<()> {
  let (status, body) = send(app(Tracker::unavailable(), None), post_prompt("hi")?).await?;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body["detail"].as_str().unwrap_or_default().contains("GEMINI_API_KEY"));
  Ok(())
}

#[tokio::test]
async fn test_issue_endpoint_shape() -> anyhow::Result<()> {
  let jira = JiraMock::start().await;
  jira
    .respond("GET", "/issue/SCRUM-7", 200, issue_json("SCRUM-7", "Dark mode", "Done", None))
    .await;

  let (status, body) = send(app(tracker_for(&jira).await?, None), get("/api/issues/SCRUM-7")?).await?;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body,
    json!({
        "type": "issue",
        "key": "SCRUM-7",
        "summary": "Dark mode",
        "status": "Done",
        "assignee": "Unassigned",
        "description": "Description of SCRUM-7",
        "project": "SCRUM",
        "url": "https://example.atlassian.net/browse/SCRUM-7"
    })
  );
  Ok(())
}

#[tokio::test]
async fn test_issue_endpoint_not_found() -> anyhow::Result<()> {
  let jira = JiraMock::start().await;
  jira
    .respond("GET", "/issue/SCRUM-0", 404, error_json(&["Issue does not exist"], &[]))
    .await;

  let (status, body) = send(app(tracker_for(&jira).await?, None), get("/api/issues/SCRUM-0")?).await?;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["detail"], "Error retrieving issue SCRUM-0: Issue does not exist");
  Ok(())
}

#[tokio::test]
async fn test_project_issues_endpoint() -> anyhow::Result<()> {
  let jira = JiraMock::start().await;
  jira
    .respond(
      "GET",
      "/search",
      200,
      search_json(vec![issue_json("SCRUM-2", "Newest", "To Do", None)]),
    )
    .await;

  let (status, body) = send(app(tracker_for(&jira).await?, None), get("/api/projects/SCRUM/issues")?).await?;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body,
    json!({
        "type": "issue_list",
        "project": "SCRUM",
        "issues": [{
            "key": "SCRUM-2",
            "summary": "Newest",
            "status": "To Do",
            "url": "https://example.atlassian.net/browse/SCRUM-2"
        }]
    })
  );
  Ok(())
}

#[tokio::test]
async fn test_projects_endpoint() -> anyhow::Result<()> {
  let jira = JiraMock::start().await;
  jira
    .respond("GET", "/project", 200, json!([project_json("OPS", "Operations", &[])]))
    .await;

  let (status, body) = send(app(tracker_for(&jira).await?, None), get("/api/projects")?).await?;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["type"], "project_list");
  assert_eq!(body["projects"][0]["key"], "OPS");
  assert_eq!(body["projects"][0]["name"], "Operations");
  assert_eq!(body["projects"][0]["url"], "https://example.atlassian.net/browse/OPS");
  Ok(())
}

#[tokio::test]
async fn test_read_endpoints_unavailable_without_tracker() -> anyhow::Result<()> {
  for uri in ["/api/issues/SCRUM-1", "/api/projects/SCRUM/issues", "/api/projects"] {
    let (status, body) = send(app(Tracker::unavailable(), None), get(uri)?).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
    assert_eq!(body["detail"], NOT_CONFIGURED_MESSAGE);
  }
  Ok(())
}

#[tokio::test]
async fn test_tracker_failure_is_bad_gateway() -> anyhow::Result<()> {
  let jira = JiraMock::start().await;
  jira
    .respond("GET", "/project", 500, error_json(&["Internal server error"], &[]))
    .await;

  let (status, _) = send(app(tracker_for(&jira).await?, None), get("/api/projects")?).await?;
  assert_eq!(status, StatusCode::BAD_GATEWAY);
  Ok(())
}
