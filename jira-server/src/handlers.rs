use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Html;
use jira_orchestrator::OrchestratorError;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{
  InvokeRequest, InvokeResponse, IssueListItem, IssueListResponse, IssueResponse, ProjectItem, ProjectListResponse,
  StatusResponse,
};

const INDEX_HTML: &str = include_str!("../ui/index.html");

pub async fn root() -> Json<StatusResponse> {
  Json(StatusResponse {
    status: "Jira agent server is running.",
  })
}

pub async fn ui() -> Html<&'static str> {
  Html(INDEX_HTML)
}

pub async fn invoke(
  State(state): State<Arc<AppState>>,
  Json(request): Json<InvokeRequest>,
) -> Result<Json<InvokeResponse>, ApiError> {
  let prompt = request.prompt.trim();
  if prompt.is_empty() {
    return Err(ApiError::bad_request("Prompt cannot be empty."));
  }

  let request_id = Uuid::new_v4();
  let span = info_span!("invoke", %request_id);
  async move {
    let Some(agent) = state.agent.as_ref() else {
      error!("Prompt received but no language model is configured");
      return Err(ApiError::internal(OrchestratorError::NotConfigured.to_string()));
    };

    info!(chars = prompt.len(), "Running prompt");
    match agent.run(prompt).await {
      Ok(response) => Ok(Json(InvokeResponse { response })),
      Err(e) => {
        error!(error = %e, "Prompt failed");
        Err(ApiError::internal(e.to_string()))
      }
    }
  }
  .instrument(span)
  .await
}

pub async fn issue(State(state): State<Arc<AppState>>, Path(key): Path<String>) -> Result<Json<IssueResponse>, ApiError> {
  let issue = jira_tools::issue_context(&state.tracker, &key).await?;
  let url = state.browse_url(&issue.key);
  Ok(Json(IssueResponse::new(issue, url)))
}

pub async fn project_issues(
  State(state): State<Arc<AppState>>,
  Path(key): Path<String>,
) -> Result<Json<IssueListResponse>, ApiError> {
  let issues = jira_tools::project_issues(&state.tracker, &key).await?;
  Ok(Json(IssueListResponse {
    kind: "issue_list",
    project: key.trim().to_string(),
    issues: issues
      .into_iter()
      .map(|issue| {
        let url = state.browse_url(&issue.key);
        IssueListItem::new(issue, url)
      })
      .collect(),
  }))
}

pub async fn projects(State(state): State<Arc<AppState>>) -> Result<Json<ProjectListResponse>, ApiError> {
  let projects = jira_tools::project_list(&state.tracker).await?;
  Ok(Json(ProjectListResponse {
    kind: "project_list",
    projects: projects
      .into_iter()
      .map(|project| {
        let url = state.browse_url(&project.key);
        ProjectItem::new(project, url)
      })
      .collect(),
  }))
}
