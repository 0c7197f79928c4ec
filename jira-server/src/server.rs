//! Router assembly and the listening loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use jira_orchestrator::Agent;
use jira_tools::Tracker;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::handlers;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: DEFAULT_HOST.to_string(),
      port: DEFAULT_PORT,
    }
  }
}

impl ServerConfig {
  pub fn addr(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

/// Shared state behind every handler.
pub struct AppState {
  pub tracker: Tracker,
  /// Unset when no language model is configured.
  pub agent: Option<Arc<dyn Agent>>,
  browse_base_url: String,
}

impl AppState {
  /// `browse_base_url` falls back to the tracker's server URL.
  pub fn new(tracker: Tracker, agent: Option<Arc<dyn Agent>>, browse_base_url: Option<&str>) -> Self {
    let browse_base_url = browse_base_url
      .or(tracker.base_url())
      .unwrap_or_default()
      .trim_end_matches('/')
      .to_string();
    Self {
      tracker,
      agent,
      browse_base_url,
    }
  }

  /// Link to an issue or project in the Jira web UI.
  pub fn browse_url(&self, key: &str) -> String {
    format!("{}/browse/{key}", self.browse_base_url)
  }
}

pub fn build_router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/", get(handlers::root))
    .route("/ui", get(handlers::ui))
    .route("/invoke", post(handlers::invoke))
    .route("/api/issues/{key}", get(handlers::issue))
    .route("/api/projects", get(handlers::projects))
    .route("/api/projects/{key}/issues", get(handlers::project_issues))
    .with_state(state)
    .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
    .layer(TraceLayer::new_for_http())
}

/// Serve until Ctrl-C.
pub async fn run(config: &ServerConfig, state: Arc<AppState>) -> Result<()> {
  let addr = config.addr();
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .with_context(|| format!("Failed to bind {addr}"))?;

  info!(
    addr = %addr,
    tracker_ready = state.tracker.is_ready(),
    agent_ready = state.agent.is_some(),
    "Jira agent server listening"
  );

  axum::serve(listener, build_router(state))
    .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
    .await
    .context("Server error")?;

  Ok(())
}

/// Resolve once `signal` fires. If the handler cannot be installed the
/// server keeps running instead of stopping right away.
async fn shutdown_on(signal: impl Future<Output = std::io::Result<()>>) {
  match signal.await {
    Ok(()) => info!("Shutting down"),
    Err(e) => {
      warn!(error = %e, "Failed to listen for Ctrl-C; graceful shutdown is disabled");
      std::future::pending::<()>().await;
    }
  }
}
