//! Shared tracker handle passed to every tool.
//!
//! The handle is built once at startup. When credentials are missing or the
//! startup check fails it stays unset for the life of the process, and every
//! tool answers with [`NOT_CONFIGURED_MESSAGE`] without touching the network.

use std::sync::Arc;

use jira_client::{JiraClient, create_jira_client};
use tracing::{info, warn};

use crate::outcome::{ToolErrorKind, ToolFailure, ToolOutcome};

/// Fixed reply of every tool when no tracker handle is available.
pub const NOT_CONFIGURED_MESSAGE: &str =
  "Error: Jira client is not initialized. Check your Jira configuration (JIRA_SERVER, JIRA_USERNAME, JIRA_API_TOKEN).";

/// Credentials needed to reach a Jira instance.
#[derive(Debug, Clone)]
pub struct TrackerCredentials {
  pub server: String,
  pub username: String,
  pub api_token: String,
}

/// Read-only handle to the tracker client, cheap to clone.
#[derive(Clone, Default)]
pub struct Tracker {
  client: Option<Arc<JiraClient>>,
}

impl Tracker {
  /// Wrap an already constructed client.
  pub fn ready(client: JiraClient) -> Self {
    Self {
      client: Some(Arc::new(client)),
    }
  }

  /// A handle with no client behind it.
  pub fn unavailable() -> Self {
    Self { client: None }
  }

  /// Construct the client and check it by listing accessible projects.
  ///
  /// Any failure leaves the handle unset; there is no retry.
  pub async fn connect(credentials: Option<TrackerCredentials>) -> Self {
    let Some(credentials) = credentials else {
      warn!("Jira credentials are not configured; Jira tools are disabled");
      return Self::unavailable();
    };

    let client = match create_jira_client(&credentials.server, &credentials.username, &credentials.api_token) {
      Ok(client) => client,
      Err(e) => {
        warn!(error = %e, "Failed to initialize Jira client");
        return Self::unavailable();
      }
    };

    match client.list_projects().await {
      Ok(projects) => {
        info!(count = projects.len(), server = %client.base_url(), "Connected to Jira");
        for project in &projects {
          info!("{} - {}", project.key, project.name);
        }
        Self::ready(client)
      }
      Err(e) => {
        warn!(error = %e, "Failed to initialize Jira client");
        Self::unavailable()
      }
    }
  }

  pub fn is_ready(&self) -> bool {
    self.client.is_some()
  }

  /// Base URL of the configured Jira instance.
  pub fn base_url(&self) -> Option<&str> {
    self.client.as_deref().map(JiraClient::base_url)
  }

  /// The client, or the fixed not-configured outcome.
  pub(crate) fn client(&self) -> Result<&JiraClient, ToolOutcome> {
    self
      .client
      .as_deref()
      .ok_or_else(|| ToolOutcome::err(ToolErrorKind::NotConfigured, NOT_CONFIGURED_MESSAGE))
  }

  /// Same as [`Tracker::client`] for callers that want structured failures.
  pub(crate) fn require(&self) -> Result<&JiraClient, ToolFailure> {
    self
      .client
      .as_deref()
      .ok_or_else(|| ToolFailure::new(ToolErrorKind::NotConfigured, NOT_CONFIGURED_MESSAGE))
  }
}
