use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::consts::{API_PREFIX, USER_AGENT};
use crate::error::JiraError;
use crate::host::ensure_url_scheme;
use crate::models::JiraAuth;

/// Represents a Jira API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(base_url: &str, auth: JiraAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
    }
  }

  /// Base URL requests are issued against, without a trailing slash.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Test the Jira connection by fetching the current user
  pub async fn test_connection(&self) -> Result<bool, JiraError> {
    let response = self.get(&["myself"])?.send().await?;
    Ok(response.status().is_success())
  }

  /// URL of an API resource. Every segment is percent-encoded, so a key
  /// containing `/`, `?` or `#` stays a single segment.
  pub(crate) fn api_url(&self, segments: &[&str]) -> Result<Url, JiraError> {
    let root = format!("{}{}", self.base_url, API_PREFIX);
    let mut url = Url::parse(&root).map_err(|e| JiraError::InvalidUrl(format!("{root}: {e}")))?;
    url
      .path_segments_mut()
      .map_err(|()| JiraError::InvalidUrl(format!("{root} cannot carry a path")))?
      .extend(segments);
    Ok(url)
  }

  /// Authenticated GET against API path segments such as `["issue", "PROJ-1"]`.
  pub(crate) fn get(&self, segments: &[&str]) -> Result<RequestBuilder, JiraError> {
    let url = self.api_url(segments)?;
    debug!(%url, "GET");
    Ok(self.authed(self.client.get(url)))
  }

  /// Authenticated POST against API path segments.
  pub(crate) fn post(&self, segments: &[&str]) -> Result<RequestBuilder, JiraError> {
    let url = self.api_url(segments)?;
    debug!(%url, "POST");
    Ok(self.authed(self.client.post(url)))
  }

  fn authed(&self, request: RequestBuilder) -> RequestBuilder {
    request
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .header(reqwest::header::USER_AGENT, USER_AGENT)
      .header(reqwest::header::ACCEPT, "application/json")
  }
}

/// Turn a non-success response into `JiraError::Api`, pass the rest through.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, JiraError> {
  if response.status().is_success() {
    Ok(response)
  } else {
    Err(JiraError::from_response(response).await)
  }
}

/// Check the status and decode the JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, JiraError> {
  let response = ensure_success(response).await?;
  let body = response.text().await?;
  serde_json::from_str(&body).map_err(|e| JiraError::Decode(e.to_string()))
}

/// Create a Jira client from credentials
pub fn create_jira_client(base_url: &str, username: &str, api_token: &str) -> Result<JiraClient, JiraError> {
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  let base_url = ensure_url_scheme(base_url)?;
  Ok(JiraClient::new(&base_url, auth))
}
