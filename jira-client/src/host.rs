//! Base URL normalization for Jira hosts.

use url::Url;

use crate::error::JiraError;

/// Normalize a Jira host into a base URL the endpoints can append paths to.
///
/// Hosts without a scheme are assumed to be `https://`. Trailing slashes are
/// dropped so `{base}/rest/api/2/...` never produces `//`.
pub fn ensure_url_scheme(input: &str) -> Result<String, JiraError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(JiraError::InvalidUrl("Host cannot be empty".to_string()));
  }

  let lowered = trimmed.to_ascii_lowercase();
  let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
    trimmed.to_string()
  } else {
    format!("https://{}", trimmed.trim_start_matches('/'))
  };

  let url = Url::parse(&candidate)
    .map_err(|e| JiraError::InvalidUrl(format!("Failed to parse URL '{input}': {e}")))?;
  if url.host().is_none() {
    return Err(JiraError::InvalidUrl(format!("URL '{input}' has no host")));
  }

  Ok(url.as_str().trim_end_matches('/').to_string())
}
