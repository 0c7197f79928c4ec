//! Constants for the jira-client crate.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("jira-agent/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Path prefix of the Jira REST API version this client speaks.
pub(crate) const API_PREFIX: &str = "/rest/api/2";
