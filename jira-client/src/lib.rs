//! # Jira API Client
//!
//! Async Jira REST v2 integration covering the handful of operations the
//! agent tools need: issue lookup and search, issue creation, comments,
//! workflow transitions, and project metadata.

mod client;
mod consts;
mod endpoints;
mod error;
mod host;
pub mod models;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
pub use consts::USER_AGENT;
pub use error::JiraError;
pub use host::ensure_url_scheme;
// Re-export models
pub use models::{
  CreateIssueRequest, CreatedIssue, IssueFieldsInput, IssueTypeRef, JiraAuth, JiraIssue, JiraIssueFields,
  JiraIssueStatus, JiraIssueType, JiraProject, JiraTransition, JiraTransitions, JiraUser, ProjectRef, SearchResults,
  TransitionId, TransitionRequest,
};
pub use reqwest::StatusCode;
