//! # Jira Tools
//!
//! Text-returning Jira operations for an LLM agent. Every tool takes a
//! [`Tracker`] handle and always yields a [`ToolOutcome`]; tracker failures
//! are turned into agent-readable guidance instead of errors.

mod comments;
mod context;
mod issues;
mod outcome;
mod projects;
mod registry;
mod search;
mod tracker;
mod transitions;

pub use comments::add_comment;
pub use context::{IssueContext, IssueSummary, ProjectSummary, issue_context, project_issues, project_list};
pub use issues::{DEFAULT_ISSUE_TYPE, create_issue, fetch_issue};
pub use outcome::{ToolErrorKind, ToolFailure, ToolOutcome};
pub use projects::validate_project_key;
pub use registry::{ToolDefinition, ToolRegistry};
pub use search::{MAX_SEARCH_RESULTS, search_issues};
pub use tracker::{NOT_CONFIGURED_MESSAGE, Tracker, TrackerCredentials};
pub use transitions::transition_issue;
