//! # Jira API Endpoints
//!
//! Organized endpoint implementations for different Jira API resource types:
//! issues, JQL search, comments, workflow transitions, and projects.

pub mod comments;
pub mod issues;
pub mod projects;
pub mod search;
pub mod transitions;
