//! Test utilities shared across the jira-agent workspace
//!
//! This crate provides common testing infrastructure including:
//! - Jira REST payload builders and a wiremock-backed Jira ([`jira`])
//! - Temporary configuration files ([`ConfigFileGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod jira;

// Re-export commonly used items
pub use config::ConfigFileGuard;
pub use jira::JiraMock;
