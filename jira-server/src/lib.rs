//! # Jira Server
//!
//! HTTP facade for the Jira agent: a prompt endpoint backed by the
//! orchestrator, read-only JSON lookups, and a single-page UI.

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{AppState, DEFAULT_HOST, DEFAULT_PORT, ServerConfig, build_router, run};
