//! # Jira Orchestrator
//!
//! Drives the Jira tools from a natural-language prompt. The model picks
//! tools, [`Orchestrator`] executes them one at a time through the
//! [`jira_tools::ToolRegistry`] and feeds their text back until the model
//! answers.

mod error;
mod gemini;
mod llm;
mod message;
mod orchestrator;
mod prompt;

pub use error::OrchestratorError;
pub use gemini::{DEFAULT_API_BASE, DEFAULT_MODEL, GeminiClient};
pub use llm::{LlmClient, LlmResponse, ScriptedLlmClient};
pub use message::{Message, Role, ToolCallRequest};
pub use orchestrator::{Agent, DEFAULT_MAX_ITERATIONS, Orchestrator};
pub use prompt::{system_instruction, task};
