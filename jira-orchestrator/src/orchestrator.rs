//! The tool-calling agent loop.

use std::sync::Arc;

use async_trait::async_trait;
use jira_tools::ToolRegistry;
use tracing::{debug, info, instrument};

use crate::error::OrchestratorError;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompt;

pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Anything that turns a prompt into an answer.
#[async_trait]
pub trait Agent: Send + Sync {
  async fn run(&self, prompt: &str) -> Result<String, OrchestratorError>;
}

/// Runs a prompt against the model, executing requested tools until the model
/// answers in plain text.
pub struct Orchestrator {
  llm: Arc<dyn LlmClient>,
  registry: ToolRegistry,
  max_iterations: usize,
}

impl Orchestrator {
  pub fn new(llm: Arc<dyn LlmClient>, registry: ToolRegistry) -> Self {
    Self {
      llm,
      registry,
      max_iterations: DEFAULT_MAX_ITERATIONS,
    }
  }

  pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
    self.max_iterations = max_iterations;
    self
  }

  pub fn registry(&self) -> &ToolRegistry {
    &self.registry
  }
}

#[async_trait]
impl Agent for Orchestrator {
  #[instrument(skip_all, fields(model = %self.llm.model()))]
  async fn run(&self, prompt: &str) -> Result<String, OrchestratorError> {
    let tools = self.registry.definitions();
    let mut messages = vec![
      Message::system(prompt::system_instruction()),
      Message::user(prompt::task(prompt)),
    ];

    for iteration in 1..=self.max_iterations {
      debug!(iteration, max = self.max_iterations, "Requesting model turn");
      let response = self.llm.chat(&messages, &tools).await?;

      if !response.has_tool_calls() {
        return match response.content {
          Some(answer) if !answer.trim().is_empty() => {
            info!(iterations = iteration, chars = answer.len(), "Agent finished");
            Ok(answer)
          }
          _ => Err(OrchestratorError::EmptyResponse),
        };
      }

      messages.push(Message::assistant_with_tools(
        response.content.unwrap_or_default(),
        response.tool_calls.clone(),
      ));

      for call in &response.tool_calls {
        let outcome = self.registry.call(&call.name, call.arguments.clone()).await;
        match outcome.kind() {
          None => debug!(tool = %call.name, "Tool succeeded"),
          Some(kind) => debug!(tool = %call.name, ?kind, "Tool reported a failure"),
        }
        messages.push(Message::tool_result(&call.name, outcome.into_text()));
      }
    }

    Err(OrchestratorError::MaxIterations(self.max_iterations))
  }
}

#[cfg(test)]
mod tests {
  use jira_tools::{NOT_CONFIGURED_MESSAGE, Tracker};
  use serde_json::json;

  use super::*;
  use crate::llm::{LlmResponse, ScriptedLlmClient};
  use crate::message::Role;

  fn orchestrator(llm: Arc<ScriptedLlmClient>) -> Orchestrator {
    Orchestrator::new(llm, ToolRegistry::new(Tracker::unavailable()))
  }

  #[tokio::test]
  async fn test_plain_answer_ends_the_loop() {
    let llm = Arc::new(ScriptedLlmClient::new(vec![LlmResponse::text("Nothing to do.")]));
    let answer = orchestrator(llm.clone()).run("hello").await.unwrap();
    assert_eq!(answer, "Nothing to do.");

    let conversations = llm.conversations().await;
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0][0].role, Role::System);
    assert!(conversations[0][1].content.starts_with("hello"));
  }

  #[tokio::test]
  async fn test_tool_text_is_fed_back_to_the_model() {
    let llm = Arc::new(ScriptedLlmClient::new(vec![
      LlmResponse::tool_call("get_issue_details", json!({"issue_key": "SCRUM-1"})),
      LlmResponse::text("Jira is not configured."),
    ]));
    let answer = orchestrator(llm.clone()).run("What is SCRUM-1?").await.unwrap();
    assert_eq!(answer, "Jira is not configured.");

    let second_turn = &llm.conversations().await[1];
    let tool_message = second_turn.last().unwrap();
    assert_eq!(tool_message.role, Role::Tool);
    assert_eq!(tool_message.tool_name.as_deref(), Some("get_issue_details"));
    assert_eq!(tool_message.content, NOT_CONFIGURED_MESSAGE);
  }

  #[tokio::test]
  async fn test_unknown_tool_does_not_abort_the_run() {
    let llm = Arc::new(ScriptedLlmClient::new(vec![
      LlmResponse::tool_call("drop_database", json!({})),
      LlmResponse::text("I cannot do that."),
    ]));
    let answer = orchestrator(llm.clone()).run("drop it").await.unwrap();
    assert_eq!(answer, "I cannot do that.");
    let fed_back = llm.conversations().await[1].last().unwrap().content.clone();
    assert_eq!(fed_back, "Error: Unknown tool 'drop_database'.");
  }

  #[tokio::test]
  async fn test_iteration_cap() {
    let calls = (0..5)
      .map(|_| LlmResponse::tool_call("search_issues", json!({"jql_query": "project = X"})))
      .collect();
    let llm = Arc::new(ScriptedLlmClient::new(calls));
    let err = orchestrator(llm).with_max_iterations(3).run("loop").await.unwrap_err();
    assert!(matches!(err, OrchestratorError::MaxIterations(3)));
  }

  #[tokio::test]
  async fn test_blank_answer_is_an_error() {
    let llm = Arc::new(ScriptedLlmClient::new(vec![LlmResponse::default()]));
    let err = orchestrator(llm).run("hi").await.unwrap_err();
    assert!(matches!(err, OrchestratorError::EmptyResponse));
  }
}
