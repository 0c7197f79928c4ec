//! Model provider abstraction.

use std::collections::VecDeque;

use async_trait::async_trait;
use jira_tools::ToolDefinition;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::OrchestratorError;
use crate::message::{Message, ToolCallRequest};

/// One model turn: optional text plus any tool calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmResponse {
  pub content: Option<String>,
  pub tool_calls: Vec<ToolCallRequest>,
}

impl LlmResponse {
  pub fn text(content: impl Into<String>) -> Self {
    Self {
      content: Some(content.into()),
      tool_calls: Vec::new(),
    }
  }

  pub fn tool_call(name: &str, arguments: Value) -> Self {
    Self {
      content: None,
      tool_calls: vec![ToolCallRequest {
        name: name.to_string(),
        arguments,
      }],
    }
  }

  pub fn has_tool_calls(&self) -> bool {
    !self.tool_calls.is_empty()
  }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
  async fn chat(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<LlmResponse, OrchestratorError>;

  fn model(&self) -> &str;
}

/// Replays canned responses in order and records every conversation it saw.
#[derive(Default)]
pub struct ScriptedLlmClient {
  responses: Mutex<VecDeque<LlmResponse>>,
  seen: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedLlmClient {
  pub fn new(responses: Vec<LlmResponse>) -> Self {
    Self {
      responses: Mutex::new(responses.into()),
      seen: Mutex::new(Vec::new()),
    }
  }

  /// Conversations passed to [`LlmClient::chat`], oldest first.
  pub async fn conversations(&self) -> Vec<Vec<Message>> {
    self.seen.lock().await.clone()
  }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
  async fn chat(&self, messages: &[Message], _tools: &[ToolDefinition]) -> Result<LlmResponse, OrchestratorError> {
    self.seen.lock().await.push(messages.to_vec());
    self
      .responses
      .lock()
      .await
      .pop_front()
      .ok_or_else(|| OrchestratorError::Llm("No more scripted responses".to_string()))
  }

  fn model(&self) -> &str {
    "scripted"
  }
}
