//! Conversation messages exchanged with the model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  System,
  User,
  Assistant,
  Tool,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
  pub name: String,
  pub arguments: Value,
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
  pub role: Role,
  pub content: String,

  /// Tool that produced this message, for [`Role::Tool`].
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tool_name: Option<String>,

  /// Tools the assistant asked for in this turn.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tool_calls: Vec<ToolCallRequest>,
}

impl Message {
  fn plain(role: Role, content: impl Into<String>) -> Self {
    Self {
      role,
      content: content.into(),
      tool_name: None,
      tool_calls: Vec::new(),
    }
  }

  pub fn system(content: impl Into<String>) -> Self {
    Self::plain(Role::System, content)
  }

  pub fn user(content: impl Into<String>) -> Self {
    Self::plain(Role::User, content)
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    Self::plain(Role::Assistant, content)
  }

  pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
    Self {
      tool_calls,
      ..Self::plain(Role::Assistant, content)
    }
  }

  /// Text a tool returned, attributed to the tool by name.
  pub fn tool_result(tool_name: &str, content: impl Into<String>) -> Self {
    Self {
      tool_name: Some(tool_name.to_string()),
      ..Self::plain(Role::Tool, content)
    }
  }
}
