//! Gemini `generateContent` client.

use async_trait::async_trait;
use jira_tools::ToolDefinition;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::OrchestratorError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::{Message, Role, ToolCallRequest};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

const TEMPERATURE: f64 = 0.1;

#[derive(Clone)]
pub struct GeminiClient {
  api_key: String,
  model: String,
  base_url: String,
  client: Client,
}

impl GeminiClient {
  pub fn new(api_key: &str, model: &str) -> Self {
    Self {
      api_key: api_key.to_string(),
      model: model.to_string(),
      base_url: DEFAULT_API_BASE.to_string(),
      client: Client::new(),
    }
  }

  /// Point the client at another API root, e.g. a proxy or a mock server.
  pub fn with_base_url(mut self, base_url: &str) -> Self {
    self.base_url = base_url.trim_end_matches('/').to_string();
    self
  }

  fn endpoint(&self) -> String {
    format!("{}/{}:generateContent", self.base_url, self.model)
  }

  fn request_body(&self, messages: &[Message], tools: &[ToolDefinition]) -> Value {
    let mut request = json!({
        "contents": convert_messages(messages),
        "generationConfig": {"temperature": TEMPERATURE}
    });

    let system: Vec<&str> = messages
      .iter()
      .filter(|m| m.role == Role::System)
      .map(|m| m.content.as_str())
      .collect();
    if !system.is_empty() {
      request["systemInstruction"] = json!({"parts": [{"text": system.join("\n\n")}]});
    }

    if !tools.is_empty() {
      let declarations: Vec<Value> = tools
        .iter()
        .map(|t| json!({"name": t.name, "description": t.description, "parameters": t.parameters}))
        .collect();
      request["tools"] = json!([{"functionDeclarations": declarations}]);
    }

    request
  }
}

/// Map the conversation onto Gemini `contents`.
///
/// Consecutive tool results are merged into one `function` turn so that each
/// model turn with several calls is answered by a single turn.
fn convert_messages(messages: &[Message]) -> Vec<Value> {
  let mut contents: Vec<Value> = Vec::new();
  let mut pending_results: Vec<Value> = Vec::new();

  for message in messages {
    if message.role != Role::Tool && !pending_results.is_empty() {
      contents.push(json!({"role": "function", "parts": std::mem::take(&mut pending_results)}));
    }

    match message.role {
      Role::System => {}
      Role::User => contents.push(json!({"role": "user", "parts": [{"text": message.content}]})),
      Role::Assistant => {
        let mut parts = Vec::new();
        if !message.content.is_empty() {
          parts.push(json!({"text": message.content}));
        }
        for call in &message.tool_calls {
          parts.push(json!({"functionCall": {"name": call.name, "args": call.arguments}}));
        }
        contents.push(json!({"role": "model", "parts": parts}));
      }
      Role::Tool => pending_results.push(json!({
          "functionResponse": {
              "name": message.tool_name.as_deref().unwrap_or("unknown"),
              "response": {"result": message.content}
          }
      })),
    }
  }

  if !pending_results.is_empty() {
    contents.push(json!({"role": "function", "parts": pending_results}));
  }
  contents
}

fn parse_response(response: GeminiResponse) -> Result<LlmResponse, OrchestratorError> {
  let Some(candidate) = response.candidates.into_iter().next() else {
    let reason = response
      .prompt_feedback
      .and_then(|f| f.block_reason)
      .unwrap_or_else(|| "no candidates".to_string());
    return Err(OrchestratorError::Llm(format!("Gemini returned no answer ({reason})")));
  };

  let mut texts = Vec::new();
  let mut tool_calls = Vec::new();
  for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
    if let Some(text) = part.text {
      texts.push(text);
    }
    if let Some(call) = part.function_call {
      tool_calls.push(ToolCallRequest {
        name: call.name,
        arguments: call.args,
      });
    }
  }

  Ok(LlmResponse {
    content: (!texts.is_empty()).then(|| texts.concat()),
    tool_calls,
  })
}

#[async_trait]
impl LlmClient for GeminiClient {
  async fn chat(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<LlmResponse, OrchestratorError> {
    let body = self.request_body(messages, tools);
    debug!(model = %self.model, messages = messages.len(), tools = tools.len(), "Calling Gemini");

    let response = self
      .client
      .post(self.endpoint())
      .query(&[("key", self.api_key.as_str())])
      .json(&body)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let text = response.text().await.unwrap_or_default();
      return Err(OrchestratorError::Llm(format!(
        "Gemini API error ({}): {text}",
        status.as_u16()
      )));
    }

    let text = response.text().await?;
    let parsed: GeminiResponse = serde_json::from_str(&text)
      .map_err(|e| OrchestratorError::Llm(format!("Failed to parse Gemini response: {e}")))?;
    parse_response(parsed)
  }

  fn model(&self) -> &str {
    &self.model
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
  #[serde(default)]
  prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
  #[serde(default)]
  block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  #[serde(default)]
  content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
  #[serde(default)]
  text: Option<String>,
  #[serde(default)]
  function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
  name: String,
  #[serde(default)]
  args: Value,
}

#[cfg(test)]
mod tests {
  use jira_tools::{ToolRegistry, Tracker};
  use wiremock::matchers::{body_partial_json, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new("secret-key", "gemini-test").with_base_url(&format!("{}/v1beta/models/", server.uri()))
  }

  #[test]
  fn test_tool_results_are_grouped_after_model_turn() {
    let messages = vec![
      Message::system("persona"),
      Message::user("hi"),
      Message::assistant_with_tools(
        "",
        vec![
          ToolCallRequest {
            name: "get_issue_details".to_string(),
            arguments: json!({"issue_key": "A-1"}),
          },
          ToolCallRequest {
            name: "get_issue_details".to_string(),
            arguments: json!({"issue_key": "A-2"}),
          },
        ],
      ),
      Message::tool_result("get_issue_details", "first"),
      Message::tool_result("get_issue_details", "second"),
      Message::assistant("done"),
    ];

    let contents = convert_messages(&messages);
    let roles: Vec<&str> = contents.iter().map(|c| c["role"].as_str().unwrap()).collect();
    assert_eq!(roles, ["user", "model", "function", "model"]);
    assert_eq!(contents[1]["parts"].as_array().unwrap().len(), 2);
    assert_eq!(contents[2]["parts"][1]["functionResponse"]["response"]["result"], "second");
  }

  #[tokio::test]
  async fn test_chat_sends_persona_tools_and_temperature() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/v1beta/models/gemini-test:generateContent"))
      .and(query_param("key", "secret-key"))
      .and(body_partial_json(json!({
          "systemInstruction": {"parts": [{"text": "persona"}]},
          "generationConfig": {"temperature": 0.1}
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "candidates": [{"content": {"role": "model", "parts": [{"text": "Hello"}]}}]
      })))
      .expect(1)
      .mount(&server)
      .await;

    let tools = ToolRegistry::new(Tracker::unavailable()).definitions();
    let response = client_for(&server)
      .chat(&[Message::system("persona"), Message::user("hi")], &tools)
      .await?;
    assert_eq!(response, LlmResponse::text("Hello"));

    let requests = server.received_requests().await.unwrap_or_default();
    let body: Value = serde_json::from_slice(&requests[0].body)?;
    let declarations = body["tools"][0]["functionDeclarations"].as_array().unwrap();
    assert_eq!(declarations.len(), 6);
    Ok(())
  }

  #[tokio::test]
  async fn test_chat_parses_function_calls() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "candidates": [{"content": {"role": "model", "parts": [
              {"functionCall": {"name": "search_issues", "args": {"jql_query": "project = SCRUM"}}}
          ]}}]
      })))
      .mount(&server)
      .await;

    let response = client_for(&server).chat(&[Message::user("find")], &[]).await?;
    assert_eq!(
      response,
      LlmResponse::tool_call("search_issues", json!({"jql_query": "project = SCRUM"}))
    );
    Ok(())
  }

  #[tokio::test]
  async fn test_api_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
      .mount(&server)
      .await;

    let err = client_for(&server).chat(&[Message::user("x")], &[]).await.unwrap_err();
    assert_eq!(err.to_string(), "LLM error: Gemini API error (403): API key not valid");
  }

  #[tokio::test]
  async fn test_blocked_prompt_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "promptFeedback": {"blockReason": "SAFETY"}
      })))
      .mount(&server)
      .await;

    let err = client_for(&server).chat(&[Message::user("x")], &[]).await.unwrap_err();
    assert!(err.to_string().contains("SAFETY"));
  }
}
