//! Name-based dispatch of the tools for an LLM agent.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::outcome::{ToolErrorKind, ToolOutcome};
use crate::tracker::Tracker;
use crate::{add_comment, create_issue, fetch_issue, search_issues, transition_issue, validate_project_key};

/// Tool name and JSON schema advertised to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
  pub name: String,
  pub description: String,
  pub parameters: Value,
}

#[derive(Debug, Deserialize)]
struct IssueKeyArgs {
  issue_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
  jql_query: String,
}

#[derive(Debug, Deserialize)]
struct CreateIssueArgs {
  project_key: String,
  summary: String,
  #[serde(default)]
  description: Option<String>,
  #[serde(default)]
  issue_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectKeyArgs {
  project_key: String,
}

#[derive(Debug, Deserialize)]
struct CommentArgs {
  issue_key: String,
  comment_body: String,
}

#[derive(Debug, Deserialize)]
struct TransitionArgs {
  issue_key: String,
  transition_name: String,
}

const TOOL_NAMES: [&str; 6] = [
  "get_issue_details",
  "search_issues",
  "create_issue",
  "validate_project_key",
  "add_comment_to_issue",
  "transition_issue",
];

/// The six Jira tools bound to one tracker handle.
#[derive(Clone)]
pub struct ToolRegistry {
  tracker: Tracker,
}

impl ToolRegistry {
  pub fn new(tracker: Tracker) -> Self {
    Self { tracker }
  }

  pub fn tracker(&self) -> &Tracker {
    &self.tracker
  }

  /// Definitions of every registered tool.
  pub fn definitions(&self) -> Vec<ToolDefinition> {
    vec![
      definition(
        "get_issue_details",
        "Retrieves the details of a specific Jira issue. The input must be a valid Jira issue key, like 'PROJ-123'. \
         Returns the issue's summary, status, and assignee.",
        json!({
            "type": "object",
            "properties": {
                "issue_key": {"type": "string", "description": "Jira issue key, e.g. 'PROJ-123'"}
            },
            "required": ["issue_key"]
        }),
      ),
      definition(
        "search_issues",
        "Searches for Jira issues using a JQL (Jira Query Language) query, for example \
         'project = \"PROJ\" AND status = \"To Do\" ORDER BY created DESC'. Returns at most 10 issue keys with \
         their summaries, or an error message.",
        json!({
            "type": "object",
            "properties": {
                "jql_query": {"type": "string", "description": "A valid JQL query"}
            },
            "required": ["jql_query"]
        }),
      ),
      definition(
        "create_issue",
        "Creates a new Jira issue in the given project. The issue type defaults to 'Task'. Returns the key of the \
         newly created issue, or an error listing the valid issue types if the type was rejected.",
        json!({
            "type": "object",
            "properties": {
                "project_key": {"type": "string", "description": "Project key, e.g. 'PROJ'"},
                "summary": {"type": "string", "description": "One-line summary of the issue"},
                "description": {"type": "string", "description": "Longer description of the issue"},
                "issue_type": {"type": "string", "description": "Issue type name, e.g. 'Task', 'Bug', 'Story'"}
            },
            "required": ["project_key", "summary"]
        }),
      ),
      definition(
        "validate_project_key",
        "Validates that a Jira project key exists and is accessible. Use this before creating an issue whenever \
         there is any uncertainty about the project key.",
        json!({
            "type": "object",
            "properties": {
                "project_key": {"type": "string", "description": "Project key, e.g. 'PROJ'"}
            },
            "required": ["project_key"]
        }),
      ),
      definition(
        "add_comment_to_issue",
        "Adds a comment to a specific Jira issue. Returns a confirmation message or an error message.",
        json!({
            "type": "object",
            "properties": {
                "issue_key": {"type": "string", "description": "Jira issue key, e.g. 'PROJ-123'"},
                "comment_body": {"type": "string", "description": "Text of the comment"}
            },
            "required": ["issue_key", "comment_body"]
        }),
      ),
      definition(
        "transition_issue",
        "Transitions a Jira issue to a new status by workflow transition name, such as 'Done', 'In Progress' or \
         'To Do'. If the name does not match, the available transitions are listed.",
        json!({
            "type": "object",
            "properties": {
                "issue_key": {"type": "string", "description": "Jira issue key, e.g. 'PROJ-123'"},
                "transition_name": {"type": "string", "description": "Name of the workflow transition"}
            },
            "required": ["issue_key", "transition_name"]
        }),
      ),
    ]
  }

  /// Run a tool by name. Unknown names and bad arguments become
  /// [`ToolErrorKind::InvalidInput`] outcomes. A known tool on an unset
  /// tracker answers with the not-configured message before its arguments
  /// are looked at.
  #[instrument(skip(self, args))]
  pub async fn call(&self, name: &str, args: Value) -> ToolOutcome {
    debug!(%args, "Calling tool");
    let tracker = &self.tracker;
    if TOOL_NAMES.contains(&name)
      && let Err(outcome) = tracker.client()
    {
      return outcome;
    }
    match name {
      "get_issue_details" => match decode::<IssueKeyArgs>(name, args) {
        Ok(a) => fetch_issue(tracker, &a.issue_key).await,
        Err(outcome) => outcome,
      },
      "search_issues" => match decode::<SearchArgs>(name, args) {
        Ok(a) => search_issues(tracker, &a.jql_query).await,
        Err(outcome) => outcome,
      },
      "create_issue" => match decode::<CreateIssueArgs>(name, args) {
        Ok(a) => {
          create_issue(
            tracker,
            &a.project_key,
            &a.summary,
            a.description.as_deref().unwrap_or_default(),
            a.issue_type.as_deref(),
          )
          .await
        }
        Err(outcome) => outcome,
      },
      "validate_project_key" => match decode::<ProjectKeyArgs>(name, args) {
        Ok(a) => validate_project_key(tracker, &a.project_key).await,
        Err(outcome) => outcome,
      },
      "add_comment_to_issue" => match decode::<CommentArgs>(name, args) {
        Ok(a) => add_comment(tracker, &a.issue_key, &a.comment_body).await,
        Err(outcome) => outcome,
      },
      "transition_issue" => match decode::<TransitionArgs>(name, args) {
        Ok(a) => transition_issue(tracker, &a.issue_key, &a.transition_name).await,
        Err(outcome) => outcome,
      },
      _ => ToolOutcome::err(ToolErrorKind::InvalidInput, format!("Error: Unknown tool '{name}'.")),
    }
  }
}

fn definition(name: &str, description: &str, parameters: Value) -> ToolDefinition {
  ToolDefinition {
    name: name.to_string(),
    description: description.to_string(),
    parameters,
  }
}

fn decode<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolOutcome> {
  let args = if args.is_null() { json!({}) } else { args };
  serde_json::from_value(args).map_err(|e| {
    ToolOutcome::err(
      ToolErrorKind::InvalidInput,
      format!("Error: Invalid arguments for tool '{tool}': {e}"),
    )
  })
}
