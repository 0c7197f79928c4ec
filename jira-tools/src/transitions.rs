//! Workflow transition tool.

use jira_client::{JiraClient, JiraError, JiraTransition};
use tracing::debug;

use crate::outcome::{ToolErrorKind, ToolOutcome, required};
use crate::tracker::Tracker;

/// Find a transition by name, ignoring case.
pub(crate) fn find_transition<'a>(transitions: &'a [JiraTransition], name: &str) -> Option<&'a JiraTransition> {
  let wanted = name.to_lowercase();
  transitions.iter().find(|t| t.name.to_lowercase() == wanted)
}

/// Move an issue through its workflow by transition name.
///
/// Unknown names are answered with the list of transitions available for the
/// issue so the caller can retry with a valid one.
pub async fn transition_issue(tracker: &Tracker, issue_key: &str, transition_name: &str) -> ToolOutcome {
  let client = match tracker.client() {
    Ok(c) => c,
    Err(outcome) => return outcome,
  };
  let issue_key = match required("issue_key", issue_key) {
    Ok(k) => k,
    Err(failure) => return failure.into(),
  };
  let transition_name = match required("transition_name", transition_name) {
    Ok(n) => n,
    Err(failure) => return failure.into(),
  };

  match run_transition(client, issue_key, transition_name).await {
    Ok(outcome) => outcome,
    Err(e @ JiraError::Api { .. }) => ToolOutcome::err(
      ToolErrorKind::of(&e),
      format!(
        "Error transitioning issue '{issue_key}' with transition '{transition_name}': {}",
        e.text()
      ),
    ),
    Err(e) => ToolOutcome::err(
      ToolErrorKind::Unexpected,
      format!("An unexpected error occurred while transitioning issue '{issue_key}': {e}"),
    ),
  }
}

async fn run_transition(
  client: &JiraClient,
  issue_key: &str,
  transition_name: &str,
) -> Result<ToolOutcome, JiraError> {
  let issue = client.get_issue(issue_key).await?;
  let transitions = client.get_transitions(&issue.key).await?;

  let Some(transition) = find_transition(&transitions, transition_name) else {
    let available: Vec<&str> = transitions.iter().map(|t| t.name.as_str()).collect();
    return Ok(ToolOutcome::err(
      ToolErrorKind::Validation,
      format!(
        "Error: Transition '{transition_name}' not found for issue '{issue_key}'. Available transitions are: {}.",
        available.join(", ")
      ),
    ));
  };

  debug!(issue = %issue.key, transition = %transition.name, id = %transition.id, "Applying transition");
  client.transition_issue(&issue.key, &transition.id).await?;

  let updated = client.get_issue(issue_key).await?;
  Ok(ToolOutcome::ok(format!(
    "Successfully transitioned issue '{issue_key}' to status '{}' using transition '{transition_name}'.",
    updated.fields.status.name
  )))
}
