use thiserror::Error;

/// Failure of a prompt run.
#[derive(Debug, Error)]
pub enum OrchestratorError {
  #[error("The language model is not configured. Set GEMINI_API_KEY to enable the agent.")]
  NotConfigured,

  /// The model provider rejected the request or answered with something unusable.
  #[error("LLM error: {0}")]
  Llm(String),

  #[error("Failed to reach the language model: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Agent did not finish within {0} iterations")]
  MaxIterations(usize),

  #[error("The language model returned an empty response")]
  EmptyResponse,
}
