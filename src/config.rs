//! # Configuration
//!
//! Settings are resolved once at startup from, in increasing priority:
//! built-in defaults, an optional `config.toml`, environment variables, and
//! command-line flags. A `.env` file in the working directory feeds the
//! environment layer without overriding variables that are already set.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use jira_orchestrator::{DEFAULT_API_BASE, DEFAULT_MODEL};
use jira_server::ServerConfig;
use jira_tools::TrackerCredentials;
use serde::Deserialize;
use tracing::debug;

pub const ENV_JIRA_SERVER: &str = "JIRA_SERVER";
pub const ENV_JIRA_USERNAME: &str = "JIRA_USERNAME";
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
pub const ENV_JIRA_BROWSE_URL: &str = "JIRA_BROWSE_URL";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_API_BASE: &str = "GEMINI_API_BASE";
pub const ENV_MODEL: &str = "JIRA_AGENT_MODEL";
pub const ENV_HOST: &str = "JIRA_AGENT_HOST";
pub const ENV_PORT: &str = "JIRA_AGENT_PORT";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
  jira: JiraSection,
  llm: LlmSection,
  server: ServerSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct JiraSection {
  server: Option<String>,
  username: Option<String>,
  api_token: Option<String>,
  browse_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LlmSection {
  api_key: Option<String>,
  model: Option<String>,
  api_base: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServerSection {
  host: Option<String>,
  port: Option<u16>,
}

/// Language model settings; present only when an API key is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
  pub api_key: String,
  pub model: String,
  pub api_base: String,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct AgentConfig {
  /// `None` unless server, username and token are all set.
  pub jira: Option<TrackerCredentials>,
  pub browse_url: Option<String>,
  pub llm: Option<LlmSettings>,
  pub server: ServerConfig,
}

/// Default location of `config.toml` in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
  ProjectDirs::from("", "", "jira-agent").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl AgentConfig {
  /// Resolve from the process environment and `path` (or the default location).
  pub fn load(path: Option<&Path>) -> Result<Self> {
    if let Ok(dotenv_path) = dotenv::dotenv() {
      debug!(path = %dotenv_path.display(), "Loaded .env file");
    }
    let path = path.map(Path::to_path_buf).or_else(default_config_path);
    Self::from_sources(path.as_deref(), |key| std::env::var(key).ok())
  }

  /// Resolve from a config file and an environment lookup. A missing file is
  /// treated as empty.
  pub fn from_sources(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let file = match path {
      Some(path) if path.exists() => {
        let content =
          fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config file");
        toml::from_str::<FileConfig>(&content)
          .with_context(|| format!("Failed to parse config from {}", path.display()))?
      }
      _ => FileConfig::default(),
    };

    // Blank environment values count as unset.
    let env = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let server = env(ENV_JIRA_SERVER).or(file.jira.server);
    let username = env(ENV_JIRA_USERNAME).or(file.jira.username);
    let api_token = env(ENV_JIRA_API_TOKEN).or(file.jira.api_token);
    let jira = match (server, username, api_token) {
      (Some(server), Some(username), Some(api_token)) => Some(TrackerCredentials {
        server,
        username,
        api_token,
      }),
      (server, username, api_token) => {
        debug!(
          server = server.is_some(),
          username = username.is_some(),
          api_token = api_token.is_some(),
          "Jira credentials incomplete"
        );
        None
      }
    };

    let llm = env(ENV_GEMINI_API_KEY).or(file.llm.api_key).map(|api_key| LlmSettings {
      api_key,
      model: env(ENV_MODEL)
        .or(file.llm.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
      api_base: env(ENV_GEMINI_API_BASE)
        .or(file.llm.api_base)
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
    });

    let mut server_config = ServerConfig::default();
    if let Some(host) = env(ENV_HOST).or(file.server.host) {
      server_config.host = host;
    }
    if let Some(port) = env(ENV_PORT) {
      server_config.port = port
        .parse()
        .with_context(|| format!("{ENV_PORT} must be a port number, got '{port}'"))?;
    } else if let Some(port) = file.server.port {
      server_config.port = port;
    }

    Ok(Self {
      jira,
      browse_url: env(ENV_JIRA_BROWSE_URL).or(file.jira.browse_url),
      llm,
      server: server_config,
    })
  }

  /// Apply `--host` / `--port` from the command line.
  pub fn with_server_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
    if let Some(host) = host {
      self.server.host = host;
    }
    if let Some(port) = port {
      self.server.port = port;
    }
    self
  }
}
