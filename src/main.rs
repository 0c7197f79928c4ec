//! # Jira Agent Entry Point
//!
//! Loads configuration, connects to Jira and dispatches the subcommand.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use jira_orchestrator::{Agent, GeminiClient, Orchestrator, OrchestratorError};
use jira_server::AppState;
use jira_tools::{NOT_CONFIGURED_MESSAGE, ToolRegistry, Tracker};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Cli, Commands};
use crate::config::AgentConfig;
use crate::output::{format_key, print_error, print_info, print_success, print_warning};

mod cli;
mod config;
mod output;

#[tokio::main]
async fn main() -> Result<ExitCode> {
  let cmd = Cli::parse();

  let level = match cmd.verbose {
    0 => tracing::Level::WARN,
    1 => tracing::Level::INFO,
    2 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  // Logs go to stderr; stdout carries command output.
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  let config = AgentConfig::load(cmd.config.as_deref())?;
  run(cmd.command, config).await
}

fn build_agent(config: &AgentConfig, tracker: Tracker) -> Option<Arc<dyn Agent>> {
  let llm = config.llm.as_ref()?;
  let gemini = GeminiClient::new(&llm.api_key, &llm.model).with_base_url(&llm.api_base);
  Some(Arc::new(Orchestrator::new(Arc::new(gemini), ToolRegistry::new(tracker))))
}

async fn run(command: Commands, config: AgentConfig) -> Result<ExitCode> {
  match command {
    Commands::Serve { host, port } => {
      let config = config.with_server_overrides(host, port);
      let tracker = Tracker::connect(config.jira.clone()).await;
      let agent = build_agent(&config, tracker.clone());
      let state = AppState::new(tracker, agent, config.browse_url.as_deref());
      print_info(&format!("Serving on http://{}", config.server.addr()));
      jira_server::run(&config.server, Arc::new(state)).await?;
      Ok(ExitCode::SUCCESS)
    }

    Commands::Ask { prompt } => {
      let tracker = Tracker::connect(config.jira.clone()).await;
      let Some(agent) = build_agent(&config, tracker) else {
        print_error(&OrchestratorError::NotConfigured.to_string());
        return Ok(ExitCode::FAILURE);
      };
      match agent.run(&prompt).await {
        Ok(answer) => {
          println!("{answer}");
          Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
          print_error(&e.to_string());
          Ok(ExitCode::FAILURE)
        }
      }
    }

    Commands::Tool { name, args } => {
      let args: Value = match args {
        Some(raw) => serde_json::from_str(&raw).context("--args must be a JSON object")?,
        None => Value::Object(Default::default()),
      };
      let registry = ToolRegistry::new(Tracker::connect(config.jira.clone()).await);
      let outcome = registry.call(&name, args).await;
      if outcome.is_ok() {
        println!("{outcome}");
        Ok(ExitCode::SUCCESS)
      } else {
        print_error(outcome.text());
        Ok(ExitCode::FAILURE)
      }
    }

    Commands::Projects => {
      let tracker = Tracker::connect(config.jira.clone()).await;
      match jira_tools::project_list(&tracker).await {
        Ok(projects) if projects.is_empty() => {
          print_info("No projects are visible to this user.");
          Ok(ExitCode::SUCCESS)
        }
        Ok(projects) => {
          for project in projects {
            println!("{} - {}", format_key(&project.key), project.name);
          }
          Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
          print_error(&failure.message);
          Ok(ExitCode::FAILURE)
        }
      }
    }

    Commands::Tools => {
      let registry = ToolRegistry::new(Tracker::unavailable());
      for definition in registry.definitions() {
        println!("{}", format_key(&definition.name));
        println!("    {}", definition.description);
      }
      if config.jira.is_none() {
        print_warning(NOT_CONFIGURED_MESSAGE);
      } else {
        print_success("Jira credentials are configured.");
      }
      Ok(ExitCode::SUCCESS)
    }
  }
}
