//! # Command Line Interface

use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI command for the Jira agent
#[derive(Parser)]
#[command(name = "jira-agent")]
#[command(about = "Drive Jira from natural-language prompts")]
#[command(
  long_about = "Runs an LLM agent that answers questions about Jira and acts on it through a small set of tools:\n\
        issue lookup, JQL search, issue creation, project validation, comments and transitions.\n\n\
        Jira credentials come from JIRA_SERVER, JIRA_USERNAME and JIRA_API_TOKEN; the model key from GEMINI_API_KEY."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Path to a config.toml (defaults to the platform config directory)
  #[arg(long, global = true, value_name = "FILE")]
  pub config: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
  /// Run the HTTP server and web UI
  Serve {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
  },

  /// Answer a single prompt and exit
  Ask {
    /// The request, e.g. "What is the status of SCRUM-12?"
    prompt: String,
  },

  /// Run one tool directly, without the language model
  Tool {
    /// Tool name, see `jira-agent tools`
    name: String,

    /// Tool arguments as a JSON object
    #[arg(long, value_name = "JSON")]
    args: Option<String>,
  },

  /// List the Jira projects visible to the configured user
  Projects,

  /// List the tools available to the agent
  Tools,
}
