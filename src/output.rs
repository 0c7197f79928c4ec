//! # Output Formatting
//!
//! Colored helpers for user-facing terminal output. Colors are dropped when
//! the stream is not a terminal.

use owo_colors::{OwoColorize, Stream};

/// Print a success message
pub fn print_success(message: &str) {
  println!("{} {}", "✓".if_supports_color(Stream::Stdout, |t| t.green()), message);
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
  eprintln!("{} {}", "✗".if_supports_color(Stream::Stderr, |t| t.red()), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  println!("{} {}", "⚠".if_supports_color(Stream::Stdout, |t| t.yellow()), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  println!("{} {}", "ℹ".if_supports_color(Stream::Stdout, |t| t.blue()), message);
}

/// Format an issue, project or tool key
pub fn format_key(key: &str) -> String {
  key.if_supports_color(Stream::Stdout, |t| t.bright_cyan()).to_string()
}
