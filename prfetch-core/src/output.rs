//! # Output Formatting
//!
//! Colored, emoji-prefixed status lines and small formatting helpers for the
//! summaries prfetch prints after a fetch.

use std::path::Path;

use owo_colors::OwoColorize;
use {clap, emojis};

use crate::platform::Platform;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

/// Print a warning message to stderr so it never mixes with piped output
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  eprintln!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Format a file path
pub fn format_path(path: &Path) -> String {
  path.display().bright_green().to_string()
}

/// Format a platform name
pub fn format_platform(platform: Platform) -> String {
  platform.display_name().bright_cyan().bold().to_string()
}

/// Format a record count with the right plural
pub fn format_count(count: usize, noun: &str) -> String {
  let plural = if count == 1 { "" } else { "s" };
  format!("{} {noun}{plural}", count.yellow())
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  cmd.purple().to_string()
}
