//! # Shell Completion
//!
//! Generates shell completion scripts so prfetch's commands, flags and
//! platform names complete with tab.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::Cli;

/// Write the completion script for `shell` to stdout
pub fn generate_completions(shell: clap_complete::Shell) -> Result<()> {
  let mut cmd = Cli::command();
  let app_name = cmd.get_name().to_string();

  generate(shell, &mut cmd, app_name, &mut io::stdout());

  Ok(())
}
