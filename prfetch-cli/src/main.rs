//! # prfetch CLI Entry Point
//!
//! Parses arguments, sets up tracing from the `-v` count, and dispatches to
//! the command handlers.

use anyhow::Result;
use clap::Parser;
use prfetch_cli::cli::{Cli, handle_cli};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
  let cmd = Cli::parse();

  let level = match cmd.verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: info, warnings, and errors
    2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  handle_cli(cmd)
}
