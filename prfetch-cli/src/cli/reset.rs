//! # Reset Command

use std::path::Path;

use anyhow::Result;
use clap::Args;
use prfetch_core::output::format_path;
use prfetch_core::{Platform, print_success};

use super::{load_config, store_for};

/// Command for truncating the CSV tables
#[derive(Args, Debug)]
pub struct ResetArgs {
  /// Platform whose header row is written
  #[arg(long, short = 'p', value_enum)]
  pub platform: Platform,
}

pub(crate) fn handle_reset_command(args: ResetArgs, config_path: Option<&Path>) -> Result<()> {
  let config = load_config(config_path)?;
  let store = store_for(&config);
  store.reset(args.platform)?;

  print_success(&format!(
    "Reset {} and {}",
    format_path(store.pull_requests_path()),
    format_path(store.diffs_path())
  ));
  Ok(())
}
