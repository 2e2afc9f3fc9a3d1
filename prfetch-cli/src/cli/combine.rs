//! # Combine Command
//!
//! Joins the pull request table with the diff table on `ID`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use prfetch_core::output::{format_count, format_path};
use prfetch_core::print_success;

use super::{load_config, store_for};

/// Command for joining pull requests with diffs
#[derive(Args, Debug)]
pub struct CombineArgs {
  /// Write the joined table to this CSV file
  #[arg(long, short = 'o', value_name = "PATH")]
  pub output: Option<PathBuf>,
}

pub(crate) fn handle_combine_command(args: CombineArgs, config_path: Option<&Path>) -> Result<()> {
  let config = load_config(config_path)?;
  let output = args.output.unwrap_or_else(|| config.output.combined.clone());

  let written = store_for(&config).combine(&output)?;
  print_success(&format!(
    "Combined {} into {}",
    format_count(written, "row"),
    format_path(&output)
  ));

  Ok(())
}
