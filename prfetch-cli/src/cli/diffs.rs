//! # Diffs Command
//!
//! Downloads the diffs linked from the stored pull request table.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Args;
use prfetch_api::FetchSession;
use prfetch_api::auth::create_runtime_and_client;
use prfetch_core::output::{format_count, format_path};
use prfetch_core::{Platform, print_success, print_warning};

use super::{AuthArgs, home_dir, load_config, store_for};
use crate::orchestrator::{resolve_credentials, resolve_platform};
use crate::progress;
use crate::prompter::DialoguerPrompter;

/// Command for downloading diffs
#[derive(Args, Debug)]
pub struct DiffsArgs {
  /// Platform the pull request table was fetched from
  #[arg(long, short = 'p', value_enum)]
  pub platform: Option<Platform>,

  #[command(flatten)]
  pub auth: AuthArgs,

  /// Read pull requests from this CSV file
  #[arg(long, short = 'i', value_name = "PATH")]
  pub input: Option<PathBuf>,

  /// Write diffs to this CSV file
  #[arg(long, short = 'o', value_name = "PATH")]
  pub output: Option<PathBuf>,
}

pub(crate) fn handle_diffs_command(args: DiffsArgs, config_path: Option<&Path>) -> Result<()> {
  let mut config = load_config(config_path)?;
  if let Some(input) = args.input {
    config.output.pull_requests = input;
  }
  if let Some(output) = args.output {
    config.output.diffs = output;
  }

  let mut prompter = DialoguerPrompter;
  let platform = resolve_platform(args.platform, &mut prompter)?;
  if !platform.has_extended_columns() {
    bail!("{platform} pull request tables have no Links column to read diffs from");
  }

  let store = store_for(&config);
  let total = store.read_links()?.len();

  let home = home_dir()?;
  let credential = resolve_credentials(platform, &args.auth.into(), &home, &mut prompter)?;
  let mut session = FetchSession::new(platform, config.endpoints.base_url(platform));
  session.bind_auth(credential)?;

  let (rt, client) = create_runtime_and_client()?;
  let bar = progress::diff_bar(total);
  let summary = rt.block_on(client.collect_diffs(&session, &store, |id| {
    bar.set_message(format!("#{id}"));
    bar.inc(1);
  }));
  bar.finish_and_clear();
  let summary = summary?;

  if summary.skipped > 0 {
    print_warning(&format!(
      "Skipped {} without a diff link",
      format_count(summary.skipped, "pull request")
    ));
  }
  print_success(&format!(
    "Stored {} in {}",
    format_count(summary.fetched, "diff"),
    format_path(store.diffs_path())
  ));

  Ok(())
}
