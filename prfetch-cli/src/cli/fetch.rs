//! # Fetch Command
//!
//! Flags for `prfetch fetch`. Every interactive question has a flag; anything
//! left out is prompted for.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use prfetch_api::auth::create_runtime_and_client;
use prfetch_core::{Platform, RepositoryRef};
use tracing::debug;

use super::{AuthArgs, home_dir, load_config, store_for};
use crate::orchestrator::{FetchOptions, LimitOverride, execute_plan, print_report, resolve_plan};
use crate::prompter::DialoguerPrompter;

/// Command for fetching pull requests
#[derive(Args, Debug)]
pub struct FetchArgs {
  /// Platform hosting the repository
  #[arg(long, short = 'p', value_enum)]
  pub platform: Option<Platform>,

  /// Truncate the CSV tables before storing
  #[arg(long, conflicts_with = "append")]
  pub overwrite: bool,

  /// Append to the existing CSV table
  #[arg(long)]
  pub append: bool,

  #[command(flatten)]
  pub auth: AuthArgs,

  /// Project ID (GitLab numeric ID or GitHub owner/name)
  #[arg(long, conflicts_with_all = ["url", "owner"])]
  pub project_id: Option<String>,

  /// Repository URL, e.g. https://gitlab.com/group/project.git
  #[arg(long, conflicts_with = "owner")]
  pub url: Option<String>,

  /// Repository owner (user, group or workspace)
  #[arg(long, requires = "name")]
  pub owner: Option<String>,

  /// Repository name
  #[arg(long, requires = "owner")]
  pub name: Option<String>,

  /// Stop pagination after more than this many records (0 disables the cap)
  #[arg(long, conflicts_with = "no_limit")]
  pub limit: Option<usize>,

  /// Fetch every page regardless of the configured limit
  #[arg(long)]
  pub no_limit: bool,

  /// Write pull requests to this CSV file
  #[arg(long, short = 'o', value_name = "PATH")]
  pub output: Option<PathBuf>,
}

impl FetchArgs {
  fn overwrite(&self) -> Option<bool> {
    match (self.overwrite, self.append) {
      (true, _) => Some(true),
      (_, true) => Some(false),
      _ => None,
    }
  }

  fn repository(&self) -> Option<RepositoryRef> {
    if let Some(id) = &self.project_id {
      return Some(RepositoryRef::ProjectId(id.clone()));
    }
    if let Some(url) = &self.url {
      return Some(RepositoryRef::Url(url.clone()));
    }
    match (&self.owner, &self.name) {
      (Some(owner), Some(name)) => Some(RepositoryRef::OwnerName {
        owner: owner.clone(),
        name: name.clone(),
      }),
      _ => None,
    }
  }

  fn limit(&self) -> LimitOverride {
    match (self.limit, self.no_limit) {
      (_, true) | (Some(0), _) => LimitOverride::Unlimited,
      (Some(limit), _) => LimitOverride::Capped(limit),
      _ => LimitOverride::FromConfig,
    }
  }

  fn into_options(self) -> FetchOptions {
    FetchOptions {
      platform: self.platform,
      overwrite: self.overwrite(),
      repository: self.repository(),
      limit: self.limit(),
      credentials: self.auth.into(),
    }
  }
}

pub(crate) fn handle_fetch_command(args: FetchArgs, config_path: Option<&Path>) -> Result<()> {
  let mut config = load_config(config_path)?;
  if let Some(output) = &args.output {
    config.output.pull_requests = output.clone();
  }
  debug!("Using configuration: {config:?}");

  let home = home_dir()?;
  let mut prompter = DialoguerPrompter;
  let plan = resolve_plan(args.into_options(), &config, &home, &mut prompter)?;

  let (rt, client) = create_runtime_and_client()?;
  let store = store_for(&config);
  let report = execute_plan(&rt, &client, &plan, config.endpoints.base_url(plan.platform), &store)?;
  print_report(&report);

  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::Parser;

  use super::*;

  #[derive(Parser)]
  struct Harness {
    #[command(flatten)]
    args: FetchArgs,
  }

  fn parse(args: &[&str]) -> FetchArgs {
    let argv = std::iter::once("fetch").chain(args.iter().copied());
    Harness::try_parse_from(argv).unwrap().args
  }

  #[test]
  fn test_no_flags_leave_everything_to_prompts() {
    let options = parse(&[]).into_options();
    assert!(options.platform.is_none());
    assert!(options.overwrite.is_none());
    assert!(options.repository.is_none());
    assert_eq!(options.limit, LimitOverride::FromConfig);
  }

  #[test]
  fn test_owner_and_name() {
    let options = parse(&["--owner", "octo", "--name", "repo", "--append"]).into_options();
    assert_eq!(options.overwrite, Some(false));
    assert_eq!(
      options.repository,
      Some(RepositoryRef::OwnerName {
        owner: "octo".to_string(),
        name: "repo".to_string(),
      })
    );
  }

  #[test]
  fn test_limit_flags() {
    assert_eq!(parse(&["--limit", "50"]).limit(), LimitOverride::Capped(50));
    assert_eq!(parse(&["--no-limit"]).limit(), LimitOverride::Unlimited);
    assert_eq!(parse(&["--limit", "0"]).limit(), LimitOverride::Unlimited);
  }

  #[test]
  fn test_owner_requires_name() {
    let argv = ["fetch", "--owner", "octo"];
    assert!(Harness::try_parse_from(argv).is_err());
  }
}
