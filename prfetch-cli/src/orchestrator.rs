//! # Fetch Orchestrator
//!
//! Assembles a [`FetchPlan`] from command-line flags, falling back to prompts
//! for anything missing, then runs it: reset storage, bind credentials, point
//! the session at the repository, fetch every page, and append the normalized
//! records.

use std::path::{Path, PathBuf};

use anyhow::Result;
use prfetch_api::auth::default_credentials;
use prfetch_api::{FetchSession, StopReason, VcsClient, normalize_all};
use prfetch_core::output::{format_count, format_path, format_platform, print_info, print_success, print_warning};
use prfetch_core::{CredentialInput, CsvStore, FetchConfig, Platform, RepositoryRef, locate};
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::progress;
use crate::prompter::Prompter;

/// Where credentials come from
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
  /// Enter a token or username/password
  Manual,
  /// Read them from ~/.netrc
  Default,
}

/// Credential-related flags
#[derive(Debug, Clone, Default)]
pub struct CredentialOptions {
  pub auth: Option<AuthMode>,
  pub token: Option<String>,
  pub username: Option<String>,
  pub password: Option<String>,
}

/// How the record limit is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LimitOverride {
  /// Use `record_limit` from the configuration
  #[default]
  FromConfig,
  Capped(usize),
  Unlimited,
}

/// Everything the user may have supplied up front
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
  pub platform: Option<Platform>,
  pub overwrite: Option<bool>,
  pub credentials: CredentialOptions,
  pub repository: Option<RepositoryRef>,
  pub limit: LimitOverride,
}

/// A fully resolved fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
  pub platform: Platform,
  pub overwrite: bool,
  pub credential: CredentialInput,
  /// Path token produced by the repository locator
  pub repository: String,
  pub limit: Option<usize>,
}

/// Result of running a plan
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
  pub platform: Platform,
  pub stored: usize,
  pub stop: StopReason,
  pub output: PathBuf,
}

/// Choose the platform from the flag or the menu
pub fn resolve_platform(platform: Option<Platform>, prompter: &mut dyn Prompter) -> Result<Platform> {
  if let Some(platform) = platform {
    return Ok(platform);
  }

  let items: Vec<&str> = Platform::ALL.iter().map(|platform| platform.display_name()).collect();
  let choice = prompter.select("Select the version control system", &items, 0)?;
  Ok(Platform::from_menu_choice(&(choice + 1).to_string())?)
}

/// Resolve the credential input for a platform
pub fn resolve_credentials(
  platform: Platform,
  options: &CredentialOptions,
  home: &Path,
  prompter: &mut dyn Prompter,
) -> Result<CredentialInput> {
  if let Some(token) = &options.token {
    return Ok(CredentialInput::Token(token.clone()));
  }
  if let Some(username) = &options.username {
    let password = match &options.password {
      Some(password) => password.clone(),
      None => prompter.password("Password")?,
    };
    return Ok(CredentialInput::basic(username.clone(), password));
  }

  let mode = match options.auth {
    Some(mode) => mode,
    None => {
      let choice = prompter.select("Authentication", &["Manual", "Default (~/.netrc)"], 0)?;
      if choice == 1 { AuthMode::Default } else { AuthMode::Manual }
    }
  };

  if mode == AuthMode::Default {
    debug!("Loading default {platform} credentials from .netrc");
    return default_credentials(home, platform);
  }

  if platform.accepts_token() {
    let token = prompter.password(&format!(
      "{platform} token (leave blank for username/password)"
    ))?;
    if !token.trim().is_empty() {
      return Ok(CredentialInput::Token(token.trim().to_string()));
    }
  }

  let username = prompter.input("Username", true)?;
  let password = prompter.password("Password")?;
  Ok(CredentialInput::basic(username, password))
}

/// Resolve and locate the repository
pub fn resolve_repository(
  platform: Platform,
  repository: Option<RepositoryRef>,
  prompter: &mut dyn Prompter,
) -> Result<String> {
  let reference = match repository {
    Some(reference) => reference,
    None if platform.accepts_project_id() => {
      let choice = prompter.select("Find the repository by", &["Project ID", "Repository URL"], 0)?;
      if choice == 0 {
        RepositoryRef::ProjectId(prompter.input("Project ID", false)?)
      } else {
        RepositoryRef::Url(prompter.input("Repository URL", false)?)
      }
    }
    None => RepositoryRef::Url(prompter.input("Repository URL", false)?),
  };

  Ok(locate(platform, &reference)?)
}

/// Resolve every value a fetch needs, in the order the interactive flow asks
/// for them
pub fn resolve_plan(
  options: FetchOptions,
  config: &FetchConfig,
  home: &Path,
  prompter: &mut dyn Prompter,
) -> Result<FetchPlan> {
  let platform = resolve_platform(options.platform, prompter)?;

  let overwrite = match options.overwrite {
    Some(overwrite) => overwrite,
    None => prompter.confirm("Overwrite the existing CSV files?", false)?,
  };

  let credential = resolve_credentials(platform, &options.credentials, home, prompter)?;
  let repository = resolve_repository(platform, options.repository, prompter)?;

  let limit = match options.limit {
    LimitOverride::FromConfig => config.limit_for(platform),
    LimitOverride::Capped(limit) => Some(limit),
    LimitOverride::Unlimited => None,
  };

  Ok(FetchPlan {
    platform,
    overwrite,
    credential,
    repository,
    limit,
  })
}

/// Run a resolved plan against `base_url`, appending to `store`
pub fn execute_plan(
  rt: &Runtime,
  client: &VcsClient,
  plan: &FetchPlan,
  base_url: &str,
  store: &CsvStore,
) -> Result<FetchReport> {
  if plan.overwrite {
    store.reset(plan.platform)?;
  }

  let mut session = FetchSession::new(plan.platform, base_url).with_limit(plan.limit);
  session.bind_auth(plan.credential.clone())?;
  session.set_target_url(&plan.repository);
  info!("Fetching {} pull requests from {}", plan.platform, session.next_url().unwrap_or_default());

  let spinner = progress::fetch_spinner(plan.platform);
  let outcome = rt.block_on(client.fetch_all_with(&mut session, |count| spinner.inc(count as u64)));
  spinner.finish_and_clear();
  let outcome = outcome?;

  let records = normalize_all(plan.platform, &outcome.records)?;
  let stored = store.append(plan.platform, &records)?;

  Ok(FetchReport {
    platform: plan.platform,
    stored,
    stop: outcome.stop,
    output: store.pull_requests_path().to_path_buf(),
  })
}

/// Print the outcome of a fetch
pub fn print_report(report: &FetchReport) {
  match &report.stop {
    StopReason::Exhausted => {}
    StopReason::LimitReached { limit, .. } => print_info(&format!(
      "Stopped at the record limit of {limit}; use --limit or --no-limit to fetch more"
    )),
    StopReason::Truncated { page, error } => print_warning(&format!(
      "Page {page} could not be fetched, so the results are incomplete: {error}"
    )),
  }

  print_success(&format!(
    "Stored {} from {}",
    format_count(report.stored, "pull request"),
    format_platform(report.platform)
  ));

  let path = std::path::absolute(&report.output).unwrap_or_else(|_| report.output.clone());
  println!("Pull requests are stored in path: {}", format_path(&path));
}
