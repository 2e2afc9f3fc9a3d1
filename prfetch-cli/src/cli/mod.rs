//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for prfetch: fetching pull
//! requests, downloading their diffs, combining the tables, and managing
//! configuration and credentials.

mod combine;
mod completion;
mod config;
mod creds;
mod diffs;
mod fetch;
mod reset;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand};
use directories::BaseDirs;
use prfetch_core::{ColorMode, CsvStore, FetchConfig, get_config_dirs};

use crate::orchestrator::{AuthMode, CredentialOptions};

/// Top-level CLI command for prfetch
#[derive(Parser)]
#[command(name = "prfetch")]
#[command(display_name = "📥 prfetch")]
#[command(about = "Fetch pull request metadata from GitLab, GitHub and Bitbucket into CSV")]
#[command(
  long_about = "prfetch walks the paginated pull/merge request listing of a GitLab, GitHub or\n\
        Bitbucket repository and writes one normalized CSV row per request.\n\n\
        Diffs can be downloaded afterwards and joined with the pull request table."
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

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Read configuration from this file instead of the default location
  #[arg(long, global = true, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for prfetch
#[derive(Subcommand)]
pub enum Commands {
  /// Fetch pull requests into the CSV table
  #[command(long_about = "Fetch every pull/merge request of a repository into the CSV table.\n\n\
            Any value not given as a flag is asked for interactively: the platform,\n\
            whether to overwrite the existing table, credentials, and the repository.\n\
            GitHub and GitLab stop after the configured record limit (400 by default).")]
  #[command(alias = "f")]
  Fetch(fetch::FetchArgs),

  /// Download diffs of stored pull requests
  #[command(long_about = "Download the diff of every stored pull request that links to one.\n\n\
            Reads the Links column of the pull request table (GitHub and Bitbucket only)\n\
            and writes ID, Diff rows to the diff table.")]
  Diffs(diffs::DiffsArgs),

  /// Join pull requests with their diffs
  #[command(long_about = "Inner-join the pull request table with the diff table on ID.\n\n\
            Only pull requests that have a downloaded diff are written.")]
  Combine(combine::CombineArgs),

  /// Truncate the CSV tables and write their headers
  Reset(reset::ResetArgs),

  /// Configuration management
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),

  /// Credential management
  #[command(long_about = "Check the default credentials prfetch reads from ~/.netrc.\n\n\
            GitHub and GitLab entries hold a personal access token as the password;\n\
            Bitbucket entries hold a username and app password.")]
  #[command(arg_required_else_help = true)]
  Creds(creds::CredsArgs),

  /// Generate shell completions
  Completion(completion::CompletionArgs),
}

/// Credential flags shared by commands that talk to an API
#[derive(Args, Debug, Clone, Default)]
pub struct AuthArgs {
  /// Where credentials come from
  #[arg(long, value_enum)]
  pub auth: Option<AuthMode>,

  /// Personal access token (GitHub and GitLab)
  #[arg(long, conflicts_with_all = ["username", "password"])]
  pub token: Option<String>,

  /// Username for basic authentication
  #[arg(long)]
  pub username: Option<String>,

  /// Password or app password for basic authentication
  #[arg(long, requires = "username")]
  pub password: Option<String>,
}

impl From<AuthArgs> for CredentialOptions {
  fn from(args: AuthArgs) -> Self {
    Self {
      auth: args.auth,
      token: args.token,
      username: args.username,
      password: args.password,
    }
  }
}

/// Load configuration from `--config` or the default location
pub(crate) fn load_config(path: Option<&Path>) -> Result<FetchConfig> {
  match path {
    Some(path) => FetchConfig::load_from(path),
    None => get_config_dirs()?.load_config(),
  }
}

/// The user's home directory, where `.netrc` is read from
pub(crate) fn home_dir() -> Result<PathBuf> {
  let dirs = BaseDirs::new().context("Failed to determine the home directory")?;
  Ok(dirs.home_dir().to_path_buf())
}

/// Storage over the configured output paths
pub(crate) fn store_for(config: &FetchConfig) -> CsvStore {
  CsvStore::new(&config.output.pull_requests, &config.output.diffs)
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  // Set global color override based on --colors argument
  match cli.colors {
    ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
    ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
    ColorMode::Auto => {}
  }

  let config_path = cli.config.as_deref();
  match cli.command {
    Commands::Fetch(fetch) => fetch::handle_fetch_command(fetch, config_path),
    Commands::Diffs(diffs) => diffs::handle_diffs_command(diffs, config_path),
    Commands::Combine(combine) => combine::handle_combine_command(combine, config_path),
    Commands::Reset(reset) => reset::handle_reset_command(reset, config_path),
    Commands::Config(config) => config::handle_config_command(config, config_path),
    Commands::Creds(creds) => creds::handle_creds_command(creds),
    Commands::Completion(completion) => completion::handle_completion_command(completion),
  }
}
