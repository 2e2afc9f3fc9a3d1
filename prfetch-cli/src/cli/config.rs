//! # Config Command
//!
//! Shows, locates and initializes `prfetch.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use prfetch_core::output::format_path;
use prfetch_core::{FetchConfig, get_config_dirs, print_info, print_success};

use super::load_config;

/// Command for configuration management
#[derive(Args)]
pub struct ConfigArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

/// Subcommands for the config command
#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Print the effective configuration as TOML
  Show,

  /// Print the path of the configuration file
  Path,

  /// Write a configuration file with default values
  #[command(long_about = "Writes a configuration file with default values.\n\n\
                      An existing file is left untouched. Edit it to change the record limit,\n\
                      the output file locations, or the API base URL of self-hosted instances.")]
  Init,
}

pub(crate) fn handle_config_command(config: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
  match config.subcommand {
    ConfigSubcommands::Show => {
      let config = load_config(config_path)?;
      let content = toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
      print!("{content}");
      Ok(())
    }
    ConfigSubcommands::Path => {
      println!("{}", resolve_path(config_path)?.display());
      Ok(())
    }
    ConfigSubcommands::Init => handle_init_command(config_path),
  }
}

fn resolve_path(config_path: Option<&Path>) -> Result<PathBuf> {
  match config_path {
    Some(path) => Ok(path.to_path_buf()),
    None => Ok(get_config_dirs()?.config_path()),
  }
}

fn handle_init_command(config_path: Option<&Path>) -> Result<()> {
  let path = resolve_path(config_path)?;
  if path.exists() {
    print_info(&format!("Configuration already exists at {}", format_path(&path)));
    return Ok(());
  }

  FetchConfig::default().save_to(&path)?;
  print_success(&format!("Initialized prfetch configuration at {}", format_path(&path)));
  Ok(())
}
