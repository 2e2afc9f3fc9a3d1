//! # Credentials Command
//!
//! Checks the `.netrc` entries used by `--auth default`.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use prfetch_api::auth::check_credentials;
use prfetch_core::creds::netrc::get_netrc_path;
use prfetch_core::output::format_path;
use prfetch_core::{Platform, print_error, print_info, print_success, print_warning};

use super::home_dir;

/// Command for credential management
#[derive(Args)]
pub struct CredsArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: CredsSubcommands,
}

/// Subcommands for the creds command
#[derive(Subcommand)]
pub enum CredsSubcommands {
  /// Check if default credentials are configured
  #[command(
    long_about = "Checks if ~/.netrc has an entry for each platform's machine.\n\n\
                      It also checks file permissions to ensure your credentials are secure."
  )]
  Check,
}

pub(crate) fn handle_creds_command(creds: CredsArgs) -> Result<()> {
  match creds.subcommand {
    CredsSubcommands::Check => handle_check_command(&home_dir()?),
  }
}

fn handle_check_command(home: &Path) -> Result<()> {
  let netrc_path = get_netrc_path(home);

  if !netrc_path.exists() {
    print_error("No .netrc file found.");
    println!(
      "Create a .netrc file at {} to use --auth default.",
      format_path(&netrc_path)
    );
    return Ok(());
  }

  check_permissions(&netrc_path)?;

  for platform in Platform::ALL {
    match check_credentials(home, platform) {
      Ok(true) => print_success(&format!("{} credentials found.", platform.display_name())),
      Ok(false) => {
        print_warning(&format!("No {} credentials found.", platform.display_name()));
        println!(
          "Add credentials for machine '{}' to your .netrc file.",
          platform.netrc_machine()
        );
      }
      Err(e) => print_error(&format!("Error checking {} credentials: {e}", platform.display_name())),
    }
  }

  print_info("Example .netrc format:");
  println!("```");
  println!("machine github.com");
  println!("  login your-github-username");
  println!("  password your-personal-access-token");
  println!();
  println!("machine bitbucket.org");
  println!("  login your-bitbucket-username");
  println!("  password your-app-password");
  println!("```");

  Ok(())
}

#[cfg(unix)]
fn check_permissions(netrc_path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  use prfetch_core::output::format_command;

  let mode = std::fs::metadata(netrc_path)?.permissions().mode();
  if mode & 0o077 != 0 {
    print_warning("Your .netrc file has insecure permissions.");
    println!(
      "For security, change permissions to 600: {}",
      format_command(&format!("chmod 600 {}", netrc_path.display()))
    );
  } else {
    print_success(".netrc file has secure permissions.");
  }
  Ok(())
}

#[cfg(not(unix))]
fn check_permissions(_netrc_path: &Path) -> Result<()> {
  Ok(())
}

#[cfg(test)]
mod tests {
  use prfetch_test_utils::NetrcGuard;

  use super::*;

  #[test]
  fn test_check_without_netrc_succeeds() {
    let home = NetrcGuard::empty_home();
    assert!(handle_check_command(home.home_dir()).is_ok());
  }

  #[test]
  fn test_check_with_entry_succeeds() {
    let home = NetrcGuard::with_machine("github.com", "octocat", "ghp_token");
    assert!(handle_check_command(home.home_dir()).is_ok());
  }
}
