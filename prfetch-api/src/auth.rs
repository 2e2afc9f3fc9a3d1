//! Authentication helpers for the platform clients.
//!
//! Loads the "default" credentials a user keeps in `~/.netrc` and creates a
//! ready-to-use runtime and client for CLI commands. The home directory is a
//! parameter so callers and tests decide where `.netrc` is read from.

use std::path::Path;

use anyhow::{Context, Result};
use prfetch_core::creds::netrc::platform_credentials;
use prfetch_core::{CredentialInput, FetchError, Platform};
use tokio::runtime::Runtime;

use crate::client::{VcsClient, create_vcs_client};

/// Check if `.netrc` holds credentials for a platform's machine.
pub fn check_credentials(home: &Path, platform: Platform) -> Result<bool> {
  Ok(platform_credentials(home, platform)?.is_some())
}

/// Load the default credentials for a platform from `.netrc`.
///
/// GitHub and GitLab entries carry a personal access token in the
/// `password` field; Bitbucket entries are a username and app password.
pub fn default_credentials(home: &Path, platform: Platform) -> Result<CredentialInput> {
  let creds = platform_credentials(home, platform)
    .with_context(|| format!("Failed to read default {platform} credentials"))?
    .ok_or_else(|| {
      FetchError::MissingCredentials(format!(
        "no .netrc entry for machine '{}'. Add one or enter credentials manually.",
        platform.netrc_machine()
      ))
    })?;

  if platform.accepts_token() {
    Ok(CredentialInput::Token(creds.password))
  } else {
    Ok(CredentialInput::Basic {
      username: creds.username,
      password: creds.password,
    })
  }
}

/// Creates a tokio runtime and a client for one CLI command.
pub fn create_runtime_and_client() -> Result<(Runtime, VcsClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let client = create_vcs_client()?;
  Ok((rt, client))
}
