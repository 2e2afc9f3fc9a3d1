//! Reading default credentials from `.netrc` files.
//!
//! Each platform maps to one machine entry (`github.com`, `gitlab.com`,
//! `bitbucket.org`). For GitHub and GitLab the entry's password holds a
//! personal access token; for Bitbucket the login/password pair is used as
//! is.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::creds::Credentials;
use crate::platform::Platform;

/// Returns the path to the `.netrc` file for the provided home directory.
///
/// ```
/// use std::path::Path;
/// use prfetch_core::creds::netrc::get_netrc_path;
///
/// let path = get_netrc_path(Path::new("/home/user"));
/// assert_eq!(path, Path::new("/home/user/.netrc"));
/// ```
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Finds credentials for `target_machine` in `.netrc` content.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// layouts are accepted, since tokens are whitespace separated. A `default`
/// entry is used when no machine matches. Entries missing either `login` or
/// `password` are ignored.
pub fn parse_netrc(content: &str, target_machine: &str) -> Option<Credentials> {
  let mut tokens = content.split_whitespace();
  let mut entries: Vec<(Option<String>, Option<String>, Option<String>)> = Vec::new();

  while let Some(token) = tokens.next() {
    match token {
      "machine" => entries.push((tokens.next().map(str::to_string), None, None)),
      "default" => entries.push((None, None, None)),
      "login" => {
        if let (Some(entry), Some(value)) = (entries.last_mut(), tokens.next()) {
          entry.1 = Some(value.to_string());
        }
      }
      "password" => {
        if let (Some(entry), Some(value)) = (entries.last_mut(), tokens.next()) {
          entry.2 = Some(value.to_string());
        }
      }
      _ => {}
    }
  }

  let complete = |(machine, login, password): (Option<String>, Option<String>, Option<String>)| match (login, password) {
    (Some(username), Some(password)) => Some((machine, Credentials { username, password })),
    _ => None,
  };
  let entries: Vec<_> = entries.into_iter().filter_map(complete).collect();

  let exact = entries
    .iter()
    .find(|(machine, _)| machine.as_deref() == Some(target_machine));
  let fallback = entries.iter().find(|(machine, _)| machine.is_none());

  exact.or(fallback).map(|(_, creds)| creds.clone())
}

/// Reads `.netrc` from `home` and returns the credentials for a machine.
///
/// A missing file is not an error: it yields `Ok(None)`.
pub fn lookup_credentials(home: &Path, machine: &str) -> Result<Option<Credentials>> {
  let path = get_netrc_path(home);
  if !path.exists() {
    debug!("No .netrc file at {}", path.display());
    return Ok(None);
  }

  let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
  Ok(parse_netrc(&content, machine))
}

/// Reads the `.netrc` credentials for a platform's machine
pub fn platform_credentials(home: &Path, platform: Platform) -> Result<Option<Credentials>> {
  lookup_credentials(home, platform.netrc_machine())
}
