//! Temporary home directories for `.netrc` lookups.
//!
//! Credential discovery takes the home directory as a parameter, so these
//! guards never touch the process environment and tests can run in parallel.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard for a temporary home directory
///
/// The directory, and the `.netrc` inside it if any, are removed when the
/// guard is dropped.
pub struct NetrcGuard {
  temp_dir: TempDir,
  netrc_path: PathBuf,
}

impl NetrcGuard {
  /// Create a home directory whose `.netrc` holds `content`
  pub fn new(content: &str) -> Self {
    let guard = Self::empty_home();
    fs::write(&guard.netrc_path, content).expect("Failed to write test .netrc");
    guard
  }

  /// Create a home directory without a `.netrc`
  pub fn empty_home() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");

    Self { temp_dir, netrc_path }
  }

  /// Create a home directory with one `machine` entry
  pub fn with_machine(machine: &str, login: &str, password: &str) -> Self {
    Self::new(&format!("machine {machine}\n  login {login}\n  password {password}\n"))
  }

  /// Get the path to the .netrc file
  pub fn netrc_path(&self) -> &Path {
    &self.netrc_path
  }

  /// Get the path to the temporary home directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
