//! Temporary `prfetch.toml` files for tests
//!
//! Lets a test point one or more platforms at a mock server and tune the
//! record limit without going through the user's real config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use toml::Table;

/// A configuration file in a temporary directory, built up one setting at a
/// time
pub struct ConfigFileGuard {
  temp_dir: TempDir,
  table: Table,
}

impl ConfigFileGuard {
  /// Start from an empty configuration, which prfetch reads as all defaults
  pub fn new() -> Result<Self> {
    let temp_dir = TempDir::new().context("Failed to create temp directory")?;
    Ok(Self {
      temp_dir,
      table: Table::new(),
    })
  }

  /// Set the record limit (`0` disables it)
  pub fn record_limit(mut self, limit: i64) -> Self {
    self.table.insert("record_limit".to_string(), toml::Value::Integer(limit));
    self
  }

  /// Point a platform (`gitlab`, `github` or `bitbucket`) at another base URL
  pub fn endpoint(mut self, platform: &str, base_url: &str) -> Self {
    let endpoints = self
      .table
      .entry("endpoints")
      .or_insert(toml::Value::Table(Table::new()));
    if let toml::Value::Table(endpoints) = endpoints {
      endpoints.insert(platform.to_string(), toml::Value::String(base_url.to_string()));
    }
    self
  }

  /// Write all output files into the guard's directory
  pub fn output_in_temp_dir(mut self) -> Self {
    let mut output = Table::new();
    for (key, file) in [
      ("pull_requests", "pull_requests.csv"),
      ("diffs", "diffs.csv"),
      ("combined", "combined.csv"),
    ] {
      let path = self.temp_dir.path().join(file);
      output.insert(key.to_string(), toml::Value::String(path.display().to_string()));
    }
    self.table.insert("output".to_string(), toml::Value::Table(output));
    self
  }

  /// Write the file and return its path
  pub fn write(&self) -> Result<PathBuf> {
    let path = self.config_path();
    let content = toml::to_string(&self.table).context("Failed to serialize test config")?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
  }

  /// Path the configuration is written to
  pub fn config_path(&self) -> PathBuf {
    self.temp_dir.path().join("prfetch.toml")
  }

  /// The temporary directory holding the configuration
  pub fn dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
