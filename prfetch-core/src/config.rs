//! # Configuration Management
//!
//! Locates prfetch's configuration directory and loads `prfetch.toml`, which
//! holds the fetch cap, output file names, and per-platform API base URLs.
//! A missing file means defaults everywhere.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::platform::{DEFAULT_RECORD_LIMIT, Platform};
use crate::storage::{DEFAULT_COMBINED_FILE, DEFAULT_DIFFS_FILE, DEFAULT_PULL_REQUESTS_FILE};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "prfetch.toml";

/// Represents the configuration directories for prfetch
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "prfetch").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }

  /// Load the configuration file or return defaults
  pub fn load_config(&self) -> Result<FetchConfig> {
    FetchConfig::load_from(&self.config_path())
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Settings read from `prfetch.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
  /// Stop paginating GitHub/GitLab once more than this many records are
  /// accumulated; `0` disables the cap. Bitbucket is never capped.
  pub record_limit: usize,
  pub output: OutputConfig,
  pub endpoints: EndpointConfig,
}

impl Default for FetchConfig {
  fn default() -> Self {
    Self {
      record_limit: DEFAULT_RECORD_LIMIT,
      output: OutputConfig::default(),
      endpoints: EndpointConfig::default(),
    }
  }
}

impl FetchConfig {
  /// Load configuration from a TOML file, falling back to defaults when it
  /// does not exist
  pub fn load_from(path: &Path) -> Result<Self> {
    if !path.exists() {
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
  }

  /// Save configuration as TOML, creating parent directories as needed
  pub fn save_to(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(path, content).with_context(|| format!("Failed to write config to {}", path.display()))
  }

  /// The record cap that applies to a platform
  pub fn limit_for(&self, platform: Platform) -> Option<usize> {
    match platform.default_record_limit() {
      Some(_) if self.record_limit > 0 => Some(self.record_limit),
      _ => None,
    }
  }
}

/// Output file locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
  pub pull_requests: PathBuf,
  pub diffs: PathBuf,
  pub combined: PathBuf,
}

impl Default for OutputConfig {
  fn default() -> Self {
    Self {
      pull_requests: PathBuf::from(DEFAULT_PULL_REQUESTS_FILE),
      diffs: PathBuf::from(DEFAULT_DIFFS_FILE),
      combined: PathBuf::from(DEFAULT_COMBINED_FILE),
    }
  }
}

/// API base URLs, overridable for self-hosted instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
  pub gitlab: String,
  pub github: String,
  pub bitbucket: String,
}

impl Default for EndpointConfig {
  fn default() -> Self {
    Self {
      gitlab: Platform::GitLab.default_api_base().to_string(),
      github: Platform::GitHub.default_api_base().to_string(),
      bitbucket: Platform::Bitbucket.default_api_base().to_string(),
    }
  }
}

impl EndpointConfig {
  /// Base URL for a platform, without a trailing slash
  pub fn base_url(&self, platform: Platform) -> &str {
    let url = match platform {
      Platform::GitLab => &self.gitlab,
      Platform::GitHub => &self.github,
      Platform::Bitbucket => &self.bitbucket,
    };
    url.trim_end_matches('/')
  }
}
