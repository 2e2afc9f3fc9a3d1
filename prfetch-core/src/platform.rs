//! # Platforms
//!
//! The three hosted version-control platforms prfetch knows how to read pull
//! requests from, plus the per-platform constants (API hosts, `.netrc`
//! machines, CSV layout, default fetch cap).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Default cap on accumulated records for link-paginated platforms
pub const DEFAULT_RECORD_LIMIT: usize = 400;

/// A supported version-control platform
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  /// GitLab merge requests
  #[value(name = "gitlab")]
  GitLab,
  /// GitHub pull requests
  #[value(name = "github")]
  GitHub,
  /// Bitbucket Cloud pull requests
  #[value(name = "bitbucket")]
  Bitbucket,
}

impl Platform {
  /// All platforms, in the order the interactive menu lists them
  pub const ALL: [Platform; 3] = [Platform::GitLab, Platform::GitHub, Platform::Bitbucket];

  /// Lowercase identifier used on the command line and in config files
  pub const fn name(self) -> &'static str {
    match self {
      Self::GitLab => "gitlab",
      Self::GitHub => "github",
      Self::Bitbucket => "bitbucket",
    }
  }

  /// Human-readable name
  pub const fn display_name(self) -> &'static str {
    match self {
      Self::GitLab => "GitLab",
      Self::GitHub => "GitHub",
      Self::Bitbucket => "Bitbucket",
    }
  }

  /// Default REST API base URL
  pub const fn default_api_base(self) -> &'static str {
    match self {
      Self::GitLab => "https://gitlab.com",
      Self::GitHub => "https://api.github.com",
      Self::Bitbucket => "https://api.bitbucket.org",
    }
  }

  /// Machine name looked up in `.netrc` for default credentials
  pub const fn netrc_machine(self) -> &'static str {
    match self {
      Self::GitLab => "gitlab.com",
      Self::GitHub => "github.com",
      Self::Bitbucket => "bitbucket.org",
    }
  }

  /// Whether the platform's rows carry the Reason, Repository and Links
  /// columns
  pub const fn has_extended_columns(self) -> bool {
    matches!(self, Self::GitHub | Self::Bitbucket)
  }

  /// Whether a raw project ID can be used instead of an owner/name pair
  pub const fn accepts_project_id(self) -> bool {
    matches!(self, Self::GitLab | Self::GitHub)
  }

  /// Whether a personal access token can stand in for username/password
  pub const fn accepts_token(self) -> bool {
    matches!(self, Self::GitLab | Self::GitHub)
  }

  /// Default cap on accumulated records, `None` when the platform is walked
  /// to the end
  pub const fn default_record_limit(self) -> Option<usize> {
    match self {
      Self::GitLab | Self::GitHub => Some(DEFAULT_RECORD_LIMIT),
      Self::Bitbucket => None,
    }
  }

  /// Resolve a 1-based menu choice ("1" = GitLab, "2" = GitHub, "3" =
  /// Bitbucket)
  pub fn from_menu_choice(choice: &str) -> Result<Self, FetchError> {
    match choice.trim() {
      "1" => Ok(Self::GitLab),
      "2" => Ok(Self::GitHub),
      "3" => Ok(Self::Bitbucket),
      other => Err(FetchError::UnsupportedPlatform(other.to_string())),
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.display_name())
  }
}

impl FromStr for Platform {
  type Err = FetchError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "gitlab" => Ok(Self::GitLab),
      "github" => Ok(Self::GitHub),
      "bitbucket" => Ok(Self::Bitbucket),
      _ => Err(FetchError::UnsupportedPlatform(s.to_string())),
    }
  }
}
