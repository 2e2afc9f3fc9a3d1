//! # Fetch Errors
//!
//! Error kinds surfaced by the locator, the credential binder, and the
//! pagination fetcher. CSV and configuration I/O use `anyhow` instead, since
//! callers never branch on those failures.

use thiserror::Error;

/// Errors that can occur while preparing or running a fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
  #[error("Invalid repository reference: '{0}'")]
  InvalidRepositoryReference(String),
  #[error("Missing credentials: {0}")]
  MissingCredentials(String),
  #[error("Unsupported platform: '{0}'. Expected one of gitlab, github, bitbucket")]
  UnsupportedPlatform(String),
  #[error("Request to {url} failed: {message}")]
  TransportFailure { url: String, message: String },
  #[error("Malformed pull request payload: {0}")]
  MalformedRecord(String),
}

impl FetchError {
  /// Build a transport failure for the given URL
  pub fn transport(url: &str, message: impl Into<String>) -> Self {
    Self::TransportFailure {
      url: url.to_string(),
      message: message.into(),
    }
  }

  /// Whether this error came from the HTTP layer
  pub const fn is_transport(&self) -> bool {
    matches!(self, Self::TransportFailure { .. })
  }
}

/// Result alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;
