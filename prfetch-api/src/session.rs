//! # Fetch Session
//!
//! Per-run state for one fetch: which platform, where the next page lives,
//! the bound credential, and how many records have come back so far.

use prfetch_core::{Credential, CredentialInput, FetchResult, Platform};
use tracing::debug;

use crate::platforms::client_for;

/// State of a single pagination run
#[derive(Debug, Clone)]
pub struct FetchSession {
  platform: Platform,
  base_url: String,
  credential: Option<Credential>,
  next_url: Option<String>,
  fetched: usize,
  limit: Option<usize>,
}

impl FetchSession {
  /// Start a session against `base_url` with the platform's default record
  /// limit
  pub fn new(platform: Platform, base_url: impl Into<String>) -> Self {
    Self {
      platform,
      base_url: base_url.into().trim_end_matches('/').to_string(),
      credential: None,
      next_url: None,
      fetched: 0,
      limit: platform.default_record_limit(),
    }
  }

  /// Replace the record limit; `None` walks every page
  pub fn with_limit(mut self, limit: Option<usize>) -> Self {
    self.limit = limit;
    self
  }

  /// Bind a user-supplied credential using the platform's conventions
  pub fn bind_auth(&mut self, input: CredentialInput) -> FetchResult<()> {
    let credential = client_for(self.platform).bind_auth(input)?;
    debug!("Bound {credential:?} for {}", self.platform);
    self.credential = Some(credential);
    Ok(())
  }

  /// Point the session at the first page of a repository's listing
  pub fn set_target_url(&mut self, repository: &str) {
    let url = client_for(self.platform).build_url(&self.base_url, repository);
    debug!("Target URL for {}: {url}", self.platform);
    self.next_url = Some(url);
    self.fetched = 0;
  }

  pub fn platform(&self) -> Platform {
    self.platform
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn credential(&self) -> Option<&Credential> {
    self.credential.as_ref()
  }

  /// URL of the page to request next, `None` once pagination is exhausted
  pub fn next_url(&self) -> Option<&str> {
    self.next_url.as_deref()
  }

  /// Records accumulated so far
  pub fn fetched(&self) -> usize {
    self.fetched
  }

  pub fn limit(&self) -> Option<usize> {
    self.limit
  }

  /// Whether the accumulated count is past the limit
  pub(crate) fn limit_exceeded(&self) -> bool {
    self.limit.is_some_and(|limit| self.fetched > limit)
  }

  /// Account for a fetched page and move the cursor
  pub(crate) fn record_page(&mut self, count: usize, next_url: Option<String>) {
    self.fetched += count;
    self.next_url = next_url;
  }
}
