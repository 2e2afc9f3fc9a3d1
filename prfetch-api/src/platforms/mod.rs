//! # Platform Clients
//!
//! One [`PlatformClient`] per supported platform. Each knows how to bind
//! credentials, build the listing URL, split a response into records and a
//! next-page URL, and normalize a raw record into a [`PullRequestRecord`].
//! The pagination loop in [`crate::endpoints::pulls`] is written once against
//! this trait.

mod bitbucket;
mod github;
mod gitlab;

pub use bitbucket::BitbucketPlatform;
pub use github::GitHubPlatform;
pub use gitlab::GitLabPlatform;
use prfetch_core::{Credential, CredentialInput, FetchError, FetchResult, Platform, PullRequestRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// What the fetcher does when a page request fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Stop and keep the pages fetched so far
  Truncate,
  /// Fail the whole fetch
  Abort,
}

/// One parsed page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
  pub records: Vec<Value>,
  pub next_url: Option<String>,
}

/// Platform-specific behavior behind the shared fetch loop
pub trait PlatformClient: Send + Sync {
  /// The platform this client speaks to
  fn platform(&self) -> Platform;

  /// Turn user input into a credential this platform accepts
  fn bind_auth(&self, input: CredentialInput) -> FetchResult<Credential>;

  /// URL of the first listing page for a repository path token
  fn build_url(&self, base_url: &str, repository: &str) -> String;

  /// Split a response body into its records and the next page URL.
  ///
  /// `url` is the URL the page was requested from; `link_header` is the raw
  /// `Link` response header, if any.
  fn parse_page(&self, url: &str, link_header: Option<&str>, body: Value) -> FetchResult<Page>;

  /// Map one raw record onto the canonical record
  fn normalize(&self, raw: &Value) -> FetchResult<PullRequestRecord>;

  /// How a failed page request is handled
  fn failure_policy(&self) -> FailurePolicy;

  /// The diff URL inside a stored `Links` value, if the platform has one
  fn diff_url(&self, links: &Value) -> Option<String>;
}

static GITLAB: GitLabPlatform = GitLabPlatform;
static GITHUB: GitHubPlatform = GitHubPlatform;
static BITBUCKET: BitbucketPlatform = BitbucketPlatform;

/// The client for a platform
pub fn client_for(platform: Platform) -> &'static dyn PlatformClient {
  match platform {
    Platform::GitLab => &GITLAB,
    Platform::GitHub => &GITHUB,
    Platform::Bitbucket => &BITBUCKET,
  }
}

/// Deserialize a field whose presence matters: absent keys stay `None` (with
/// `#[serde(default)]`), a present `null` becomes `Some(None)`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize a raw record into a platform payload struct
pub(crate) fn decode<T: DeserializeOwned>(platform: Platform, raw: &Value) -> FetchResult<T> {
  T::deserialize(raw).map_err(|e| {
    let id = raw.get("id").map_or_else(|| "?".to_string(), Value::to_string);
    FetchError::MalformedRecord(format!("{platform} record {id}: {e}"))
  })
}

/// Body of a link-paginated page: a top-level array of records
pub(crate) fn array_page(platform: Platform, url: &str, link_header: Option<&str>, body: Value) -> FetchResult<Page> {
  let Value::Array(records) = body else {
    return Err(FetchError::transport(
      url,
      format!("expected a JSON array of {platform} records"),
    ));
  };

  Ok(Page {
    records,
    next_url: link_header.and_then(|header| crate::pagination::next_link(header, url)),
  })
}

/// Bind a token or username/password pair for a token-capable platform
pub(crate) fn bind_token_or_basic(
  platform: Platform,
  scheme: prfetch_core::TokenScheme,
  input: CredentialInput,
) -> FetchResult<Credential> {
  match input {
    CredentialInput::Token(token) if token.trim().is_empty() => Err(FetchError::MissingCredentials(format!(
      "{platform} token cannot be empty"
    ))),
    CredentialInput::Token(token) => Ok(Credential::Token { scheme, token }),
    CredentialInput::Basic { username, password } => Ok(Credential::Basic { username, password }),
  }
}
