//! # Repository Locator
//!
//! Turns what a user types (a project ID, a clone URL, or an owner/name pair)
//! into the path token each platform's pull request listing expects. Owner
//! and name are joined with an encoded slash (`%2F`) so the token fits in a
//! single path segment.

use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::platform::Platform;

/// A user-supplied repository reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryRef {
  /// Platform-native project identifier, passed through untouched
  ProjectId(String),
  /// Remote URL of the form `.../<owner>/<name>[.git]`
  Url(String),
  /// Explicit owner and repository name
  OwnerName { owner: String, name: String },
}

/// Convert a repository reference into the platform's path token
pub fn locate(platform: Platform, reference: &RepositoryRef) -> FetchResult<String> {
  match reference {
    RepositoryRef::ProjectId(id) => {
      let id = id.trim();
      if !platform.accepts_project_id() {
        return Err(FetchError::InvalidRepositoryReference(format!(
          "{platform} repositories must be given as a URL, got project ID '{id}'"
        )));
      }
      if id.is_empty() {
        return Err(FetchError::InvalidRepositoryReference(
          "project ID cannot be empty".to_string(),
        ));
      }
      Ok(id.to_string())
    }
    RepositoryRef::Url(url) => {
      let (owner, name) = parse_remote_url(url)?;
      Ok(encode_owner_name(&owner, &name))
    }
    RepositoryRef::OwnerName { owner, name } => {
      let owner = owner.trim();
      let name = name.trim();
      if owner.is_empty() || name.is_empty() {
        return Err(FetchError::InvalidRepositoryReference(format!("{owner}/{name}")));
      }
      Ok(encode_owner_name(owner, name))
    }
  }
}

/// Join owner and name with an encoded slash
pub fn encode_owner_name(owner: &str, name: &str) -> String {
  format!("{owner}%2F{name}")
}

/// Extract `(owner, name)` from a remote URL.
///
/// Owner is the second-to-last path segment and name the last one, cut at its
/// first `.`, so `https://host/group/project.git` yields `("group",
/// "project")`. SSH remotes (`git@host:owner/name.git`) and bare
/// `owner/name` paths are accepted too.
pub fn parse_remote_url(input: &str) -> FetchResult<(String, String)> {
  let invalid = || FetchError::InvalidRepositoryReference(input.to_string());
  let trimmed = input.trim();

  let path = if trimmed.contains("://") {
    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    url.path().to_string()
  } else if let Some((user_host, path)) = trimmed.split_once(':')
    && user_host.contains('@')
  {
    path.to_string()
  } else {
    trimmed.to_string()
  };

  let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
  let [.., owner, last] = segments.as_slice() else {
    return Err(invalid());
  };

  let name = last.split('.').next().unwrap_or_default();
  if owner.is_empty() || name.is_empty() {
    return Err(invalid());
  }

  Ok((owner.to_string(), name.to_string()))
}
