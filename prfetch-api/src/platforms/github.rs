//! GitHub pull requests (`GET /repos/{owner}/{repo}/pulls`).

use prfetch_core::record::{NONE_SENTINEL, UNKNOWN_AUTHOR};
use prfetch_core::{
  Credential, CredentialInput, ExtendedFields, FetchError, FetchResult, Platform, PullRequestRecord, TokenScheme,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FailurePolicy, Page, PlatformClient, array_page, bind_token_or_basic, decode};

/// GitHub REST v3
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHubPlatform;

#[derive(Debug, Deserialize)]
struct GitHubPull {
  id: u64,
  title: String,
  body: Option<String>,
  user: Option<GitHubAccount>,
  created_at: String,
  state: String,
  head: GitHubRef,
  base: GitHubRef,
  merge_commit_sha: Option<String>,
  html_url: String,
  diff_url: String,
}

#[derive(Debug, Deserialize)]
struct GitHubRef {
  #[serde(rename = "ref")]
  ref_name: String,
  sha: String,
  user: Option<GitHubAccount>,
  repo: Option<GitHubRepo>,
}

#[derive(Debug, Deserialize)]
struct GitHubAccount {
  login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubRepo {
  default_branch: Option<String>,
  full_name: Option<String>,
}

/// The stored `Links` cell, keys in this order
#[derive(Debug, Serialize)]
struct GitHubLinks<'a> {
  #[serde(rename = "self")]
  html: &'a str,
  diff: &'a str,
}

fn non_empty_or_none(value: Option<String>) -> String {
  value
    .filter(|value| !value.is_empty())
    .unwrap_or_else(|| NONE_SENTINEL.to_string())
}

impl PlatformClient for GitHubPlatform {
  fn platform(&self) -> Platform {
    Platform::GitHub
  }

  fn bind_auth(&self, input: CredentialInput) -> FetchResult<Credential> {
    bind_token_or_basic(Platform::GitHub, TokenScheme::Token, input)
  }

  fn build_url(&self, base_url: &str, repository: &str) -> String {
    format!("{base_url}/repos/{repository}/pulls?state=all")
  }

  fn parse_page(&self, url: &str, link_header: Option<&str>, body: Value) -> FetchResult<Page> {
    array_page(Platform::GitHub, url, link_header, body)
  }

  fn normalize(&self, raw: &Value) -> FetchResult<PullRequestRecord> {
    let pr: GitHubPull = decode(Platform::GitHub, raw)?;

    let links = serde_json::to_string(&GitHubLinks {
      html: &pr.html_url,
      diff: &pr.diff_url,
    })
    .map_err(|e| FetchError::MalformedRecord(e.to_string()))?;

    let closed_source_branch = non_empty_or_none(pr.head.repo.and_then(|repo| repo.default_branch));
    let closed_by = non_empty_or_none(pr.head.user.and_then(|user| user.login));

    Ok(PullRequestRecord {
      id: pr.id,
      title: pr.title,
      description: pr.body,
      author: pr
        .user
        .and_then(|user| user.login)
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
      created_at: pr.created_at,
      state: pr.state.clone(),
      source_branch: pr.head.ref_name,
      destination_branch: pr.base.ref_name,
      closed_source_branch: Some(closed_source_branch),
      source_commit: pr.head.sha,
      merge_commit: Some(non_empty_or_none(pr.merge_commit_sha)),
      destination_commit: Some(pr.base.sha),
      closed_by,
      extended: Some(ExtendedFields {
        reason: Some(pr.state),
        repository: pr.base.repo.and_then(|repo| repo.full_name),
        links: Some(links),
      }),
    })
  }

  fn failure_policy(&self) -> FailurePolicy {
    FailurePolicy::Truncate
  }

  fn diff_url(&self, links: &Value) -> Option<String> {
    links.get("diff").and_then(Value::as_str).map(str::to_string)
  }
}
