//! GitLab merge requests (`GET /api/v4/projects/:id/merge_requests`).

use prfetch_core::record::{NONE_SENTINEL, UNKNOWN_AUTHOR};
use prfetch_core::{Credential, CredentialInput, FetchResult, Platform, PullRequestRecord, TokenScheme};
use serde::Deserialize;
use serde_json::Value;

use super::{FailurePolicy, Page, PlatformClient, array_page, bind_token_or_basic, decode, present};

/// GitLab REST v4
#[derive(Debug, Clone, Copy, Default)]
pub struct GitLabPlatform;

#[derive(Debug, Deserialize)]
struct GitLabMergeRequest {
  id: u64,
  title: String,
  description: Option<String>,
  author: Option<GitLabUser>,
  created_at: String,
  state: String,
  source_branch: String,
  target_branch: String,
  sha: Option<String>,
  #[serde(default, deserialize_with = "present")]
  merge_commit_sha: Option<Option<String>>,
  merged_by: Option<GitLabUser>,
}

#[derive(Debug, Deserialize)]
struct GitLabUser {
  #[serde(default, deserialize_with = "present")]
  username: Option<Option<String>>,
}

/// A user's handle: `absent` when there is no user or it has no `username`
/// key, an empty cell when the key is null
fn username(user: Option<GitLabUser>, absent: &str) -> String {
  match user.and_then(|user| user.username) {
    None => absent.to_string(),
    Some(name) => name.unwrap_or_default(),
  }
}

impl PlatformClient for GitLabPlatform {
  fn platform(&self) -> Platform {
    Platform::GitLab
  }

  fn bind_auth(&self, input: CredentialInput) -> FetchResult<Credential> {
    bind_token_or_basic(Platform::GitLab, TokenScheme::PrivateToken, input)
  }

  fn build_url(&self, base_url: &str, repository: &str) -> String {
    format!("{base_url}/api/v4/projects/{repository}/merge_requests?state=all")
  }

  fn parse_page(&self, url: &str, link_header: Option<&str>, body: Value) -> FetchResult<Page> {
    array_page(Platform::GitLab, url, link_header, body)
  }

  fn normalize(&self, raw: &Value) -> FetchResult<PullRequestRecord> {
    let mr: GitLabMergeRequest = decode(Platform::GitLab, raw)?;

    // Absent key: sentinel. Present null: empty cell.
    let merge_commit = match mr.merge_commit_sha {
      None => Some(NONE_SENTINEL.to_string()),
      Some(value) => value,
    };

    Ok(PullRequestRecord {
      id: mr.id,
      title: mr.title,
      description: mr.description,
      author: username(mr.author, UNKNOWN_AUTHOR),
      created_at: mr.created_at,
      state: mr.state,
      closed_source_branch: Some(mr.source_branch.clone()),
      source_branch: mr.source_branch,
      destination_branch: mr.target_branch,
      source_commit: mr.sha.unwrap_or_default(),
      destination_commit: merge_commit.clone(),
      merge_commit,
      closed_by: username(mr.merged_by, NONE_SENTINEL),
      extended: None,
    })
  }

  fn failure_policy(&self) -> FailurePolicy {
    FailurePolicy::Truncate
  }

  fn diff_url(&self, _links: &Value) -> Option<String> {
    None
  }
}

#[cfg(test)]
mod tests {
  use prfetch_test_utils::fixtures::gitlab_merge_request;
  use serde_json::json;

  use super::*;

  #[test]
  fn test_normalize_complete_record() {
    let record = GitLabPlatform.normalize(&gitlab_merge_request(8)).unwrap();

    assert_eq!(record.id, 8);
    assert_eq!(record.author, "gl-dev");
    assert_eq!(record.source_branch, "topic-8");
    assert_eq!(record.closed_source_branch.as_deref(), Some("topic-8"));
    assert_eq!(record.destination_branch, "main");
    assert_eq!(record.source_commit, "sha0008");
    assert_eq!(record.merge_commit.as_deref(), Some("merge0008"));
    assert_eq!(record.destination_commit, record.merge_commit);
    assert_eq!(record.closed_by, "maintainer");
    assert!(record.extended.is_none());
    assert_eq!(record.to_row().len(), 13);
  }

  #[test]
  fn test_absent_merge_commit_is_none_sentinel() {
    let mut raw = gitlab_merge_request(1);
    raw.as_object_mut().unwrap().remove("merge_commit_sha");

    let record = GitLabPlatform.normalize(&raw).unwrap();
    assert_eq!(record.merge_commit.as_deref(), Some("None"));
    assert_eq!(record.destination_commit.as_deref(), Some("None"));
  }

  #[test]
  fn test_null_merge_commit_is_empty_cell() {
    let mut raw = gitlab_merge_request(1);
    raw["merge_commit_sha"] = json!(null);

    let row = GitLabPlatform.normalize(&raw).unwrap().to_row();
    assert_eq!(row[10], "");
    assert_eq!(row[11], "");
  }

  #[test]
  fn test_author_without_username_is_unknown() {
    let mut raw = gitlab_merge_request(2);
    raw["author"] = json!({ "name": "No Handle" });
    assert_eq!(GitLabPlatform.normalize(&raw).unwrap().author, "Unknown");
  }

  #[test]
  fn test_null_usernames_are_empty_cells() {
    let mut raw = gitlab_merge_request(4);
    raw["author"] = json!({ "username": null });
    raw["merged_by"] = json!({ "username": null });

    let record = GitLabPlatform.normalize(&raw).unwrap();
    assert_eq!(record.author, "");
    assert_eq!(record.closed_by, "");
  }

  #[test]
  fn test_unmerged_has_no_closer() {
    let mut raw = gitlab_merge_request(3);
    raw["merged_by"] = json!(null);
    assert_eq!(GitLabPlatform.normalize(&raw).unwrap().closed_by, "None");

    raw["merged_by"] = json!({ "id": 5 });
    assert_eq!(GitLabPlatform.normalize(&raw).unwrap().closed_by, "None");
  }

  #[test]
  fn test_token_binds_to_private_token_scheme() {
    let credential = GitLabPlatform
      .bind_auth(CredentialInput::Token("glpat-1".to_string()))
      .unwrap();
    assert_eq!(credential.as_pair(), ("private_token", "glpat-1"));
  }

  #[test]
  fn test_last_page_has_no_next_url() {
    let page = GitLabPlatform
      .parse_page(
        "https://gitlab.com/api/v4/projects/1/merge_requests?state=all&page=3",
        Some(r#"<https://gitlab.com/api/v4/projects/1/merge_requests?state=all&page=1>; rel="first""#),
        json!([gitlab_merge_request(1), gitlab_merge_request(2)]),
      )
      .unwrap();
    assert_eq!(page.records.len(), 2);
    assert!(page.next_url.is_none());
  }

  #[test]
  fn test_no_diff_links() {
    assert!(GitLabPlatform.diff_url(&json!({ "diff": "x" })).is_none());
  }
}
