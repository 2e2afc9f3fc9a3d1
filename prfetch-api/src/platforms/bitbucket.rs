//! Bitbucket Cloud pull requests
//! (`GET /2.0/repositories/{workspace}/{repo_slug}/pullrequests`).
//!
//! Pages carry their records in `values` and the next page URL in `next`.

use prfetch_core::record::{NONE_SENTINEL, UNKNOWN_AUTHOR};
use prfetch_core::{
  Credential, CredentialInput, ExtendedFields, FetchError, FetchResult, Platform, PullRequestRecord,
};
use serde::Deserialize;
use serde_json::Value;

use super::{FailurePolicy, Page, PlatformClient, decode, present};

/// Bitbucket Cloud REST 2.0
#[derive(Debug, Clone, Copy, Default)]
pub struct BitbucketPlatform;

#[derive(Debug, Deserialize)]
struct BitbucketPage {
  values: Vec<Value>,
  next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BitbucketPullRequest {
  id: u64,
  title: String,
  description: Option<String>,
  author: Option<BitbucketAccount>,
  created_on: String,
  state: String,
  source: BitbucketEndpoint,
  destination: BitbucketEndpoint,
  #[serde(default, deserialize_with = "present")]
  closed_source_branch: Option<Option<Value>>,
  merge_commit: Option<BitbucketCommit>,
  closed_by: Option<BitbucketAccount>,
  #[serde(default, deserialize_with = "present")]
  reason: Option<Option<String>>,
  links: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct BitbucketEndpoint {
  branch: BitbucketBranch,
  commit: Option<BitbucketCommit>,
  repository: Option<BitbucketRepository>,
}

#[derive(Debug, Deserialize)]
struct BitbucketBranch {
  name: String,
}

#[derive(Debug, Deserialize)]
struct BitbucketCommit {
  hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BitbucketRepository {
  full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BitbucketAccount {
  #[serde(default, deserialize_with = "present")]
  display_name: Option<Option<String>>,
}

/// Render a JSON scalar the way the CSV has always shown it: booleans as
/// `True`/`False`, strings unquoted
fn scalar_cell(value: Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::Bool(true) => Some("True".to_string()),
    Value::Bool(false) => Some("False".to_string()),
    Value::String(text) => Some(text),
    other => Some(other.to_string()),
  }
}

/// An account's display name: `absent` when there is no account or it has no
/// `display_name` key, an empty cell when the key is null
fn display_name(account: Option<BitbucketAccount>, absent: &str) -> String {
  match account.and_then(|account| account.display_name) {
    None => absent.to_string(),
    Some(name) => name.unwrap_or_default(),
  }
}

fn commit_hash(commit: Option<BitbucketCommit>) -> Option<String> {
  commit.and_then(|commit| commit.hash)
}

impl PlatformClient for BitbucketPlatform {
  fn platform(&self) -> Platform {
    Platform::Bitbucket
  }

  fn bind_auth(&self, input: CredentialInput) -> FetchResult<Credential> {
    match input {
      CredentialInput::Token(_) => Err(FetchError::MissingCredentials(
        "Bitbucket requires a username and app password".to_string(),
      )),
      CredentialInput::Basic { username, password } if username.is_empty() && password.is_empty() => Err(
        FetchError::MissingCredentials("Bitbucket username and password cannot both be empty".to_string()),
      ),
      CredentialInput::Basic { username, password } => Ok(Credential::Basic { username, password }),
    }
  }

  fn build_url(&self, base_url: &str, repository: &str) -> String {
    format!("{base_url}/2.0/repositories/{repository}/pullrequests?state=ALL")
  }

  fn parse_page(&self, url: &str, _link_header: Option<&str>, body: Value) -> FetchResult<Page> {
    let page = BitbucketPage::deserialize(body)
      .map_err(|e| FetchError::transport(url, format!("unexpected Bitbucket page body: {e}")))?;

    // An empty cursor ends the listing like a missing one
    Ok(Page {
      records: page.values,
      next_url: page.next.filter(|next| !next.trim().is_empty()),
    })
  }

  fn normalize(&self, raw: &Value) -> FetchResult<PullRequestRecord> {
    let pr: BitbucketPullRequest = decode(Platform::Bitbucket, raw)?;

    let closed_source_branch = match pr.closed_source_branch {
      None => Some(NONE_SENTINEL.to_string()),
      Some(value) => value.and_then(scalar_cell),
    };
    let reason = match pr.reason {
      None => Some(NONE_SENTINEL.to_string()),
      Some(value) => value,
    };
    let links = pr
      .links
      .map(|links| serde_json::to_string(&links))
      .transpose()
      .map_err(|e| FetchError::MalformedRecord(e.to_string()))?;

    Ok(PullRequestRecord {
      id: pr.id,
      title: pr.title,
      description: pr.description,
      author: display_name(pr.author, UNKNOWN_AUTHOR),
      created_at: pr.created_on,
      state: pr.state,
      source_branch: pr.source.branch.name,
      destination_branch: pr.destination.branch.name,
      closed_source_branch,
      source_commit: commit_hash(pr.source.commit).unwrap_or_default(),
      merge_commit: Some(commit_hash(pr.merge_commit).unwrap_or_else(|| NONE_SENTINEL.to_string())),
      destination_commit: commit_hash(pr.destination.commit),
      closed_by: display_name(pr.closed_by, NONE_SENTINEL),
      extended: Some(ExtendedFields {
        reason,
        repository: pr.destination.repository.and_then(|repo| repo.full_name),
        links,
      }),
    })
  }

  fn failure_policy(&self) -> FailurePolicy {
    FailurePolicy::Abort
  }

  fn diff_url(&self, links: &Value) -> Option<String> {
    links
      .get("diff")
      .and_then(|diff| diff.get("href"))
      .and_then(Value::as_str)
      .map(str::to_string)
  }
}

#[cfg(test)]
mod tests {
  use prfetch_test_utils::fixtures::{bitbucket_page, bitbucket_pull_request};
  use serde_json::json;

  use super::*;

  #[test]
  fn test_normalize_complete_record() {
    let record = BitbucketPlatform.normalize(&bitbucket_pull_request(11)).unwrap();

    assert_eq!(record.id, 11);
    assert_eq!(record.author, "Bit Bucketeer");
    assert_eq!(record.created_at, "2024-04-10T08:15:00.000000+00:00");
    assert_eq!(record.source_branch, "bugfix/11");
    assert_eq!(record.destination_branch, "master");
    assert_eq!(record.closed_source_branch.as_deref(), Some("True"));
    assert_eq!(record.source_commit, "src0011");
    assert_eq!(record.merge_commit.as_deref(), Some("merge0011"));
    assert_eq!(record.destination_commit.as_deref(), Some("dst0011"));
    assert_eq!(record.closed_by, "Reviewer");

    let extended = record.extended.unwrap();
    assert_eq!(extended.reason.as_deref(), Some(""));
    assert_eq!(extended.repository.as_deref(), Some("team/service"));
    let links: Value = serde_json::from_str(extended.links.as_deref().unwrap()).unwrap();
    assert_eq!(
      links["diff"]["href"],
      "https://api.bitbucket.org/2.0/repositories/team/service/pullrequests/11/diff"
    );
  }

  #[test]
  fn test_missing_merge_commit_is_none_sentinel() {
    let mut raw = bitbucket_pull_request(1);
    raw["merge_commit"] = json!(null);
    assert_eq!(BitbucketPlatform.normalize(&raw).unwrap().merge_commit.as_deref(), Some("None"));

    raw.as_object_mut().unwrap().remove("merge_commit");
    assert_eq!(BitbucketPlatform.normalize(&raw).unwrap().merge_commit.as_deref(), Some("None"));
  }

  #[test]
  fn test_absent_optional_keys() {
    let mut raw = bitbucket_pull_request(2);
    let object = raw.as_object_mut().unwrap();
    object.remove("closed_source_branch");
    object.remove("reason");
    object.remove("author");
    object.insert("closed_by".to_string(), json!(null));

    let record = BitbucketPlatform.normalize(&raw).unwrap();
    assert_eq!(record.closed_source_branch.as_deref(), Some("None"));
    assert_eq!(record.author, "Unknown");
    assert_eq!(record.closed_by, "None");
    assert_eq!(record.extended.unwrap().reason.as_deref(), Some("None"));
  }

  #[test]
  fn test_null_display_names_are_empty_cells() {
    let mut raw = bitbucket_pull_request(5);
    raw["author"] = json!({ "display_name": null });
    raw["closed_by"] = json!({ "display_name": null });

    let record = BitbucketPlatform.normalize(&raw).unwrap();
    assert_eq!(record.author, "");
    assert_eq!(record.closed_by, "");

    raw["author"] = json!({ "type": "user" });
    raw["closed_by"] = json!({ "uuid": "{1}" });
    let record = BitbucketPlatform.normalize(&raw).unwrap();
    assert_eq!(record.author, "Unknown");
    assert_eq!(record.closed_by, "None");
  }

  #[test]
  fn test_closed_source_branch_false() {
    let mut raw = bitbucket_pull_request(3);
    raw["closed_source_branch"] = json!(false);
    assert_eq!(
      BitbucketPlatform.normalize(&raw).unwrap().closed_source_branch.as_deref(),
      Some("False")
    );
  }

  #[test]
  fn test_empty_pair_is_rejected() {
    let error = BitbucketPlatform.bind_auth(CredentialInput::basic("", "")).unwrap_err();
    assert!(matches!(error, FetchError::MissingCredentials(_)));

    let error = BitbucketPlatform
      .bind_auth(CredentialInput::Token("t".to_string()))
      .unwrap_err();
    assert!(matches!(error, FetchError::MissingCredentials(_)));

    let credential = BitbucketPlatform.bind_auth(CredentialInput::basic("bb", "pw")).unwrap();
    assert_eq!(credential.as_pair(), ("bb", "pw"));
  }

  #[test]
  fn test_parse_page_uses_body_cursor() {
    let url = "https://api.bitbucket.org/2.0/repositories/t%2Fs/pullrequests?state=ALL";
    let page = BitbucketPlatform
      .parse_page(url, None, bitbucket_page(1..3, Some("https://api.bitbucket.org/page2")))
      .unwrap();
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.next_url.as_deref(), Some("https://api.bitbucket.org/page2"));

    let last = BitbucketPlatform.parse_page(url, None, bitbucket_page(3..4, None)).unwrap();
    assert!(last.next_url.is_none());

    let mut null_next = bitbucket_page(3..4, None);
    null_next["next"] = json!(null);
    assert!(BitbucketPlatform.parse_page(url, None, null_next).unwrap().next_url.is_none());
  }

  #[test]
  fn test_page_without_values_is_a_transport_failure() {
    let error = BitbucketPlatform
      .parse_page("https://api.bitbucket.org/x", None, json!({ "error": { "message": "nope" } }))
      .unwrap_err();
    assert!(error.is_transport());
  }

  #[test]
  fn test_diff_url_from_links() {
    let raw = bitbucket_pull_request(4);
    assert_eq!(
      BitbucketPlatform.diff_url(&raw["links"]).as_deref(),
      Some("https://api.bitbucket.org/2.0/repositories/team/service/pullrequests/4/diff")
    );
  }
}
