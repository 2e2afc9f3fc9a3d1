//! Raw API payloads shaped like each platform's pull request listing.
//!
//! Each builder returns a complete, well-formed object; tests remove or null
//! out individual keys to exercise the normalizers' guards.

use serde_json::{Value, json};

/// A GitHub `GET /repos/{owner}/{repo}/pulls` element
pub fn github_pull_request(id: u64) -> Value {
  json!({
    "id": id,
    "number": id,
    "title": format!("GitHub PR {id}"),
    "body": format!("Body of pull request {id}"),
    "state": "closed",
    "created_at": "2024-02-01T09:30:00Z",
    "html_url": format!("https://github.com/octo-org/hello-world/pull/{id}"),
    "diff_url": format!("https://github.com/octo-org/hello-world/pull/{id}.diff"),
    "merge_commit_sha": format!("merge{id:04}"),
    "user": { "login": "octocat" },
    "head": {
      "ref": format!("feature/{id}"),
      "sha": format!("head{id:04}"),
      "user": { "login": "forker" },
      "repo": { "default_branch": "main", "full_name": "forker/hello-world" }
    },
    "base": {
      "ref": "main",
      "sha": format!("base{id:04}"),
      "repo": { "default_branch": "main", "full_name": "octo-org/hello-world" }
    }
  })
}

/// A GitLab `GET /projects/:id/merge_requests` element
pub fn gitlab_merge_request(id: u64) -> Value {
  json!({
    "id": id,
    "iid": id,
    "title": format!("GitLab MR {id}"),
    "description": format!("Description of merge request {id}"),
    "state": "merged",
    "created_at": "2024-03-05T14:00:00.000Z",
    "author": { "username": "gl-dev", "name": "GitLab Dev" },
    "source_branch": format!("topic-{id}"),
    "target_branch": "main",
    "sha": format!("sha{id:04}"),
    "merge_commit_sha": format!("merge{id:04}"),
    "merged_by": { "username": "maintainer" }
  })
}

/// A Bitbucket `GET /2.0/repositories/{workspace}/{repo}/pullrequests` element
pub fn bitbucket_pull_request(id: u64) -> Value {
  json!({
    "id": id,
    "title": format!("Bitbucket PR {id}"),
    "description": format!("Description of pull request {id}"),
    "state": "MERGED",
    "created_on": "2024-04-10T08:15:00.000000+00:00",
    "author": { "display_name": "Bit Bucketeer", "type": "user" },
    "source": {
      "branch": { "name": format!("bugfix/{id}") },
      "commit": { "hash": format!("src{id:04}") },
      "repository": { "full_name": "team/service" }
    },
    "destination": {
      "branch": { "name": "master" },
      "commit": { "hash": format!("dst{id:04}") },
      "repository": { "full_name": "team/service" }
    },
    "closed_source_branch": true,
    "merge_commit": { "hash": format!("merge{id:04}") },
    "closed_by": { "display_name": "Reviewer" },
    "reason": "",
    "links": {
      "self": { "href": format!("https://api.bitbucket.org/2.0/repositories/team/service/pullrequests/{id}") },
      "diff": { "href": format!("https://api.bitbucket.org/2.0/repositories/team/service/pullrequests/{id}/diff") }
    }
  })
}

/// A JSON array of GitHub pull requests with consecutive IDs
pub fn github_page(ids: std::ops::Range<u64>) -> Value {
  Value::Array(ids.map(github_pull_request).collect())
}

/// A JSON array of GitLab merge requests with consecutive IDs
pub fn gitlab_page(ids: std::ops::Range<u64>) -> Value {
  Value::Array(ids.map(gitlab_merge_request).collect())
}

/// A Bitbucket page body: `values` plus an optional `next` cursor
pub fn bitbucket_page(ids: std::ops::Range<u64>, next: Option<&str>) -> Value {
  let values: Vec<Value> = ids.map(bitbucket_pull_request).collect();
  let mut page = json!({
    "pagelen": values.len(),
    "values": values,
  });
  if let Some(next) = next {
    page["next"] = Value::String(next.to_string());
  }
  page
}

/// A `Link` header value pointing at the next page
pub fn next_link(url: &str) -> String {
  format!("<{url}>; rel=\"next\"")
}
