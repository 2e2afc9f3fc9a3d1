//! # Canonical Pull Request Record
//!
//! The flat row every platform's pull requests are normalized into before
//! they are written to CSV. Field presence and the `"None"` sentinel follow
//! each platform's historical CSV layout, so consumers keyed on those files
//! keep working; the normalizers in `prfetch-api` decide which convention a
//! field gets.

use serde::Serialize;

use crate::platform::Platform;

/// Literal written when a guarded field is absent
pub const NONE_SENTINEL: &str = "None";

/// Author placeholder when the platform omits the author's name
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Columns shared by every platform, in output order
pub const BASE_COLUMNS: [&str; 13] = [
  "ID",
  "Title",
  "Description",
  "Author",
  "Date",
  "State",
  "Source Branch",
  "Destination Branch",
  "Closed Source Branch",
  "Source Commit",
  "Merge Commit",
  "Destination Commit",
  "Closed By",
];

/// Columns only GitHub and Bitbucket rows carry
pub const EXTENDED_COLUMNS: [&str; 3] = ["Reason", "Repository", "Links"];

/// Header row for a platform's pull request table
pub fn header_for(platform: Platform) -> Vec<&'static str> {
  let mut header = BASE_COLUMNS.to_vec();
  if platform.has_extended_columns() {
    header.extend(EXTENDED_COLUMNS);
  }
  header
}

/// The trailing columns present for GitHub and Bitbucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedFields {
  pub reason: Option<String>,
  pub repository: Option<String>,
  /// Relation name to URL mapping, encoded as a JSON object string
  pub links: Option<String>,
}

/// One normalized pull or merge request.
///
/// `Option` fields render as an empty cell when `None`; the `"None"` sentinel
/// is stored as a literal string by the normalizers that use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRecord {
  pub id: u64,
  pub title: String,
  pub description: Option<String>,
  pub author: String,
  pub created_at: String,
  pub state: String,
  pub source_branch: String,
  pub destination_branch: String,
  pub closed_source_branch: Option<String>,
  pub source_commit: String,
  pub merge_commit: Option<String>,
  pub destination_commit: Option<String>,
  pub closed_by: String,
  pub extended: Option<ExtendedFields>,
}

impl PullRequestRecord {
  /// Render the record as CSV cells in header order
  pub fn to_row(&self) -> Vec<String> {
    let cell = |value: &Option<String>| value.clone().unwrap_or_default();

    let mut row = vec![
      self.id.to_string(),
      self.title.clone(),
      cell(&self.description),
      self.author.clone(),
      self.created_at.clone(),
      self.state.clone(),
      self.source_branch.clone(),
      self.destination_branch.clone(),
      cell(&self.closed_source_branch),
      self.source_commit.clone(),
      cell(&self.merge_commit),
      cell(&self.destination_commit),
      self.closed_by.clone(),
    ];

    if let Some(extended) = &self.extended {
      row.push(cell(&extended.reason));
      row.push(cell(&extended.repository));
      row.push(cell(&extended.links));
    }

    row
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_record() -> PullRequestRecord {
    PullRequestRecord {
      id: 42,
      title: "Add retries".to_string(),
      description: None,
      author: "octocat".to_string(),
      created_at: "2024-03-01T10:00:00Z".to_string(),
      state: "open".to_string(),
      source_branch: "feature/retries".to_string(),
      destination_branch: "main".to_string(),
      closed_source_branch: Some("main".to_string()),
      source_commit: "abc123".to_string(),
      merge_commit: Some(NONE_SENTINEL.to_string()),
      destination_commit: Some("def456".to_string()),
      closed_by: NONE_SENTINEL.to_string(),
      extended: None,
    }
  }

  #[test]
  fn test_header_for_gitlab_has_base_columns_only() {
    let header = header_for(Platform::GitLab);
    assert_eq!(header.len(), 13);
    assert_eq!(header.last(), Some(&"Closed By"));
  }

  #[test]
  fn test_header_for_github_and_bitbucket() {
    for platform in [Platform::GitHub, Platform::Bitbucket] {
      let header = header_for(platform);
      assert_eq!(header.len(), 16);
      assert_eq!(&header[13..], &["Reason", "Repository", "Links"]);
    }
  }

  #[test]
  fn test_row_renders_none_as_empty_cell() {
    let row = sample_record().to_row();
    assert_eq!(row.len(), 13);
    assert_eq!(row[0], "42");
    assert_eq!(row[2], "");
    assert_eq!(row[10], "None");
    assert_eq!(row[12], "None");
  }

  #[test]
  fn test_row_with_extended_fields() {
    let mut record = sample_record();
    record.extended = Some(ExtendedFields {
      reason: Some("open".to_string()),
      repository: None,
      links: Some(r#"{"self":"https://example.com/pr/42"}"#.to_string()),
    });

    let row = record.to_row();
    assert_eq!(row.len(), 16);
    assert_eq!(row[13], "open");
    assert_eq!(row[14], "");
    assert!(row[15].contains("example.com/pr/42"));
  }
}
