//! # Pagination
//!
//! `Link` header parsing for link-paginated APIs and the result type of a
//! full pagination run.

use std::fmt;
use std::sync::LazyLock;

use prfetch_core::FetchError;
use regex::Regex;
use serde_json::Value;
use url::Url;

static LINK_ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<([^>]*)>\s*((?:;\s*[^;,]+)*)"#).expect("Failed to compile Link header regex")
});

static REL_PARAM_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(?i)rel\s*=\s*"?([^";]+)"?"#).expect("Failed to compile rel regex"));

/// One `<url>; rel="..."` entry of a `Link` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
  pub url: String,
  pub rels: Vec<String>,
}

/// Parse every entry of an RFC 8288 `Link` header.
///
/// A `rel` parameter may name several space-separated relations.
pub fn parse_link_header(header: &str) -> Vec<LinkEntry> {
  LINK_ENTRY_REGEX
    .captures_iter(header)
    .map(|captures| {
      let url = captures.get(1).map_or("", |m| m.as_str()).trim().to_string();
      let params = captures.get(2).map_or("", |m| m.as_str());
      let rels = REL_PARAM_REGEX
        .captures(params)
        .and_then(|rel| rel.get(1))
        .map(|rel| rel.as_str().split_whitespace().map(str::to_ascii_lowercase).collect())
        .unwrap_or_default();
      LinkEntry { url, rels }
    })
    .collect()
}

/// The `rel="next"` target of a `Link` header, resolved against the URL the
/// header came from
pub fn next_link(header: &str, current_url: &str) -> Option<String> {
  let target = parse_link_header(header)
    .into_iter()
    .find(|entry| entry.rels.iter().any(|rel| rel == "next"))?
    .url;
  if target.is_empty() {
    return None;
  }

  match Url::parse(current_url).and_then(|base| base.join(&target)) {
    Ok(resolved) => Some(resolved.to_string()),
    Err(_) => Some(target),
  }
}

/// Why a pagination run stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
  /// The last page had no next link
  Exhausted,
  /// More than `limit` records were accumulated before the next request
  LimitReached { limit: usize, fetched: usize },
  /// Page `page` (1-based) failed; earlier pages are kept
  Truncated { page: usize, error: FetchError },
}

impl StopReason {
  /// Whether the run ended early because of a failed request
  pub const fn is_truncated(&self) -> bool {
    matches!(self, Self::Truncated { .. })
  }
}

impl fmt::Display for StopReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Exhausted => f.write_str("all pages fetched"),
      Self::LimitReached { limit, fetched } => {
        write!(f, "stopped after {fetched} records (limit {limit})")
      }
      Self::Truncated { page, error } => write!(f, "page {page} failed, keeping earlier pages: {error}"),
    }
  }
}

/// Raw records in API order and the reason fetching stopped
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
  pub records: Vec<Value>,
  pub stop: StopReason,
}
