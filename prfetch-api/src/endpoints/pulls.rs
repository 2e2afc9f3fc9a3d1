//! # Pull Request Listing
//!
//! The pagination loop shared by every platform. Each iteration requests the
//! session's current URL, hands the response to the platform client for
//! splitting, and advances the session. GitHub and GitLab stop early once the
//! record limit is passed and keep earlier pages when a request fails;
//! Bitbucket fails the whole fetch instead.

use prfetch_core::{FetchError, FetchResult, Platform, PullRequestRecord};
use reqwest::header::LINK;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::VcsClient;
use crate::pagination::{FetchOutcome, StopReason};
use crate::platforms::{FailurePolicy, Page, PlatformClient, client_for};
use crate::session::FetchSession;

impl VcsClient {
  /// Fetch and split a single listing page
  pub async fn fetch_page(&self, session: &FetchSession, url: &str) -> FetchResult<Page> {
    let platform = client_for(session.platform());

    let response = self
      .get_json(url, session.credential())
      .send()
      .await
      .map_err(|e| FetchError::transport(url, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::transport(url, format!("HTTP {status}")));
    }

    let link_header = response
      .headers()
      .get(LINK)
      .and_then(|value| value.to_str().ok())
      .map(str::to_string);

    let body: Value = response
      .json()
      .await
      .map_err(|e| FetchError::transport(url, format!("Failed to parse response body: {e}")))?;

    platform.parse_page(url, link_header.as_deref(), body)
  }

  /// Walk every page of the session's listing
  pub async fn fetch_all(&self, session: &mut FetchSession) -> FetchResult<FetchOutcome> {
    self.fetch_all_with(session, |_| {}).await
  }

  /// Walk every page of the session's listing, calling `on_page` with the
  /// number of records each successful page added
  pub async fn fetch_all_with<F>(&self, session: &mut FetchSession, mut on_page: F) -> FetchResult<FetchOutcome>
  where
    F: FnMut(usize),
  {
    let platform = client_for(session.platform());
    let mut records = Vec::new();
    let mut page_number = 0;

    while let Some(url) = session.next_url().map(str::to_string) {
      if session.limit_exceeded() {
        let limit = session.limit().unwrap_or_default();
        info!("Record limit {limit} passed after {} records, not requesting {url}", session.fetched());
        return Ok(FetchOutcome {
          records,
          stop: StopReason::LimitReached {
            limit,
            fetched: session.fetched(),
          },
        });
      }

      page_number += 1;
      debug!("Requesting {} page {page_number}: {url}", session.platform());

      match self.fetch_page(session, &url).await {
        Ok(page) => {
          let count = page.records.len();
          debug!("Page {page_number} returned {count} records");
          on_page(count);
          session.record_page(count, page.next_url);
          records.extend(page.records);
        }
        Err(error) => match platform.failure_policy() {
          FailurePolicy::Abort => return Err(error),
          FailurePolicy::Truncate => {
            warn!(
              "Stopping {} fetch at page {page_number}, keeping {} records: {error}",
              session.platform(),
              records.len()
            );
            return Ok(FetchOutcome {
              records,
              stop: StopReason::Truncated {
                page: page_number,
                error,
              },
            });
          }
        },
      }
    }

    info!("Fetched {} {} records", records.len(), session.platform());
    Ok(FetchOutcome {
      records,
      stop: StopReason::Exhausted,
    })
  }
}

/// Normalize raw records in order, failing on the first malformed one
pub fn normalize_all(platform: Platform, raw: &[Value]) -> FetchResult<Vec<PullRequestRecord>> {
  let client: &dyn PlatformClient = client_for(platform);
  raw.iter().map(|record| client.normalize(record)).collect()
}

#[cfg(test)]
#[path = "tests/pulls_test.rs"]
mod tests;
