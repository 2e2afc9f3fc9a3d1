//! # Diff Downloads
//!
//! Reads the `Links` column back from the pull request table, downloads each
//! record's diff with the session's credential, and appends `ID, Diff` rows.

use anyhow::{Context, Result};
use prfetch_core::{CsvStore, FetchError, FetchResult};
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::VcsClient;
use crate::consts::ACCEPT_DIFF;
use crate::platforms::client_for;
use crate::session::FetchSession;

/// Counts from a diff collection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
  pub fetched: usize,
  pub skipped: usize,
}

impl VcsClient {
  /// Download one diff as text
  pub async fn fetch_diff(&self, session: &FetchSession, url: &str) -> FetchResult<String> {
    let response = self
      .get(url, ACCEPT_DIFF, session.credential())
      .send()
      .await
      .map_err(|e| FetchError::transport(url, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::transport(url, format!("HTTP {status}")));
    }

    response
      .text()
      .await
      .map_err(|e| FetchError::transport(url, format!("Failed to read diff body: {e}")))
  }

  /// Download the diff of every stored record that links to one.
  ///
  /// The diff table is reset first. Rows whose `Links` cell is not JSON or has
  /// no diff URL are skipped with a warning; a failed download stops the run
  /// with the rows written so far kept on disk. `on_row` is called with each
  /// row's ID once it has been downloaded or skipped.
  pub async fn collect_diffs<F>(&self, session: &FetchSession, store: &CsvStore, mut on_row: F) -> Result<DiffSummary>
  where
    F: FnMut(&str),
  {
    let platform = client_for(session.platform());
    let stored = store.read_links()?;
    store.reset_diffs()?;

    let mut summary = DiffSummary::default();
    for row in stored {
      let diff_url = serde_json::from_str::<Value>(&row.links)
        .ok()
        .and_then(|links| platform.diff_url(&links));
      let Some(diff_url) = diff_url else {
        warn!("Pull request {} has no diff link, skipping", row.id);
        summary.skipped += 1;
        on_row(&row.id);
        continue;
      };

      debug!("Downloading diff for {} from {diff_url}", row.id);
      let diff = self.fetch_diff(session, &diff_url).await?;
      store
        .append_diff(&row.id, &diff)
        .with_context(|| format!("Failed to store diff for {}", row.id))?;
      on_row(&row.id);
      summary.fetched += 1;
    }

    Ok(summary)
  }
}
