//! Progress indicators for long-running fetches.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use prfetch_core::Platform;

/// Spinner counting records as pages arrive
pub fn fetch_spinner(platform: Platform) -> ProgressBar {
  let spinner = ProgressBar::new_spinner();
  spinner.set_style(
    ProgressStyle::with_template("{spinner:.green} {msg} {pos} records ({elapsed})")
      .unwrap_or_else(|_| ProgressStyle::default_spinner()),
  );
  spinner.set_message(format!("Fetching {platform} pull requests"));
  spinner.enable_steady_tick(Duration::from_millis(100));
  spinner
}

/// Bar advancing once per downloaded diff
pub fn diff_bar(total: usize) -> ProgressBar {
  let bar = ProgressBar::new(total as u64);
  bar.set_style(
    ProgressStyle::with_template("{bar:40.green/white} {pos}/{len} diffs {msg}")
      .unwrap_or_else(|_| ProgressStyle::default_bar()),
  );
  bar
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fetch_spinner_counts_records() {
    let spinner = fetch_spinner(Platform::GitHub);
    spinner.inc(30);
    spinner.inc(12);
    assert_eq!(spinner.position(), 42);
    spinner.finish_and_clear();
  }

  #[test]
  fn test_diff_bar_length() {
    let bar = diff_bar(7);
    assert_eq!(bar.length(), Some(7));
  }
}
