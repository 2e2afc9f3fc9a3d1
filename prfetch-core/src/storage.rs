//! # CSV Storage
//!
//! Append-only tables for normalized pull requests and their diffs. Every
//! write opens the file, appends, and closes it again, so rows written before
//! a later failure stay on disk.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::platform::Platform;
use crate::record::{PullRequestRecord, header_for};

/// Default pull request table
pub const DEFAULT_PULL_REQUESTS_FILE: &str = "pull_requests.csv";

/// Default diff table
pub const DEFAULT_DIFFS_FILE: &str = "diffs.csv";

/// Default output of joining pull requests with diffs
pub const DEFAULT_COMBINED_FILE: &str = "combined.csv";

/// Header of the diff table
pub const DIFF_COLUMNS: [&str; 2] = ["ID", "Diff"];

/// The `ID` and `Links` cells of one stored pull request row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredLinks {
  pub id: String,
  pub links: String,
}

/// Pull request and diff tables at fixed paths
#[derive(Debug, Clone)]
pub struct CsvStore {
  pull_requests_path: PathBuf,
  diffs_path: PathBuf,
}

impl CsvStore {
  /// Create a store over the given table paths
  pub fn new(pull_requests_path: impl Into<PathBuf>, diffs_path: impl Into<PathBuf>) -> Self {
    Self {
      pull_requests_path: pull_requests_path.into(),
      diffs_path: diffs_path.into(),
    }
  }

  /// Create a store using the default file names inside `dir`
  pub fn in_dir(dir: &Path) -> Self {
    Self::new(dir.join(DEFAULT_PULL_REQUESTS_FILE), dir.join(DEFAULT_DIFFS_FILE))
  }

  /// Path of the pull request table
  pub fn pull_requests_path(&self) -> &Path {
    &self.pull_requests_path
  }

  /// Path of the diff table
  pub fn diffs_path(&self) -> &Path {
    &self.diffs_path
  }

  /// Truncate both tables and write their header rows
  pub fn reset(&self, platform: Platform) -> Result<()> {
    debug!("Resetting {} for {platform}", self.pull_requests_path.display());
    write_header(&self.pull_requests_path, &header_for(platform))?;
    self.reset_diffs()
  }

  /// Truncate the diff table and write its header row
  pub fn reset_diffs(&self) -> Result<()> {
    write_header(&self.diffs_path, &DIFF_COLUMNS)
  }

  /// Append records to the pull request table.
  ///
  /// A missing or empty table is initialized with the platform's header
  /// first. Returns the number of rows written.
  pub fn append(&self, platform: Platform, records: &[PullRequestRecord]) -> Result<usize> {
    if is_missing_or_empty(&self.pull_requests_path) {
      write_header(&self.pull_requests_path, &header_for(platform))?;
    }

    let mut writer = open_for_append(&self.pull_requests_path)?;
    for record in records {
      writer
        .write_record(record.to_row())
        .with_context(|| format!("Failed to write pull request {}", record.id))?;
    }
    writer
      .flush()
      .with_context(|| format!("Failed to flush {}", self.pull_requests_path.display()))?;

    debug!("Appended {} rows to {}", records.len(), self.pull_requests_path.display());
    Ok(records.len())
  }

  /// Append one `ID, Diff` row to the diff table
  pub fn append_diff(&self, id: &str, diff: &str) -> Result<()> {
    if is_missing_or_empty(&self.diffs_path) {
      self.reset_diffs()?;
    }

    let mut writer = open_for_append(&self.diffs_path)?;
    writer
      .write_record([id, diff])
      .with_context(|| format!("Failed to write diff for {id}"))?;
    writer
      .flush()
      .with_context(|| format!("Failed to flush {}", self.diffs_path.display()))
  }

  /// Read the `ID` and `Links` cells of every stored pull request
  pub fn read_links(&self) -> Result<Vec<StoredLinks>> {
    let mut reader = open_reader(&self.pull_requests_path)?;
    let headers = reader.headers().context("Failed to read pull request header")?.clone();

    let id_index = column_index(&headers, "ID", &self.pull_requests_path)?;
    let links_index = headers.iter().position(|name| name == "Links").with_context(|| {
      format!(
        "{} has no Links column; diffs are only available for GitHub and Bitbucket tables",
        self.pull_requests_path.display()
      )
    })?;

    let mut stored = Vec::new();
    for row in reader.records() {
      let row = row.context("Failed to read pull request row")?;
      stored.push(StoredLinks {
        id: row.get(id_index).unwrap_or_default().to_string(),
        links: row.get(links_index).unwrap_or_default().to_string(),
      });
    }
    Ok(stored)
  }

  /// Inner-join the pull request and diff tables on `ID` and write the result
  /// to `output`.
  ///
  /// Rows keep the pull request table's order; a pull request with several
  /// diff rows appears once per diff. Returns the number of rows written.
  pub fn combine(&self, output: &Path) -> Result<usize> {
    let mut diff_reader = open_reader(&self.diffs_path)?;
    let diff_headers = diff_reader.headers().context("Failed to read diff header")?.clone();
    let diff_id_index = column_index(&diff_headers, "ID", &self.diffs_path)?;
    let diff_index = column_index(&diff_headers, "Diff", &self.diffs_path)?;

    let mut diffs: HashMap<String, Vec<String>> = HashMap::new();
    for row in diff_reader.records() {
      let row = row.context("Failed to read diff row")?;
      let id = row.get(diff_id_index).unwrap_or_default().to_string();
      let diff = row.get(diff_index).unwrap_or_default().to_string();
      diffs.entry(id).or_default().push(diff);
    }

    let mut reader = open_reader(&self.pull_requests_path)?;
    let headers = reader.headers().context("Failed to read pull request header")?.clone();
    let id_index = column_index(&headers, "ID", &self.pull_requests_path)?;

    let mut writer = csv::Writer::from_path(output).with_context(|| format!("Failed to create {}", output.display()))?;
    let mut combined_header: Vec<&str> = headers.iter().collect();
    combined_header.push("Diff");
    writer.write_record(&combined_header)?;

    let mut written = 0;
    for row in reader.records() {
      let row = row.context("Failed to read pull request row")?;
      let Some(matches) = row.get(id_index).and_then(|id| diffs.get(id)) else {
        continue;
      };
      for diff in matches {
        let mut cells: Vec<&str> = row.iter().collect();
        cells.push(diff);
        writer.write_record(&cells)?;
        written += 1;
      }
    }
    writer.flush().with_context(|| format!("Failed to flush {}", output.display()))?;

    Ok(written)
  }
}

fn is_missing_or_empty(path: &Path) -> bool {
  path.metadata().map(|metadata| metadata.len() == 0).unwrap_or(true)
}

fn write_header(path: &Path, header: &[&str]) -> Result<()> {
  let mut writer = csv::Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;
  writer.write_record(header)?;
  writer.flush().with_context(|| format!("Failed to flush {}", path.display()))
}

fn open_for_append(path: &Path) -> Result<csv::Writer<File>> {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("Failed to open {} for appending", path.display()))?;

  Ok(csv::WriterBuilder::new().has_headers(false).from_writer(file))
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
  csv::ReaderBuilder::new()
    .flexible(true)
    .from_path(path)
    .with_context(|| format!("Failed to open {}", path.display()))
}

fn column_index(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize> {
  headers
    .iter()
    .position(|column| column == name)
    .with_context(|| format!("{} has no {name} column", path.display()))
}
