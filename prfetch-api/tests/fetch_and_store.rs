//! End-to-end: mocked listing → normalize → CSV, for every platform.

use prfetch_api::{FetchSession, StopReason, VcsClient, normalize_all};
use prfetch_core::{CredentialInput, CsvStore, Platform, RepositoryRef, locate};
use prfetch_test_utils::fixtures::{bitbucket_page, github_page, gitlab_page};
use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECORDS: u64 = 5;

fn single_page(platform: Platform) -> Value {
  match platform {
    Platform::GitLab => gitlab_page(1..RECORDS + 1),
    Platform::GitHub => github_page(1..RECORDS + 1),
    Platform::Bitbucket => bitbucket_page(1..RECORDS + 1, None),
  }
}

fn credential(platform: Platform) -> CredentialInput {
  match platform {
    Platform::Bitbucket => CredentialInput::basic("bb-user", "app-pass"),
    _ => CredentialInput::Token("token-value".to_string()),
  }
}

#[tokio::test]
async fn test_single_page_yields_header_plus_rows() -> anyhow::Result<()> {
  for platform in Platform::ALL {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200).set_body_json(single_page(platform)))
      .expect(1)
      .mount(&server)
      .await;

    let temp_dir = TempDir::new()?;
    let store = CsvStore::in_dir(temp_dir.path());
    store.reset(platform)?;

    let repository = locate(platform, &RepositoryRef::Url("https://host/ownerX/projY.git".to_string()))?;
    let mut session = FetchSession::new(platform, server.uri());
    session.bind_auth(credential(platform))?;
    session.set_target_url(&repository);

    let outcome = VcsClient::new()?.fetch_all(&mut session).await?;
    assert_eq!(outcome.stop, StopReason::Exhausted, "{platform}");

    let records = normalize_all(platform, &outcome.records)?;
    store.append(platform, &records)?;

    let mut reader = csv::ReaderBuilder::new()
      .has_headers(false)
      .from_path(store.pull_requests_path())?;
    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(rows.len() as u64, RECORDS + 1, "{platform}");

    let expected_columns = if platform.has_extended_columns() { 16 } else { 13 };
    assert!(rows.iter().all(|row| row.len() == expected_columns), "{platform}");

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests[0].url.path().contains("ownerX%2FprojY"), "{platform}");
  }
  Ok(())
}
