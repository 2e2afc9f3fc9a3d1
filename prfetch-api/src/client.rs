//! # HTTP Client
//!
//! Thin wrapper around `reqwest::Client` that applies the common headers and
//! sends a bound [`Credential`] the way its platform expects.

use anyhow::{Context, Result};
use prfetch_core::creds::{Credential, TokenScheme};
use reqwest::{Client, RequestBuilder};

use crate::consts::{ACCEPT, PRIVATE_TOKEN_HEADER, USER_AGENT};

/// Represents a REST client shared by every platform
#[derive(Debug, Clone)]
pub struct VcsClient {
  pub(crate) client: Client,
}

impl VcsClient {
  /// Create a new client
  pub fn new() -> Result<Self> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { client })
  }

  /// Build an authenticated GET request with the given `Accept` value
  pub(crate) fn get(&self, url: &str, accept: &str, credential: Option<&Credential>) -> RequestBuilder {
    let request = self.client.get(url).header("Accept", accept);
    match credential {
      Some(credential) => authorize(request, credential),
      None => request,
    }
  }

  /// Build an authenticated GET request for a JSON listing
  pub(crate) fn get_json(&self, url: &str, credential: Option<&Credential>) -> RequestBuilder {
    self.get(url, ACCEPT, credential)
  }
}

/// Attach a credential to a request.
///
/// GitLab private tokens go in the `PRIVATE-TOKEN` header; GitHub tokens are
/// basic auth with the literal user `token`; username/password pairs are plain
/// basic auth.
pub fn authorize(request: RequestBuilder, credential: &Credential) -> RequestBuilder {
  match credential {
    Credential::Token {
      scheme: TokenScheme::PrivateToken,
      token,
    } => request.header(PRIVATE_TOKEN_HEADER, token),
    Credential::Token {
      scheme: TokenScheme::Token,
      token,
    } => request.basic_auth(TokenScheme::Token.as_str(), Some(token)),
    Credential::Basic { username, password } => request.basic_auth(username, Some(password)),
  }
}

/// Create a client with the default configuration
pub fn create_vcs_client() -> Result<VcsClient> {
  VcsClient::new()
}
