//! # Credential Management
//!
//! Credential shapes as the user supplies them ([`CredentialInput`]) and as
//! they are bound for a platform ([`Credential`]), plus `.netrc` discovery for
//! the "default credentials" flow.

pub mod netrc;

use std::fmt;

/// A username/password pair read from a credential store
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"***")
      .finish()
  }
}

/// A credential as entered by the user, before it is bound to a platform
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialInput {
  /// Personal access token or app token
  Token(String),
  /// Username and password (or app password)
  Basic { username: String, password: String },
}

impl CredentialInput {
  /// Build a basic credential input
  pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self::Basic {
      username: username.into(),
      password: password.into(),
    }
  }
}

impl fmt::Debug for CredentialInput {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Token(_) => f.write_str("Token(***)"),
      Self::Basic { username, .. } => write!(f, "Basic({username}, ***)"),
    }
  }
}

/// Tag attached to a bound token credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScheme {
  /// GitHub personal access token, sent as basic auth with user `token`
  Token,
  /// GitLab private token, sent in the `PRIVATE-TOKEN` header
  PrivateToken,
}

impl TokenScheme {
  /// The literal tag for this scheme
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Token => "token",
      Self::PrivateToken => "private_token",
    }
  }
}

/// A credential bound to a platform's transport conventions
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
  Token { scheme: TokenScheme, token: String },
  Basic { username: String, password: String },
}

impl Credential {
  /// The `(tag, secret)` pair this credential is sent as
  pub fn as_pair(&self) -> (&str, &str) {
    match self {
      Self::Token { scheme, token } => (scheme.as_str(), token),
      Self::Basic { username, password } => (username, password),
    }
  }
}

impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Token { scheme, .. } => write!(f, "Token({}, ***)", scheme.as_str()),
      Self::Basic { username, .. } => write!(f, "Basic({username}, ***)"),
    }
  }
}
