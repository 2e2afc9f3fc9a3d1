//! # prfetch Core Library
//!
//! Shared building blocks for prfetch: the canonical pull request record and
//! its CSV layout, the supported platforms, repository references, credential
//! models, configuration, and terminal output helpers. The HTTP side lives in
//! `prfetch-api`; this crate never talks to the network.

pub mod config;
pub mod creds;
pub mod error;
pub mod locator;
pub mod output;
pub mod platform;
pub mod prompts;
pub mod record;
pub mod storage;

// Re-export main types
pub use config::{ConfigDirs, FetchConfig, get_config_dirs};
pub use creds::{Credential, CredentialInput, Credentials, TokenScheme};
pub use error::{FetchError, FetchResult};
pub use locator::{RepositoryRef, locate};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use platform::Platform;
pub use record::{ExtendedFields, PullRequestRecord};
pub use storage::CsvStore;
