//! # prfetch API Clients
//!
//! REST access to GitLab merge requests, GitHub pull requests and Bitbucket
//! pull requests: credential binding, paginated listing with per-platform
//! stop rules, record normalization, and diff downloads.

pub mod auth;
pub mod client;
pub mod consts;
pub mod endpoints;
pub mod pagination;
pub mod platforms;
pub mod session;

// Re-export the client
pub use client::{VcsClient, create_vcs_client};
// Re-export endpoint helpers
pub use endpoints::diffs::DiffSummary;
pub use endpoints::pulls::normalize_all;
// Re-export pagination and session types
pub use pagination::{FetchOutcome, StopReason};
pub use platforms::{FailurePolicy, PlatformClient, client_for};
pub use session::FetchSession;
