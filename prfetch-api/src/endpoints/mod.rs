//! # API Endpoints
//!
//! Request loops built on [`crate::VcsClient`]: paginated pull request
//! listings and diff downloads.

pub mod diffs;
pub mod pulls;
