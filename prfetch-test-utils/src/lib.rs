//! Test utilities shared across the prfetch workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary home directories holding a `.netrc` ([`NetrcGuard`])
//! - Temporary `prfetch.toml` files ([`ConfigFileGuard`])
//! - Raw API payloads for each platform ([`fixtures`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod fixtures;
pub mod netrc;

// Re-export commonly used items
pub use config::ConfigFileGuard;
pub use netrc::NetrcGuard;
