//! # prfetch CLI Library
//!
//! Command tree, interactive fetch orchestration, and terminal progress for
//! the `prfetch` binary.

pub mod cli;
pub mod completion;
pub mod orchestrator;
pub mod progress;
pub mod prompter;
