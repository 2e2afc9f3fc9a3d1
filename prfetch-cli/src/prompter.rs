//! # Prompter
//!
//! The questions the interactive flow asks, behind a trait so the flow can be
//! driven by dialoguer in a terminal or by a script in tests.

use anyhow::{Result, bail};
use dialoguer::{Confirm, Input, Password, Select};
use prfetch_core::prompts::prfetch_theme;

/// Source of answers for interactive prompts
pub trait Prompter {
  /// Pick one of `items`, returning its index
  fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;

  /// Answer a yes/no question
  fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

  /// Enter a line of text
  fn input(&mut self, prompt: &str, allow_empty: bool) -> Result<String>;

  /// Enter a secret without echo
  fn password(&mut self, prompt: &str) -> Result<String>;
}

/// Terminal prompts rendered with the prfetch theme
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
  fn ensure_attended(prompt: &str) -> Result<()> {
    if !console::user_attended() {
      bail!("'{prompt}' needs an answer but prfetch is not running in a terminal; pass it as a flag instead");
    }
    Ok(())
  }
}

impl Prompter for DialoguerPrompter {
  fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
    Self::ensure_attended(prompt)?;
    Ok(
      Select::with_theme(&prfetch_theme())
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()?,
    )
  }

  fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
    Self::ensure_attended(prompt)?;
    Ok(
      Confirm::with_theme(&prfetch_theme())
        .with_prompt(prompt)
        .default(default)
        .interact()?,
    )
  }

  fn input(&mut self, prompt: &str, allow_empty: bool) -> Result<String> {
    Self::ensure_attended(prompt)?;
    let value: String = Input::with_theme(&prfetch_theme())
      .with_prompt(prompt)
      .allow_empty(allow_empty)
      .interact_text()?;
    Ok(value.trim().to_string())
  }

  fn password(&mut self, prompt: &str) -> Result<String> {
    Self::ensure_attended(prompt)?;
    Ok(
      Password::with_theme(&prfetch_theme())
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?,
    )
  }
}
