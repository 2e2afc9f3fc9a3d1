//! # Prompts Module
//!
//! Custom dialoguer theme shared by prfetch's interactive prompts.

use console::Style;
use dialoguer::theme::ColorfulTheme;

/// Returns the dialoguer theme used for platform, credential and repository
/// prompts.
///
/// Cyan bold prompt text with a green `❯` on the active menu item.
pub fn prfetch_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
    active_item_style: Style::new().green(),
    ..ColorfulTheme::default()
  }
}
