//! # Output Formatting
//!
//! Formatted output functions with colors, emojis, and consistent styling for
//! the audit narration and report listings.

use owo_colors::OwoColorize;
use {clap, emojis};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Install the mode as the global `owo-colors` override
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      ColorMode::Auto => owo_colors::unset_override(),
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("white_check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("x", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information_source", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Print a bullet item, indented by `depth` levels
pub fn print_bullet(depth: usize, item: &str) {
  println!("{}- {}", "  ".repeat(depth), item);
}

/// Format a space or project key
pub fn format_key(key: &str) -> String {
  key.bright_cyan().bold().to_string()
}

/// Format a URL
pub fn format_url(url: &str) -> String {
  url.bright_green().underline().to_string()
}

/// Format a placeholder such as `(no access)`
pub fn format_placeholder(text: &str) -> String {
  text.bright_black().italic().to_string()
}

/// Format a file path
pub fn format_path(path: &str) -> String {
  path.purple().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_emoji_or_default() {
    let result = get_emoji_or_default("warning", "⚠");
    assert!(!result.is_empty());

    let result = get_emoji_or_default("nonexistent_emoji", "fallback");
    assert_eq!(result, "fallback");
  }

  #[test]
  fn test_format_functions_keep_text() {
    assert!(format_key("ENG").contains("ENG"));
    assert!(format_url("https://acme.atlassian.net").contains("https://acme.atlassian.net"));
    assert!(format_placeholder("(no access)").contains("(no access)"));
    assert!(format_path("/tmp/report.csv").contains("/tmp/report.csv"));
  }
}
