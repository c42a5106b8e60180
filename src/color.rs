//! Color utilities for terminal output
//!
//! Styles are semantic (`success`, `link`, `path`...) so every command renders
//! the same kind of information the same way, and all of them collapse to
//! plain text when colors are disabled.

use std::fmt::Display;
use std::io::IsTerminal;

use owo_colors::{OwoColorize, Style};

use crate::cli::ColorOption;

/// Color scheme for the application
pub struct ColorScheme {
  enabled: bool,
}

macro_rules! semantic_styles {
  ($($(#[$meta:meta])* $name:ident => $style:expr;)+) => {
    $(
      $(#[$meta])*
      pub fn $name<T: Display>(&self, text: T) -> String {
        self.paint(text, $style)
      }
    )+
  };
}

impl ColorScheme {
  /// Create a color scheme from the `--color` preference; `auto` enables
  /// colors only when stdout is a terminal.
  pub fn new(color_option: ColorOption) -> Self {
    let enabled = match color_option {
      ColorOption::Always => true,
      ColorOption::Never => false,
      ColorOption::Auto => std::io::stdout().is_terminal(),
    };

    Self { enabled }
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  fn paint<T: Display>(&self, text: T, style: Style) -> String {
    if self.enabled {
      text.style(style).to_string()
    } else {
      text.to_string()
    }
  }

  semantic_styles! {
    /// Completed operations (green)
    success => Style::new().green();
    /// Failures (bright red, bold)
    error => Style::new().bright_red().bold();
    /// Non-fatal problems (yellow)
    warning => Style::new().yellow();
    info => Style::new().cyan();
    /// Labels and names (bright white, bold)
    emphasis => Style::new().bright_white().bold();
    /// URLs (blue, underlined)
    link => Style::new().blue().underline();
    path => Style::new().magenta();
    number => Style::new().bright_blue();
    code => Style::new().bright_green();
    /// Secondary details (dimmed)
    dimmed => Style::new().dimmed();
    progress => Style::new().bright_cyan();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn disabled_scheme_returns_plain_text() {
    let scheme = ColorScheme::new(ColorOption::Never);
    assert!(!scheme.is_enabled());
    assert_eq!(scheme.success("ok"), "ok");
    assert_eq!(scheme.error("failed"), "failed");
    assert_eq!(scheme.link("http://localhost:8080/rest"), "http://localhost:8080/rest");
  }

  #[test]
  fn enabled_scheme_adds_ansi_codes() {
    let scheme = ColorScheme::new(ColorOption::Always);
    assert!(scheme.is_enabled());
    for styled in [
      scheme.success("x"),
      scheme.error("x"),
      scheme.warning("x"),
      scheme.info("x"),
      scheme.emphasis("x"),
      scheme.link("x"),
      scheme.path("x"),
      scheme.number("x"),
      scheme.code("x"),
      scheme.dimmed("x"),
      scheme.progress("x"),
    ] {
      assert!(styled.contains('\u{1b}'), "missing escape in {styled:?}");
      assert!(styled.contains('x'));
    }
  }
}
