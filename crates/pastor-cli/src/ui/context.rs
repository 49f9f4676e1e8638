//! UI context for environment detection.

use std::io::IsTerminal;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
}

impl UiContext {
    /// Create context for messages written to stderr.
    ///
    /// Status and error lines go to stderr so that stdout carries nothing
    /// but requested secrets and listings.
    pub fn from_env() -> Self {
        let is_tty = std::io::stderr().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            color: is_tty && !no_color_env && !term_is_dumb,
            unicode: is_tty && !term_is_dumb,
        }
    }

    /// Context with no styling.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            color: false,
            unicode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_has_no_styling() {
        let ctx = UiContext::plain();
        assert!(!ctx.color);
        assert!(!ctx.unicode);
    }
}
