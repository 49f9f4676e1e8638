//! Rendering primitives for CLI messages.

use super::context::UiContext;
use super::theme::{colors, styled, Badge};

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.display(ctx.unicode), kind.color(), ctx.color);

    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a hint line: "Hint: text" with dim styling.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    let label = styled("Hint:", colors::DIM, ctx.color);
    format!("{} {}", label, text)
}

/// Format an error message with optional hint on the next line.
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = vec![badge(ctx, Badge::Err, message)];
    if let Some(h) = error_hint {
        lines.push(hint(ctx, h));
    }
    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

/// Print a status line to stderr.
pub fn print_status(ctx: &UiContext, kind: Badge, message: &str) {
    eprintln!("{}", badge(ctx, kind, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_plain() {
        let ctx = UiContext::plain();
        assert_eq!(badge(&ctx, Badge::Ok, "Stored"), "[OK] Stored");
        assert_eq!(badge(&ctx, Badge::Warn, ""), "[WARN]");
    }

    #[test]
    fn test_error_message_with_hint() {
        let ctx = UiContext::plain();
        let e = error_message(&ctx, "Not found", Some("Run pastor create"));
        assert_eq!(e, "[ERR] Not found\nHint: Run pastor create");
    }

    #[test]
    fn test_error_message_without_hint() {
        let ctx = UiContext::plain();
        assert_eq!(error_message(&ctx, "Boom", None), "[ERR] Boom");
    }
}
