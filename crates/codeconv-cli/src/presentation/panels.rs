//! Text rendering of panel trees.

use std::fmt::Write as _;

use codeconv_core::PanelItem;

/// Widest description shown on one line.
const DESCRIPTION_WIDTH: usize = 72;

/// Truncates a string to at most `max_chars` characters, adding "..." if needed.
///
/// ```rust
/// use codeconv_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Render a panel as an indented tree under `title`.
///
/// Items with a command show the session command that triggers them.
/// Multi-line labels (the VO result summary) keep their line breaks.
pub fn render_panel(title: &str, items: &[PanelItem]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    for item in items {
        render_item(&mut out, item, 0);
    }
    out
}

fn render_item(out: &mut String, item: &PanelItem, depth: usize) {
    let indent = "  ".repeat(depth);
    let marker = if item.collapsible { "▾" } else { "•" };

    let mut lines = item.label.lines();
    let first = lines.next().unwrap_or_default();
    let _ = write!(out, "{indent}{marker} {first}");
    if !item.description.is_empty() {
        let _ = write!(out, ": {}", truncate_string(&item.description, DESCRIPTION_WIDTH));
    }
    if let Some(command) = item.command {
        let _ = write!(out, "  [{}]", command.session_hint());
    }
    out.push('\n');
    for continuation in lines {
        let _ = writeln!(out, "{indent}  {continuation}");
    }

    for child in &item.children {
        render_item(out, child, depth + 1);
    }
}
