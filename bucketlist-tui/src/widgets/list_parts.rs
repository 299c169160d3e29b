//! Header, separator, empty placeholder and error banner.

use crossterm::style::Color;

use super::{fit, Line, Span, Style, HEADER_BG};

/// Shown instead of the list when there are no items.
pub const EMPTY_TEXT: &str = "You have no items! Add some to this list";

/// The list name, centred on a dark bar.
pub fn list_header(name: &str, width: usize) -> Line {
    let name = fit(name, width);
    let left = width.saturating_sub(unicode_width::UnicodeWidthStr::width(name.as_str())) / 2;
    let style = Style::default().fg(Color::White).bg(HEADER_BG).bold();
    Line::new(vec![
        Span::styled(" ".repeat(left), style),
        Span::styled(name, style),
    ])
    .fill(HEADER_BG)
}

pub fn separator(width: usize) -> Line {
    Line::new(vec![Span::styled(
        "─".repeat(width),
        Style::default().dim(),
    )])
}

pub fn list_empty(width: usize) -> Line {
    Line::new(vec![Span::styled(fit(EMPTY_TEXT, width), Style::default().italic())])
}

pub fn banner(message: &str, width: usize) -> Line {
    let style = Style::default().fg(Color::White).bg(Color::DarkRed);
    Line::new(vec![Span::styled(fit(&format!(" {message}  (x to dismiss)"), width), style)])
        .fill(Color::DarkRed)
}
