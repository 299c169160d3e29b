//! Presentational pieces of the list-detail screen.
//!
//! Everything here turns state into styled [`Line`]s and nothing else; the
//! terminal module decides how to paint them.

mod item_row;
mod list_parts;
mod modals;

pub use item_row::item_row;
pub use list_parts::{banner, list_empty, list_header, separator};
pub use modals::{confirm_modal, form_modal};

use crossterm::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const HEADER_BG: Color = Color::Rgb { r: 0x4a, g: 0x4d, b: 0x53 };
pub const ROW_BG: Color = Color::Rgb { r: 0xff, g: 0xc0, b: 0xcb };
pub const ROW_SELECTED_BG: Color = Color::Rgb { r: 0xff, g: 0x99, b: 0xac };
pub const BUTTON_BG: Color = Color::Rgb { r: 0x33, g: 0x33, b: 0x33 };
pub const ADD_BG: Color = Color::Rgb { r: 0x00, g: 0x64, b: 0x00 };
pub const DANGER_BG: Color = Color::Rgb { r: 0xb0, g: 0x20, b: 0x20 };

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl Style {
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn raw(text: impl Into<String>) -> Self {
        Self::styled(text, Style::default())
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// One terminal row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
    /// Background painted across the rest of the row.
    pub fill: Option<Color>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans, fill: None }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(vec![Span::raw(text)])
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Plain text without styling.
    #[cfg(test)]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Left and right groups with padding between, clipped to `width`.
    pub fn split(left: Vec<Span>, right: Vec<Span>, width: usize, pad: Style) -> Self {
        let left_width: usize = left.iter().map(Span::width).sum();
        let right_width: usize = right.iter().map(Span::width).sum();
        let gap = width.saturating_sub(left_width + right_width);
        let mut spans = left;
        spans.push(Span::styled(" ".repeat(gap), pad));
        spans.extend(right);
        Self::new(spans).clip(width)
    }

    /// Drop whatever does not fit in `width` columns.
    pub fn clip(mut self, width: usize) -> Self {
        let mut used = 0;
        let mut kept = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            if used >= width {
                break;
            }
            let text = fit(&span.text, width - used);
            used += text.width();
            kept.push(Span::styled(text, span.style));
        }
        self.spans = kept;
        self
    }
}

/// Truncate `text` to at most `width` columns, marking the cut with `…`.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("Tickets", 10), "Tickets");
        assert_eq!(fit("Tickets", 5), "Tick…");
        assert_eq!(fit("日本語", 4), "日…");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn test_split_pads_between() {
        let line = Line::split(
            vec![Span::raw("left")],
            vec![Span::raw("right")],
            12,
            Style::default(),
        );
        assert_eq!(line.text(), "left   right");
        assert_eq!(line.width(), 12);
    }

    #[test]
    fn test_split_clips_when_narrow() {
        let line = Line::split(
            vec![Span::raw("a long name")],
            vec![Span::raw("14/11/2023")],
            8,
            Style::default(),
        );
        assert_eq!(line.width(), 8);
        assert_eq!(line.text(), "a long …");
    }
}
