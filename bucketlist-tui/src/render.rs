//! Composes the widgets into a full frame for the current screen state.

use crate::screen::DetailScreen;
use crate::widgets::{
    banner, confirm_modal, fit, form_modal, item_row, list_empty, list_header, separator, Line,
    Span, Style,
};

const LIST_HINTS: &str =
    "↑↓ move · →← actions · Enter choose · a add · e edit · d delete · r refresh · q quit";
const LOADING_HINTS: &str = "r retry · q quit";

/// Lines to paint, at most `height` of them.
pub fn render(screen: &DetailScreen, width: u16, height: u16) -> Vec<Line> {
    let width = width as usize;
    let height = height as usize;

    let mut top = Vec::new();
    let mut bottom = Vec::new();
    if let Some(message) = screen.banner() {
        bottom.push(banner(message, width));
    }

    let body = match screen.list() {
        None => {
            bottom.push(Line::new(vec![Span::styled(
                fit(LOADING_HINTS, width),
                Style::default().dim(),
            )]));
            vec![Line::new(vec![Span::styled(
                format!("Loading {}…", screen.route().name),
                Style::default().dim(),
            )])]
        }
        Some(list) => {
            top.push(list_header(&list.name, width));
            if let Some(item) = screen.pending_delete() {
                confirm_modal(item, width)
            } else if let Some(form) = screen.form() {
                form_modal(form, width)
            } else {
                bottom.push(Line::new(vec![Span::styled(
                    fit(LIST_HINTS, width),
                    Style::default().dim(),
                )]));
                let rows = height.saturating_sub(top.len() + bottom.len());
                list_body(screen, width, rows)
            }
        }
    };

    let mut lines = top;
    lines.extend(body);
    let room = height.saturating_sub(bottom.len());
    lines.truncate(room);
    lines.resize(room, Line::blank());
    lines.extend(bottom);
    lines.truncate(height);
    lines
}

/// Item rows scrolled so the selected row is visible.
fn list_body(screen: &DetailScreen, width: usize, rows: usize) -> Vec<Line> {
    if screen.items().is_empty() {
        return vec![list_empty(width)];
    }

    let mut lines = Vec::new();
    let mut selected_span = (0, 0);
    for (index, item) in screen.items().iter().enumerate() {
        if index > 0 {
            lines.push(separator(width));
        }
        let selected = index == screen.selected();
        let revealed = screen.revealed().filter(|r| r.index == index);
        let start = lines.len();
        lines.extend(item_row(item, selected, revealed, width));
        if selected {
            selected_span = (start, lines.len());
        }
    }

    let offset = selected_span.1.saturating_sub(rows);
    lines.into_iter().skip(offset).take(rows).collect()
}
