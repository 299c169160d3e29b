//! A single item row with its concealed actions.

use bucketlist_lib::format::{format_budget, format_date, format_status, DateMode};
use bucketlist_lib::model::Item;
use crossterm::style::Color;

use super::{Line, Span, Style, DANGER_BG, ROW_BG, ROW_SELECTED_BG};
use crate::screen::{Revealed, RowAction};

fn action_button(label: &str, action: RowAction, revealed: Revealed, base: Style) -> Span {
    let style = match action {
        RowAction::Edit => base.fg(Color::White).bg(Color::DarkBlue),
        RowAction::Delete => base.fg(Color::White).bg(DANGER_BG),
    };
    let style = if revealed.focus == action {
        style.bold().reverse()
    } else {
        style
    };
    Span::styled(format!(" {label} "), style)
}

/// Two lines: name and date, then status and budget.
///
/// A revealed row shows its edit and delete buttons in place of the right
/// column.
pub fn item_row(item: &Item, selected: bool, revealed: Option<Revealed>, width: usize) -> Vec<Line> {
    let bg = if selected { ROW_SELECTED_BG } else { ROW_BG };
    let base = Style::default().fg(Color::Black).bg(bg);
    let marker = Span::styled(if selected { "▌" } else { " " }, base);

    let title = Span::styled(item.name.clone(), base.bold().italic());
    let status = Span::styled(format!("Status: {}", format_status(item.status)), base);

    let (top_right, bottom_right) = match revealed {
        Some(revealed) => (
            vec![
                action_button("Edit", RowAction::Edit, revealed, base),
                Span::styled(" ", base),
                action_button("Delete", RowAction::Delete, revealed, base),
                Span::styled(" ", base),
            ],
            vec![Span::styled("← conceal ", base.dim())],
        ),
        None => (
            vec![Span::styled(
                format!("{} ", format_date(item.date, DateMode::Date)),
                base,
            )],
            vec![Span::styled(
                format!("Budget: {} ", format_budget(item.budget)),
                base,
            )],
        ),
    };

    vec![
        Line::split(vec![marker.clone(), title], top_right, width, base).fill(bg),
        Line::split(vec![marker, status], bottom_right, width, base).fill(bg),
    ]
}
