//! Full-screen add/edit form and the delete prompt.

use bucketlist_lib::format::format_status;
use bucketlist_lib::model::Item;
use crossterm::style::Color;

use super::{fit, Line, Span, Style, ADD_BG, BUTTON_BG, DANGER_BG};
use crate::screen::{FormField, FormMode, ItemForm};

fn label(text: &str, focused: bool) -> Line {
    let style = if focused {
        Style::default().bold().fg(Color::Yellow)
    } else {
        Style::default().bold()
    };
    Line::new(vec![Span::styled(text, style)])
}

fn input(value: &str, placeholder: &str, focused: bool, width: usize) -> Line {
    let inner = width.saturating_sub(4);
    let (text, style) = if value.is_empty() {
        (placeholder, Style::default().dim())
    } else {
        (value, Style::default())
    };
    let cursor = if focused { "▏" } else { " " };
    Line::new(vec![
        Span::raw("│ "),
        Span::styled(fit(text, inner.saturating_sub(1)), style),
        Span::raw(cursor),
    ])
}

pub fn form_modal(form: &ItemForm, width: usize) -> Vec<Line> {
    let focus = form.focus();
    let title = match form.mode() {
        FormMode::Creating => "New item".to_string(),
        FormMode::Editing(item) => format!("Edit \u{201c}{}\u{201d}", item.name),
    };

    let status_style = if focus == FormField::Status {
        Style::default().reverse()
    } else {
        Style::default()
    };

    vec![
        Line::split(
            vec![Span::styled(fit(&title, width.saturating_sub(8)), Style::default().bold())],
            vec![Span::styled("[Esc] ✕", Style::default().dim())],
            width,
            Style::default(),
        ),
        Line::blank(),
        label("Title", focus == FormField::Name),
        input(form.name(), "Name of the item", focus == FormField::Name, width),
        Line::blank(),
        label("Description", focus == FormField::Note),
        input(form.note(), "Notes for item", focus == FormField::Note, width),
        Line::blank(),
        label("Budget", focus == FormField::Budget),
        input(form.budget_input(), "Enter target budget", focus == FormField::Budget, width),
        Line::blank(),
        Line::new(vec![
            Span::styled("Status ", Style::default().bold()),
            Span::styled(if form.status() { "[x]" } else { "[ ]" }, status_style),
            Span::raw(format!(" {}", format_status(form.status()))),
        ]),
        Line::blank(),
        Line::new(vec![Span::styled(
            fit(&format!(" {} ", form.submit_label()), width),
            Style::default().fg(Color::White).bg(BUTTON_BG).bold(),
        )]),
        Line::new(vec![Span::styled(
            fit("Tab next field · Space toggles status · Enter saves", width),
            Style::default().dim(),
        )]),
    ]
}

/// The delete prompt. Only an explicit yes deletes.
pub fn confirm_modal(item: &Item, width: usize) -> Vec<Line> {
    vec![
        Line::new(vec![Span::styled("Delete item?", Style::default().bold())]),
        Line::blank(),
        Line::raw(fit(
            &format!("\u{201c}{}\u{201d} will be removed from this list.", item.name),
            width,
        )),
        Line::blank(),
        Line::new(vec![
            Span::styled(" [y] Yes ", Style::default().fg(Color::White).bg(DANGER_BG).bold()),
            Span::raw("   "),
            Span::styled(" [n] No ", Style::default().fg(Color::White).bg(ADD_BG)),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use bucketlist_lib::model::{Budget, ItemId, Timestamp};

    use super::*;

    #[test]
    fn test_create_form_shows_placeholders() {
        let lines = form_modal(&ItemForm::create(), 60);
        let text: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(text[0].trim_end_matches("[Esc] ✕").trim_end(), "New item");
        assert!(text[3].contains("Name of the item"));
        assert!(text[9].contains("Enter target budget"));
        assert!(text[11].contains("Pending"));
        assert!(text[13].contains("Add Item"));
    }

    #[test]
    fn test_edit_form_shows_values() {
        let item = Item {
            id: ItemId::new("i1"),
            name: "Tickets".into(),
            note: "row A".into(),
            status: true,
            budget: Budget::from_int(200),
            date: Timestamp(0),
        };
        let lines = form_modal(&ItemForm::edit(item.clone()), 60);
        assert!(lines[3].text().contains("Tickets"));
        assert!(lines[6].text().contains("row A"));
        assert!(lines[9].text().contains("200"));
        assert!(lines[11].text().contains("Completed"));
        assert!(lines[13].text().contains("Save Item"));

        let prompt = confirm_modal(&item, 60);
        assert!(prompt[2].text().contains("Tickets"));
    }
}
