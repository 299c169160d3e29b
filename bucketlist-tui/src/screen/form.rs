//! Add/edit item form.

use bucketlist_lib::model::{Budget, Item, ItemDraft};

/// What submitting the form will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Submitting creates a new item.
    Creating,
    /// Submitting updates this item.
    Editing(Item),
}

/// The form field that receives typed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Note,
    Budget,
    Status,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Name,
        FormField::Note,
        FormField::Budget,
        FormField::Status,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// The field after this one, wrapping around.
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// The field before this one, wrapping around.
    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Transient state of the add/edit modal.
///
/// A fresh form is built every time the modal opens, so nothing typed into a
/// closed form can leak into the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemForm {
    mode: FormMode,
    name: String,
    note: String,
    budget_input: String,
    budget: Budget,
    status: bool,
    focus: FormField,
}

impl ItemForm {
    /// A blank form for a new item.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Creating,
            name: String::new(),
            note: String::new(),
            budget_input: String::new(),
            budget: Budget::ZERO,
            status: false,
            focus: FormField::Name,
        }
    }

    /// A form pre-populated from an existing item.
    pub fn edit(item: Item) -> Self {
        Self {
            name: item.name.clone(),
            note: item.note.clone(),
            budget_input: item.budget.to_string(),
            budget: item.budget,
            status: item.status,
            focus: FormField::Name,
            mode: FormMode::Editing(item),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// The budget text as typed.
    pub fn budget_input(&self) -> &str {
        &self.budget_input
    }

    pub fn status(&self) -> bool {
        self.status
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Label of the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Creating => "Add Item",
            FormMode::Editing(_) => "Save Item",
        }
    }

    /// Replace the budget text and re-parse it.
    pub fn set_budget_input(&mut self, input: impl Into<String>) {
        self.budget_input = input.into();
        self.budget = Budget::parse_input(&self.budget_input);
    }

    pub fn toggle_status(&mut self) {
        self.status = !self.status;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Type a character into the focused field.
    ///
    /// The budget field only takes characters that can appear in a number;
    /// on the status field a space toggles.
    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            FormField::Name => self.name.push(c),
            FormField::Note => self.note.push(c),
            FormField::Budget => {
                if c.is_ascii_digit() || matches!(c, '.' | '-' | '$') {
                    let mut input = std::mem::take(&mut self.budget_input);
                    input.push(c);
                    self.set_budget_input(input);
                }
            }
            FormField::Status => {
                if c == ' ' {
                    self.toggle_status();
                }
            }
        }
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Note => {
                self.note.pop();
            }
            FormField::Budget => {
                let mut input = std::mem::take(&mut self.budget_input);
                input.pop();
                self.set_budget_input(input);
            }
            FormField::Status => {}
        }
    }

    /// The values to submit.
    pub fn draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            note: self.note.clone(),
            status: self.status,
            budget: self.budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use bucketlist_lib::model::{ItemId, Timestamp};

    use super::*;

    fn item() -> Item {
        Item {
            id: ItemId::new("i1"),
            name: "Tickets".into(),
            note: "row A".into(),
            status: true,
            budget: Budget::from_int(200),
            date: Timestamp(1),
        }
    }

    #[test]
    fn test_create_defaults() {
        let form = ItemForm::create();
        assert_eq!(form.mode(), &FormMode::Creating);
        assert_eq!(form.draft(), ItemDraft::default());
        assert_eq!(form.submit_label(), "Add Item");
    }

    #[test]
    fn test_edit_prefills() {
        let form = ItemForm::edit(item());
        assert_eq!(form.name(), "Tickets");
        assert_eq!(form.note(), "row A");
        assert_eq!(form.budget_input(), "200");
        assert!(form.status());
        assert_eq!(form.draft(), item().draft());
        assert_eq!(form.submit_label(), "Save Item");
    }

    #[test]
    fn test_budget_field_rejects_letters() {
        let mut form = ItemForm::create();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), FormField::Budget);
        for c in "1x2.5".chars() {
            form.insert_char(c);
        }
        assert_eq!(form.budget_input(), "12.5");
        assert_eq!(form.draft().budget, Budget::parse_input("12.5"));
    }

    #[test]
    fn test_unparsable_budget_is_zero() {
        let mut form = ItemForm::create();
        form.set_budget_input("--");
        assert_eq!(form.draft().budget, Budget::ZERO);
        form.set_budget_input("4");
        form.focus_next();
        form.focus_next();
        form.backspace();
        assert_eq!(form.budget_input(), "");
        assert_eq!(form.draft().budget, Budget::ZERO);
    }

    #[test]
    fn test_status_toggles_with_space() {
        let mut form = ItemForm::create();
        form.focus_previous();
        assert_eq!(form.focus(), FormField::Status);
        form.insert_char(' ');
        assert!(form.status());
        form.insert_char('x');
        assert!(form.status());
    }
}
