//! Item records and their write payloads

use serde::Deserialize;
use serde::Serialize;

use super::Budget;
use super::Fields;
use super::ItemId;
use super::Timestamp;
use super::Value;

/// A single bucket-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Backend-assigned identifier.
    pub id: ItemId,
    pub name: String,
    pub note: String,
    /// `false` is pending, `true` is completed.
    pub status: bool,
    pub budget: Budget,
    /// Creation time. Never rewritten after creation.
    pub date: Timestamp,
}

impl Item {
    /// Decodes a stored item document.
    ///
    /// Absent fields fall back to their defaults. A budget that cannot be
    /// represented (NaN, infinity, wrong type) is read as zero.
    pub fn from_fields(id: ItemId, fields: &Fields) -> Self {
        let text = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let budget = match fields.get("budget") {
            Some(Value::Integer(i)) => Budget::from_int(*i),
            Some(Value::Double(d)) => Budget::from_f64(*d).unwrap_or_else(|| {
                log::warn!("item {id}: unrepresentable budget {d}, reading as 0");
                Budget::ZERO
            }),
            Some(Value::String(s)) => Budget::parse_input(s),
            _ => Budget::ZERO,
        };

        Self {
            name: text("name"),
            note: text("note"),
            status: fields
                .get("status")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            budget,
            date: Timestamp(fields.get("date").and_then(Value::as_i64).unwrap_or(0)),
            id,
        }
    }

    /// Returns the fields an edit form may change, as a draft.
    pub fn draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            note: self.note.clone(),
            status: self.status,
            budget: self.budget,
        }
    }

    /// Builds the patch that turns this item's mutable fields into `draft`.
    ///
    /// Unchanged fields are left out, so an untouched form yields an empty patch.
    pub fn diff(&self, draft: &ItemDraft) -> ItemPatch {
        ItemPatch {
            name: (self.name != draft.name).then(|| draft.name.clone()),
            note: (self.note != draft.note).then(|| draft.note.clone()),
            status: (self.status != draft.status).then_some(draft.status),
            budget: (self.budget != draft.budget).then_some(draft.budget),
        }
    }
}

/// The user-supplied fields of a new item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub note: String,
    pub status: bool,
    pub budget: Budget,
}

impl ItemDraft {
    /// Creates a draft with a name and default values elsewhere.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Sets the completion status.
    pub fn status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    /// Sets the budget.
    pub fn budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Encodes the draft as a new document created at `date`.
    pub fn to_fields(&self, date: Timestamp) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::from(self.name.as_str()));
        fields.insert("note".into(), Value::from(self.note.as_str()));
        fields.insert("status".into(), Value::Bool(self.status));
        fields.insert("budget".into(), budget_value(self.budget));
        fields.insert("date".into(), Value::Integer(date.as_millis()));
        fields
    }
}

/// A partial update of an item's mutable fields.
///
/// There is deliberately no `date` here: the creation time cannot be updated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub note: Option<String>,
    pub status: Option<bool>,
    pub budget: Option<Budget>,
}

impl ItemPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Sets a new status.
    pub fn status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a new budget.
    pub fn budget(mut self, budget: Budget) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.note.is_none() && self.status.is_none() && self.budget.is_none()
    }

    /// Encodes only the fields that are set.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        if let Some(name) = &self.name {
            fields.insert("name".into(), Value::from(name.as_str()));
        }
        if let Some(note) = &self.note {
            fields.insert("note".into(), Value::from(note.as_str()));
        }
        if let Some(status) = self.status {
            fields.insert("status".into(), Value::Bool(status));
        }
        if let Some(budget) = self.budget {
            fields.insert("budget".into(), budget_value(budget));
        }
        fields
    }
}

/// Whole amounts are stored as integers, everything else as doubles.
fn budget_value(budget: Budget) -> Value {
    match budget.as_whole() {
        Some(whole) => Value::Integer(whole),
        None => Value::Double(budget.as_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Item {
        Item {
            id: ItemId::new("abc"),
            name: "Tickets".into(),
            note: "front row".into(),
            status: false,
            budget: Budget::from_int(200),
            date: Timestamp(1_700_000_000_000),
        }
    }

    #[test]
    fn test_from_fields_defaults() {
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::from("Skydive"));
        let item = Item::from_fields(ItemId::new("x"), &fields);
        assert_eq!(item.name, "Skydive");
        assert_eq!(item.note, "");
        assert!(!item.status);
        assert_eq!(item.budget, Budget::ZERO);
        assert_eq!(item.date, Timestamp(0));
    }

    #[test]
    fn test_from_fields_bad_budget_is_zero() {
        let mut fields = Fields::new();
        fields.insert("budget".into(), Value::Double(f64::NAN));
        let item = Item::from_fields(ItemId::new("x"), &fields);
        assert_eq!(item.budget, Budget::ZERO);
    }

    #[test]
    fn test_draft_fields() {
        let fields = ItemDraft::named("Tickets")
            .budget(Budget::parse_input("12.5"))
            .to_fields(Timestamp(42));
        assert_eq!(fields.get("budget"), Some(&Value::Double(12.5)));
        assert_eq!(fields.get("date"), Some(&Value::Integer(42)));
        assert_eq!(fields.get("status"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_diff_only_changed_fields() {
        let item = stored();
        let mut draft = item.draft();
        assert!(item.diff(&draft).is_empty());

        draft.status = true;
        draft.note = "balcony".into();
        let patch = item.diff(&draft);
        assert_eq!(patch, ItemPatch::new().note("balcony").status(true));

        let fields = patch.to_fields();
        assert_eq!(fields.len(), 2);
        assert!(!fields.contains_key("date"));
    }
}
