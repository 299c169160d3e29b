//! List records

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

use super::Fields;
use super::ListId;
use super::Value;

/// A named collection of items owned by one user.
///
/// Lists are created elsewhere; the detail screen only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Backend-assigned identifier.
    pub id: ListId,
    /// Display name.
    pub name: String,
}

impl List {
    /// Decodes a stored list document.
    ///
    /// A missing `name` reads as empty; a `name` of any other kind than a
    /// string is a [`Error::Decode`].
    pub fn from_fields(id: ListId, fields: &Fields) -> Result<Self, Error> {
        let name = match fields.get("name") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(Error::Decode(format!(
                    "list {id}: name is {}, expected string",
                    other.type_name()
                )));
            }
        };
        Ok(Self { id, name })
    }

    /// Encodes the list's stored fields.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::from(self.name.as_str()));
        fields
    }
}
