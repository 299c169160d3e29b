//! Persistent settings.
//!
//! Each named profile holds one [`BackendSettings`] record, stored whole in
//! SQLite by [`ProfileStore`]. `config set` edits a single key of a profile.

mod store;

pub use store::ProfileStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Profile used when none is named.
pub const DEFAULT_PROFILE: &str = "default";

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("could not create settings directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
    #[error("unknown setting {0:?}, expected one of: {keys}", keys = BackendSettings::KEYS.join(", "))]
    UnknownKey(String),
}

/// Everything needed to reach the signed-in user's lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    pub project_id: Option<String>,
    pub database: Option<String>,
    pub root_collection: Option<String>,
    pub base_url: Option<String>,
    pub user_id: Option<String>,
    pub id_token: Option<String>,
}

impl BackendSettings {
    /// Keys accepted by `config set`, in display order.
    pub const KEYS: [&'static str; 6] = [
        "backend.project_id",
        "backend.database",
        "backend.root_collection",
        "backend.base_url",
        "session.user_id",
        "session.id_token",
    ];

    fn slot(&self, key: &str) -> Option<&Option<String>> {
        match key {
            "backend.project_id" => Some(&self.project_id),
            "backend.database" => Some(&self.database),
            "backend.root_collection" => Some(&self.root_collection),
            "backend.base_url" => Some(&self.base_url),
            "session.user_id" => Some(&self.user_id),
            "session.id_token" => Some(&self.id_token),
            _ => None,
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "backend.project_id" => Some(&mut self.project_id),
            "backend.database" => Some(&mut self.database),
            "backend.root_collection" => Some(&mut self.root_collection),
            "backend.base_url" => Some(&mut self.base_url),
            "session.user_id" => Some(&mut self.user_id),
            "session.id_token" => Some(&mut self.id_token),
            _ => None,
        }
    }

    /// Set one key. An empty value clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let slot = self
            .slot_mut(key)
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        *slot = (!value.is_empty()).then(|| value.to_string());
        Ok(())
    }

    /// `(key, value)` pairs for display, with the token masked.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .map(|&key| {
                let value = match (key, self.slot(key).and_then(Option::as_deref)) {
                    (_, None) => "<unset>".to_string(),
                    ("session.id_token", Some(token)) if token.chars().count() > 8 => {
                        format!("{}…", token.chars().take(8).collect::<String>())
                    }
                    ("session.id_token", Some(_)) => "<set>".to_string(),
                    (_, Some(value)) => value.to_string(),
                };
                (key, value)
            })
            .collect()
    }
}
