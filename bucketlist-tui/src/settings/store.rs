//! SQLite table of named backend profiles.

use std::path::Path;

use async_sqlite::Client;
use dashmap::DashMap;
use log::debug;
use rusqlite::OptionalExtension;

use super::{BackendSettings, SettingsError};

/// Profiles persisted one bincode record per row, with a read-through cache.
pub struct ProfileStore {
    client: Client,
    cache: DashMap<String, BackendSettings>,
}

impl ProfileStore {
    /// Open (creating if needed) the profile database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let client = async_sqlite::ClientBuilder::new().path(path).open().await?;
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS profiles (
                        name TEXT PRIMARY KEY,
                        record BLOB NOT NULL,
                        updated_at INTEGER NOT NULL
                    )",
                    [],
                )
            })
            .await?;

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }

    /// The named profile, or an empty one if it was never saved.
    pub async fn load(&self, profile: &str) -> Result<BackendSettings, SettingsError> {
        if let Some(cached) = self.cache.get(profile) {
            return Ok(cached.clone());
        }

        let name = profile.to_string();
        let record = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT record FROM profiles WHERE name = ?1",
                    [&name],
                    |row| row.get::<_, Vec<u8>>(0),
                )
                .optional()
            })
            .await?;

        let settings = match record {
            Some(bytes) => bincode::deserialize(&bytes).map_err(SettingsError::Deserialization)?,
            None => BackendSettings::default(),
        };
        self.cache.insert(profile.to_string(), settings.clone());
        Ok(settings)
    }

    /// Replace the named profile.
    pub async fn save(&self, profile: &str, settings: &BackendSettings) -> Result<(), SettingsError> {
        let record = bincode::serialize(settings).map_err(SettingsError::Serialization)?;
        let name = profile.to_string();
        let updated_at = chrono::Utc::now().timestamp();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO profiles (name, record, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(name) DO UPDATE
                     SET record = excluded.record, updated_at = excluded.updated_at",
                    rusqlite::params![name, record, updated_at],
                )
            })
            .await?;

        debug!("saved profile {profile}");
        self.cache.insert(profile.to_string(), settings.clone());
        Ok(())
    }

    /// Names of every saved profile, most recently saved first.
    pub async fn profiles(&self) -> Result<Vec<String>, SettingsError> {
        let names = self
            .client
            .conn(|conn| {
                let mut stmt =
                    conn.prepare("SELECT name FROM profiles ORDER BY updated_at DESC, name")?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .await?;
        Ok(names)
    }
}
