//! In-memory document store using DashMap

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;
use rand::distr::Alphanumeric;

use super::Document;
use super::DocumentStore;
use crate::error::Error;
use crate::model::Fields;
use crate::path::CollectionPath;
use crate::path::DocumentPath;

/// Length of generated document ids, matching Firestore auto-ids.
const AUTO_ID_LEN: usize = 20;

#[derive(Debug, Clone)]
struct StoredDocument {
    seq: u64,
    fields: Fields,
}

/// A document store held in a concurrent hash map.
///
/// Collections list in insertion order. Data is lost when the process exits.
///
/// # Example
///
/// ```
/// use bucketlist_lib::store::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: DashMap<String, StoredDocument>,
    next_seq: AtomicU64,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents across all collections.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Writes a document at a known path, replacing any existing one.
    ///
    /// Used to seed parent documents such as lists.
    pub fn insert(&self, path: &DocumentPath, fields: Fields) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.documents
            .insert(path.to_string(), StoredDocument { seq, fields });
    }

    fn auto_id() -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(AUTO_ID_LEN)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Fields>, Error> {
        Ok(self
            .documents
            .get(&path.to_string())
            .map(|entry| entry.fields.clone()))
    }

    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, Error> {
        let prefix = format!("{}/", collection);
        let mut found: Vec<(u64, Document)> = self
            .documents
            .iter()
            .filter_map(|entry| {
                let id = entry.key().strip_prefix(&prefix)?;
                if id.contains('/') {
                    return None;
                }
                Some((
                    entry.seq,
                    Document {
                        id: id.to_string(),
                        fields: entry.fields.clone(),
                    },
                ))
            })
            .collect();
        found.sort_by_key(|(seq, _)| *seq);
        Ok(found.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn create(&self, collection: &CollectionPath, fields: Fields) -> Result<String, Error> {
        loop {
            let id = Self::auto_id();
            let path = collection.doc(&id)?;
            if let Entry::Vacant(slot) = self.documents.entry(path.to_string()) {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(StoredDocument { seq, fields });
                return Ok(id);
            }
        }
    }

    async fn merge(&self, path: &DocumentPath, fields: Fields) -> Result<(), Error> {
        let mut entry = self
            .documents
            .get_mut(&path.to_string())
            .ok_or_else(|| Error::not_found(path))?;
        entry.fields.extend(fields);
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), Error> {
        self.documents.remove(&path.to_string());
        Ok(())
    }
}
