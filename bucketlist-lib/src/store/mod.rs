//! Document store boundary
//!
//! The repository only ever reads one document, reads one collection, appends
//! to a collection, merges into a document or deletes one. [`DocumentStore`]
//! is exactly that surface, with an in-memory implementation for tests and
//! offline use and a Firestore REST implementation for the real backend.

mod firestore;
mod memory;

pub use firestore::*;
pub use memory::*;

use async_trait::async_trait;

use crate::error::Error;
use crate::model::Fields;
use crate::path::CollectionPath;
use crate::path::DocumentPath;

/// A document read from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The document id (last path segment).
    pub id: String,
    /// The document's fields.
    pub fields: Fields,
}

/// Read/write access to a hierarchical document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads one document. Absent documents are `Ok(None)`.
    async fn get(&self, path: &DocumentPath) -> Result<Option<Fields>, Error>;

    /// Reads every document directly inside a collection.
    ///
    /// An empty or never-written collection yields an empty vector. Order is
    /// whatever the backend returns.
    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, Error>;

    /// Appends a document with a backend-assigned id and returns that id.
    async fn create(&self, collection: &CollectionPath, fields: Fields) -> Result<String, Error>;

    /// Merges `fields` into an existing document, leaving other fields alone.
    ///
    /// Fails with [`Error::NotFound`] if the document does not exist.
    async fn merge(&self, path: &DocumentPath, fields: Fields) -> Result<(), Error>;

    /// Deletes a document. Deleting an absent document succeeds.
    async fn delete(&self, path: &DocumentPath) -> Result<(), Error>;
}
