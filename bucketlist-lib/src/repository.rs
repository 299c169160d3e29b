//! List and item repository
//!
//! [`ItemRepository`] is the only thing the list-detail screen talks to.
//! [`DocumentRepository`] implements it over any [`DocumentStore`], scoping
//! every call to the signed-in user.
//!
//! # Example
//!
//! ```ignore
//! use bucketlist_lib::{DocumentRepository, ItemRepository};
//! use bucketlist_lib::auth::StaticAuth;
//! use bucketlist_lib::model::{ItemDraft, ListId};
//! use bucketlist_lib::store::InMemoryStore;
//!
//! let repo = DocumentRepository::new(InMemoryStore::new(), StaticAuth::signed_in("u1"));
//! let list = ListId::new("l1");
//! let id = repo.create_item(&list, ItemDraft::named("Tickets")).await?;
//! let items = repo.fetch_items(&list).await?;
//! ```

use async_trait::async_trait;

use crate::auth::AuthContext;
use crate::error::Error;
use crate::model::Item;
use crate::model::ItemDraft;
use crate::model::ItemId;
use crate::model::ItemPatch;
use crate::model::List;
use crate::model::ListId;
use crate::model::Timestamp;
use crate::model::UserId;
use crate::path::Layout;
use crate::store::DocumentStore;

/// Backend operations for one user's lists and their items.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Reads a list document.
    ///
    /// Fails with [`Error::NotFound`] if it does not exist.
    async fn fetch_list(&self, list: &ListId) -> Result<List, Error>;

    /// Reads all items of a list. No items is an empty vector, not an error.
    async fn fetch_items(&self, list: &ListId) -> Result<Vec<Item>, Error>;

    /// Creates an item stamped with the current time and returns its new id.
    ///
    /// The caller must re-fetch to observe the item.
    async fn create_item(&self, list: &ListId, draft: ItemDraft) -> Result<ItemId, Error>;

    /// Writes only the fields set in `patch`.
    async fn update_item(&self, list: &ListId, item: &ItemId, patch: ItemPatch)
    -> Result<(), Error>;

    /// Deletes an item. Deleting an absent item succeeds.
    async fn delete_item(&self, list: &ListId, item: &ItemId) -> Result<(), Error>;
}

/// An [`ItemRepository`] over a document store and an auth context.
#[derive(Debug)]
pub struct DocumentRepository<S, A> {
    store: S,
    auth: A,
    layout: Layout,
}

impl<S: DocumentStore, A: AuthContext> DocumentRepository<S, A> {
    /// Creates a repository using the default path layout.
    pub fn new(store: S, auth: A) -> Self {
        Self {
            store,
            auth,
            layout: Layout::default(),
        }
    }

    /// Uses a different path layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the auth context.
    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// Returns the path layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn user(&self) -> Result<UserId, Error> {
        self.auth.current_user().ok_or(Error::AuthMissing)
    }
}

#[async_trait]
impl<S: DocumentStore, A: AuthContext> ItemRepository for DocumentRepository<S, A> {
    async fn fetch_list(&self, list: &ListId) -> Result<List, Error> {
        let user = self.user()?;
        let path = self.layout.list(&user, list)?;
        log::debug!("fetch list {path}");
        let fields = self
            .store
            .get(&path)
            .await?
            .ok_or_else(|| Error::not_found(&path))?;
        List::from_fields(list.clone(), &fields)
    }

    async fn fetch_items(&self, list: &ListId) -> Result<Vec<Item>, Error> {
        let user = self.user()?;
        let path = self.layout.items(&user, list)?;
        log::debug!("fetch items {path}");
        let documents = self.store.list(&path).await?;
        Ok(documents
            .into_iter()
            .map(|doc| Item::from_fields(ItemId::new(doc.id), &doc.fields))
            .collect())
    }

    async fn create_item(&self, list: &ListId, draft: ItemDraft) -> Result<ItemId, Error> {
        let user = self.user()?;
        let path = self.layout.items(&user, list)?;
        let fields = draft.to_fields(Timestamp::now());
        let id = self.store.create(&path, fields).await?;
        log::debug!("created {path}/{id}");
        Ok(ItemId::new(id))
    }

    async fn update_item(
        &self,
        list: &ListId,
        item: &ItemId,
        patch: ItemPatch,
    ) -> Result<(), Error> {
        let user = self.user()?;
        let path = self.layout.item(&user, list, item)?;
        if patch.is_empty() {
            log::debug!("update {path}: nothing changed");
            return Ok(());
        }
        log::debug!("update {path}");
        self.store.merge(&path, patch.to_fields()).await
    }

    async fn delete_item(&self, list: &ListId, item: &ItemId) -> Result<(), Error> {
        let user = self.user()?;
        let path = self.layout.item(&user, list, item)?;
        log::debug!("delete {path}");
        self.store.delete(&path).await
    }
}
