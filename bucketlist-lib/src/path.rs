//! Structured document addresses
//!
//! Every address is assembled from validated segments, never by formatting a
//! string, so an id can not smuggle in an extra path level.
//!
//! ```
//! use bucketlist_lib::model::{ItemId, ListId, UserId};
//! use bucketlist_lib::path::Layout;
//!
//! let layout = Layout::default();
//! let path = layout
//!     .item(&UserId::new("u1"), &ListId::new("l1"), &ItemId::new("i1"))
//!     .unwrap();
//! assert_eq!(path.to_string(), "listusers/u1/lists/l1/items/i1");
//! ```

use crate::error::Error;
use crate::model::ItemId;
use crate::model::ListId;
use crate::model::UserId;

/// Root collection the existing data lives under.
pub const DEFAULT_ROOT_COLLECTION: &str = "listusers";

const LISTS: &str = "lists";
const ITEMS: &str = "items";

fn validate(segment: &str) -> Result<String, Error> {
    if segment.is_empty() || segment.contains('/') {
        return Err(Error::InvalidPath(segment.to_string()));
    }
    Ok(segment.to_string())
}

/// Address of a collection: an odd number of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    segments: Vec<String>,
}

/// Address of a single document: an even number of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// Creates a top-level collection path.
    pub fn root(name: &str) -> Result<Self, Error> {
        Ok(Self {
            segments: vec![validate(name)?],
        })
    }

    /// Addresses a document in this collection.
    pub fn doc(&self, id: &str) -> Result<DocumentPath, Error> {
        let mut segments = self.segments.clone();
        segments.push(validate(id)?);
        Ok(DocumentPath { segments })
    }

    /// Returns the path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl DocumentPath {
    /// Addresses a subcollection of this document.
    pub fn collection(&self, name: &str) -> Result<CollectionPath, Error> {
        let mut segments = self.segments.clone();
        segments.push(validate(name)?);
        Ok(CollectionPath { segments })
    }

    /// The document's own id (last segment).
    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The collection containing this document.
    pub fn parent(&self) -> CollectionPath {
        CollectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    /// Returns the path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// The `{root}/{user}/lists/{list}/items/{item}` layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT_COLLECTION.to_string(),
        }
    }
}

impl Layout {
    /// Uses a different root collection.
    pub fn with_root(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root collection name.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// `{root}/{user}/lists`
    pub fn lists(&self, user: &UserId) -> Result<CollectionPath, Error> {
        CollectionPath::root(&self.root)?
            .doc(user.as_str())?
            .collection(LISTS)
    }

    /// `{root}/{user}/lists/{list}`
    pub fn list(&self, user: &UserId, list: &ListId) -> Result<DocumentPath, Error> {
        self.lists(user)?.doc(list.as_str())
    }

    /// `{root}/{user}/lists/{list}/items`
    pub fn items(&self, user: &UserId, list: &ListId) -> Result<CollectionPath, Error> {
        self.list(user, list)?.collection(ITEMS)
    }

    /// `{root}/{user}/lists/{list}/items/{item}`
    pub fn item(&self, user: &UserId, list: &ListId, item: &ItemId) -> Result<DocumentPath, Error> {
        self.items(user, list)?.doc(item.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = Layout::with_root("owners");
        let user = UserId::new("u1");
        let list = ListId::new("l1");
        assert_eq!(layout.lists(&user).unwrap().to_string(), "owners/u1/lists");
        assert_eq!(
            layout.items(&user, &list).unwrap().to_string(),
            "owners/u1/lists/l1/items"
        );
        let item = layout.item(&user, &list, &ItemId::new("i9")).unwrap();
        assert_eq!(item.id(), "i9");
        assert_eq!(item.parent().to_string(), "owners/u1/lists/l1/items");
    }

    #[test]
    fn test_rejects_separator_in_id() {
        let layout = Layout::default();
        let err = layout
            .list(&UserId::new("u1"), &ListId::new("a/b"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(s) if s == "a/b"));
    }

    #[test]
    fn test_rejects_empty_user() {
        assert!(Layout::default().lists(&UserId::new("")).is_err());
    }
}
