//! Bucket list data library
//!
//! Typed lists and items, the document-store boundary they are persisted
//! through, and the item repository the list-detail screen drives.

pub mod auth;
pub mod error;
pub mod format;
pub mod model;
pub mod path;
pub mod repository;
pub mod store;

mod client;

pub use client::*;
pub use error::Error;
pub use repository::DocumentRepository;
pub use repository::ItemRepository;
