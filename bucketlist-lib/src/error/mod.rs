//! Error types

mod api;
mod auth;
mod firestore;

pub use api::*;
pub use auth::*;
pub use firestore::*;

/// Top-level error for repository and store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No user is signed in; nothing was sent to the backend.
    #[error("No authenticated user")]
    AuthMissing,

    /// The addressed document does not exist.
    #[error("Document not found: {path}")]
    NotFound {
        /// Slash-joined path of the missing document.
        path: String,
    },

    /// Network, permission or quota failure reported by the store.
    #[error(transparent)]
    Backend(#[from] ApiError),

    /// Failed to obtain credentials for the store.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A path segment was empty or contained a separator.
    #[error("Invalid path segment: {0:?}")]
    InvalidPath(String),

    /// A stored document holds a field of the wrong kind.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl Error {
    /// Creates a not-found error for the given path.
    pub fn not_found(path: impl ToString) -> Self {
        Self::NotFound {
            path: path.to_string(),
        }
    }

    /// Returns `true` if the addressed document was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the call was refused because nobody is signed in.
    pub fn is_auth_missing(&self) -> bool {
        matches!(self, Self::AuthMissing)
    }
}
