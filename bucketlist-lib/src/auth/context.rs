//! Current-user context

use std::sync::RwLock;

use crate::model::UserId;

/// Supplies the identifier of the signed-in user.
///
/// Repositories consult this before every backend call and refuse to run
/// when it returns `None`.
pub trait AuthContext: Send + Sync {
    /// Returns the current user, or `None` when signed out.
    fn current_user(&self) -> Option<UserId>;
}

/// An auth context with an explicitly set user.
///
/// # Example
///
/// ```
/// use bucketlist_lib::auth::{AuthContext, StaticAuth};
///
/// let auth = StaticAuth::signed_in("user-1");
/// assert_eq!(auth.current_user().unwrap().as_str(), "user-1");
///
/// auth.sign_out();
/// assert!(auth.current_user().is_none());
/// ```
#[derive(Debug, Default)]
pub struct StaticAuth {
    user: RwLock<Option<UserId>>,
}

impl StaticAuth {
    /// Creates a context with the given user signed in.
    pub fn signed_in(user: impl Into<UserId>) -> Self {
        Self {
            user: RwLock::new(Some(user.into())),
        }
    }

    /// Creates a context with nobody signed in.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Replaces the current user.
    pub fn sign_in(&self, user: impl Into<UserId>) {
        if let Ok(mut guard) = self.user.write() {
            *guard = Some(user.into());
        }
    }

    /// Clears the current user.
    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.user.write() {
            *guard = None;
        }
    }
}

impl AuthContext for StaticAuth {
    fn current_user(&self) -> Option<UserId> {
        self.user.read().ok().and_then(|guard| guard.clone())
    }
}
