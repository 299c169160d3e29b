//! TokenProvider trait and AccessToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::AuthError;

/// A bearer token for the document store, with optional expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The bearer token sent with every request.
    pub access_token: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a new access token with just the token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Creates a new access token with expiration time.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }
}

/// Supplies access tokens to the REST client.
///
/// The client calls `get_token` before each request. Acquiring and renewing
/// tokens is up to the implementation.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets a token valid for the store.
    async fn get_token(&self) -> Result<AccessToken, AuthError>;
}

/// A token provider that always returns the same token.
///
/// Fails with [`AuthError::TokenExpired`] once the token's expiry has passed.
///
/// # Example
///
/// ```
/// use bucketlist_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-id-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a new static token provider with the given token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }

    /// Creates a new static token provider from an existing AccessToken.
    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        if self.token.access_token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        if self.token.is_expired() {
            return Err(AuthError::TokenExpired {
                message: "static token is past its expiry".into(),
            });
        }
        Ok(self.token.clone())
    }
}
