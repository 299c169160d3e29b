//! Authentication error types

/// Errors that can occur while obtaining credentials for the store.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token has been configured for the current session.
    #[error("No access token available")]
    MissingToken,

    /// Access token expired and could not be renewed.
    #[error("Token expired: {message}")]
    TokenExpired { message: String },

    /// Network error while fetching a token.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),
}
