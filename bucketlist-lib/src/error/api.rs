//! API error types

use std::time::Duration;

use super::FirestoreErrorDetail;

/// Errors that can occur during calls to the document store.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Detailed error information decoded from the response body.
        detail: Option<Box<FirestoreErrorDetail>>,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// Creates an HTTP error from a raw response body.
    ///
    /// Google APIs wrap failures as `{"error": {...}}`; when the body has that
    /// shape the decoded detail is attached and its message is used.
    pub fn from_body(status: u16, body: &str) -> Self {
        match FirestoreErrorDetail::from_body(body) {
            Some(detail) => Self::Http {
                status,
                message: detail.message.clone(),
                detail: Some(Box::new(detail)),
            },
            None => Self::http(status, body),
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
