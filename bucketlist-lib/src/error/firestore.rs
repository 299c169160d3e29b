//! Firestore error body

use serde::Deserialize;

/// Structured error returned by the Firestore REST API.
///
/// The wire shape is `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FirestoreErrorDetail {
    /// Numeric HTTP-equivalent code.
    pub code: u16,
    /// Human-readable error message.
    pub message: String,
    /// Canonical status name, e.g. `PERMISSION_DENIED`.
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize)]
struct Envelope {
    error: FirestoreErrorDetail,
}

impl FirestoreErrorDetail {
    /// Decodes an error envelope, returning `None` when the body has another shape.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str::<Envelope>(body).ok().map(|e| e.error)
    }
}

impl std::fmt::Display for FirestoreErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_envelope() {
        let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#;
        let detail = FirestoreErrorDetail::from_body(body).unwrap();
        assert_eq!(detail.code, 403);
        assert_eq!(detail.status, "PERMISSION_DENIED");
        assert_eq!(
            detail.to_string(),
            "[PERMISSION_DENIED] Missing or insufficient permissions."
        );
    }

    #[test]
    fn test_plain_body_is_not_an_envelope() {
        assert!(FirestoreErrorDetail::from_body("Service Unavailable").is_none());
    }
}
