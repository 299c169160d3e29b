//! Firestore REST document store

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::json;

use super::Document;
use super::DocumentStore;
use crate::FirestoreClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Fields;
use crate::model::Value;
use crate::path::CollectionPath;
use crate::path::DocumentPath;
use url::Url;

/// Page size requested when listing a collection.
const PAGE_SIZE: &str = "300";

/// A [`DocumentStore`] backed by the Firestore REST API.
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: FirestoreClient,
}

impl FirestoreStore {
    /// Wraps a configured client.
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &FirestoreClient {
        &self.client
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
    next_page_token: Option<String>,
}

impl RawDocument {
    fn id(&self) -> String {
        let last = self.name.rsplit('/').next().unwrap_or_default();
        urlencoding::decode(last)
            .map(|id| id.into_owned())
            .unwrap_or_else(|_| last.to_string())
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Fields>, Error> {
        let url = self.client.url_for(path.segments())?;
        let response = match self.client.request(Method::GET, url, None).await {
            Ok(response) => response,
            Err(Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let raw: RawDocument = read_json(response).await?;
        Ok(Some(decode_fields(&raw.fields)))
    }

    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, Error> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let url = page_url(
                self.client.url_for(collection.segments())?,
                page_token.as_deref(),
            );
            let page: ListResponse =
                read_json(self.client.request(Method::GET, url, None).await?).await?;

            documents.extend(page.documents.iter().map(|raw| Document {
                id: raw.id(),
                fields: decode_fields(&raw.fields),
            }));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(documents)
    }

    async fn create(&self, collection: &CollectionPath, fields: Fields) -> Result<String, Error> {
        let url = self.client.url_for(collection.segments())?;
        let body = json!({ "fields": encode_fields(&fields) });
        let raw: RawDocument =
            read_json(self.client.request(Method::POST, url, Some(body)).await?).await?;
        Ok(raw.id())
    }

    async fn merge(&self, path: &DocumentPath, fields: Fields) -> Result<(), Error> {
        if fields.is_empty() {
            return match self.get(path).await? {
                Some(_) => Ok(()),
                None => Err(Error::not_found(path)),
            };
        }

        let url = merge_url(self.client.url_for(path.segments())?, &fields);
        let body = json!({ "fields": encode_fields(&fields) });
        match self.client.request(Method::PATCH, url, Some(body)).await {
            Ok(_) => Ok(()),
            Err(Error::NotFound { .. }) => Err(Error::not_found(path)),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), Error> {
        let url = self.client.url_for(path.segments())?;
        match self.client.request(Method::DELETE, url, None).await {
            Ok(_) | Err(Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// Request and response shaping
// =============================================================================

/// Adds the page size and, after the first page, the continuation token.
fn page_url(mut url: Url, page_token: Option<&str>) -> Url {
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("pageSize", PAGE_SIZE);
        if let Some(token) = page_token {
            query.append_pair("pageToken", token);
        }
    }
    url
}

/// Restricts a PATCH to the supplied fields and to documents that exist.
fn merge_url(mut url: Url, fields: &Fields) -> Url {
    {
        let mut query = url.query_pairs_mut();
        for name in fields.keys() {
            query.append_pair("updateMask.fieldPaths", name);
        }
        query.append_pair("currentDocument.exists", "true");
    }
    url
}

/// Reads a successful response body as JSON, keeping the body on failure.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => Err(ApiError::parse_with_body(e.to_string(), body)),
    }
}

// =============================================================================
// Typed value encoding
// =============================================================================

/// Encodes fields in Firestore's typed-value JSON form.
pub(crate) fn encode_fields(fields: &Fields) -> Map<String, serde_json::Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect()
}

fn encode_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        // int64 travels as a string
        Value::Integer(i) => json!({ "integerValue": i.to_string() }),
        Value::Double(d) => json!({ "doubleValue": d }),
        Value::String(s) => json!({ "stringValue": s }),
    }
}

/// Decodes Firestore typed values, skipping kinds the model has no use for.
pub(crate) fn decode_fields(raw: &Map<String, serde_json::Value>) -> Fields {
    raw.iter()
        .filter_map(|(name, value)| match decode_value(value) {
            Some(decoded) => Some((name.clone(), decoded)),
            None => {
                log::debug!("skipping field {name}: unsupported value {value}");
                None
            }
        })
        .collect()
}

fn decode_value(value: &serde_json::Value) -> Option<Value> {
    let object = value.as_object()?;
    let (kind, inner) = object.iter().next()?;
    match kind.as_str() {
        "nullValue" => Some(Value::Null),
        "booleanValue" => inner.as_bool().map(Value::Bool),
        "integerValue" => match inner {
            serde_json::Value::String(s) => s.parse().ok().map(Value::Integer),
            other => other.as_i64().map(Value::Integer),
        },
        // NaN and the infinities arrive as strings
        "doubleValue" => match inner {
            serde_json::Value::String(s) => s.parse().ok().map(Value::Double),
            other => other.as_f64().map(Value::Double),
        },
        "stringValue" => inner.as_str().map(Value::from),
        "timestampValue" => inner
            .as_str()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| Value::Integer(dt.timestamp_millis())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_fields() {
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::from("Tickets"));
        fields.insert("budget".into(), Value::Integer(200));
        fields.insert("status".into(), Value::Bool(false));
        let encoded = serde_json::Value::Object(encode_fields(&fields));
        assert_eq!(
            encoded,
            json!({
                "budget": { "integerValue": "200" },
                "name": { "stringValue": "Tickets" },
                "status": { "booleanValue": false },
            })
        );
    }

    #[test]
    fn test_decode_document() {
        let raw: RawDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/listusers/u/lists/l/items/Ab12",
            "fields": {
                "name": { "stringValue": "Tickets" },
                "date": { "integerValue": "1700000000000" },
                "budget": { "doubleValue": 12.5 },
                "tags": { "arrayValue": { "values": [] } }
            },
            "createTime": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(raw.id(), "Ab12");
        let fields = decode_fields(&raw.fields);
        assert_eq!(fields.get("date"), Some(&Value::Integer(1_700_000_000_000)));
        assert_eq!(fields.get("budget"), Some(&Value::Double(12.5)));
        assert!(!fields.contains_key("tags"));
    }

    #[test]
    fn test_decode_special_doubles_and_timestamps() {
        let nan = decode_value(&json!({ "doubleValue": "NaN" }));
        assert!(matches!(nan, Some(Value::Double(d)) if d.is_nan()));
        assert_eq!(
            decode_value(&json!({ "timestampValue": "1970-01-01T00:00:01Z" })),
            Some(Value::Integer(1000))
        );
    }

    fn items_url() -> Url {
        Url::parse("https://firestore.googleapis.com/v1/projects/p/databases/(default)/documents/listusers/u1/lists/l1/items").unwrap()
    }

    #[test]
    fn test_page_url() {
        let first = page_url(items_url(), None);
        assert_eq!(first.query(), Some("pageSize=300"));
        let next = page_url(items_url(), Some("tok/1"));
        assert_eq!(next.query(), Some("pageSize=300&pageToken=tok%2F1"));
    }

    #[test]
    fn test_merge_url_masks_supplied_fields() {
        let mut fields = Fields::new();
        fields.insert("status".into(), Value::Bool(true));
        fields.insert("name".into(), Value::from("Tickets"));
        let url = merge_url(items_url(), &fields);
        assert_eq!(
            url.query(),
            Some("updateMask.fieldPaths=name&updateMask.fieldPaths=status&currentDocument.exists=true")
        );
    }

    #[test]
    fn test_list_response_without_documents() {
        let page: ListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }

    // =========================================================================
    // Against a local HTTP stub
    // =========================================================================

    mod http {
        use tokio::io::AsyncReadExt;
        use tokio::io::AsyncWriteExt;
        use tokio::net::TcpListener;
        use tokio::net::TcpStream;
        use tokio::task::JoinHandle;

        use super::*;
        use crate::auth::StaticTokenProvider;
        use crate::path::Layout;
        use crate::model::ItemId;
        use crate::model::ListId;
        use crate::model::UserId;

        const DOC_PREFIX: &str = "projects/p/databases/(default)/documents/listusers/u1/lists/l1/items";

        /// Serves one canned `(status, body)` per connection, in order, and
        /// returns the request lines it saw.
        async fn serve(replies: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let handle = tokio::spawn(async move {
                let mut seen = Vec::new();
                for (status, body) in replies {
                    let (mut socket, _) = listener.accept().await.unwrap();
                    seen.push(read_request_line(&mut socket).await);
                    let reply = format!(
                        "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    socket.write_all(reply.as_bytes()).await.unwrap();
                    socket.shutdown().await.unwrap();
                }
                seen
            });
            (format!("http://{addr}/v1"), handle)
        }

        /// Reads a whole request and returns its first line.
        async fn read_request_line(socket: &mut TcpStream) -> String {
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                    continue;
                };
                let head = String::from_utf8_lossy(&buf[..end]).to_string();
                let length = head
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return head.lines().next().unwrap_or_default().to_string();
                }
            }
            String::from_utf8_lossy(&buf).lines().next().unwrap_or_default().to_string()
        }

        fn store(base_url: &str) -> FirestoreStore {
            let client = FirestoreClient::builder()
                .project_id("p")
                .token_provider(StaticTokenProvider::new("token"))
                .base_url(base_url)
                .build()
                .unwrap();
            FirestoreStore::new(client)
        }

        fn items() -> CollectionPath {
            Layout::default()
                .items(&UserId::new("u1"), &ListId::new("l1"))
                .unwrap()
        }

        fn item(id: &str) -> DocumentPath {
            Layout::default()
                .item(&UserId::new("u1"), &ListId::new("l1"), &ItemId::new(id))
                .unwrap()
        }

        fn doc_json(id: &str, name: &str) -> serde_json::Value {
            json!({
                "name": format!("{DOC_PREFIX}/{id}"),
                "fields": { "name": { "stringValue": name } }
            })
        }

        fn not_found() -> (u16, String) {
            let body = json!({ "error": { "code": 404, "message": "No document to update", "status": "NOT_FOUND" } });
            (404, body.to_string())
        }

        fn named(name: &str) -> Fields {
            let mut fields = Fields::new();
            fields.insert("name".into(), Value::from(name));
            fields
        }

        #[tokio::test]
        async fn test_list_follows_page_tokens() {
            let first = json!({ "documents": [doc_json("a", "A")], "nextPageToken": "tok" });
            let second = json!({ "documents": [doc_json("b", "B")] });
            let (base, seen) = serve(vec![(200, first.to_string()), (200, second.to_string())]).await;

            let docs = store(&base).list(&items()).await.unwrap();
            let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
            assert_eq!(ids, ["a", "b"]);

            let seen = seen.await.unwrap();
            assert!(seen[0].starts_with("GET /v1/projects/p/databases/(default)/documents/listusers/u1/lists/l1/items?pageSize=300 "));
            assert!(seen[1].contains("pageToken=tok"));
        }

        #[tokio::test]
        async fn test_merge_patches_with_mask_and_precondition() {
            let (base, seen) = serve(vec![(200, doc_json("x", "B").to_string())]).await;

            store(&base).merge(&item("x"), named("B")).await.unwrap();

            let seen = seen.await.unwrap();
            assert!(seen[0].starts_with("PATCH "));
            assert!(seen[0].contains("/items/x?updateMask.fieldPaths=name&currentDocument.exists=true "));
        }

        #[tokio::test]
        async fn test_merge_missing_document_is_not_found() {
            let (base, _) = serve(vec![not_found()]).await;
            let err = store(&base).merge(&item("x"), named("B")).await.unwrap_err();
            assert!(err.is_not_found());
        }

        #[tokio::test]
        async fn test_empty_merge_only_checks_existence() {
            let (base, seen) = serve(vec![(200, doc_json("x", "A").to_string()), not_found()]).await;
            let store = store(&base);

            store.merge(&item("x"), Fields::new()).await.unwrap();
            let err = store.merge(&item("x"), Fields::new()).await.unwrap_err();
            assert!(err.is_not_found());

            let seen = seen.await.unwrap();
            assert!(seen.iter().all(|line| line.starts_with("GET ")));
        }

        #[tokio::test]
        async fn test_delete_missing_document_succeeds() {
            let (base, seen) = serve(vec![not_found()]).await;
            store(&base).delete(&item("x")).await.unwrap();
            assert!(seen.await.unwrap()[0].starts_with("DELETE "));
        }

        #[tokio::test]
        async fn test_get_missing_document_is_none() {
            let (base, _) = serve(vec![not_found()]).await;
            assert_eq!(store(&base).get(&item("x")).await.unwrap(), None);
        }

        #[tokio::test]
        async fn test_create_returns_assigned_id() {
            let (base, seen) = serve(vec![(200, doc_json("Zx9", "A").to_string())]).await;
            let id = store(&base).create(&items(), named("A")).await.unwrap();
            assert_eq!(id, "Zx9");
            assert!(seen.await.unwrap()[0].starts_with("POST "));
        }

        #[tokio::test]
        async fn test_permission_denied_keeps_detail() {
            let body = json!({ "error": { "code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED" } });
            let (base, _) = serve(vec![(403, body.to_string())]).await;

            let err = store(&base).list(&items()).await.unwrap_err();
            match err {
                Error::Backend(ApiError::Http { status, message, detail }) => {
                    assert_eq!(status, 403);
                    assert_eq!(message, "Missing or insufficient permissions.");
                    assert_eq!(detail.unwrap().status, "PERMISSION_DENIED");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_malformed_body_is_parse_error() {
            let (base, _) = serve(vec![(200, "not json".to_string())]).await;
            let err = store(&base).get(&item("x")).await.unwrap_err();
            assert!(matches!(
                err,
                Error::Backend(ApiError::Parse { body: Some(ref body), .. }) if body == "not json"
            ));
        }
    }
}
