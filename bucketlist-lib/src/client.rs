//! Firestore REST client

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::StatusCode;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;

/// Default REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "(default)";

/// Client for the Firestore REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. It only knows how to address documents and send
/// authenticated requests; the document operations live on
/// [`FirestoreStore`](crate::store::FirestoreStore).
///
/// # Example
///
/// ```ignore
/// use bucketlist_lib::{FirestoreClient, auth::StaticTokenProvider};
///
/// let client = FirestoreClient::builder()
///     .project_id("my-bucket-list")
///     .token_provider(StaticTokenProvider::new(id_token))
///     .timeout(Duration::from_secs(15))
///     .build()?;
/// ```
#[derive(Clone)]
pub struct FirestoreClient {
    inner: Arc<FirestoreClientInner>,
}

struct FirestoreClientInner {
    documents_root: Url,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for FirestoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreClient")
            .field("documents_root", &self.inner.documents_root.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl FirestoreClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> FirestoreClientBuilder<Missing, Missing> {
        FirestoreClientBuilder::new()
    }

    /// Returns the URL all document paths are resolved against.
    pub fn documents_root(&self) -> &Url {
        &self.inner.documents_root
    }

    /// Builds the URL of a document or collection from path segments.
    ///
    /// Each segment is percent-encoded on its own.
    pub fn url_for(&self, segments: &[String]) -> Result<Url, ApiError> {
        let mut url = self.inner.documents_root.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.inner.documents_root.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends an authenticated request and returns the successful response.
    ///
    /// HTTP 404 becomes [`Error::NotFound`]; any other non-success status
    /// becomes [`ApiError::Http`]. Nothing is retried.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, Error> {
        let token = self.inner.token_provider.get_token().await?;

        log::trace!("{} {}", method, url);

        let mut request = self
            .inner
            .http_client
            .request(method, url.clone())
            .bearer_auth(&token.access_token);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| self.network_error(e))?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(Error::not_found(url.path()));
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Backend(ApiError::from_body(status.as_u16(), &body)))
    }

    fn network_error(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`FirestoreClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `project_id` - The Google Cloud project hosting the database
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct FirestoreClientBuilder<Project, Provider> {
    project_id: Project,
    token_provider: Provider,
    database: String,
    base_url: String,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl FirestoreClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            project_id: Missing,
            token_provider: Missing,
            database: DEFAULT_DATABASE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            http_client: None,
        }
    }
}

impl Default for FirestoreClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FirestoreClientBuilder<Missing, P> {
    /// Sets the project id.
    pub fn project_id(
        self,
        project_id: impl Into<String>,
    ) -> FirestoreClientBuilder<Set<String>, P> {
        FirestoreClientBuilder {
            project_id: Set(project_id.into()),
            token_provider: self.token_provider,
            database: self.database,
            base_url: self.base_url,
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> FirestoreClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> FirestoreClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        FirestoreClientBuilder {
            project_id: self.project_id,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            database: self.database,
            base_url: self.base_url,
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> FirestoreClientBuilder<U, P> {
    /// Sets the database id.
    ///
    /// Defaults to `(default)`.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Points the client at another endpoint, e.g. the local emulator.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl FirestoreClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`FirestoreClient`].
    ///
    /// Fails if the base url does not parse or cannot carry a path.
    pub fn build(self) -> Result<FirestoreClient, ApiError> {
        let mut documents_root =
            Url::parse(&self.base_url).map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?;
        documents_root
            .path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend([
                "projects",
                self.project_id.0.as_str(),
                "databases",
                self.database.as_str(),
                "documents",
            ]);

        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder().build()?,
        };

        Ok(FirestoreClient {
            inner: Arc::new(FirestoreClientInner {
                documents_root,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
