//! Cloud Controller client
//!
//! `CcClient` ties the pieces together: route table, token store, transport,
//! pagination walker and aggregator. The `Client` trait abstracts it so
//! callers can substitute a fake.

use crate::auth::{TokenRefresher, TokenStore};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{parse_endpoint, resolve_url, HttpTransport, Transport};
use crate::output::encode_resources;
use crate::pagination::{FetchLimit, Locator, WalkOutcome, Walker};
use crate::template::{cc_routes, RouteTable};
use crate::types::Application;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use url::form_urlencoded;
use url::Url;

// ============================================================================
// Client Trait
// ============================================================================

/// Operations offered by a Cloud Controller client
#[async_trait]
pub trait Client: Send + Sync {
    /// All applications matching `query`, as one JSON array
    async fn list_applications(&self, query: &[(String, String)]) -> Result<Bytes>;

    /// The raw body of a single-resource endpoint
    async fn get_resource(&self, path: &str) -> Result<Bytes>;

    /// Up to `limit` resources of a collection (0 = all), as one JSON array
    async fn list_resources(&self, path: &str, limit: usize) -> Result<Bytes>;

    /// Exchange the refresh token for a new access token
    async fn refresh_auth_token(&self) -> Result<()>;

    /// Replace the `Authorization` header value
    fn set_token(&self, token: String);

    /// Current `Authorization` header value
    fn token(&self) -> String;
}

// ============================================================================
// CcClient
// ============================================================================

/// Client for a Cloud Controller v3 API
pub struct CcClient<T: Transport = HttpTransport> {
    cc_endpoint: Url,
    routes: RouteTable,
    transport: T,
    token: TokenStore,
    refresher: Option<TokenRefresher>,
}

impl CcClient<HttpTransport> {
    /// Create a client with default HTTP settings
    pub fn new(cc_endpoint: &str, uaa_endpoint: &str, token: impl Into<String>) -> Result<Self> {
        let mut config = ClientConfig::new(cc_endpoint);
        config.uaa_endpoint = Some(uaa_endpoint.to_string());
        config.token = Some(token.into());
        Self::from_config(&config)
    }

    /// Create a client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let transport = HttpTransport::with_config(config.http.to_client_config())?;
        let cc_endpoint = parse_endpoint(&config.cc_endpoint)?;

        let refresher = match &config.uaa_endpoint {
            Some(uaa) => Some(
                TokenRefresher::new(&parse_endpoint(uaa)?, transport.inner().clone())?
                    .with_credentials(&config.client_id, &config.client_secret),
            ),
            None => None,
        };

        let mut token = TokenStore::new(config.token.clone().unwrap_or_default());
        if let Some(refresh_token) = &config.refresh_token {
            token = token.with_refresh_token(refresh_token);
        }

        Ok(Self::with_transport(cc_endpoint, transport, token, refresher))
    }
}

impl<T: Transport> CcClient<T> {
    /// Create a client over any transport
    pub fn with_transport(
        cc_endpoint: Url,
        transport: T,
        token: TokenStore,
        refresher: Option<TokenRefresher>,
    ) -> Self {
        Self {
            cc_endpoint,
            routes: cc_routes(),
            transport,
            token,
            refresher,
        }
    }

    pub fn cc_endpoint(&self) -> &Url {
        &self.cc_endpoint
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Shared token store; clones see every update
    pub fn token_store(&self) -> &TokenStore {
        &self.token
    }

    /// Current `Authorization` header value
    pub fn token(&self) -> String {
        self.token.token()
    }

    /// Replace the `Authorization` header value for subsequent requests
    pub fn set_token(&self, token: impl Into<String>) {
        self.token.set_token(token);
    }

    /// One authenticated GET, returning the exact body on 200.
    ///
    /// Any other status fails with `Error::UnexpectedStatus`, which still
    /// carries the body.
    pub async fn get_resource(&self, path: &str) -> Result<Bytes> {
        let url = resolve_url(&self.cc_endpoint, path)?;
        self.transport.get(&url, &self.token.token()).await
    }

    /// Walk a collection and return the resources plus the page count.
    ///
    /// Takes one token snapshot for the whole walk.
    pub async fn walk(&self, path: &str, limit: FetchLimit) -> Result<WalkOutcome> {
        let walker = Walker::new(&self.transport, &self.cc_endpoint, self.token.token());
        walker.walk(Locator::new(path), limit).await
    }

    /// Up to `limit` resources of a collection (0 = all), as one JSON array
    pub async fn list_resources(&self, path: &str, limit: usize) -> Result<Bytes> {
        let outcome = self.walk(path, FetchLimit::new(limit)).await?;
        encode_resources(&outcome.resources)
    }

    /// Path of the applications collection with `query` appended
    pub fn applications_path<K, V>(&self, query: &[(K, V)]) -> Result<String>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let path = self.routes.path("apps", &[])?;
        Ok(append_query(&path, query))
    }

    /// All applications matching `query`, as one JSON array
    pub async fn list_applications<K, V>(&self, query: &[(K, V)]) -> Result<Bytes>
    where
        K: AsRef<str> + Sync,
        V: AsRef<str> + Sync,
    {
        let path = self.applications_path(query)?;
        self.list_resources(&path, 0).await
    }

    /// Up to `limit` applications matching `query` (0 = all), decoded
    pub async fn applications<K, V>(&self, query: &[(K, V)], limit: usize) -> Result<Vec<Application>>
    where
        K: AsRef<str> + Sync,
        V: AsRef<str> + Sync,
    {
        let path = self.applications_path(query)?;
        let outcome = self.walk(&path, FetchLimit::new(limit)).await?;

        debug!(
            "Decoding {} applications from {} pages",
            outcome.resources.len(),
            outcome.pages
        );

        outcome
            .resources
            .into_iter()
            .map(|resource| {
                serde_json::from_value(resource)
                    .map_err(|e| Error::decode(format!("Invalid application: {e}")))
            })
            .collect()
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Never called implicitly; callers decide when a refresh is due.
    pub async fn refresh_auth_token(&self) -> Result<()> {
        let refresher = self
            .refresher
            .as_ref()
            .ok_or_else(|| Error::token_refresh("No UAA endpoint configured"))?;
        refresher.refresh(&self.token).await
    }
}

/// Append `query` to `path` as an url-encoded query string
pub fn append_query<K, V>(path: &str, query: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish();

    if encoded.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{encoded}")
    }
}

#[async_trait]
impl<T: Transport> Client for CcClient<T> {
    async fn list_applications(&self, query: &[(String, String)]) -> Result<Bytes> {
        CcClient::list_applications(self, query).await
    }

    async fn get_resource(&self, path: &str) -> Result<Bytes> {
        CcClient::get_resource(self, path).await
    }

    async fn list_resources(&self, path: &str, limit: usize) -> Result<Bytes> {
        CcClient::list_resources(self, path, limit).await
    }

    async fn refresh_auth_token(&self) -> Result<()> {
        CcClient::refresh_auth_token(self).await
    }

    fn set_token(&self, token: String) {
        CcClient::set_token(self, token);
    }

    fn token(&self) -> String {
        CcClient::token(self)
    }
}

impl<T: Transport> std::fmt::Debug for CcClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CcClient")
            .field("cc_endpoint", &self.cc_endpoint.as_str())
            .field("token", &self.token)
            .field("refresher", &self.refresher)
            .finish_non_exhaustive()
    }
}
