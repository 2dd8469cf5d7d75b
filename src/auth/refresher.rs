//! UAA refresh-token grant

use super::token::TokenStore;
use crate::error::{Error, Result};
use crate::http::resolve_url;
use crate::template::uaa_routes;
use base64::Engine as _;
use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

/// OAuth client id used by the cf CLI
pub const DEFAULT_CLIENT_ID: &str = "cf";

/// Exchanges the stored refresh token for a new access token
#[derive(Clone)]
pub struct TokenRefresher {
    http_client: Client,
    method: Method,
    token_url: Url,
    client_id: String,
    client_secret: String,
}

impl TokenRefresher {
    /// Create a refresher for the given UAA endpoint
    pub fn new(uaa_endpoint: &Url, http_client: Client) -> Result<Self> {
        let routes = uaa_routes();
        let route = routes.get("refresh_token")?;
        let token_url = resolve_url(uaa_endpoint, &route.render(&[])?)?;

        Ok(Self {
            http_client,
            method: route.method.into(),
            token_url,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client_secret: String::new(),
        })
    }

    /// Use a different OAuth client
    #[must_use]
    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = client_id.into();
        self.client_secret = client_secret.into();
        self
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// `Authorization` value identifying the OAuth client
    fn basic_credentials(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }

    /// Run the refresh grant and store the new token in `store`.
    ///
    /// A rejected refresh token (401) is reported as `Error::InvalidToken`.
    pub async fn refresh(&self, store: &TokenStore) -> Result<()> {
        let refresh_token = store
            .refresh_token()
            .ok_or_else(|| Error::token_refresh("No refresh token configured"))?;

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ];

        debug!("Refreshing token at {}", self.token_url);

        let response = self
            .http_client
            .request(self.method.clone(), self.token_url.clone())
            .header(AUTHORIZATION, self.basic_credentials())
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            warn!("Refresh token rejected by {}", self.token_url);
            return Err(Error::InvalidToken);
        }

        if status != StatusCode::OK {
            return Err(Error::token_refresh(format!(
                "Refresh token request failed with status {}: {}",
                status.as_u16(),
                String::from_utf8_lossy(&body)
            )));
        }

        let token_response: TokenResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::token_refresh(format!("Invalid token response: {e}")))?;

        let expires_at = token_response
            .expires_in
            .map(|secs| {
                chrono::Duration::try_seconds(secs)
                    .and_then(|ttl| Utc::now().checked_add_signed(ttl))
                    .ok_or_else(|| {
                        Error::token_refresh(format!("Token lifetime out of range: {secs}s"))
                    })
            })
            .transpose()?;
        let token_type = token_response.token_type.as_deref().unwrap_or("bearer");

        store.store_refreshed(
            format!("{token_type} {}", token_response.access_token),
            token_response.refresh_token,
            expires_at,
        );

        info!("Token refreshed");
        Ok(())
    }
}

impl std::fmt::Debug for TokenRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRefresher")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}
