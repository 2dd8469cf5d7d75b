//! Shared bearer token holder

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Clone, Default)]
struct Credentials {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// Token shared between a client and its clones.
///
/// Single writer, many readers. Readers always get an owned snapshot, so a
/// walk that grabbed the token keeps using that value even if a refresh
/// lands in the middle of it.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Credentials>>,
}

impl TokenStore {
    /// Create a store holding the given `Authorization` header value
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Credentials {
                access_token: token.into(),
                ..Credentials::default()
            })),
        }
    }

    /// Attach a refresh token used by the UAA refresh grant
    #[must_use]
    pub fn with_refresh_token(self, refresh_token: impl Into<String>) -> Self {
        self.set_refresh_token(Some(refresh_token.into()));
        self
    }

    /// Snapshot of the current `Authorization` header value
    pub fn token(&self) -> String {
        self.read(|c| c.access_token.clone())
    }

    /// Replace the `Authorization` header value.
    ///
    /// Clears any known expiry, since nothing is known about the new token.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.write(|c| {
            c.access_token = token;
            c.expires_at = None;
        });
    }

    /// Replace the token after a successful refresh
    pub(crate) fn store_refreshed(
        &self,
        token: String,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) {
        self.write(|c| {
            c.access_token = token;
            c.expires_at = expires_at;
            if refresh_token.is_some() {
                c.refresh_token = refresh_token;
            }
        });
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(|c| c.refresh_token.clone())
    }

    pub fn set_refresh_token(&self, refresh_token: Option<String>) {
        self.write(|c| c.refresh_token = refresh_token);
    }

    /// When the current token expires, if the server told us
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.read(|c| c.expires_at)
    }

    /// Check if the token expires within the next 30 seconds.
    ///
    /// Tokens set by hand carry no expiry and never count as expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at() {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Credentials) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut Credentials)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_token", &self.read(|c| !c.access_token.is_empty()))
            .field("has_refresh_token", &self.read(|c| c.refresh_token.is_some()))
            .field("expires_at", &self.expires_at())
            .finish()
    }
}
