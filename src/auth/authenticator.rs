//! Base authenticator
//!
//! Exchanges a base API token for an access grant and keeps the grant
//! cached until it goes stale.

use super::types::{AccessGrant, AuthState};
use crate::envelope::{self, AppAccessTokenResponse};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Owns the access grant of one base
///
/// The lock only guards reads and writes of the cached grant; it is never
/// held while a grant request is in flight. Operations that find the grant
/// missing or stale at the same time each request a new one, and the last
/// one to finish wins.
pub struct Authenticator {
    /// Management URL of the base, without trailing slash
    url: String,
    /// Long-lived base API token
    api_token: String,
    /// Cached grant
    grant: RwLock<Option<AccessGrant>>,
    /// HTTP client for token requests
    http_client: HttpClient,
}

impl Authenticator {
    /// Create an authenticator for the base behind `url`
    pub fn new(url: impl Into<String>, api_token: impl Into<String>, http_client: HttpClient) -> Self {
        Self {
            url: url.into(),
            api_token: api_token.into(),
            grant: RwLock::new(None),
            http_client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current lifecycle state
    pub async fn state(&self) -> AuthState {
        AuthState::of(self.grant.read().await.as_ref(), Utc::now())
    }

    /// The cached grant, fresh or not
    pub async fn grant(&self) -> Option<AccessGrant> {
        self.grant.read().await.clone()
    }

    /// Get a fresh grant, authenticating if there is none or it is stale
    pub async fn ensure_grant(&self) -> Result<AccessGrant> {
        {
            let cached = self.grant.read().await;
            match cached.as_ref() {
                Some(grant) if grant.is_fresh() => return Ok(grant.clone()),
                Some(grant) => warn!(
                    "Access grant for base {} is stale, re-authenticating",
                    grant.dtable_uuid
                ),
                None => {}
            }
        }

        self.authenticate().await
    }

    /// Request a new grant and replace the cached one
    ///
    /// On failure the cached grant is left untouched.
    pub async fn authenticate(&self) -> Result<AccessGrant> {
        let url = format!("{}/api/v2.1/dtable/app-access-token/", self.url);
        let body = self
            .http_client
            .get_json(&url, RequestConfig::new().token(self.api_token.as_str()))
            .await?;
        let response: AppAccessTokenResponse = envelope::parse(body)?;

        let grant = AccessGrant::from_response(&self.url, response, Utc::now());
        info!("Obtained access grant for base {}", grant.dtable_uuid);

        *self.grant.write().await = Some(grant.clone());
        Ok(grant)
    }

    /// Replace the cached grant
    #[cfg(test)]
    pub(crate) async fn set_grant(&self, grant: Option<AccessGrant>) {
        *self.grant.write().await = grant;
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}
