//! Admin client
//!
//! Talks to the server-wide API with an account token obtained from a
//! username and password.

use crate::auth::normalize_server_url;
use crate::envelope::{self, AdminAuthTokenResponse, User};
use crate::error::Result;
use crate::http::{endpoint_url, HttpClient, RequestConfig};
use serde_json::json;
use tracing::info;

/// Session against the server-wide API
#[derive(Clone)]
pub struct Admin {
    server: String,
    token: String,
    http_client: HttpClient,
}

impl Admin {
    /// Session from an already obtained account token
    pub fn new(url: &str, token: impl Into<String>) -> Self {
        Self::with_http_client(url, token, HttpClient::new())
    }

    pub fn with_http_client(url: &str, token: impl Into<String>, http_client: HttpClient) -> Self {
        Self {
            server: normalize_server_url(url),
            token: token.into(),
            http_client,
        }
    }

    /// Log in with a username and password
    pub async fn with_credentials(url: &str, username: &str, password: &str) -> Result<Self> {
        Self::with_credentials_and_client(url, username, password, HttpClient::new()).await
    }

    /// Log in with a username and password using a preconfigured HTTP client
    pub async fn with_credentials_and_client(
        url: &str,
        username: &str,
        password: &str,
        http_client: HttpClient,
    ) -> Result<Self> {
        let server = normalize_server_url(url);
        let body = http_client
            .post_json(
                &format!("{server}/api2/auth-token/"),
                RequestConfig::new().json(json!({
                    "username": username,
                    "password": password,
                })),
            )
            .await?;

        let response: AdminAuthTokenResponse = envelope::parse(body)?;
        info!("Logged in to {} as {}", server, username);

        Ok(Self {
            server,
            token: response.token,
            http_client,
        })
    }

    pub fn url(&self) -> &str {
        &self.server
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Look up a user's public profile
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        let url = endpoint_url(
            &self.server,
            &["api", "v2.1", "user-common-info", user_id],
            false,
        )?;
        let body = self
            .http_client
            .get_json(&url, RequestConfig::new().token(self.token.as_str()))
            .await?;

        Ok(envelope::parse(body)?)
    }
}

impl std::fmt::Debug for Admin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Admin")
            .field("server", &self.server)
            .finish_non_exhaustive()
    }
}
