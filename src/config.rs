//! Client configuration
//!
//! Connection settings for the `seatable` binary and for programs that
//! prefer a config file over hard-coded credentials. Files are YAML or
//! JSON; `SEATABLE_*` environment variables override file values.
//!
//! ```yaml
//! server_url: https://cloud.seatable.io
//! api_token: 0a1b2c...
//! username: admin@example.com
//! password: secret
//! http:
//!   timeout_secs: 30
//! ```

use crate::client::{Admin, Base};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, HttpClientConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const ENV_SERVER_URL: &str = "SEATABLE_SERVER_URL";
pub const ENV_API_TOKEN: &str = "SEATABLE_API_TOKEN";
pub const ENV_USERNAME: &str = "SEATABLE_USERNAME";
pub const ENV_PASSWORD: &str = "SEATABLE_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "SEATABLE_TIMEOUT_SECS";

/// Connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Management URL of the SeaTable server
    #[serde(default)]
    pub server_url: String,

    /// Base API token, needed for base operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Account name, needed for admin operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default)]
    pub http: HttpSettings,
}

/// HTTP transport settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds; absent means no timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    /// Load a config file, then apply environment overrides
    ///
    /// `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let mut config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        config.apply_env()?;
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Build a config from environment variables alone
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override fields from `SEATABLE_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override fields from any key lookup using the `SEATABLE_*` names
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SERVER_URL) {
            self.server_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                Error::config(format!("{ENV_TIMEOUT_SECS} must be a whole number: {e}"))
            })?;
            self.http.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Check that the server URL is present and absolute
    pub fn validate(&self) -> Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(Error::missing_field("server_url"));
        }
        url::Url::parse(&self.server_url)?;
        Ok(())
    }

    pub fn require_api_token(&self) -> Result<&str> {
        self.api_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::missing_field("api_token"))
    }

    /// Username and password, both required
    pub fn require_admin_credentials(&self) -> Result<(&str, &str)> {
        let username = self
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::missing_field("username"))?;
        let password = self
            .password
            .as_deref()
            .ok_or_else(|| Error::missing_field("password"))?;
        Ok((username, password))
    }

    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder();
        if let Some(secs) = self.http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    pub fn http_client(&self) -> Result<HttpClient> {
        HttpClient::with_config(self.http_client_config())
    }

    /// Base connection from `server_url` and `api_token`
    pub fn base(&self) -> Result<Base> {
        let token = self.require_api_token()?;
        Ok(Base::with_http_client(
            &self.server_url,
            token,
            self.http_client()?,
        ))
    }

    /// Admin session, logging in with `username` and `password`
    pub async fn admin(&self) -> Result<Admin> {
        let (username, password) = self.require_admin_credentials()?;
        Admin::with_credentials_and_client(
            &self.server_url,
            username,
            password,
            self.http_client()?,
        )
        .await
    }
}
