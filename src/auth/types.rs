//! Access grant types
//!
//! An access grant is what a base API token is exchanged for: a
//! short-lived token scoped to one base plus the hosts that serve it.

use crate::envelope::AppAccessTokenResponse;
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

/// Path appended to the socket host to reach the SQL query service
pub const DB_SERVER_PATH: &str = "dtable-db";

/// How long a grant is used before it is exchanged again
pub fn grant_max_age() -> Duration {
    Duration::hours(48)
}

/// Scoped bearer token and resolved hosts for one base
///
/// All fields are set together; a grant is only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    /// Token sent as `Authorization: Token <access_token>`
    pub access_token: String,
    /// Host serving row CRUD
    pub server: String,
    /// Host serving SQL queries (socket host + `dtable-db`)
    pub db_server: String,
    /// Unique identifier of the base
    pub dtable_uuid: String,
    /// When the grant was obtained
    pub acquired_at: DateTime<Utc>,
}

impl AccessGrant {
    /// Build a grant from the token endpoint's response
    ///
    /// `management_url` is the URL the grant was requested from; when it is
    /// https, plain-http hosts in the response are upgraded to https.
    pub fn from_response(
        management_url: &str,
        response: AppAccessTokenResponse,
        acquired_at: DateTime<Utc>,
    ) -> Self {
        let server = normalize_host(management_url, &response.dtable_server);
        let socket = normalize_host(management_url, &response.dtable_socket);

        Self {
            access_token: response.access_token,
            server,
            db_server: format!("{socket}/{DB_SERVER_PATH}"),
            dtable_uuid: response.dtable_uuid,
            acquired_at,
        }
    }

    /// Usable at `now`: no older than [`grant_max_age`]
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now - self.acquired_at <= grant_max_age()
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }
}

/// Where the base connection stands in its authentication lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No grant yet
    Unauthenticated,
    /// Grant present and fresh
    Authenticated,
    /// Grant present but too old; the next operation re-authenticates
    Stale,
}

impl AuthState {
    pub fn of(grant: Option<&AccessGrant>, now: DateTime<Utc>) -> Self {
        match grant {
            None => AuthState::Unauthenticated,
            Some(g) if g.is_fresh_at(now) => AuthState::Authenticated,
            Some(_) => AuthState::Stale,
        }
    }
}

/// Strip a trailing slash and, behind an https management URL, upgrade
/// an http host to https
pub fn normalize_host(management_url: &str, host: &str) -> String {
    let host = host.strip_suffix('/').unwrap_or(host);

    let secure = url::Url::parse(management_url).is_ok_and(|m| m.scheme() == "https");
    if secure {
        if let Ok(mut parsed) = url::Url::parse(host) {
            if parsed.scheme() == "http" && parsed.set_scheme("https").is_ok() {
                warn!("Upgrading insecure host {} to https", host);
                let upgraded = String::from(parsed);
                return upgraded.strip_suffix('/').unwrap_or(&upgraded).to_string();
            }
        }
    }

    host.to_string()
}

/// Strip one trailing slash from a configured server URL
pub fn normalize_server_url(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}
