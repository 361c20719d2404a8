//! Authentication module
//!
//! A base is accessed with a short-lived access grant obtained from its
//! long-lived API token. The `Authenticator` caches the grant and replaces
//! it lazily, before the first operation and whenever it is older than two
//! days.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{
    grant_max_age, normalize_host, normalize_server_url, AccessGrant, AuthState, DB_SERVER_PATH,
};
