// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # SeaTable Client
//!
//! A typed client for SeaTable bases. Every response is checked against a
//! schema before it reaches the caller, so a renamed column or a changed
//! select option shows up as a validation error instead of a surprise
//! further down the line.
//!
//! ## Features
//!
//! - **Base operations**: SQL queries and row CRUD, one or many rows at a time
//! - **Access grants**: base API tokens are exchanged for scoped tokens and
//!   refreshed after two days without caller involvement
//! - **Schema catalog**: builders for every column type, in the shape SQL
//!   results use and in the shape row listings use
//! - **Webhooks**: validated webhook payloads and a small receiver
//! - **Admin**: login and user profile lookups
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use seatable_client::schema::{query_types, RowSchema};
//! use seatable_client::{Base, Result};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Task {
//!     #[serde(rename = "Name")]
//!     name: Option<String>,
//!     #[serde(rename = "Done")]
//!     done: bool,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let base = Base::new("https://cloud.seatable.io", "api-token");
//!
//!     let schema = RowSchema::for_query()
//!         .column("Name", query_types::text())
//!         .column("Done", query_types::checkbox());
//!
//!     let tasks: Vec<Task> = base.query("SELECT Name, Done FROM Tasks", &schema).await?;
//!     base.table("Tasks").delete_row("QxWKbHGiS2mDd9yxR3Sxqw").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │          Admin            Base ──── Table                    │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──┬──────────────┬─────────────┐
//! │     Auth     │      HTTP        │   Envelope   │   Schema    │
//! ├──────────────┼──────────────────┼──────────────┼─────────────┤
//! │ Access grant │ JSON requests    │ Responses    │ Query form  │
//! │ Freshness    │ Token header     │ Webhooks     │ Row form    │
//! └──────────────┴──────────────────┴──────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Column schemas and row validation
pub mod schema;

/// Response envelopes and webhook payloads
pub mod envelope;

/// JSON over HTTP
pub mod http;

/// Access grants for bases
pub mod auth;

/// Admin, base and table clients
pub mod client;

/// Connection settings
pub mod config;

/// Command-line interface
pub mod cli;

// Re-export commonly used types
pub use auth::{AccessGrant, AuthState};
pub use client::{Admin, Base, ListRowsOptions, Table};
pub use config::ClientConfig;
pub use envelope::{WebhookEvent, User};
pub use error::{Error, Result};
pub use schema::{Row, RowSchema, ValidationError};
pub use types::{OrderDirection, RowAnchor, RowInsertPosition, RowUpdate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
