//! SeaTable API clients
//!
//! - [`Admin`]: server-wide API (login, user profiles)
//! - [`Base`]: rows and SQL of one base
//! - [`Table`]: a [`Base`] bound to one table name

mod admin;
mod base;
mod table;

pub use admin::Admin;
pub use base::{Base, ListRowsOptions};
pub use table::Table;
