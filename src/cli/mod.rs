//! CLI module
//!
//! Command-line interface for working with a SeaTable base.
//!
//! # Commands
//!
//! - `query` - Run a SQL query
//! - `rows` / `row` - Read rows
//! - `add-row` / `delete-row` - Change rows
//! - `user` - Look up a user profile
//! - `serve` - Start the webhook receiver

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{router, serve};
