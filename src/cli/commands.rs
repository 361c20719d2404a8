//! CLI commands and argument parsing

use crate::types::{OrderDirection, RowInsertPosition};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for SeaTable bases
#[derive(Parser, Debug)]
#[command(name = "seatable")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON); SEATABLE_* variables override it
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a read-only SQL query
    Query {
        #[arg(long)]
        sql: String,

        /// Return internal column keys instead of column names
        #[arg(long)]
        raw_keys: bool,
    },

    /// List rows of a table
    Rows {
        #[arg(short, long)]
        table: String,

        #[arg(long)]
        view: Option<String>,

        /// Column to sort by
        #[arg(long)]
        order_by: Option<String>,

        /// Sort direction (asc or desc)
        #[arg(long, requires = "order_by")]
        direction: Option<OrderDirection>,

        /// Offset of the first row
        #[arg(long)]
        start: Option<u64>,

        /// Maximum number of rows
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Fetch one row
    Row {
        #[arg(short, long)]
        table: String,

        #[arg(long)]
        id: String,
    },

    /// Insert a row given as a JSON object
    AddRow {
        #[arg(short, long)]
        table: String,

        /// Row as JSON, e.g. '{"Name": "Alice"}'
        #[arg(long)]
        json: String,

        /// Insert next to this row
        #[arg(long)]
        anchor: Option<String>,

        /// before or after the anchor row
        #[arg(long, default_value = "after")]
        position: RowInsertPosition,
    },

    /// Delete one row
    DeleteRow {
        #[arg(short, long)]
        table: String,

        #[arg(long)]
        id: String,
    },

    /// Show a user's profile (admin credentials required)
    User {
        #[arg(long)]
        id: String,
    },

    /// Start the webhook receiver
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}
