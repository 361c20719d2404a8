//! Schema catalog
//!
//! Validators for every SeaTable column type, used to turn raw row JSON
//! into checked data.
//!
//! The two endpoints that return rows disagree on how an empty cell looks:
//!
//! - **SQL query** (`query_types`): every selected column is present,
//!   empty cells are `null`
//! - **Row endpoints** (`row_types`): empty cells are left out of the row
//!
//! Each column type therefore has one builder in each module.
//!
//! ```rust,ignore
//! use seatable_client::schema::{row_types, RowSchema};
//!
//! let schema = RowSchema::for_rows()
//!     .column("Name", row_types::text())
//!     .column("Status", row_types::single_select(["Open", "Done"]));
//! ```

mod row;
mod types;
mod validate;

pub mod query_types;
pub mod row_types;

pub use row::{Row, RowSchema, SchemaForm};
pub use types::{FieldKind, FieldSchema, Presence, StringFormat};
pub use validate::{ValidationError, ValidationIssue};

#[cfg(test)]
mod tests;
