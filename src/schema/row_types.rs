//! Column validators for rows returned by the row endpoints
//!
//! The row-listing endpoint leaves empty cells out of the row object
//! entirely, so every business column here is optional rather than
//! nullable.

use super::query_types::geolocation_kind;
use super::types::{FieldKind, FieldSchema, Presence, StringFormat};

pub fn text() -> FieldSchema {
    FieldSchema::optional(FieldKind::string())
}

pub fn long_text() -> FieldSchema {
    FieldSchema::optional(FieldKind::string())
}

pub fn number() -> FieldSchema {
    FieldSchema::optional(FieldKind::Number)
}

pub fn percent() -> FieldSchema {
    FieldSchema::optional(FieldKind::Number)
}

pub fn dollar() -> FieldSchema {
    FieldSchema::optional(FieldKind::Number)
}

pub fn euro() -> FieldSchema {
    FieldSchema::optional(FieldKind::Number)
}

pub fn yuan() -> FieldSchema {
    FieldSchema::optional(FieldKind::Number)
}

pub fn auto_number() -> FieldSchema {
    FieldSchema::optional(FieldKind::string())
}

/// Unchecked boxes are usually omitted
pub fn checkbox() -> FieldSchema {
    FieldSchema::optional(FieldKind::Boolean)
}

pub fn email() -> FieldSchema {
    FieldSchema::optional(FieldKind::String(StringFormat::Email))
}

pub fn url() -> FieldSchema {
    FieldSchema::optional(FieldKind::String(StringFormat::Url))
}

pub fn duration() -> FieldSchema {
    FieldSchema::optional(FieldKind::string())
}

pub fn image() -> FieldSchema {
    FieldSchema::optional(FieldKind::array_of(FieldKind::string()))
}

pub fn rating() -> FieldSchema {
    FieldSchema::optional(FieldKind::Number)
}

pub fn geolocation() -> FieldSchema {
    FieldSchema::optional(geolocation_kind())
}

/// Buttons carry no value; if the key appears at all it must be `null`
pub fn button() -> FieldSchema {
    FieldSchema::optional(FieldKind::Null)
}

/// Linked row ids (links are not converted to display values here)
pub fn link() -> FieldSchema {
    FieldSchema::optional(FieldKind::array_of(FieldKind::string()))
}

pub fn collaborator() -> FieldSchema {
    FieldSchema::optional(FieldKind::array_of(FieldKind::string()))
}

pub fn single_select<I, S>(options: I) -> FieldSchema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FieldSchema::optional(FieldKind::one_of(options))
}

pub fn lazy_single_select() -> FieldSchema {
    FieldSchema::optional(FieldKind::string())
}

pub fn multiple_select<I, S>(options: I) -> FieldSchema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FieldSchema::optional(FieldKind::array_of(FieldKind::one_of(options)))
}

pub fn lazy_multiple_select() -> FieldSchema {
    FieldSchema::optional(FieldKind::array_of(FieldKind::string()))
}

pub fn formula(result: FieldSchema) -> FieldSchema {
    result.with_presence(Presence::Optional)
}

pub fn link_formula(result: FieldSchema) -> FieldSchema {
    result.with_presence(Presence::Optional)
}

// System columns. Only `_id` is guaranteed on every row.

pub fn id() -> FieldSchema {
    FieldSchema::required(FieldKind::string())
}

pub fn ctime() -> FieldSchema {
    FieldSchema::optional(FieldKind::string())
}

pub fn mtime() -> FieldSchema {
    FieldSchema::optional(FieldKind::string())
}

pub fn archived() -> FieldSchema {
    FieldSchema::optional(FieldKind::Boolean)
}

/// The row endpoints send `_locked: null` for rows that were never locked
pub fn locked() -> FieldSchema {
    FieldSchema::optional_nullable(FieldKind::Boolean)
}

pub fn locked_by() -> FieldSchema {
    FieldSchema::optional(FieldKind::string())
}

pub fn creator() -> FieldSchema {
    FieldSchema::optional(FieldKind::string())
}

pub fn last_modifier() -> FieldSchema {
    FieldSchema::optional(FieldKind::string())
}
