//! Column validators for rows returned by the SQL query endpoint
//!
//! The query endpoint always returns every selected column; an empty
//! value arrives as an explicit `null`.

use super::types::{FieldKind, FieldSchema, Presence, StringFormat};

pub fn text() -> FieldSchema {
    FieldSchema::nullable(FieldKind::string())
}

pub fn long_text() -> FieldSchema {
    FieldSchema::nullable(FieldKind::string())
}

pub fn number() -> FieldSchema {
    FieldSchema::nullable(FieldKind::Number)
}

pub fn percent() -> FieldSchema {
    FieldSchema::nullable(FieldKind::Number)
}

pub fn dollar() -> FieldSchema {
    FieldSchema::nullable(FieldKind::Number)
}

pub fn euro() -> FieldSchema {
    FieldSchema::nullable(FieldKind::Number)
}

pub fn yuan() -> FieldSchema {
    FieldSchema::nullable(FieldKind::Number)
}

/// Auto numbers are generated for every row, so they are never null
pub fn auto_number() -> FieldSchema {
    FieldSchema::required(FieldKind::string())
}

/// Unchecked boxes come back as `false`
pub fn checkbox() -> FieldSchema {
    FieldSchema::required(FieldKind::Boolean)
}

pub fn email() -> FieldSchema {
    FieldSchema::nullable(FieldKind::String(StringFormat::Email))
}

pub fn url() -> FieldSchema {
    FieldSchema::nullable(FieldKind::String(StringFormat::Url))
}

pub fn duration() -> FieldSchema {
    FieldSchema::nullable(FieldKind::string())
}

/// List of image URLs
pub fn image() -> FieldSchema {
    FieldSchema::nullable(FieldKind::array_of(FieldKind::string()))
}

pub fn rating() -> FieldSchema {
    FieldSchema::nullable(FieldKind::Number)
}

pub fn geolocation() -> FieldSchema {
    FieldSchema::nullable(geolocation_kind())
}

pub(crate) fn geolocation_kind() -> FieldKind {
    FieldKind::object([
        ("lng", FieldSchema::required(FieldKind::Number)),
        ("lat", FieldSchema::required(FieldKind::Number)),
        ("country_region", FieldSchema::required(FieldKind::string())),
    ])
}

/// Buttons carry no value
pub fn button() -> FieldSchema {
    FieldSchema::required(FieldKind::Null)
}

/// Linked rows as `{row_id, display_value}` pairs
pub fn link() -> FieldSchema {
    FieldSchema::nullable(FieldKind::array_of(FieldKind::object([
        ("row_id", FieldSchema::required(FieldKind::string())),
        ("display_value", FieldSchema::required(FieldKind::string())),
    ])))
}

/// List of user identifiers
pub fn collaborator() -> FieldSchema {
    FieldSchema::nullable(FieldKind::array_of(FieldKind::string()))
}

pub fn single_select<I, S>(options: I) -> FieldSchema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FieldSchema::nullable(FieldKind::one_of(options))
}

/// Single select whose options are not declared
pub fn lazy_single_select() -> FieldSchema {
    FieldSchema::nullable(FieldKind::string())
}

pub fn multiple_select<I, S>(options: I) -> FieldSchema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FieldSchema::nullable(FieldKind::array_of(FieldKind::one_of(options)))
}

/// Multiple select whose options are not declared
pub fn lazy_multiple_select() -> FieldSchema {
    FieldSchema::nullable(FieldKind::array_of(FieldKind::string()))
}

/// Formula column producing values of `result`'s shape
pub fn formula(result: FieldSchema) -> FieldSchema {
    result.with_presence(Presence::Nullable)
}

/// Link formula column producing values of `result`'s shape
pub fn link_formula(result: FieldSchema) -> FieldSchema {
    result.with_presence(Presence::Nullable)
}

// System columns

pub fn id() -> FieldSchema {
    FieldSchema::required(FieldKind::string())
}

pub fn ctime() -> FieldSchema {
    FieldSchema::required(FieldKind::string())
}

pub fn mtime() -> FieldSchema {
    FieldSchema::required(FieldKind::string())
}

pub fn archived() -> FieldSchema {
    FieldSchema::required(FieldKind::Boolean)
}

pub fn locked() -> FieldSchema {
    FieldSchema::nullable(FieldKind::Boolean)
}

pub fn locked_by() -> FieldSchema {
    FieldSchema::required(FieldKind::string())
}

pub fn creator() -> FieldSchema {
    FieldSchema::required(FieldKind::string())
}

pub fn last_modifier() -> FieldSchema {
    FieldSchema::required(FieldKind::string())
}
