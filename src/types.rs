//! Common types used throughout the SeaTable client
//!
//! This module contains shared type definitions, type aliases,
//! and small request-side value types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Row Listing
// ============================================================================

/// Sort direction for row listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(OrderDirection::Asc),
            "DESC" => Ok(OrderDirection::Desc),
            other => Err(format!("unknown order direction '{other}', expected ASC or DESC")),
        }
    }
}

// ============================================================================
// Row Insertion
// ============================================================================

/// Where a new row goes relative to its anchor row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowInsertPosition {
    #[serde(rename = "insert_before")]
    Before,
    #[serde(rename = "insert_after")]
    After,
}

impl std::str::FromStr for RowInsertPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" | "insert_before" => Ok(RowInsertPosition::Before),
            "after" | "insert_after" => Ok(RowInsertPosition::After),
            other => Err(format!("unknown insert position '{other}', expected before or after")),
        }
    }
}

/// Existing row a new row is positioned against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAnchor {
    pub row_id: String,
    pub position: RowInsertPosition,
}

impl RowAnchor {
    pub fn before(row_id: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            position: RowInsertPosition::Before,
        }
    }

    pub fn after(row_id: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            position: RowInsertPosition::After,
        }
    }
}

/// One entry of a batch update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowUpdate<R> {
    pub row_id: String,
    pub row: R,
}

impl<R> RowUpdate<R> {
    pub fn new(row_id: impl Into<String>, row: R) -> Self {
        Self {
            row_id: row_id.into(),
            row,
        }
    }
}
