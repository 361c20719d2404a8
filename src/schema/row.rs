//! Composite row validators

use super::types::FieldSchema;
use super::validate::{join_path, ValidationError, ValidationIssue};
use super::{query_types, row_types};
use crate::types::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A row with its columns as raw JSON, unknown columns included
pub type Row = JsonObject;

/// Which endpoint a row schema describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaForm {
    /// Rows from the row endpoints (empty cells omitted)
    Row,
    /// Rows from the SQL query endpoint (empty cells null)
    Query,
}

/// Validator for one row: system columns plus caller-declared columns
///
/// Fields not declared in the schema are tolerated and kept in the
/// parsed output.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSchema {
    form: SchemaForm,
    columns: Vec<(String, FieldSchema)>,
}

impl RowSchema {
    /// Schema for the row endpoints: `_id` is required, the other system
    /// columns are accepted when present
    pub fn for_rows() -> Self {
        Self {
            form: SchemaForm::Row,
            columns: vec![
                ("_id".to_string(), row_types::id()),
                ("_ctime".to_string(), row_types::ctime()),
                ("_mtime".to_string(), row_types::mtime()),
                ("_creator".to_string(), row_types::creator()),
                ("_last_modifier".to_string(), row_types::last_modifier()),
                ("_archived".to_string(), row_types::archived()),
                ("_locked".to_string(), row_types::locked()),
                ("_locked_by".to_string(), row_types::locked_by()),
            ],
        }
    }

    /// Schema for SQL query results: only the declared columns are checked,
    /// since a query returns whatever it selects
    pub fn for_query() -> Self {
        Self {
            form: SchemaForm::Query,
            columns: Vec::new(),
        }
    }

    /// Query schema that also expects `_id`
    pub fn for_query_with_id() -> Self {
        Self::for_query().column("_id", query_types::id())
    }

    /// Declare a column, replacing any earlier declaration of the same name
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
        let name = name.into();
        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = field;
        } else {
            self.columns.push((name, field));
        }
        self
    }

    pub fn form(&self) -> SchemaForm {
        self.form
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.columns.iter().map(|(n, f)| (n.as_str(), f))
    }

    /// Check a single row
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        self.check(value, "", &mut issues);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }

    /// Validate a row and deserialize it into `T`
    pub fn parse<T: DeserializeOwned>(&self, value: Value) -> Result<T, ValidationError> {
        self.validate(&value)?;
        serde_json::from_value(value).map_err(|e| ValidationError::from_serde("", &e))
    }

    /// Validate every row, reporting issues under `path[i]`
    ///
    /// Fails if any row fails; the error lists the issues of all rows.
    pub fn parse_all<T: DeserializeOwned>(
        &self,
        values: Vec<Value>,
        path: &str,
    ) -> Result<Vec<T>, ValidationError> {
        let mut issues = Vec::new();
        for (i, value) in values.iter().enumerate() {
            self.check(value, &join_path(path, &format!("[{i}]")), &mut issues);
        }
        if !issues.is_empty() {
            return Err(ValidationError::new(issues));
        }

        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                serde_json::from_value(value).map_err(|e| {
                    ValidationError::from_serde(join_path(path, &format!("[{i}]")), &e)
                })
            })
            .collect()
    }

    fn check(&self, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
        let Value::Object(map) = value else {
            issues.push(ValidationIssue {
                path: path.to_string(),
                message: "expected row object".to_string(),
            });
            return;
        };
        for (name, field) in &self.columns {
            field.check_in(map, name, &join_path(path, name), issues);
        }
    }
}
