//! Validation errors and the JSON checks behind every schema
//!
//! Validation never stops at the first problem: every issue found in a
//! payload is collected with the JSON path it occurred at, so callers see
//! the whole structured diff at once.

use super::types::{FieldKind, FieldSchema, Presence, StringFormat};
use crate::types::JsonObject;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A single mismatch between a payload and its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// JSON path of the offending value (e.g. `rows[2].Status`), empty for the root
    pub path: String,
    /// What was wrong
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A payload did not match its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Create an error from collected issues
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Create an error with one issue
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue {
                path: path.into(),
                message: message.into(),
            }],
        }
    }

    /// Wrap a serde decoding failure
    pub fn from_serde(path: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::single(path, err.to_string())
    }

    /// All issues, in the order they were found
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Whether any issue is reported at `path`
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path == path)
    }

    /// Nest every issue path under `prefix`
    #[must_use]
    pub fn with_prefix(self, prefix: &str) -> Self {
        let issues = self
            .issues
            .into_iter()
            .map(|i| ValidationIssue {
                path: join_path(prefix, &i.path),
                message: i.message,
            })
            .collect();
        Self { issues }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [] => write!(f, "invalid payload"),
            [one] => write!(f, "{one}"),
            many => {
                write!(f, "{} issues: ", many.len())?;
                for (i, issue) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{issue}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Append a key or index segment to a JSON path
pub(crate) fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else if segment.is_empty() {
        prefix.to_string()
    } else if segment.starts_with('[') {
        format!("{prefix}{segment}")
    } else {
        format!("{prefix}.{segment}")
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn push(issues: &mut Vec<ValidationIssue>, path: &str, message: String) {
    issues.push(ValidationIssue {
        path: path.to_string(),
        message,
    });
}

impl FieldKind {
    /// Check a present, non-null value against this kind
    pub(crate) fn check(&self, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
        match (self, value) {
            (FieldKind::String(format), Value::String(s)) => match format {
                StringFormat::Plain => {}
                StringFormat::Email => {
                    if !EMAIL_RE.is_match(s) {
                        push(issues, path, format!("invalid email address '{s}'"));
                    }
                }
                StringFormat::Url => {
                    if url::Url::parse(s).is_err() {
                        push(issues, path, format!("invalid url '{s}'"));
                    }
                }
            },
            (FieldKind::Number, Value::Number(_))
            | (FieldKind::Boolean, Value::Bool(_))
            | (FieldKind::Null, Value::Null) => {}
            (FieldKind::OneOf(options), Value::String(s)) => {
                if !options.iter().any(|o| o == s) {
                    push(
                        issues,
                        path,
                        format!("'{s}' is not one of [{}]", options.join(", ")),
                    );
                }
            }
            (FieldKind::Array(item), Value::Array(values)) => {
                for (i, v) in values.iter().enumerate() {
                    item.check(v, &join_path(path, &format!("[{i}]")), issues);
                }
            }
            (FieldKind::Object(fields), Value::Object(map)) => {
                for (name, field) in fields {
                    field.check_in(map, name, &join_path(path, name), issues);
                }
            }
            (expected, actual) => push(
                issues,
                path,
                format!("expected {}, got {}", expected.name(), describe(actual)),
            ),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FieldKind::String(StringFormat::Plain) => "string",
            FieldKind::String(StringFormat::Email) => "email string",
            FieldKind::String(StringFormat::Url) => "url string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Null => "null",
            FieldKind::OneOf(_) => "option string",
            FieldKind::Array(_) => "array",
            FieldKind::Object(_) => "object",
        }
    }
}

impl FieldSchema {
    /// Check field `name` of `map`, honoring how an empty value is represented
    pub(crate) fn check_in(
        &self,
        map: &JsonObject,
        name: &str,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) {
        match (map.get(name), self.presence()) {
            (None, Presence::Optional | Presence::OptionalNullable) => {}
            (None, _) => push(issues, path, "required field is missing".to_string()),
            (Some(Value::Null), Presence::Nullable | Presence::OptionalNullable) => {}
            (Some(value), _) => self.kind().check(value, path, issues),
        }
    }
}
