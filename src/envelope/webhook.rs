//! Webhook notifications pushed by SeaTable

use super::{parse, Envelope};
use crate::schema::{ValidationError, ValidationIssue};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Kind of webhook event; SeaTable only sends `update`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventKind {
    Update,
}

/// Row operation that triggered the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpType {
    InsertRow,
    DeleteRow,
    ModifyRow,
}

/// Top-level webhook payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub event: WebhookEventKind,
    pub data: WebhookData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookData {
    pub dtable_uuid: String,
    pub row_id: String,
    pub op_user: String,
    pub op_type: OpType,
    pub op_time: f64,
    pub table_id: String,
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<f64>,
    pub row_name: String,
    pub row_data: Vec<ColumnChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_app: Option<String>,
}

/// Old and new value of one column of the affected row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnChange {
    pub column_key: String,
    pub column_name: String,
    pub column_type: String,
    pub column_data: ColumnData,
    #[serde(default)]
    pub value: JsonValue,
    #[serde(default)]
    pub old_value: JsonValue,
}

/// Column settings attached to a change; unknown settings are kept
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_send_notification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_fill_default_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_check_format: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_specification_value: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_check_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_collaborator_type: Option<String>,
    #[serde(default)]
    pub default_value: JsonValue,
    #[serde(flatten)]
    pub extra: JsonObject,
}

fn issue(issues: &mut Vec<ValidationIssue>, path: &str, message: String) {
    issues.push(ValidationIssue {
        path: path.to_string(),
        message,
    });
}

impl Envelope for WebhookEvent {
    fn check(&self, issues: &mut Vec<ValidationIssue>) {
        let data = &self.data;
        if data.dtable_uuid.chars().count() > 32 {
            issue(issues, "data.dtable_uuid", "longer than 32 characters".to_string());
        }
        if data.row_id.chars().count() > 22 {
            issue(issues, "data.row_id", "longer than 22 characters".to_string());
        }
        if data.table_id.chars().count() != 4 {
            issue(issues, "data.table_id", "must be exactly 4 characters".to_string());
        }
        if data.row_data.is_empty() {
            issue(issues, "data.row_data", "must contain at least 1 entry".to_string());
        }
        for (i, change) in data.row_data.iter().enumerate() {
            let key = &change.column_key;
            if key.chars().count() != 4 && !key.starts_with('_') {
                issue(
                    issues,
                    &format!("data.row_data[{i}].column_key"),
                    format!("'{key}' is neither a 4 character key nor a system column"),
                );
            }
        }
    }
}

impl WebhookEvent {
    /// Validate a received webhook body
    pub fn from_json(value: JsonValue) -> Result<Self, ValidationError> {
        parse(value)
    }

    /// Validate raw webhook bytes
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
        let value: JsonValue = serde_json::from_slice(body)
            .map_err(|e| ValidationError::single("", format!("body is not valid JSON: {e}")))?;
        Self::from_json(value)
    }
}
