//! Response envelopes of the SeaTable REST endpoints

use super::Envelope;
use crate::schema::ValidationIssue;
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};

fn check_url(field: &str, value: &str, issues: &mut Vec<ValidationIssue>) {
    if url::Url::parse(value).is_err() {
        issues.push(ValidationIssue {
            path: field.to_string(),
            message: format!("invalid url '{value}'"),
        });
    }
}

/// `GET /api/v2.1/dtable/app-access-token/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppAccessTokenResponse {
    pub app_name: String,
    pub access_token: String,
    pub dtable_uuid: String,
    /// Host serving row CRUD
    pub dtable_server: String,
    /// Host whose `dtable-db` path serves SQL queries
    pub dtable_socket: String,
    pub workspace_id: i64,
    pub dtable_name: String,
}

impl Envelope for AppAccessTokenResponse {
    fn check(&self, issues: &mut Vec<ValidationIssue>) {
        check_url("dtable_server", &self.dtable_server, issues);
        check_url("dtable_socket", &self.dtable_socket, issues);
    }
}

/// `POST /api/v1/query/{uuid}/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub metadata: Vec<JsonObject>,
    pub results: Vec<JsonObject>,
}

impl Envelope for QueryResponse {}

/// `GET /api/v1/dtables/{uuid}/rows/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRowsResponse {
    pub rows: Vec<JsonObject>,
}

impl Envelope for ListRowsResponse {}

/// `POST /api/v1/dtables/{uuid}/rows/`: the created row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRowResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_creator", default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(
        rename = "_last_modifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modifier: Option<String>,
    /// Remaining columns of the created row
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Envelope for AddRowResponse {}

/// `POST /api/v1/dtables/{uuid}/batch-append-rows/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRowsResponse {
    pub inserted_row_count: u64,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Envelope for AddRowsResponse {}

/// Acknowledgement of update and delete calls
///
/// The service leaves `success` out on some successful paths, so a missing
/// flag counts as success.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuccessAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl SuccessAck {
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }
}

impl Envelope for SuccessAck {}

/// `POST /api2/auth-token/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAuthTokenResponse {
    pub token: String,
}

impl Envelope for AdminAuthTokenResponse {}

/// `GET /api/v2.1/user-common-info/{user_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

impl Envelope for User {}
