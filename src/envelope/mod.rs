//! Response envelope schemas
//!
//! Fixed-shape payloads exchanged with SeaTable: the response body of each
//! endpoint and the inbound webhook notification. Deserialization checks
//! structure; [`Envelope::check`] adds the constraints serde cannot express.

mod types;
mod webhook;

pub use types::{
    AddRowResponse, AddRowsResponse, AdminAuthTokenResponse, AppAccessTokenResponse,
    ListRowsResponse, QueryResponse, SuccessAck, User,
};
pub use webhook::{ColumnChange, ColumnData, OpType, WebhookData, WebhookEvent, WebhookEventKind};

use crate::schema::{ValidationError, ValidationIssue};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A response body with a fixed shape
pub trait Envelope: DeserializeOwned {
    /// Constraints beyond the serde shape (formats, lengths)
    fn check(&self, _issues: &mut Vec<ValidationIssue>) {}
}

/// Deserialize and check an envelope
pub fn parse<T: Envelope>(value: Value) -> Result<T, ValidationError> {
    let parsed: T = serde_json::from_value(value).map_err(|e| ValidationError::from_serde("", &e))?;
    let mut issues = Vec::new();
    parsed.check(&mut issues);
    if issues.is_empty() {
        Ok(parsed)
    } else {
        Err(ValidationError::new(issues))
    }
}
