//! Base client
//!
//! Row and SQL operations against one base. Every operation makes sure a
//! fresh access grant is cached, sends its request, and validates the
//! response before handing typed data back.

use super::table::Table;
use crate::auth::{normalize_server_url, AccessGrant, AuthState, Authenticator};
use crate::envelope::{
    self, AddRowResponse, AddRowsResponse, ListRowsResponse, QueryResponse, SuccessAck,
};
use crate::error::{Error, Result};
use crate::http::{endpoint_url, HttpClient, RequestConfig};
use crate::schema::RowSchema;
use crate::types::{JsonValue, OrderDirection, RowAnchor, RowUpdate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

/// Optional parameters of a row listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRowsOptions {
    /// Only rows visible in this view, in its order
    pub view_name: Option<String>,
    /// Column to sort by
    pub order_by: Option<String>,
    pub direction: Option<OrderDirection>,
    /// Offset of the first row
    pub start: Option<u64>,
    /// Maximum number of rows
    pub limit: Option<u64>,
}

impl ListRowsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn view(mut self, view_name: impl Into<String>) -> Self {
        self.view_name = Some(view_name.into());
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, direction: OrderDirection) -> Self {
        self.order_by = Some(column.into());
        self.direction = Some(direction);
        self
    }

    #[must_use]
    pub fn start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Connection to one SeaTable base
#[derive(Debug)]
pub struct Base {
    http_client: HttpClient,
    authenticator: Authenticator,
}

impl Base {
    /// Connect to the base behind `url` with its API token
    ///
    /// No request is made until the first operation.
    pub fn new(url: &str, api_token: impl Into<String>) -> Self {
        Self::with_http_client(url, api_token, HttpClient::new())
    }

    /// Connect using a preconfigured HTTP client
    pub fn with_http_client(url: &str, api_token: impl Into<String>, http_client: HttpClient) -> Self {
        let authenticator =
            Authenticator::new(normalize_server_url(url), api_token, http_client.clone());
        Self {
            http_client,
            authenticator,
        }
    }

    /// Management URL of the base
    pub fn url(&self) -> &str {
        self.authenticator.url()
    }

    /// Handle for one table of this base
    pub fn table(&self, name: impl Into<String>) -> Table<'_> {
        Table::new(self, name)
    }

    /// Request a new access grant now, replacing the cached one
    pub async fn auth(&self) -> Result<()> {
        self.authenticator.authenticate().await.map(|_| ())
    }

    pub async fn auth_state(&self) -> AuthState {
        self.authenticator.state().await
    }

    /// The cached access grant, if any
    pub async fn access_grant(&self) -> Option<AccessGrant> {
        self.authenticator.grant().await
    }

    #[cfg(test)]
    pub(crate) fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    // ========================================================================
    // SQL
    // ========================================================================

    /// Run a read-only SQL statement, with column keys converted to names
    pub async fn query<T: DeserializeOwned>(&self, sql: &str, row_schema: &RowSchema) -> Result<Vec<T>> {
        self.query_with(sql, row_schema, true).await
    }

    /// Run a read-only SQL statement
    ///
    /// `convert_keys` asks the service to return column names instead of
    /// internal column keys.
    pub async fn query_with<T: DeserializeOwned>(
        &self,
        sql: &str,
        row_schema: &RowSchema,
        convert_keys: bool,
    ) -> Result<Vec<T>> {
        let grant = self.authenticator.ensure_grant().await?;
        let url = format!("{}/api/v1/query/{}/", grant.db_server, grant.dtable_uuid);

        let body = self
            .http_client
            .post_json(
                &url,
                RequestConfig::new()
                    .token(grant.access_token)
                    .json(json!({ "sql": sql, "convert_keys": convert_keys })),
            )
            .await?;

        let response: QueryResponse = envelope::parse(body)?;
        debug!("Query returned {} rows", response.results.len());
        let rows = response.results.into_iter().map(JsonValue::Object).collect();
        Ok(row_schema.parse_all(rows, "results")?)
    }

    // ========================================================================
    // Rows
    // ========================================================================

    /// Fetch one row by id
    ///
    /// An unknown row id fails with a transport error for which
    /// [`Error::is_not_found`] is true.
    pub async fn get_row<T: DeserializeOwned>(
        &self,
        table_name: &str,
        row_id: &str,
        row_schema: &RowSchema,
        convert_keys: Option<bool>,
    ) -> Result<T> {
        let grant = self.authenticator.ensure_grant().await?;
        let url = endpoint_url(
            &grant.server,
            &["api", "v1", "dtables", grant.dtable_uuid.as_str(), "rows", row_id],
            true,
        )?;

        let body = self
            .http_client
            .get_json(
                &url,
                RequestConfig::new()
                    .token(grant.access_token)
                    .query("table_name", table_name)
                    .query_opt("convert", convert_keys),
            )
            .await?;

        Ok(row_schema.parse(body)?)
    }

    /// Fetch a page of rows
    pub async fn get_rows<T: DeserializeOwned>(
        &self,
        table_name: &str,
        row_schema: &RowSchema,
        options: &ListRowsOptions,
    ) -> Result<Vec<T>> {
        let grant = self.authenticator.ensure_grant().await?;
        let url = format!("{}/api/v1/dtables/{}/rows/", grant.server, grant.dtable_uuid);

        let body = self
            .http_client
            .get_json(
                &url,
                RequestConfig::new()
                    .token(grant.access_token)
                    .query("table_name", table_name)
                    .query_opt("view_name", options.view_name.as_deref())
                    .query_opt("order_by", options.order_by.as_deref())
                    .query_opt("direction", options.direction)
                    .query_opt("start", options.start)
                    .query_opt("limit", options.limit),
            )
            .await?;

        let response: ListRowsResponse = envelope::parse(body)?;
        let rows = response.rows.into_iter().map(JsonValue::Object).collect();
        Ok(row_schema.parse_all(rows, "rows")?)
    }

    /// Insert one row, optionally next to an anchor row
    pub async fn add_row<R: Serialize>(
        &self,
        table_name: &str,
        row: &R,
        anchor: Option<&RowAnchor>,
    ) -> Result<AddRowResponse> {
        let grant = self.authenticator.ensure_grant().await?;
        let url = format!("{}/api/v1/dtables/{}/rows/", grant.server, grant.dtable_uuid);

        let mut payload = json!({
            "table_name": table_name,
            "row": serde_json::to_value(row)?,
        });
        if let Some(anchor) = anchor {
            payload["anchor_row_id"] = json!(anchor.row_id);
            payload["row_insert_position"] = serde_json::to_value(anchor.position)?;
        }

        let body = self
            .http_client
            .post_json(&url, RequestConfig::new().token(grant.access_token).json(payload))
            .await?;

        Ok(envelope::parse(body)?)
    }

    /// Insert rows in bulk, returning how many the service inserted
    pub async fn add_rows<R: Serialize>(&self, table_name: &str, rows: &[R]) -> Result<u64> {
        let grant = self.authenticator.ensure_grant().await?;
        let url = format!(
            "{}/api/v1/dtables/{}/batch-append-rows/",
            grant.server, grant.dtable_uuid
        );

        let payload = json!({
            "table_name": table_name,
            "rows": serde_json::to_value(rows)?,
        });

        let body = self
            .http_client
            .post_json(&url, RequestConfig::new().token(grant.access_token).json(payload))
            .await?;

        let response: AddRowsResponse = envelope::parse(body)?;
        if response.inserted_row_count != rows.len() as u64 {
            debug!(
                "Inserted {} of {} rows into {}",
                response.inserted_row_count,
                rows.len(),
                table_name
            );
        }
        Ok(response.inserted_row_count)
    }

    /// Update fields of one row
    pub async fn update_row<R: Serialize>(&self, table_name: &str, row_id: &str, row: &R) -> Result<()> {
        let grant = self.authenticator.ensure_grant().await?;
        let url = format!("{}/api/v1/dtables/{}/rows/", grant.server, grant.dtable_uuid);

        let payload = json!({
            "table_name": table_name,
            "row_id": row_id,
            "row": serde_json::to_value(row)?,
        });

        let body = self
            .http_client
            .put_json(&url, RequestConfig::new().token(grant.access_token).json(payload))
            .await?;

        check_ack(body)
    }

    /// Update fields of several rows
    pub async fn update_rows<R: Serialize>(
        &self,
        table_name: &str,
        updates: &[RowUpdate<R>],
    ) -> Result<()> {
        let grant = self.authenticator.ensure_grant().await?;
        let url = format!(
            "{}/api/v1/dtables/{}/batch-update-rows/",
            grant.server, grant.dtable_uuid
        );

        let payload = json!({
            "table_name": table_name,
            "updates": serde_json::to_value(updates)?,
        });

        let body = self
            .http_client
            .put_json(&url, RequestConfig::new().token(grant.access_token).json(payload))
            .await?;

        check_ack(body)
    }

    /// Delete one row
    pub async fn delete_row(&self, table_name: &str, row_id: &str) -> Result<()> {
        let grant = self.authenticator.ensure_grant().await?;
        let url = format!("{}/api/v1/dtables/{}/rows/", grant.server, grant.dtable_uuid);

        let payload = json!({
            "table_name": table_name,
            "row_id": row_id,
        });

        let body = self
            .http_client
            .delete_json(&url, RequestConfig::new().token(grant.access_token).json(payload))
            .await?;

        check_ack(body)
    }

    /// Delete several rows
    pub async fn delete_rows<S: AsRef<str>>(&self, table_name: &str, row_ids: &[S]) -> Result<()> {
        let grant = self.authenticator.ensure_grant().await?;
        let url = format!(
            "{}/api/v1/dtables/{}/batch-delete-rows",
            grant.server, grant.dtable_uuid
        );

        let ids: Vec<&str> = row_ids.iter().map(AsRef::as_ref).collect();
        let payload = json!({
            "table_name": table_name,
            "row_ids": ids,
        });

        let body = self
            .http_client
            .delete_json(&url, RequestConfig::new().token(grant.access_token).json(payload))
            .await?;

        check_ack(body)
    }
}

/// Accept an acknowledgement unless it explicitly reports `success: false`
fn check_ack(body: JsonValue) -> Result<()> {
    let ack: SuccessAck = envelope::parse(body.clone())?;
    if ack.is_success() {
        Ok(())
    } else {
        warn!("Service reported failure: {}", body);
        Err(Error::operation_failed(body))
    }
}
