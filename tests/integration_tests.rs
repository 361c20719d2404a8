//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config → access grant → HTTP requests →
//! validated, typed rows

use futures::future::join_all;
use serde::Deserialize;
use serde_json::json;
use seatable_client::schema::{query_types, row_types};
use seatable_client::{
    AuthState, Base, ClientConfig, Error, ListRowsOptions, OrderDirection, Row, RowAnchor,
    RowSchema, RowUpdate, WebhookEvent,
};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UUID: &str = "6f1e2d3c4b5a49788796a5b4c3d2e1f0";

async fn mount_grant(server: &MockServer, calls: std::ops::RangeInclusive<u64>) {
    Mock::given(method("GET"))
        .and(path("/api/v2.1/dtable/app-access-token/"))
        .and(header("Authorization", "Token api-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app_name": "integration",
            "access_token": "grant-token",
            "dtable_uuid": UUID,
            "dtable_server": format!("{}/", server.uri()),
            "dtable_socket": format!("{}/", server.uri()),
            "workspace_id": 7,
            "dtable_name": "Projects"
        })))
        .expect(calls)
        .mount(server)
        .await;
}

#[derive(Debug, Deserialize, PartialEq)]
struct Project {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Budget")]
    budget: Option<f64>,
    #[serde(rename = "Status")]
    status: Option<String>,
}

// ============================================================================
// Typed Rows
// ============================================================================

#[tokio::test]
async fn test_query_into_typed_rows() {
    let server = MockServer::start().await;
    mount_grant(&server, 1..=1).await;

    Mock::given(method("POST"))
        .and(path(format!("/dtable-db/api/v1/query/{UUID}/")))
        .and(header("Authorization", "Token grant-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": [],
            "results": [
                {"_id": "p1", "Name": "Apollo", "Budget": 1200.5, "Status": "Active"},
                {"_id": "p2", "Name": null, "Budget": null, "Status": null}
            ]
        })))
        .mount(&server)
        .await;

    let base = Base::new(&server.uri(), "api-token");
    let schema = RowSchema::for_query_with_id()
        .column("Name", query_types::text())
        .column("Budget", query_types::dollar())
        .column("Status", query_types::single_select(["Active", "Closed"]));

    let projects: Vec<Project> = base
        .query("SELECT _id, Name, Budget, Status FROM Projects", &schema)
        .await
        .unwrap();

    assert_eq!(
        projects,
        vec![
            Project {
                id: "p1".to_string(),
                name: Some("Apollo".to_string()),
                budget: Some(1200.5),
                status: Some("Active".to_string()),
            },
            Project {
                id: "p2".to_string(),
                name: None,
                budget: None,
                status: None,
            },
        ]
    );
}

#[tokio::test]
async fn test_row_listing_through_table_handle() {
    let server = MockServer::start().await;
    mount_grant(&server, 1..=1).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/dtables/{UUID}/rows/")))
        .and(query_param("table_name", "Projects"))
        .and(query_param("order_by", "Budget"))
        .and(query_param("direction", "ASC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [
                {"_id": "p1", "_ctime": "2024-01-01T00:00:00Z", "Name": "Apollo"},
                {"_id": "p2", "_ctime": "2024-01-02T00:00:00Z", "Status": "Closed"}
            ]
        })))
        .mount(&server)
        .await;

    let base = Base::new(&server.uri(), "api-token");
    let projects = base.table("Projects");
    let schema = RowSchema::for_rows()
        .column("Name", row_types::text())
        .column("Budget", row_types::dollar())
        .column("Status", row_types::single_select(["Active", "Closed"]));

    let rows: Vec<Project> = projects
        .get_rows(
            &schema,
            &ListRowsOptions::new().order_by("Budget", OrderDirection::Asc),
        )
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name.as_deref(), Some("Apollo"));
    assert_eq!(rows[1].status.as_deref(), Some("Closed"));
    assert!(rows[1].budget.is_none());
}

#[tokio::test]
async fn test_unknown_fields_pass_through() {
    let server = MockServer::start().await;
    mount_grant(&server, 1..=1).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/dtables/{UUID}/rows/p1/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "p1",
            "Name": "Apollo",
            "Undeclared": [1, 2, 3]
        })))
        .mount(&server)
        .await;

    let base = Base::new(&server.uri(), "api-token");
    let schema = RowSchema::for_rows().column("Name", row_types::text());
    let row: Row = base.get_row("Projects", "p1", &schema, None).await.unwrap();

    assert_eq!(row["Undeclared"], json!([1, 2, 3]));
}

// ============================================================================
// Write Flow
// ============================================================================

#[tokio::test]
async fn test_add_update_delete_flow() {
    let server = MockServer::start().await;
    mount_grant(&server, 1..=1).await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/dtables/{UUID}/rows/")))
        .and(body_json(json!({
            "table_name": "Projects",
            "row": {"Name": "Gemini"},
            "anchor_row_id": "p1",
            "row_insert_position": "insert_after"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "p3",
            "Name": "Gemini"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/dtables/{UUID}/batch-update-rows/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/dtables/{UUID}/batch-delete-rows")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted_rows": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let base = Base::new(&server.uri(), "api-token");
    let projects = base.table("Projects");

    let created = projects
        .add_row(&json!({"Name": "Gemini"}), Some(&RowAnchor::after("p1")))
        .await
        .unwrap();
    assert_eq!(created.id, "p3");
    assert_eq!(created.extra["Name"], json!("Gemini"));

    assert_ok!(
        projects
            .update_rows(&[RowUpdate::new(created.id.clone(), json!({"Status": "Active"}))])
            .await
    );
    assert_ok!(projects.delete_rows(&[created.id.as_str()]).await);
}

#[tokio::test]
async fn test_rejected_write_is_operation_failed() {
    let server = MockServer::start().await;
    mount_grant(&server, 1..=1).await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/dtables/{UUID}/rows/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let base = Base::new(&server.uri(), "api-token");
    let err = assert_err!(base.update_row("Projects", "p1", &json!({"Name": "x"})).await);
    assert!(matches!(err, Error::OperationFailed { .. }));
}

// ============================================================================
// Access Grant
// ============================================================================

#[tokio::test]
async fn test_concurrent_operations_share_a_grant() {
    let server = MockServer::start().await;
    mount_grant(&server, 1..=5).await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/dtables/{UUID}/rows/")))
        .and(header("Authorization", "Token grant-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(5)
        .mount(&server)
        .await;

    let base = Base::new(&server.uri(), "api-token");
    let ids = ["a", "b", "c", "d", "e"];
    let results = join_all(ids.iter().map(|id| base.delete_row("Projects", id))).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(base.auth_state().await, AuthState::Authenticated);
    assert_eq!(base.access_grant().await.unwrap().access_token, "grant-token");
}

#[tokio::test]
async fn test_grant_reused_across_operations() {
    let server = MockServer::start().await;
    mount_grant(&server, 1..=1).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/dtables/{UUID}/rows/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": []})))
        .expect(3)
        .mount(&server)
        .await;

    let base = Base::new(&server.uri(), "api-token");
    for _ in 0..3 {
        let rows: Vec<Row> = base
            .get_rows("Projects", &RowSchema::for_rows(), &ListRowsOptions::new())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}

// ============================================================================
// Config
// ============================================================================

#[tokio::test]
async fn test_base_from_config() {
    let server = MockServer::start().await;
    mount_grant(&server, 1..=1).await;

    let config = ClientConfig::from_yaml_str(&format!(
        "server_url: {}/\napi_token: api-token\nhttp:\n  timeout_secs: 10\n",
        server.uri()
    ))
    .unwrap();

    let base = config.base().unwrap();
    assert_eq!(base.url(), server.uri());
    assert_ok!(base.auth().await);
    assert_eq!(base.access_grant().await.unwrap().dtable_uuid, UUID);
}

#[tokio::test]
async fn test_admin_from_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api2/auth-token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "t"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2.1/user-common-info/someone@auth.local"))
        .and(header("Authorization", "Token t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "someone@auth.local",
            "name": "Someone",
            "avatar_url": "https://example.com/avatar.png"
        })))
        .mount(&server)
        .await;

    let mut config = ClientConfig::new(server.uri());
    config.username = Some("admin@example.com".to_string());
    config.password = Some("secret".to_string());

    let admin = config.admin().await.unwrap();
    let user = admin.get_user("someone@auth.local").await.unwrap();
    assert_eq!(user.name, "Someone");
    assert!(user.contact_email.is_none());
}

// ============================================================================
// Webhooks
// ============================================================================

#[test]
fn test_webhook_payload() {
    let body = json!({
        "event": "update",
        "data": {
            "dtable_uuid": UUID,
            "row_id": "Rk2oEFaQTp2Gyn4ybZkHSA",
            "op_user": "someone@auth.local",
            "op_type": "delete_row",
            "op_time": 1_712_000_000.0,
            "table_id": "0000",
            "table_name": "Projects",
            "row_name": "Apollo",
            "row_data": [{
                "column_key": "0000",
                "column_name": "Name",
                "column_type": "text",
                "column_data": null,
                "old_value": "Apollo"
            }]
        }
    })
    .to_string();

    // column_data must be an object
    assert_err!(WebhookEvent::from_slice(body.as_bytes()));

    let fixed = body.replace("\"column_data\":null", "\"column_data\":{}");
    let event = assert_ok!(WebhookEvent::from_slice(fixed.as_bytes()));
    assert_eq!(event.data.table_name, "Projects");
    assert_eq!(event.data.row_data[0].value, json!(null));
}
