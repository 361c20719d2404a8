//! Webhook receiver
//!
//! Accepts SeaTable webhook notifications and validates each one before
//! logging it.

use axum::{
    body::Bytes,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use crate::envelope::WebhookEvent;
use crate::error::{Error, Result};

/// Routes of the webhook receiver
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(receive_webhook))
        .layer(TraceLayer::new_for_http())
}

/// Start the webhook receiver
pub async fn serve(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening for webhooks on http://{}/webhook", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, router())
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn receive_webhook(body: Bytes) -> impl IntoResponse {
    match WebhookEvent::from_slice(&body) {
        Ok(event) => {
            let data = &event.data;
            tracing::info!(
                base = %data.dtable_uuid,
                table = %data.table_name,
                row = %data.row_id,
                op = ?data.op_type,
                changes = data.row_data.len(),
                "Webhook received"
            );
            (StatusCode::OK, Json(json!({ "status": "ok" })))
        }
        Err(err) => {
            tracing::warn!("Rejected webhook: {}", err);
            let issues: Vec<_> = err
                .issues()
                .iter()
                .map(|i| json!({ "path": i.path, "message": i.message }))
                .collect();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "status": "invalid", "issues": issues })),
            )
        }
    }
}
