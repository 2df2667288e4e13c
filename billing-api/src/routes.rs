use axum::http::StatusCode;
use axum::Json;
use log::info;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: &'static str,
}

/// POST /api/billing
/// Accepts any JSON document, logs it and acknowledges. Nothing is stored.
pub async fn receive_billing(Json(payload): Json<Value>) -> (StatusCode, Json<Ack>) {
    info!("received billing data: {}", payload);
    (
        StatusCode::OK,
        Json(Ack {
            message: "Data received successfully",
        }),
    )
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "billing-api"
    }))
}
