use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;
use turnstile_order::PurchaseSummary;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub purchase_id: Uuid,
    pub processed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: PurchaseSummary,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/purchases", post(purchase_tickets))
}

async fn purchase_tickets(
    State(state): State<AppState>,
    // Untyped so malformed fields are reported by the purchase rules
    // rather than rejected by the extractor.
    Json(body): Json<Value>,
) -> Result<Json<PurchaseResponse>, AppError> {
    let purchase_id = Uuid::new_v4();
    let summary = tracing::info_span!("purchase", %purchase_id).in_scope(|| {
        state.ticket_service.purchase_body(&body)
    })?;

    Ok(Json(PurchaseResponse {
        purchase_id,
        processed_at: Utc::now(),
        summary,
    }))
}
