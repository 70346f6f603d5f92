use axum::{extract::State, routing::get, Json, Router};
use turnstile_catalog::TicketPolicy;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/policy", get(get_policy))
}

/// Active prices, seat allocations and ticket ceiling.
async fn get_policy(State(state): State<AppState>) -> Json<TicketPolicy> {
    Json(state.ticket_service.policy().clone())
}
