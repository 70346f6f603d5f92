use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use turnstile_order::PurchaseError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    UpstreamError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UpstreamError(msg) => {
                tracing::error!("Upstream service error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<PurchaseError> for AppError {
    fn from(err: PurchaseError) -> Self {
        if err.is_rejection() {
            Self::ValidationError(err.to_string())
        } else {
            Self::UpstreamError(err.to_string())
        }
    }
}
