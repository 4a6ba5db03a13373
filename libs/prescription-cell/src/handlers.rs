// libs/prescription-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::User;

use crate::models::PrescriptionRequest;
use crate::services::PrescriptionService;

/// Always answers 202; delivery problems are only logged.
#[axum::debug_handler]
pub async fn send_prescription(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<PrescriptionRequest>,
) -> (StatusCode, Json<Value>) {
    debug!("User {} requested prescription for {}", user.id, request.email);
    let service = PrescriptionService::from_config(&state);

    service.send_prescription(request).await;

    (StatusCode::ACCEPTED, Json(json!({ "message": "Prescription accepted" })))
}
