// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{AppointmentError, CreateAppointmentRequest, UpdateAppointmentRequest};
use crate::services::AppointmentService;

impl From<AppointmentError> for AppError {
    fn from(e: AppointmentError) -> Self {
        match e {
            AppointmentError::NotFound => AppError::NotFound("This appointment does not exist".to_string()),
            AppointmentError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    debug!("User {} booking appointment", user.id);
    let service = AppointmentService::from_config(&state, auth.token());

    let appointment = service.create_appointment(request).await?;

    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(state): State<Arc<AppConfig>>,
    Path(national_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::from_config(&state, auth.token());

    let appointments = service.appointments_by_patient(&national_id).await?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_professional_appointments(
    State(state): State<Arc<AppConfig>>,
    Path(council_number): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::from_config(&state, auth.token());

    let appointments = service.appointments_by_professional(&council_number).await?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_tomorrow_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::from_config(&state, auth.token());

    let appointments = service.appointments_tomorrow().await?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_wait_list(
    State(state): State<Arc<AppConfig>>,
    Path(council_number): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::from_config(&state, auth.token());

    let late_appointments = service.wait_list(&council_number).await?;

    Ok(Json(json!(late_appointments)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::from_config(&state, auth.token());

    let appointment = service.get_appointment(appointment_id).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} updating appointment {}", user.id, appointment_id);
    let service = AppointmentService::from_config(&state, auth.token());

    let updated = service.update_appointment(appointment_id, request).await?;

    Ok(Json(json!(updated)))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} cancelling appointment {}", user.id, appointment_id);
    let service = AppointmentService::from_config(&state, auth.token());

    let deleted = service.delete_appointment(appointment_id).await?;

    Ok(Json(json!(deleted)))
}
