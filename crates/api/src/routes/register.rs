//! Public registration endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::Serialize;

use domain::gate::{self, GateStatus};
use domain::models::{Registration, SubmitRegistrationRequest};
use persistence::repositories::{RegistrationRepository, SettingsRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::registration::RegistrationService;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub registration: Registration,
    pub confirmation: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStatusResponse {
    #[serde(flatten)]
    pub gate: GateStatus,
    pub current_count: i64,
}

/// POST /register
///
/// Accepts one public submission. Answers 403 with the gate status when
/// admission is closed, 409 on a duplicate registrant.
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(request): Json<SubmitRegistrationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = RegistrationService::new(state.pool.clone(), state.notifier.clone());
    let registration = service.submit(request).await?;

    let confirmation = format!(
        "Dear {}, your registration for {} is confirmed.",
        registration.full_name, state.config.conference.name
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            registration,
            confirmation,
        }),
    ))
}

/// GET /register/status
///
/// The gate decision at this instant, plus the current registration count.
pub async fn registration_status(
    State(state): State<AppState>,
) -> Result<Json<RegistrationStatusResponse>, ApiError> {
    let settings = SettingsRepository::new(state.pool.clone())
        .get_or_create()
        .await?;
    let current_count = RegistrationRepository::new(state.pool.clone())
        .count()
        .await?;

    let gate = gate::evaluate(&settings.into(), current_count, Utc::now());

    Ok(Json(RegistrationStatusResponse {
        gate,
        current_count,
    }))
}
