//! Admin settings endpoints.

use axum::{extract::State, Json};
use tracing::info;

use domain::models::{RegistrationSettings, UpdateSettingsRequest};
use persistence::repositories::SettingsRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /register/settings
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<RegistrationSettings>, ApiError> {
    let entity = SettingsRepository::new(state.pool.clone())
        .get_or_create()
        .await?;
    Ok(Json(entity.into()))
}

/// PATCH /register/settings
///
/// Replaces the gate configuration. Rejects windows that end before they
/// start and non-positive capacities.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<RegistrationSettings>, ApiError> {
    request.validate_rules()?;

    let entity = SettingsRepository::new(state.pool.clone())
        .update(
            request.enabled,
            request.starts_at,
            request.ends_at,
            request.max_capacity,
        )
        .await?;

    info!(
        enabled = request.enabled,
        max_capacity = ?request.max_capacity,
        "Updated registration settings"
    );

    Ok(Json(entity.into()))
}
