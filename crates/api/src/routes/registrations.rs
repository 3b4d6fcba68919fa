//! Admin registration listing, export, and edit endpoints.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use domain::models::{
    AttendanceFilter, AttendanceRequest, Registration, UpdateRegistrationRequest, VehicleFilter,
};
use persistence::repositories::{is_duplicate_key, RegistrationFilter, RegistrationRepository};

use crate::app::AppState;
use crate::error::ApiError;

/// Query parameters shared by listing and export.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring over name and contact number.
    pub q: Option<String>,
    pub vehicle: Option<VehicleFilter>,
    pub attendance: Option<AttendanceFilter>,
}

impl ListQuery {
    fn into_filter(self) -> RegistrationFilter {
        RegistrationFilter {
            search: self
                .q
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(String::from),
            has_vehicle: self.vehicle.map(VehicleFilter::as_bool),
            confirmed_attendance: self.attendance.map(AttendanceFilter::as_bool),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub registrations: Vec<Registration>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationEnvelope {
    pub registration: Registration,
}

/// Runs the filtered listing with the configured bounded wait. On expiry the
/// wait is abandoned (the query itself is not cancelled) and 504 surfaces.
async fn load_registrations(
    state: &AppState,
    query: ListQuery,
) -> Result<Vec<Registration>, ApiError> {
    let repo = RegistrationRepository::new(state.pool.clone());
    let filter = query.into_filter();
    let bound = Duration::from_secs(state.config.server.list_timeout_secs);

    let rows = tokio::time::timeout(bound, repo.list(&filter))
        .await
        .map_err(|_| ApiError::Timeout("Listing registrations took too long.".to_string()))??;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// GET /api/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let registrations = load_registrations(&state, query).await?;
    Ok(Json(ListResponse { registrations }))
}

/// GET /api/registrations/export
///
/// Same filters as the listing, rendered as CSV.
pub async fn export_registrations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let registrations = load_registrations(&state, query).await?;
    let csv = to_csv(&registrations);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=registrations.csv",
            ),
        ],
        csv,
    ))
}

/// PATCH /api/registrations/:id
pub async fn update_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRegistrationRequest>,
) -> Result<Json<RegistrationEnvelope>, ApiError> {
    request.validate_rules()?;
    let patch = request.into_new_registration();

    let updated = RegistrationRepository::new(state.pool.clone())
        .update_by_id(id, &patch)
        .await
        .map_err(|err| {
            if is_duplicate_key(&err) {
                ApiError::duplicate_registration()
            } else {
                ApiError::from(err)
            }
        })?;

    match updated {
        Some(entity) => Ok(Json(RegistrationEnvelope {
            registration: entity.into(),
        })),
        None => Err(ApiError::NotFound("Registration not found.".to_string())),
    }
}

/// PATCH /api/registrations/:id/attendance
pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AttendanceRequest>,
) -> Result<Json<RegistrationEnvelope>, ApiError> {
    let updated = RegistrationRepository::new(state.pool.clone())
        .set_attendance(id, request.confirmed_attendance)
        .await?;

    match updated {
        Some(entity) => Ok(Json(RegistrationEnvelope {
            registration: entity.into(),
        })),
        None => Err(ApiError::NotFound("Registration not found.".to_string())),
    }
}

const CSV_HEADER: &str = "Name,Contact,Email,Church,Role/Ministry,Has Vehicle,Plate Number,Confirmed Attendance,Date Registered";

fn to_csv(registrations: &[Registration]) -> String {
    let mut lines = Vec::with_capacity(registrations.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for registration in registrations {
        let registered_at = registration
            .created_at
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let fields = [
            registration.full_name.as_str(),
            registration.contact_number.as_str(),
            registration.email.as_deref().unwrap_or(""),
            registration.church.as_str(),
            registration.role.as_deref().unwrap_or(""),
            yes_no(registration.has_vehicle),
            registration.plate_number.as_deref().unwrap_or(""),
            yes_no(registration.confirmed_attendance),
            registered_at.as_str(),
        ];
        let line: Vec<String> = fields.iter().map(|field| csv_field(field)).collect();
        lines.push(line.join(","));
    }

    lines.join("\n")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Quotes a CSV value, doubling any internal quotes.
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
